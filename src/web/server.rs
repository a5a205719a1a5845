use axum::{
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::config::SearchConfig;
use crate::lookup::client::HttpLookupClient;
use crate::lookup::LookupService;
use crate::navigation::{SearchResponse, UNRESOLVED_MESSAGE};
use crate::resolver::Resolver;
use crate::utils::validation::validate_query;

/// Whole-request deadline; must exceed two sequential upstream lookups
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state
pub struct AppState<L> {
    pub resolver: Resolver<L>,
}

/// Enhanced error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Error body carrying only the error kind and a user-facing message.
/// Lookup details stay in the server log.
pub fn create_safe_error_response(error_type: &str, user_message: &str) -> ErrorResponse {
    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the tokio runtime cannot
/// be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.lookup.to_config()?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, config).await })
}

/// Create the application router backed by the HTTP lookup client.
///
/// # Errors
///
/// Returns an error if the lookup client cannot be built from `config`.
pub fn create_router(config: &SearchConfig) -> anyhow::Result<Router> {
    let resolver = Resolver::new(HttpLookupClient::new(config)?);
    create_router_with(resolver)
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router_with<L: LookupService + 'static>(
    resolver: Resolver<L>,
) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { resolver });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limiter configuration"))?;

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/search", get(search_handler::<L>))
        .route("/search", get(search_redirect_handler::<L>))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // IP-based rate limiting to prevent abuse
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    REQUEST_TIMEOUT,
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS)),
        );

    Ok(app)
}

/// Serve `app` on an already bound listener until the server stops
///
/// # Errors
///
/// Returns an error if serving fails.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

async fn run_server(args: ServeArgs, config: SearchConfig) -> anyhow::Result<()> {
    let app = create_router(&config)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting fivex-search server at http://{addr}");
    tracing::info!(
        "Omnisearch: {} (build {}), best variant API: {}",
        config.omnisearch_url,
        config.build,
        config.api_base_url
    );

    let listener = TcpListener::bind(&addr).await?;
    serve(listener, app).await
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Validated search text, or a ready 400 response
fn search_text(params: &SearchParams) -> Result<&str, Response> {
    validate_query(params.q.as_deref().unwrap_or("")).map_err(|e| {
        let body = create_safe_error_response("invalid_query", &e.to_string());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    })
}

fn unresolved_response(response: &SearchResponse) -> Response {
    let error_type = response.result.error().map_or("parse_failure", |k| k.as_str());
    let body = create_safe_error_response(error_type, UNRESOLVED_MESSAGE);
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

/// `GET /api/search?q=...`: resolve and report as JSON
async fn search_handler<L: LookupService + 'static>(
    State(state): State<Arc<AppState<L>>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let text = match search_text(&params) {
        Ok(text) => text,
        Err(response) => return response,
    };

    let start_time = std::time::Instant::now();
    let response = SearchResponse::from(state.resolver.resolve_detailed(text).await);
    tracing::debug!(
        "Resolved '{}' as {} in {:?}",
        text,
        response.result.kind(),
        start_time.elapsed()
    );

    if response.result.is_resolved() {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        unresolved_response(&response)
    }
}

/// `GET /search?q=...`: resolve and redirect the browser to the matching view
async fn search_redirect_handler<L: LookupService + 'static>(
    State(state): State<Arc<AppState<L>>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let text = match search_text(&params) {
        Ok(text) => text,
        Err(response) => return response,
    };

    let response = SearchResponse::from(state.resolver.resolve_detailed(text).await);
    match &response.destination {
        Some(destination) => Redirect::to(destination.path()).into_response(),
        None => unresolved_response(&response),
    }
}
