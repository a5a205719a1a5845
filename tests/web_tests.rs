//! Search API served over a real listener with a mocked lookup.

use std::net::SocketAddr;

use reqwest::redirect::Policy;
use reqwest::StatusCode;
use tokio::net::TcpListener;

use fivex_search::lookup::LookupError;
use fivex_search::utils::validation::MAX_QUERY_LENGTH;
use fivex_search::web::server::{create_router_with, serve, ErrorResponse};
use fivex_search::{BestVariant, LookupResult, LookupService, Resolver};

/// Knows one gene and one rs-number
struct FixedLookup;

impl LookupService for FixedLookup {
    async fn omnisearch(&self, term: &str) -> Result<Option<LookupResult>, LookupError> {
        Ok(match term {
            "APOE" => Some(LookupResult {
                gene_id: Some("ENSG00000130203".to_string()),
                ..LookupResult::default()
            }),
            "rs7412" => Some(LookupResult {
                chrom: Some("chr19".to_string()),
                start: Some(44_908_822),
                end: Some(44_908_822),
                ..LookupResult::default()
            }),
            "DOWN" => {
                return Err(LookupError::Status {
                    url: "mock://omnisearch".to_string(),
                    status: 503,
                })
            }
            _ => Some(LookupResult::default()),
        })
    }

    async fn best_variant_for_gene(&self, gene_id: &str) -> Result<BestVariant, LookupError> {
        let mut best = BestVariant::new("chr19", 44_908_822);
        best.gene_id = Some(gene_id.to_string());
        best.ref_allele = Some("C".to_string());
        best.alt_allele = Some("T".to_string());
        Ok(best)
    }
}

async fn spawn_app() -> SocketAddr {
    let app = create_router_with(Resolver::new(FixedLookup)).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        serve(listener, app).await.unwrap();
    });
    addr
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

async fn get_json(addr: SocketAddr, q: &str) -> (StatusCode, serde_json::Value) {
    let response = http_client()
        .get(format!("http://{addr}/api/search"))
        .query(&[("q", q)])
        .send()
        .await
        .unwrap();
    let status = response.status();
    let body = response.bytes().await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let addr = spawn_app().await;
    let response = http_client()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
}

#[tokio::test]
async fn test_search_position() {
    let addr = spawn_app().await;
    let (status, body) = get_json(addr, "chr7:101258000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["result"],
        serde_json::json!({"type": "variant", "chrom": "chr7", "start": 101258000, "end": 101258000})
    );
    assert_eq!(body["destination"]["path"], "/variant/7_101258000/");
}

#[tokio::test]
async fn test_search_range() {
    let addr = spawn_app().await;
    let (status, body) = get_json(addr, "2:1000-2000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["type"], "range");
    assert_eq!(body["destination"]["view"], "region");
    assert_eq!(
        body["destination"]["path"],
        "/region/?chrom=2&start=1000&end=2000"
    );
}

#[tokio::test]
async fn test_search_gene_reports_best_variant() {
    let addr = spawn_app().await;
    let (status, body) = get_json(addr, "APOE").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["chrom"], "19");
    assert_eq!(body["variant_id"], "19:44,908,822_C/T");
    assert_eq!(body["best_variant"]["gene_id"], "ENSG00000130203");
}

#[tokio::test]
async fn test_unresolved_search_is_422() {
    let addr = spawn_app().await;

    let (status, body) = get_json(addr, "zzz_not_a_gene").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "Unable to parse query");
    assert_eq!(error.error_type, "parse_failure");
    assert!(error.details.is_none());

    let (status, body) = get_json(addr, "DOWN").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_type"], "request_failed");
}

#[tokio::test]
async fn test_invalid_search_text_is_400() {
    let addr = spawn_app().await;

    let (status, body) = get_json(addr, "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_query");

    let (status, _) = get_json(addr, &"A".repeat(MAX_QUERY_LENGTH + 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(addr, "AP\0OE").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = http_client()
        .get(format!("http://{addr}/api/search"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_redirects_to_view() {
    let addr = spawn_app().await;

    let response = http_client()
        .get(format!("http://{addr}/search"))
        .query(&[("q", "rs7412")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/variant/19_44908822/")
    );

    let response = http_client()
        .get(format!("http://{addr}/search"))
        .query(&[("q", "zzz_not_a_gene")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
