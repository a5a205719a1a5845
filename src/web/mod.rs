//! HTTP API for search resolution.
//!
//! This module serves the resolver over Axum so a browser front end can turn
//! search-box text into a location with one request.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! fivex-search serve
//!
//! # Custom port and upstream API
//! fivex-search serve --port 3000 --api-base-url http://localhost:5000
//!
//! # Bind to all interfaces
//! fivex-search serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/search?q=<text>` - Resolve a search; 200 with the location,
//!   422 when it cannot be resolved, 400 for empty or oversized text
//! - `GET /search?q=<text>` - Resolve and redirect to the variant or region view
//! - `GET /health` - Liveness check

pub mod server;
