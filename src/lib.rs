//! # fivex-search
//!
//! Resolve free-text searches from a genome browser search box into locations.
//!
//! A user may type a position (`chr7:101258000`), a range (`2:1000-2000`), an
//! rs-number (`rs7412`) or a gene (`APOE`, `ENSG00000130203`). Positions and
//! ranges are recognized directly; rs-numbers and genes are looked up through an
//! omnisearch service and, for genes, the API's best-variant endpoint.
//!
//! ## Features
//!
//! - **Full-string classification**: a range is never mistaken for a position
//! - **Explicit pipeline**: every terminal state is reachable and testable on its own
//! - **Uniform failure**: every failure ends in [`LocationQuery::Unresolved`] with one
//!   logged diagnostic and a reason the caller may show
//! - **Navigation**: resolved locations map to the variant or region view
//!
//! ## Example
//!
//! ```rust
//! use fivex_search::parsing::query::{classify, Classification};
//! use fivex_search::navigation::destination;
//!
//! let Classification::Location(location) = classify("chr19:44905000-44910000") else {
//!     panic!("not a location");
//! };
//! assert_eq!(
//!     destination(&location).unwrap().path(),
//!     "/region/?chrom=19&start=44905000&end=44910000"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Location and error types, chromosome naming
//! - [`parsing`]: Search text classifier
//! - [`lookup`]: Omnisearch and best-variant lookups
//! - [`resolver`]: Resolution pipeline
//! - [`navigation`]: Views a resolved search leads to
//! - [`config`]: Lookup endpoint configuration
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP API

pub mod cli;
pub mod config;
pub mod core;
pub mod lookup;
pub mod navigation;
pub mod parsing;
pub mod resolver;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::core::types::*;
pub use lookup::{BestVariant, LookupResult, LookupService};
pub use resolver::{Resolution, Resolver};
