//! Resolution pipeline: search text in, [`LocationQuery`] out.
//!
//! The pipeline is a small state machine driven one step at a time:
//!
//! 1. **Start**: raw text
//! 2. **Classified**: the [classifier](crate::parsing::query::classify) ran
//! 3. **`LookupPending`**: zero, one, or two sequential lookups
//!    - rs-number: one omnisearch call whose coordinates are the answer
//!    - gene term: omnisearch for a `gene_id`, then best variant for that gene
//! 4. **Resolved** or **Unresolved**
//!
//! Every failure path writes exactly one warning and ends in
//! [`LocationQuery::Unresolved`]; nothing is raised to the caller. There is no
//! cancellation: a caller that no longer wants an answer drops the future.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fivex_search::config::SearchConfig;
//! use fivex_search::lookup::client::HttpLookupClient;
//! use fivex_search::resolver::Resolver;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = HttpLookupClient::new(&SearchConfig::default())?;
//! let resolver = Resolver::new(client);
//!
//! let location = resolver.resolve("APOE").await;
//! println!("{location}");
//! # Ok(())
//! # }
//! ```
//!
//! [`LocationQuery`]: crate::core::types::LocationQuery
//! [`LocationQuery::Unresolved`]: crate::core::types::LocationQuery::Unresolved

pub mod pipeline;

pub use pipeline::{PendingLookup, PipelineState, Resolution, Resolver};
