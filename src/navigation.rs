//! Where a resolved search sends the browser.
//!
//! A variant opens the single-variant view, a range opens the region view.
//! Chromosomes are always written without the `chr` prefix.

use serde::Serialize;

use crate::core::types::{ErrorKind, LocationQuery};
use crate::lookup::BestVariant;
use crate::resolver::Resolution;

/// Message shown to users for any unresolved search
pub const UNRESOLVED_MESSAGE: &str = "Unable to parse query";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Destination {
    /// `/variant/{chrom}_{pos}/`
    Variant { path: String },
    /// `/region/?chrom={chrom}&start={start}&end={end}`
    Region { path: String },
}

impl Destination {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Variant { path } | Self::Region { path } => path,
        }
    }
}

/// Map a resolved query to its view.
///
/// # Errors
///
/// Returns the failure reason for [`LocationQuery::Unresolved`].
///
/// ```
/// use fivex_search::navigation::destination;
/// use fivex_search::LocationQuery;
///
/// let dest = destination(&LocationQuery::variant("chr19", 44_908_822)).unwrap();
/// assert_eq!(dest.path(), "/variant/19_44908822/");
/// ```
pub fn destination(query: &LocationQuery) -> Result<Destination, ErrorKind> {
    let chrom = query.display_chrom();
    match (query, chrom) {
        (LocationQuery::Variant { start, .. }, Some(chrom)) => Ok(Destination::Variant {
            path: format!("/variant/{chrom}_{start}/"),
        }),
        (LocationQuery::Range { start, end, .. }, Some(chrom)) => Ok(Destination::Region {
            path: format!("/region/?chrom={chrom}&start={start}&end={end}"),
        }),
        (LocationQuery::Unresolved { reason }, _) => Err(*reason),
        (_, None) => Err(ErrorKind::ParseFailure),
    }
}

/// A resolution together with where it leads, as reported to API and CLI users
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub result: LocationQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_variant: Option<BestVariant>,
}

impl From<Resolution> for SearchResponse {
    fn from(resolution: Resolution) -> Self {
        Self {
            destination: destination(&resolution.result).ok(),
            variant_id: resolution
                .best_variant
                .as_ref()
                .and_then(BestVariant::variant_id),
            query: resolution.query,
            result: resolution.result,
            best_variant: resolution.best_variant,
        }
    }
}
