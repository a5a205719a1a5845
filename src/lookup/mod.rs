//! Remote lookups used to resolve rs-numbers and gene terms.
//!
//! Two read-only endpoints are involved:
//!
//! - **omnisearch**: maps a free-text term (gene symbol, Ensembl id, rs-number)
//!   to coordinates and, for genes, a `gene_id`
//! - **best variant**: maps a `gene_id` to the most significant variant for that gene
//!
//! [`LookupService`] is the seam between the resolver and the network;
//! [`client::HttpLookupClient`] is the production implementation. Upstream JSON
//! is converted once, on arrival, into [`LookupResult`] and [`BestVariant`].

pub mod client;
pub mod payload;

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Errors from a single lookup request
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response payload: {0}")]
    Payload(String),

    #[error("invalid lookup URL: {0}")]
    InvalidUrl(String),
}

/// Normalized first hit of an omnisearch lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Ensembl gene id; absent when the term is not a gene
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_id: Option<String>,

    /// Gene symbol when the upstream reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// Upstream classification of the term (e.g. `gene`, `rsid`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrom: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
}

impl LookupResult {
    /// Gene id when the hit identifies a gene
    #[must_use]
    pub fn gene(&self) -> Option<&str> {
        self.gene_id.as_deref().filter(|id| !id.is_empty())
    }

    /// `(chrom, start)` when the hit carries a location. `end` is ignored: an
    /// rs-number names a single variant.
    #[must_use]
    pub fn position(&self) -> Option<(&str, u64)> {
        let chrom = self.chrom.as_deref().filter(|c| !c.is_empty())?;
        Some((chrom, self.start?))
    }
}

/// Most significant variant for a gene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestVariant {
    pub chrom: String,
    pub pos: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_allele: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_allele: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tissue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pvalue: Option<f64>,
}

impl BestVariant {
    pub fn new(chrom: impl Into<String>, pos: u64) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            gene_id: None,
            ref_allele: None,
            alt_allele: None,
            study: None,
            tissue: None,
            pvalue: None,
        }
    }

    /// EPACTS-style variant id, e.g. `19:44,908,822_C/T`. `None` without alleles.
    #[must_use]
    pub fn variant_id(&self) -> Option<String> {
        let (ref_allele, alt_allele) = (self.ref_allele.as_ref()?, self.alt_allele.as_ref()?);
        Some(format!(
            "{}:{}_{ref_allele}/{alt_allele}",
            crate::core::chrom::strip_chr_prefix(&self.chrom),
            with_thousands_separators(self.pos)
        ))
    }
}

fn with_thousands_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Source of omnisearch and best-variant answers.
///
/// Each call is a single read: no retries, no caching between calls.
pub trait LookupService: Send + Sync {
    /// Resolve a term. `Ok(None)` means the response had no `data[0]`, which the
    /// resolver reports as a failed request.
    fn omnisearch(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Option<LookupResult>, LookupError>> + Send;

    /// Fetch the best variant for a gene id or symbol.
    fn best_variant_for_gene(
        &self,
        gene_id: &str,
    ) -> impl Future<Output = Result<BestVariant, LookupError>> + Send;
}
