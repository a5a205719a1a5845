use serde::Serialize;

use crate::core::chrom::strip_chr_prefix;
use crate::core::types::{ErrorKind, LocationQuery};
use crate::lookup::{BestVariant, LookupService};
use crate::parsing::query::{classify, Classification};

/// A lookup that has been decided on but not yet answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingLookup {
    /// Omnisearch for an rs-number; the hit's coordinates are the answer
    RsNumber(String),
    /// Omnisearch for a gene term; the hit's `gene_id` feeds the next lookup
    GeneTerm(String),
    /// Best variant for a resolved gene id
    BestVariant(String),
}

/// States of a single resolution.
///
/// `Start -> Classified -> LookupPending* -> Resolved | Unresolved`
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Start(String),
    Classified(Classification),
    LookupPending(PendingLookup),
    Resolved {
        location: LocationQuery,
        best_variant: Option<BestVariant>,
    },
    Unresolved(ErrorKind),
}

impl PipelineState {
    fn resolved(location: LocationQuery) -> Self {
        Self::Resolved {
            location,
            best_variant: None,
        }
    }
}

/// Outcome of [`Resolver::resolve_detailed`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Search text as received
    pub query: String,
    pub result: LocationQuery,
    /// Variant record that produced the result, for gene searches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_variant: Option<BestVariant>,
}

/// Turns search text into a [`LocationQuery`].
///
/// Holds no per-query state: each call runs its own state machine, so one
/// resolver may serve any number of concurrent searches.
#[derive(Debug, Clone)]
pub struct Resolver<L> {
    lookup: L,
}

impl<L: LookupService> Resolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolve search text. Failures are logged and reported as
    /// [`LocationQuery::Unresolved`]; this never returns an error.
    pub async fn resolve(&self, text: &str) -> LocationQuery {
        self.resolve_detailed(text).await.result
    }

    /// Like [`Resolver::resolve`], also returning the best-variant record for gene searches
    pub async fn resolve_detailed(&self, text: &str) -> Resolution {
        let mut state = PipelineState::Start(text.to_string());
        let (result, best_variant) = loop {
            state = match state {
                PipelineState::Resolved {
                    location,
                    best_variant,
                } => break (location, best_variant),
                PipelineState::Unresolved(reason) => {
                    break (LocationQuery::unresolved(reason), None)
                }
                pending => self.step(pending).await,
            };
        };

        Resolution {
            query: text.to_string(),
            result,
            best_variant,
        }
    }

    /// Advance one state. Terminal states are returned unchanged.
    pub async fn step(&self, state: PipelineState) -> PipelineState {
        match state {
            PipelineState::Start(text) => PipelineState::Classified(classify(&text)),
            PipelineState::Classified(classification) => match classification {
                Classification::Location(location) => PipelineState::resolved(location),
                Classification::RsNumber(rs) => {
                    PipelineState::LookupPending(PendingLookup::RsNumber(rs))
                }
                Classification::GeneTerm(term) => {
                    PipelineState::LookupPending(PendingLookup::GeneTerm(term))
                }
                Classification::Invalid(reason) => {
                    tracing::warn!("Search text is not a usable location");
                    PipelineState::Unresolved(reason)
                }
            },
            PipelineState::LookupPending(PendingLookup::RsNumber(rs)) => {
                self.resolve_rs_number(&rs).await
            }
            PipelineState::LookupPending(PendingLookup::GeneTerm(term)) => {
                self.resolve_gene_term(&term).await
            }
            PipelineState::LookupPending(PendingLookup::BestVariant(gene_id)) => {
                self.resolve_best_variant(gene_id).await
            }
            terminal => terminal,
        }
    }

    async fn resolve_rs_number(&self, rs: &str) -> PipelineState {
        match self.lookup.omnisearch(rs).await {
            Ok(Some(hit)) => match hit.position() {
                Some((chrom, pos)) => PipelineState::resolved(LocationQuery::variant(
                    strip_chr_prefix(chrom).to_string(),
                    pos,
                )),
                None => {
                    tracing::warn!("Omnisearch returned no position for {}", rs);
                    PipelineState::Unresolved(ErrorKind::ParseFailure)
                }
            },
            Ok(None) => {
                tracing::warn!("Omnisearch returned no results for {}", rs);
                PipelineState::Unresolved(ErrorKind::RequestFailed)
            }
            Err(e) => {
                tracing::warn!("Omnisearch lookup for {} failed: {}", rs, e);
                PipelineState::Unresolved(ErrorKind::RequestFailed)
            }
        }
    }

    async fn resolve_gene_term(&self, term: &str) -> PipelineState {
        match self.lookup.omnisearch(term).await {
            Ok(Some(hit)) => match hit.gene() {
                Some(gene_id) => {
                    PipelineState::LookupPending(PendingLookup::BestVariant(gene_id.to_string()))
                }
                None => {
                    tracing::warn!("Could not parse query '{}': no matching gene", term);
                    PipelineState::Unresolved(ErrorKind::ParseFailure)
                }
            },
            Ok(None) => {
                tracing::warn!("Omnisearch returned no results for '{}'", term);
                PipelineState::Unresolved(ErrorKind::RequestFailed)
            }
            Err(e) => {
                tracing::warn!("Omnisearch lookup for '{}' failed: {}", term, e);
                PipelineState::Unresolved(ErrorKind::RequestFailed)
            }
        }
    }

    async fn resolve_best_variant(&self, gene_id: String) -> PipelineState {
        match self.lookup.best_variant_for_gene(&gene_id).await {
            Ok(mut best) => {
                let location =
                    LocationQuery::variant(strip_chr_prefix(&best.chrom).to_string(), best.pos);
                best.gene_id.get_or_insert(gene_id);
                PipelineState::Resolved {
                    location,
                    best_variant: Some(best),
                }
            }
            Err(e) => {
                tracing::warn!("Best variant lookup failed for gene {}: {}", gene_id, e);
                PipelineState::Unresolved(ErrorKind::RequestFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{LookupError, LookupResult};

    /// Lookup that must never be called
    struct Offline;

    impl LookupService for Offline {
        async fn omnisearch(&self, term: &str) -> Result<Option<LookupResult>, LookupError> {
            panic!("unexpected omnisearch for {term}")
        }

        async fn best_variant_for_gene(&self, gene_id: &str) -> Result<BestVariant, LookupError> {
            panic!("unexpected best variant lookup for {gene_id}")
        }
    }

    #[tokio::test]
    async fn test_step_start_classifies() {
        let resolver = Resolver::new(Offline);
        let next = resolver.step(PipelineState::Start("rs7412".to_string())).await;
        assert_eq!(
            next,
            PipelineState::Classified(Classification::RsNumber("rs7412".to_string()))
        );

        let next = resolver.step(next).await;
        assert_eq!(
            next,
            PipelineState::LookupPending(PendingLookup::RsNumber("rs7412".to_string()))
        );
    }

    #[tokio::test]
    async fn test_step_gene_term_goes_to_lookup() {
        let resolver = Resolver::new(Offline);
        let next = resolver
            .step(PipelineState::Classified(Classification::GeneTerm(
                "APOE".to_string(),
            )))
            .await;
        assert_eq!(
            next,
            PipelineState::LookupPending(PendingLookup::GeneTerm("APOE".to_string()))
        );
    }

    #[tokio::test]
    async fn test_terminal_states_are_fixed_points() {
        let resolver = Resolver::new(Offline);
        let done = PipelineState::Unresolved(ErrorKind::ParseFailure);
        assert_eq!(resolver.step(done.clone()).await, done);

        let done = PipelineState::resolved(LocationQuery::variant("1", 5));
        assert_eq!(resolver.step(done.clone()).await, done);
    }

    #[tokio::test]
    async fn test_direct_locations_need_no_lookup() {
        let resolver = Resolver::new(Offline);
        assert_eq!(
            resolver.resolve("chr7:101258000").await,
            LocationQuery::variant("chr7", 101_258_000)
        );
        assert_eq!(
            resolver.resolve("2:1000-2000").await,
            LocationQuery::range("2", 1000, 2000)
        );
        assert_eq!(
            resolver.resolve("1:99999999999999999999999").await,
            LocationQuery::unresolved(ErrorKind::ParseFailure)
        );
    }
}
