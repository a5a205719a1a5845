use serde::{Deserialize, Serialize};

use crate::core::chrom::strip_chr_prefix;

/// Why a search could not be resolved to a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The text matched no location pattern and no lookup produced a location
    #[error("unable to parse query")]
    ParseFailure,
    /// An upstream lookup failed or returned an unusable payload
    #[error("lookup request failed")]
    RequestFailed,
    /// Reserved: the term resolved to something that is neither a gene nor a variant.
    /// Never produced; such hits are reported as `ParseFailure`.
    #[error("ambiguous search result")]
    AmbiguousResult,
}

impl ErrorKind {
    /// Stable machine-readable name, used in JSON error bodies and TSV output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParseFailure => "parse_failure",
            Self::RequestFailed => "request_failed",
            Self::AmbiguousResult => "ambiguous_result",
        }
    }
}

/// Normalized outcome of resolving one search query.
///
/// `chrom` keeps whatever prefix it was found with; use
/// [`LocationQuery::display_chrom`] when handing it to a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocationQuery {
    /// Single-base position, `start == end`
    Variant { chrom: String, start: u64, end: u64 },
    /// Genomic interval; `start <= end` is the caller's responsibility
    Range { chrom: String, start: u64, end: u64 },
    /// Terminal failure, no location
    Unresolved { reason: ErrorKind },
}

impl LocationQuery {
    pub fn variant(chrom: impl Into<String>, pos: u64) -> Self {
        Self::Variant {
            chrom: chrom.into(),
            start: pos,
            end: pos,
        }
    }

    pub fn range(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self::Range {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    #[must_use]
    pub fn unresolved(reason: ErrorKind) -> Self {
        Self::Unresolved { reason }
    }

    #[must_use]
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::Variant { .. } => QueryKind::Variant,
            Self::Range { .. } => QueryKind::Range,
            Self::Unresolved { .. } => QueryKind::Unresolved,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved { .. })
    }

    /// Chromosome exactly as stored
    #[must_use]
    pub fn chrom(&self) -> Option<&str> {
        match self {
            Self::Variant { chrom, .. } | Self::Range { chrom, .. } => Some(chrom),
            Self::Unresolved { .. } => None,
        }
    }

    /// Chromosome with any leading `chr` removed
    #[must_use]
    pub fn display_chrom(&self) -> Option<&str> {
        self.chrom().map(strip_chr_prefix)
    }

    /// `(start, end)` for resolved queries
    #[must_use]
    pub fn span(&self) -> Option<(u64, u64)> {
        match self {
            Self::Variant { start, end, .. } | Self::Range { start, end, .. } => {
                Some((*start, *end))
            }
            Self::Unresolved { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            Self::Unresolved { reason } => Some(*reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variant { chrom, start, .. } => write!(f, "{chrom}:{start}"),
            Self::Range { chrom, start, end } => write!(f, "{chrom}:{start}-{end}"),
            Self::Unresolved { reason } => write!(f, "unresolved ({reason})"),
        }
    }
}

/// Tag of a [`LocationQuery`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Variant,
    Range,
    Unresolved,
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variant => write!(f, "variant"),
            Self::Range => write!(f, "range"),
            Self::Unresolved => write!(f, "unresolved"),
        }
    }
}
