//! Wire formats of the upstream lookup endpoints.
//!
//! Coordinates arrive as JSON numbers from omnisearch but as strings from the
//! best-variant endpoint (`"pos": "44908822"`), so both are accepted.

use serde::{Deserialize, Deserializer};

use super::{BestVariant, LookupError, LookupResult};

/// `{ "data": [ { ... }, ... ] }`
#[derive(Debug, Deserialize)]
pub struct OmnisearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<OmnisearchHit>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OmnisearchHit {
    #[serde(default)]
    pub gene_id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, rename = "type")]
    pub term_type: Option<String>,
    #[serde(default)]
    pub chrom: Option<String>,
    #[serde(default, deserialize_with = "optional_coordinate")]
    pub start: Option<u64>,
    #[serde(default, deserialize_with = "optional_coordinate")]
    pub end: Option<u64>,
}

impl From<OmnisearchHit> for LookupResult {
    fn from(hit: OmnisearchHit) -> Self {
        Self {
            gene_id: hit.gene_id,
            symbol: hit.symbol,
            term_type: hit.term_type,
            chrom: hit.chrom,
            start: hit.start,
            end: hit.end,
        }
    }
}

/// `{ "data": { "pos": ..., "chrom": ..., ... } }`
#[derive(Debug, Deserialize)]
pub struct BestVariantResponse {
    pub data: BestVariantRecord,
}

#[derive(Debug, Deserialize)]
pub struct BestVariantRecord {
    pub chrom: String,
    #[serde(deserialize_with = "coordinate")]
    pub pos: u64,
    #[serde(default)]
    pub gene_id: Option<String>,
    #[serde(default, rename = "ref")]
    pub ref_allele: Option<String>,
    #[serde(default, rename = "alt")]
    pub alt_allele: Option<String>,
    #[serde(default)]
    pub study: Option<String>,
    #[serde(default)]
    pub tissue: Option<String>,
    #[serde(default)]
    pub pvalue: Option<f64>,
}

impl From<BestVariantRecord> for BestVariant {
    fn from(record: BestVariantRecord) -> Self {
        Self {
            chrom: record.chrom,
            pos: record.pos,
            gene_id: record.gene_id,
            ref_allele: record.ref_allele,
            alt_allele: record.alt_allele,
            study: record.study,
            tissue: record.tissue,
            pvalue: record.pvalue,
        }
    }
}

/// Decode an omnisearch body and keep only the first hit. A missing, null or
/// empty `data` gives `Ok(None)`.
///
/// # Errors
///
/// Returns `LookupError::Payload` if the body is not the expected JSON shape.
pub fn parse_omnisearch(body: &[u8]) -> Result<Option<LookupResult>, LookupError> {
    let response: OmnisearchResponse =
        serde_json::from_slice(body).map_err(|e| LookupError::Payload(e.to_string()))?;
    Ok(response.data.into_iter().next().map(LookupResult::from))
}

/// Decode a best-variant body.
///
/// # Errors
///
/// Returns `LookupError::Payload` if the body is malformed or lacks `data.chrom`/`data.pos`.
pub fn parse_best_variant(body: &[u8]) -> Result<BestVariant, LookupError> {
    let response: BestVariantResponse =
        serde_json::from_slice(body).map_err(|e| LookupError::Payload(e.to_string()))?;
    Ok(response.data.into())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(u64),
    Text(String),
}

impl RawCoordinate {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid coordinate '{s}'"))),
        }
    }
}

fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    RawCoordinate::deserialize(deserializer)?.into_u64()
}

fn optional_coordinate<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    Option::<RawCoordinate>::deserialize(deserializer)?
        .map(RawCoordinate::into_u64)
        .transpose()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
