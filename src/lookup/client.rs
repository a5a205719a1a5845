//! HTTP implementation of [`LookupService`].

use std::time::Duration;

use reqwest::{Client, Response, Url};

use super::payload::{parse_best_variant, parse_omnisearch};
use super::{BestVariant, LookupError, LookupResult, LookupService};
use crate::config::SearchConfig;

/// Lookup client backed by a pooled `reqwest::Client`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpLookupClient {
    client: Client,
    omnisearch_url: Url,
    api_base_url: Url,
    build: String,
}

impl HttpLookupClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::InvalidUrl` if a configured URL does not parse or
    /// cannot carry a path, or `LookupError::Transport` if the HTTP client
    /// cannot be constructed.
    pub fn new(config: &SearchConfig) -> Result<Self, LookupError> {
        let omnisearch_url = parse_url(&config.omnisearch_url)?;
        let api_base_url = parse_url(&config.api_base_url)?;
        if api_base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(config.api_base_url.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("fivex-search/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            omnisearch_url,
            api_base_url,
            build: config.build.clone(),
        })
    }

    /// `{api_base}/api/gene/{gene_id}/bestvar/`, with the id percent-encoded as one segment
    fn best_variant_url(&self, gene_id: &str) -> Result<Url, LookupError> {
        let mut url = self.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|()| LookupError::InvalidUrl(self.api_base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "gene", gene_id, "bestvar", ""]);
        Ok(url)
    }
}

fn parse_url(raw: &str) -> Result<Url, LookupError> {
    Url::parse(raw.trim()).map_err(|e| LookupError::InvalidUrl(format!("{raw}: {e}")))
}

/// Body of a 2xx response, or `LookupError::Status`
async fn success_body(response: Response) -> Result<Vec<u8>, LookupError> {
    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}

impl LookupService for HttpLookupClient {
    async fn omnisearch(&self, term: &str) -> Result<Option<LookupResult>, LookupError> {
        tracing::debug!("omnisearch q={}", term);
        let response = self
            .client
            .get(self.omnisearch_url.clone())
            .query(&[("q", term), ("build", self.build.as_str())])
            .send()
            .await?;
        let body = success_body(response).await?;
        parse_omnisearch(&body)
    }

    async fn best_variant_for_gene(&self, gene_id: &str) -> Result<BestVariant, LookupError> {
        let url = self.best_variant_url(gene_id)?;
        tracing::debug!("best variant lookup {}", url);
        let response = self.client.get(url).send().await?;
        let body = success_body(response).await?;
        parse_best_variant(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_base_url: &str) -> HttpLookupClient {
        HttpLookupClient::new(&SearchConfig {
            api_base_url: api_base_url.to_string(),
            ..SearchConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_best_variant_url() {
        let url = client("http://localhost:5000")
            .best_variant_url("ENSG00000130203")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/gene/ENSG00000130203/bestvar/"
        );
    }

    #[test]
    fn test_best_variant_url_keeps_base_path_and_encodes_id() {
        let url = client("http://example.org/fivex/")
            .best_variant_url("A B/C")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.org/fivex/api/gene/A%20B%2FC/bestvar/"
        );
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        let config = SearchConfig {
            omnisearch_url: "not a url".to_string(),
            ..SearchConfig::default()
        };
        assert!(matches!(
            HttpLookupClient::new(&config),
            Err(LookupError::InvalidUrl(_))
        ));

        let config = SearchConfig {
            api_base_url: "mailto:someone@example.org".to_string(),
            ..SearchConfig::default()
        };
        assert!(matches!(
            HttpLookupClient::new(&config),
            Err(LookupError::InvalidUrl(_))
        ));
    }
}
