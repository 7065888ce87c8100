//! Generic JSON relay provider.
//!
//! Issues `GET {base_url}/{term}` and decodes the body according to the
//! configured [`PayloadShape`]. One relay entry in the providers file maps to
//! one [`RelayProvider`].

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use pov_core::{Category, PayloadShape, ProviderEntry, Query};
use reqwest::{Client, StatusCode, Url};

use super::relay_payload::parse_payload;
use crate::error::{ProviderError, SentimentError};
use crate::provider::Provider;
use crate::types::RawItem;

pub struct RelayProvider {
    name: String,
    categories: Vec<Category>,
    base_url: String,
    shape: PayloadShape,
    bearer_token: Option<String>,
    client: Client,
}

impl std::fmt::Debug for RelayProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayProvider")
            .field("name", &self.name)
            .field("categories", &self.categories)
            .field("base_url", &self.base_url)
            .field("shape", &self.shape)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish_non_exhaustive()
    }
}

impl RelayProvider {
    /// Build a relay provider from a resolved providers-file entry.
    ///
    /// `timeout` bounds each HTTP request; the orchestrator applies its own
    /// per-call timeout on top.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`SentimentError::Http`] if the HTTP client cannot be constructed.
    pub fn new(
        entry: &ProviderEntry,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, SentimentError> {
        Url::parse(&entry.base_url).map_err(|e| SentimentError::InvalidBaseUrl {
            url: entry.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            name: entry.name.clone(),
            categories: entry.categories.clone(),
            base_url: entry.base_url.trim_end_matches('/').to_string(),
            shape: entry.shape,
            bearer_token: entry.bearer_token.clone(),
            client,
        })
    }

    fn url_for(&self, term: &str) -> String {
        let encoded = utf8_percent_encode(term, NON_ALPHANUMERIC);
        format!("{}/{encoded}", self.base_url)
    }
}

#[async_trait]
impl Provider for RelayProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<RawItem>, ProviderError> {
        let url = self.url_for(query.term());
        let mut request = self.client.get(&url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(ProviderError::NotFound(format!(
                "{} has no entry for {:?}",
                self.name,
                query.term()
            )));
        }
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(ProviderError::Transient(format!(
                "{} returned status {status}",
                self.name
            )));
        }
        if !status.is_success() {
            return Err(ProviderError::Malformed(format!(
                "{} returned unexpected status {status}",
                self.name
            )));
        }

        let body = response.text().await?;
        let items = parse_payload(self.shape, &body)?;

        tracing::debug!(
            provider = %self.name,
            term = query.term(),
            count = items.len(),
            "relay returned evidence"
        );

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(base_url: &str) -> ProviderEntry {
        ProviderEntry {
            name: "relay".to_string(),
            categories: vec![Category::Movie],
            base_url: base_url.to_string(),
            shape: PayloadShape::Rating,
            token_env: None,
            bearer_token: Some("secret".to_string()),
        }
    }

    #[test]
    fn url_encodes_term_as_single_segment() {
        let provider =
            RelayProvider::new(&entry("https://relay.example.com/imdb/"), "ua", Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            provider.url_for("Dune: Part Two"),
            "https://relay.example.com/imdb/Dune%3A%20Part%20Two"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = RelayProvider::new(&entry("not a url"), "ua", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, SentimentError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn debug_redacts_token() {
        let provider =
            RelayProvider::new(&entry("https://relay.example.com"), "ua", Duration::from_secs(5))
                .unwrap();
        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("secret"));
    }
}
