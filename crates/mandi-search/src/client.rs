//! HTTP client for a Nominatim-compatible `/search` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use mandi_core::{AppConfig, Place};
use reqwest::{Client, Url};

use crate::error::SearchError;
use crate::source::PlaceSearch;

/// Queries shorter than this many characters are answered locally with no results.
pub const MIN_QUERY_LEN: usize = 3;

/// Maximum number of candidates returned per lookup.
pub const DEFAULT_RESULT_LIMIT: u32 = 5;

/// Whether `query` is long enough to be sent to the search service.
#[must_use]
pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_LEN
}

/// Client for the public Nominatim search API (or anything speaking its JSON).
///
/// No authentication, no retries. Use [`NominatimClient::with_base_url`] to
/// point at a mock server in tests.
pub struct NominatimClient {
    client: Client,
    base_url: Url,
    result_limit: u32,
}

impl NominatimClient {
    /// Creates a client for the search endpoint at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`SearchError::InvalidBaseUrl`] if `base_url` does not
    /// parse as an absolute URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| SearchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            result_limit: DEFAULT_RESULT_LIMIT,
        })
    }

    /// Creates a client from the `MANDI_SEARCH_*` settings.
    ///
    /// # Errors
    ///
    /// See [`NominatimClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        Ok(Self::with_base_url(
            &config.search_base_url,
            config.search_timeout_secs,
            &config.search_user_agent,
        )?
        .with_result_limit(config.search_result_limit))
    }

    /// Override the result cap (minimum 1).
    #[must_use]
    pub fn with_result_limit(mut self, result_limit: u32) -> Self {
        self.result_limit = result_limit.max(1);
        self
    }

    /// Looks up `query`, returning at most the configured number of places.
    ///
    /// Short queries return an empty list without a request. Every failure is
    /// logged and reported as an empty list.
    pub async fn lookup(&self, query: &str) -> Vec<Place> {
        match self.try_lookup(query).await {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!(query, error = %e, "place search failed, returning no results");
                Vec::new()
            }
        }
    }

    /// Looks up `query`, surfacing failures.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network or TLS failure.
    /// - [`SearchError::UnexpectedStatus`] on any non-2xx status.
    /// - [`SearchError::Deserialize`] if the body is not a list of places.
    pub async fn try_lookup(&self, query: &str) -> Result<Vec<Place>, SearchError> {
        if !is_searchable(query) {
            return Ok(Vec::new());
        }

        let url = self.search_url(query);
        tracing::debug!(query, %url, "searching places");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let mut places =
            serde_json::from_str::<Vec<Place>>(&body).map_err(|e| SearchError::Deserialize {
                context: format!("search results for {query:?}"),
                source: e,
            })?;

        places.truncate(usize::try_from(self.result_limit).unwrap_or(usize::MAX));
        Ok(places)
    }

    /// Builds the lookup URL with Nominatim's query parameters.
    fn search_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("addressdetails", "1")
            .append_pair("limit", &self.result_limit.to_string())
            .append_pair("polygon_geojson", "0");
        url
    }
}

#[async_trait]
impl PlaceSearch for NominatimClient {
    async fn search(&self, query: &str) -> Vec<Place> {
        self.lookup(query).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
