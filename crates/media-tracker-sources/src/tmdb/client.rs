use async_trait::async_trait;
use media_tracker_config::CatalogConfig;
use media_tracker_models::{CatalogCandidate, CatalogDetail, Credits, MediaKind};
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

use crate::error::SourceError;
use crate::http::create_http_client;
use crate::tmdb::api;
use crate::traits::CatalogService;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Self {
        Self {
            client: Arc::new(create_http_client(timeout_secs)),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.base_url.clone(), config.api_key.clone(), config.timeout_secs)
    }

    /// Fetch detail and credits concurrently for the details view
    pub async fn details_with_credits(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<(CatalogDetail, Credits), SourceError> {
        let (detail, credits) = futures::join!(self.details(kind, id), self.credits(kind, id));
        Ok((detail?, credits?))
    }
}

#[async_trait]
impl CatalogService for TmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<CatalogCandidate>, SourceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SourceError::InvalidInput("search query is empty".to_string()));
        }

        info!("Searching TMDB for '{}'", query);
        api::search_multi(&self.client, &self.base_url, &self.api_key, query)
            .await
            .map_err(SourceError::from_anyhow)
    }

    async fn details(&self, kind: MediaKind, id: u64) -> Result<CatalogDetail, SourceError> {
        api::get_detail(&self.client, &self.base_url, &self.api_key, kind, id)
            .await
            .map_err(SourceError::from_anyhow)
    }

    async fn credits(&self, kind: MediaKind, id: u64) -> Result<Credits, SourceError> {
        api::get_credits(&self.client, &self.base_url, &self.api_key, kind, id)
            .await
            .map_err(SourceError::from_anyhow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_rejected_before_request() {
        let client = TmdbClient::new("http://127.0.0.1:9/3".to_string(), "key".to_string(), 1);
        let err = futures::executor::block_on(client.search("  \t")).unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(_)));
    }
}
