use async_trait::async_trait;
use media_tracker_config::PersistenceConfig;
use media_tracker_models::{ItemKey, MediaUpdate, NewTrackedItem, TrackedItem, User, UserPreferences};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::http::create_http_client;
use crate::persistence::api;
use crate::traits::PersistenceService;

/// REST client for the per-user media store
#[derive(Clone)]
pub struct PersistenceClient {
    client: Arc<Client>,
    base_url: String,
}

impl PersistenceClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        Self {
            client: Arc::new(create_http_client(timeout_secs)),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &PersistenceConfig) -> Self {
        Self::new(config.base_url.clone(), config.timeout_secs)
    }
}

#[async_trait]
impl PersistenceService for PersistenceClient {
    async fn list_users(&self) -> Result<Vec<User>, SourceError> {
        api::list_users(&self.client, &self.base_url)
            .await
            .map_err(SourceError::from_anyhow)
    }

    async fn create_user(&self, name: &str) -> Result<User, SourceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SourceError::InvalidInput("Name is required".to_string()));
        }

        let user = api::create_user(&self.client, &self.base_url, name)
            .await
            .map_err(SourceError::from_anyhow)?;
        info!("Created user '{}' (id {})", user.name, user.id);
        Ok(user)
    }

    async fn list_media(&self, user_id: u64) -> Result<Vec<TrackedItem>, SourceError> {
        api::list_media(&self.client, &self.base_url, user_id)
            .await
            .map_err(SourceError::from_anyhow)
    }

    async fn create_media(&self, user_id: u64, item: &NewTrackedItem) -> Result<(), SourceError> {
        debug!("Persisting new item {} for user {}", item.key(), user_id);
        api::create_media(&self.client, &self.base_url, user_id, item)
            .await
            .map_err(SourceError::from_anyhow)
    }

    async fn update_media(&self, user_id: u64, key: ItemKey, update: &MediaUpdate) -> Result<(), SourceError> {
        debug!(
            "Persisting {} for user {}: status={}, watch_preference={}",
            key, user_id, update.status, update.watch_preference
        );
        api::update_media(&self.client, &self.base_url, user_id, key, update)
            .await
            .map_err(SourceError::from_anyhow)
    }

    async fn delete_media(&self, user_id: u64, key: ItemKey) -> Result<(), SourceError> {
        api::delete_media(&self.client, &self.base_url, user_id, key)
            .await
            .map_err(SourceError::from_anyhow)
    }

    async fn get_preferences(&self, user_id: u64) -> Result<UserPreferences, SourceError> {
        api::get_preferences(&self.client, &self.base_url, user_id)
            .await
            .map_err(SourceError::from_anyhow)
    }

    async fn set_preferences(&self, user_id: u64, preferences: &UserPreferences) -> Result<(), SourceError> {
        api::set_preferences(&self.client, &self.base_url, user_id, preferences)
            .await
            .map_err(SourceError::from_anyhow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_rejects_blank_name_without_request() {
        // Nothing listens on this port; an actual request would fail differently
        let client = PersistenceClient::new("http://127.0.0.1:9/api/".to_string(), 1);
        let err = futures::executor::block_on(client.create_user("   ")).unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(_)));
    }
}
