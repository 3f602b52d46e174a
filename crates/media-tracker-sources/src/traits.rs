use async_trait::async_trait;
use media_tracker_models::{
    CatalogCandidate, CatalogDetail, Credits, ItemKey, MediaKind, MediaUpdate, NewTrackedItem,
    TrackedItem, User, UserPreferences,
};

use crate::error::SourceError;

/// Movie/TV metadata and search.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Free-text search. Results are limited to movies and shows that have a
    /// display name, in the order the service ranks them.
    async fn search(&self, query: &str) -> Result<Vec<CatalogCandidate>, SourceError>;

    async fn details(&self, kind: MediaKind, id: u64) -> Result<CatalogDetail, SourceError>;

    async fn credits(&self, kind: MediaKind, id: u64) -> Result<Credits, SourceError>;
}

/// Per-user storage of tracked items and preferences.
#[async_trait]
pub trait PersistenceService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, SourceError>;
    async fn create_user(&self, name: &str) -> Result<User, SourceError>;

    async fn list_media(&self, user_id: u64) -> Result<Vec<TrackedItem>, SourceError>;
    async fn create_media(&self, user_id: u64, item: &NewTrackedItem) -> Result<(), SourceError>;
    async fn update_media(&self, user_id: u64, key: ItemKey, update: &MediaUpdate) -> Result<(), SourceError>;
    async fn delete_media(&self, user_id: u64, key: ItemKey) -> Result<(), SourceError>;

    async fn get_preferences(&self, user_id: u64) -> Result<UserPreferences, SourceError>;
    async fn set_preferences(&self, user_id: u64, preferences: &UserPreferences) -> Result<(), SourceError>;
}
