use media_tracker_models::{ItemKey, MediaKind};
use media_tracker_sources::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// The list could not be fetched; whatever was loaded before is kept
    #[error("failed to load media for user {user_id}: {source}")]
    Load {
        user_id: u64,
        #[source]
        source: SourceError,
    },

    #[error("{} {id} is already in your tracker", .kind.label())]
    Duplicate { id: u64, kind: MediaKind },

    /// A write was rejected or never reached the service
    #[error("failed to save changes: {0}")]
    Persist(#[source] SourceError),

    /// Soft failure while enriching a new item. Logged, never returned.
    #[error("failed to fetch details for {key}: {source}")]
    DetailFetch {
        key: ItemKey,
        #[source]
        source: SourceError,
    },

    #[error("no user selected")]
    NoActiveUser,
}

impl TrackerError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
