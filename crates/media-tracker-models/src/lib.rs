pub mod catalog;
pub mod error;
pub mod filter;
pub mod media;
pub mod preferences;
pub mod status;
pub mod tracked_item;
pub mod user;

pub use catalog::{CatalogCandidate, CatalogDetail, Credits};
pub use error::ParseValueError;
pub use filter::{FilterState, MediaTypeFilter, RuntimeBucket, RuntimeFilter, WatchPreferenceFilter};
pub use media::{format_duration, ItemKey, MediaKind};
pub use preferences::{CardSize, UserPreferences};
pub use status::{WatchPreference, WatchStatus};
pub use tracked_item::{MediaUpdate, NewTrackedItem, TrackedItem};
pub use user::User;
