use serde::{Deserialize, Deserializer, Serialize};

use crate::media::{format_duration, ItemKey, MediaKind};
use crate::status::{WatchPreference, WatchStatus};

/// A title on one user's board, as stored by the persistence service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackedItem {
    pub id: u64,
    #[serde(rename = "media_type")]
    pub kind: MediaKind,
    #[serde(default, deserialize_with = "default_if_null")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(rename = "vote_average", default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(rename = "runtime", default, deserialize_with = "default_if_null")]
    pub runtime_minutes: u32,
    #[serde(rename = "seasons", default, deserialize_with = "default_if_null")]
    pub season_count: u32,
    #[serde(default, deserialize_with = "default_if_null")]
    pub status: WatchStatus,
    #[serde(default, deserialize_with = "default_if_null")]
    pub watch_preference: WatchPreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<String>,
}

/// Stored rows are written unvalidated, so an explicit `null` reads as the
/// field's default rather than failing the whole list
fn default_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TrackedItem {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.id, self.kind)
    }

    /// Release year, if the release date starts with one
    pub fn year(&self) -> Option<u32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    /// Short card line: runtime for movies, season count for shows
    pub fn card_meta(&self) -> Option<String> {
        match self.kind {
            MediaKind::Movie if self.runtime_minutes > 0 => Some(format_duration(self.runtime_minutes)),
            MediaKind::Show if self.season_count == 1 => Some("1 Season".to_string()),
            MediaKind::Show if self.season_count > 1 => Some(format!("{} Seasons", self.season_count)),
            _ => None,
        }
    }
}

/// Body of a create request. Field names follow the persistence API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTrackedItem {
    pub tmdb_id: u64,
    pub media_type: MediaKind,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: u32,
    pub seasons: u32,
    pub status: WatchStatus,
    pub watch_preference: WatchPreference,
}

impl NewTrackedItem {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.tmdb_id, self.media_type)
    }

    /// The item as it appears in the local list once the create is confirmed
    pub fn into_tracked(self) -> TrackedItem {
        TrackedItem {
            id: self.tmdb_id,
            kind: self.media_type,
            title: self.title,
            poster_path: self.poster_path,
            rating: Some(self.vote_average),
            overview: self.overview,
            release_date: self.release_date,
            runtime_minutes: self.runtime,
            season_count: self.seasons,
            status: self.status,
            watch_preference: self.watch_preference,
            added_date: None,
        }
    }
}

/// Body of an update request. Both fields are always sent together.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaUpdate {
    pub status: WatchStatus,
    pub watch_preference: WatchPreference,
}

impl From<&TrackedItem> for MediaUpdate {
    fn from(item: &TrackedItem) -> Self {
        Self {
            status: item.status,
            watch_preference: item.watch_preference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_stored_item() {
        let json = r#"{
            "id": 1399,
            "media_type": "tv",
            "title": "Game of Thrones",
            "poster_path": "/1XS1oqL89opfnbLl8WnZY1O1uJx.jpg",
            "vote_average": 8.4,
            "overview": "Seven noble families fight for control.",
            "release_date": "2011-04-17",
            "runtime": null,
            "seasons": 8,
            "status": "waiting",
            "watch_preference": "partner",
            "added_date": "2024-03-01 20:15:00"
        }"#;
        let item: TrackedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.key(), ItemKey::new(1399, MediaKind::Show));
        assert_eq!(item.runtime_minutes, 0);
        assert_eq!(item.season_count, 8);
        assert_eq!(item.status, WatchStatus::Waiting);
        assert_eq!(item.watch_preference, WatchPreference::Partner);
        assert_eq!(item.year(), Some(2011));
        assert_eq!(item.card_meta().as_deref(), Some("8 Seasons"));
    }

    #[test]
    fn test_deserialize_sparse_item_uses_defaults() {
        let json = r#"{"id": 42, "media_type": "movie", "title": "Sparse"}"#;
        let item: TrackedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.status, WatchStatus::ToWatch);
        assert_eq!(item.watch_preference, WatchPreference::Alone);
        assert_eq!(item.rating, None);
        assert_eq!(item.card_meta(), None);
    }

    #[test]
    fn test_null_fields_do_not_fail_the_list() {
        let json = r#"[
            {"id": 7, "media_type": "movie", "title": null, "status": null, "watch_preference": null},
            {"id": 8, "media_type": "tv", "title": "Kept", "status": "watched"}
        ]"#;
        let items: Vec<TrackedItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "");
        assert_eq!(items[0].status, WatchStatus::ToWatch);
        assert_eq!(items[0].watch_preference, WatchPreference::Alone);
        assert_eq!(items[1].status, WatchStatus::Watched);
    }

    #[test]
    fn test_new_item_body_field_names() {
        let body = NewTrackedItem {
            tmdb_id: 603,
            media_type: MediaKind::Movie,
            title: "The Matrix".to_string(),
            poster_path: None,
            vote_average: 8.2,
            overview: None,
            release_date: Some("1999-03-30".to_string()),
            runtime: 136,
            seasons: 0,
            status: WatchStatus::ToWatch,
            watch_preference: WatchPreference::Alone,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["tmdb_id"], 603);
        assert_eq!(value["media_type"], "movie");
        assert_eq!(value["status"], "to-watch");

        let item = body.into_tracked();
        assert_eq!(item.id, 603);
        assert_eq!(item.card_meta().as_deref(), Some("2h 16m"));
    }
}
