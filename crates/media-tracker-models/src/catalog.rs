use serde::{Deserialize, Serialize};

use crate::media::{ItemKey, MediaKind};
use crate::status::{WatchPreference, WatchStatus};
use crate::tracked_item::NewTrackedItem;

/// A search hit, already normalized from the catalog's movie/tv shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogCandidate {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub poster_path: Option<String>,
    pub rating: Option<f64>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
}

impl CatalogCandidate {
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.id, self.kind)
    }

    pub fn year(&self) -> Option<u32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    /// Build the create body for this candidate. A missing detail record
    /// leaves runtime and season count unknown (0).
    pub fn to_new_item(
        &self,
        detail: Option<&CatalogDetail>,
        watch_preference: WatchPreference,
    ) -> NewTrackedItem {
        NewTrackedItem {
            tmdb_id: self.id,
            media_type: self.kind,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            vote_average: self.rating.unwrap_or(0.0),
            overview: self.overview.clone(),
            release_date: self.release_date.clone(),
            runtime: detail.map(|d| d.runtime_minutes).unwrap_or(0),
            seasons: detail.map(|d| d.season_count).unwrap_or(0),
            status: WatchStatus::ToWatch,
            watch_preference,
        }
    }
}

/// Extended detail for one title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogDetail {
    pub runtime_minutes: u32,
    pub season_count: u32,
    pub episode_count: u32,
    pub production_status: Option<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Credits {
    pub cast: Vec<String>,
}

impl Credits {
    /// Leading cast members, in billing order
    pub fn top_cast(&self, limit: usize) -> &[String] {
        &self.cast[..self.cast.len().min(limit)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> CatalogCandidate {
        CatalogCandidate {
            id: 1396,
            kind: MediaKind::Show,
            title: "Breaking Bad".to_string(),
            poster_path: Some("/ggFHVNu6YYI5L9pCfOacjizRGt.jpg".to_string()),
            rating: Some(8.9),
            overview: None,
            release_date: Some("2008-01-20".to_string()),
        }
    }

    #[test]
    fn test_to_new_item_with_detail() {
        let detail = CatalogDetail {
            runtime_minutes: 47,
            season_count: 5,
            ..CatalogDetail::default()
        };
        let body = candidate().to_new_item(Some(&detail), WatchPreference::Partner);
        assert_eq!(body.runtime, 47);
        assert_eq!(body.seasons, 5);
        assert_eq!(body.status, WatchStatus::ToWatch);
        assert_eq!(body.watch_preference, WatchPreference::Partner);
    }

    #[test]
    fn test_to_new_item_without_detail() {
        let body = candidate().to_new_item(None, WatchPreference::Alone);
        assert_eq!(body.runtime, 0);
        assert_eq!(body.seasons, 0);
        assert_eq!(body.vote_average, 8.9);
        assert_eq!(candidate().year(), Some(2008));
    }

    #[test]
    fn test_top_cast_limit() {
        let credits = Credits {
            cast: vec!["A".into(), "B".into(), "C".into()],
        };
        assert_eq!(credits.top_cast(2), &["A".to_string(), "B".to_string()]);
        assert_eq!(credits.top_cast(10).len(), 3);
    }
}
