use media_tracker_models::{FilterState, MediaKind, MediaTypeFilter, RuntimeBucket, TrackedItem, WatchStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// One status column of the board, items in list order
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: WatchStatus,
    pub items: Vec<TrackedItem>,
}

/// Media type, then runtime bucket, then watch preference.
///
/// An item with an unknown runtime (0) is never excluded by the runtime
/// predicate.
pub fn matches_filter(item: &TrackedItem, filter: &FilterState) -> bool {
    let type_ok = match filter.media_type {
        MediaTypeFilter::All => true,
        MediaTypeFilter::Movie => item.kind == MediaKind::Movie,
        MediaTypeFilter::Show => item.kind == MediaKind::Show,
    };
    if !type_ok {
        return false;
    }

    if let Some(wanted) = filter.runtime.bucket() {
        if let Some(actual) = RuntimeBucket::for_minutes(item.runtime_minutes) {
            if actual != wanted {
                return false;
            }
        }
    }

    match filter.watch_preference.selected() {
        Some(preference) => item.watch_preference == preference,
        None => true,
    }
}

pub fn filter_items(items: &[TrackedItem], filter: &FilterState) -> Vec<TrackedItem> {
    items
        .iter()
        .filter(|item| matches_filter(item, filter))
        .cloned()
        .collect()
}

/// Per-status counts of the filtered set. Every status is present.
pub fn count_by_status(items: &[TrackedItem], filter: &FilterState) -> BTreeMap<WatchStatus, usize> {
    let mut counts: BTreeMap<WatchStatus, usize> = WatchStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for item in items.iter().filter(|item| matches_filter(item, filter)) {
        *counts.entry(item.status).or_insert(0) += 1;
    }
    counts
}

/// The filtered list split into the five status columns in pipeline order
pub fn board_columns(items: &[TrackedItem], filter: &FilterState) -> Vec<BoardColumn> {
    let mut columns: Vec<BoardColumn> = WatchStatus::ALL
        .iter()
        .map(|status| BoardColumn {
            status: *status,
            items: Vec::new(),
        })
        .collect();

    for item in items.iter().filter(|item| matches_filter(item, filter)) {
        if let Some(column) = columns.iter_mut().find(|c| c.status == item.status) {
            column.items.push(item.clone());
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_tracker_models::{RuntimeFilter, WatchPreference, WatchPreferenceFilter};

    fn item(id: u64, kind: MediaKind, runtime: u32) -> TrackedItem {
        TrackedItem {
            id,
            kind,
            title: format!("Title {}", id),
            poster_path: None,
            rating: Some(7.0),
            overview: None,
            release_date: None,
            runtime_minutes: runtime,
            season_count: 0,
            status: WatchStatus::ToWatch,
            watch_preference: WatchPreference::Alone,
            added_date: None,
        }
    }

    fn filter(media_type: MediaTypeFilter, runtime: RuntimeFilter, pref: WatchPreferenceFilter) -> FilterState {
        FilterState {
            media_type,
            runtime,
            watch_preference: pref,
        }
    }

    #[test]
    fn test_filter_composition() {
        let items = vec![
            item(1, MediaKind::Movie, 80),
            item(2, MediaKind::Movie, 200),
            item(3, MediaKind::Show, 0),
        ];
        let state = filter(MediaTypeFilter::Movie, RuntimeFilter::Short, WatchPreferenceFilter::All);

        let filtered = filter_items(&items, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_unfiltered_keeps_everything_in_order() {
        let items = vec![
            item(3, MediaKind::Show, 45),
            item(1, MediaKind::Movie, 120),
            item(2, MediaKind::Movie, 0),
        ];
        let ids: Vec<u64> = filter_items(&items, &FilterState::default()).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_runtime_bucket_boundaries() {
        let items = vec![
            item(89, MediaKind::Movie, 89),
            item(90, MediaKind::Movie, 90),
            item(150, MediaKind::Movie, 150),
            item(151, MediaKind::Movie, 151),
        ];
        let ids = |runtime| -> Vec<u64> {
            filter_items(&items, &filter(MediaTypeFilter::All, runtime, WatchPreferenceFilter::All))
                .iter()
                .map(|i| i.id)
                .collect()
        };

        assert_eq!(ids(RuntimeFilter::Short), vec![89]);
        assert_eq!(ids(RuntimeFilter::Medium), vec![90, 150]);
        assert_eq!(ids(RuntimeFilter::Long), vec![151]);
    }

    #[test]
    fn test_unknown_runtime_passes_runtime_filter() {
        let items = vec![item(7, MediaKind::Show, 0)];
        for runtime in [RuntimeFilter::Short, RuntimeFilter::Medium, RuntimeFilter::Long] {
            let state = filter(MediaTypeFilter::All, runtime, WatchPreferenceFilter::All);
            assert_eq!(filter_items(&items, &state).len(), 1);
        }
    }

    #[test]
    fn test_watch_preference_filter() {
        let mut partner = item(2, MediaKind::Movie, 100);
        partner.watch_preference = WatchPreference::Partner;
        let items = vec![item(1, MediaKind::Movie, 100), partner];

        let state = filter(MediaTypeFilter::All, RuntimeFilter::All, WatchPreferenceFilter::Partner);
        let filtered = filter_items(&items, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_counts_enumerate_all_statuses_when_empty() {
        let counts = count_by_status(&[], &FilterState::default());
        assert_eq!(counts.len(), 5);
        assert!(counts.values().all(|c| *c == 0));
    }

    #[test]
    fn test_counts_follow_filter() {
        let mut watched = item(2, MediaKind::Movie, 100);
        watched.status = WatchStatus::Watched;
        let items = vec![item(1, MediaKind::Movie, 100), watched, item(3, MediaKind::Show, 40)];

        let counts = count_by_status(&items, &filter(MediaTypeFilter::Movie, RuntimeFilter::All, WatchPreferenceFilter::All));
        assert_eq!(counts[&WatchStatus::ToWatch], 1);
        assert_eq!(counts[&WatchStatus::Watched], 1);
        assert_eq!(counts[&WatchStatus::Watching], 0);
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn test_board_columns_in_pipeline_order() {
        let mut waiting = item(2, MediaKind::Show, 50);
        waiting.status = WatchStatus::Waiting;
        let items = vec![waiting, item(1, MediaKind::Movie, 100), item(3, MediaKind::Movie, 95)];

        let columns = board_columns(&items, &FilterState::default());
        let statuses: Vec<WatchStatus> = columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, WatchStatus::ALL.to_vec());

        let to_watch: Vec<u64> = columns[0].items.iter().map(|i| i.id).collect();
        assert_eq!(to_watch, vec![1, 3]);
        assert_eq!(columns[3].items.len(), 1);
        assert!(columns[4].items.is_empty());
    }
}
