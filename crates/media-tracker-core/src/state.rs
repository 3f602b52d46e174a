use media_tracker_config::RepositionPolicy;
use media_tracker_models::{
    CatalogCandidate, FilterState, ItemKey, MediaUpdate, TrackedItem, UserPreferences, WatchPreference,
    WatchStatus,
};
use media_tracker_sources::{CatalogService, PersistenceService};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::board::{board_columns, count_by_status, filter_items, BoardColumn};
use crate::error::TrackerError;
use crate::observer::TrackerObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Status,
    Preference,
}

#[derive(Debug, Clone, Copy)]
enum Change {
    Status(WatchStatus),
    Preference(WatchPreference),
}

impl Change {
    fn field(&self) -> Field {
        match self {
            Self::Status(_) => Field::Status,
            Self::Preference(_) => Field::Preference,
        }
    }

    /// Write this value into the item, returning the value it replaced
    fn apply(self, item: &mut TrackedItem) -> Change {
        match self {
            Self::Status(status) => Self::Status(std::mem::replace(&mut item.status, status)),
            Self::Preference(pref) => {
                Self::Preference(std::mem::replace(&mut item.watch_preference, pref))
            }
        }
    }
}

#[derive(Default)]
struct Inner {
    user_id: Option<u64>,
    items: Vec<TrackedItem>,
    filter: FilterState,
    preferences: UserPreferences,
    /// Latest optimistic write issued per item and field
    sequences: HashMap<(ItemKey, Field), u64>,
    /// Source of sequence numbers. Never reset, so a write still in flight
    /// from before a reload or re-add cannot match a newer one.
    next_sequence: u64,
}

impl Inner {
    fn position(&self, key: ItemKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }
}

/// Owner of the active user's tracked list.
///
/// All mutation goes through the methods here. Status and preference
/// changes are applied locally first and rolled back if the write fails.
/// The internal lock is never held across a network call, so several
/// mutations may be in flight at once; each carries a sequence number and a
/// rollback only lands if no newer change to the same field was made since.
pub struct TrackerState {
    persistence: Arc<dyn PersistenceService>,
    catalog: Arc<dyn CatalogService>,
    reposition: RepositionPolicy,
    inner: Mutex<Inner>,
    observers: Mutex<Vec<Arc<dyn TrackerObserver>>>,
}

impl TrackerState {
    pub fn new(persistence: Arc<dyn PersistenceService>, catalog: Arc<dyn CatalogService>) -> Self {
        Self {
            persistence,
            catalog,
            reposition: RepositionPolicy::default(),
            inner: Mutex::new(Inner::default()),
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reposition_policy(mut self, policy: RepositionPolicy) -> Self {
        self.reposition = policy;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Observers run outside the lock, so poisoning never leaves the list
        // half-written
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn subscribe(&self, observer: Arc<dyn TrackerObserver>) {
        self.observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(observer);
    }

    fn observers(&self) -> Vec<Arc<dyn TrackerObserver>> {
        self.observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn notify_changed(&self) {
        let items = self.snapshot();
        for observer in self.observers() {
            observer.changed(&items);
        }
    }

    fn notify_failed(&self, error: &TrackerError) {
        for observer in self.observers() {
            observer.failed(error);
        }
    }

    pub fn snapshot(&self) -> Vec<TrackedItem> {
        self.lock().items.clone()
    }

    pub fn active_user(&self) -> Option<u64> {
        self.lock().user_id
    }

    pub fn get(&self, key: ItemKey) -> Option<TrackedItem> {
        let inner = self.lock();
        inner.position(key).map(|i| inner.items[i].clone())
    }

    pub fn filter(&self) -> FilterState {
        self.lock().filter
    }

    /// Change the active filter. The list itself is untouched.
    pub fn set_filter(&self, filter: FilterState) {
        self.lock().filter = filter;
        self.notify_changed();
    }

    pub fn preferences(&self) -> UserPreferences {
        self.lock().preferences
    }

    pub fn filtered(&self, filter: &FilterState) -> Vec<TrackedItem> {
        filter_items(&self.lock().items, filter)
    }

    pub fn counts(&self, filter: &FilterState) -> BTreeMap<WatchStatus, usize> {
        count_by_status(&self.lock().items, filter)
    }

    pub fn board(&self, filter: &FilterState) -> Vec<BoardColumn> {
        board_columns(&self.lock().items, filter)
    }

    fn require_user(&self) -> Result<u64, TrackerError> {
        self.lock().user_id.ok_or(TrackerError::NoActiveUser)
    }

    /// Replace the list with `user_id`'s stored items. On failure the
    /// previous list and user stay as they were.
    pub async fn load(&self, user_id: u64) -> Result<Vec<TrackedItem>, TrackerError> {
        let items = self
            .persistence
            .list_media(user_id)
            .await
            .map_err(|source| TrackerError::Load { user_id, source })?;

        info!("Loaded {} tracked items for user {}", items.len(), user_id);
        {
            let mut inner = self.lock();
            if inner.user_id != Some(user_id) {
                inner.preferences = UserPreferences::default();
            }
            inner.user_id = Some(user_id);
            inner.items = items.clone();
            inner.sequences.clear();
        }
        self.notify_changed();
        Ok(items)
    }

    /// Fetch stored preferences. A failed read keeps the defaults.
    pub async fn load_preferences(&self, user_id: u64) -> UserPreferences {
        let preferences = match self.persistence.get_preferences(user_id).await {
            Ok(preferences) => preferences,
            Err(e) => {
                warn!("Failed to load preferences for user {}, using defaults: {}", user_id, e);
                UserPreferences::default()
            }
        };

        let mut inner = self.lock();
        if inner.user_id == Some(user_id) {
            inner.preferences = preferences;
        }
        preferences
    }

    /// Load list and preferences together
    pub async fn select_user(&self, user_id: u64) -> Result<Vec<TrackedItem>, TrackerError> {
        let (items, preferences) = futures::join!(self.load(user_id), self.load_preferences(user_id));
        let items = items?;
        self.lock().preferences = preferences;
        Ok(items)
    }

    /// Store new preferences. The local copy changes only once the write is
    /// confirmed.
    pub async fn save_preferences(&self, preferences: UserPreferences) -> Result<(), TrackerError> {
        let user_id = self.require_user()?;
        self.persistence
            .set_preferences(user_id, &preferences)
            .await
            .map_err(TrackerError::Persist)?;

        self.lock().preferences = preferences;
        debug!("Saved preferences for user {}", user_id);
        Ok(())
    }

    /// Track a catalog title with status to-watch.
    ///
    /// The item joins the list only after the service has stored it. Missing
    /// runtime details do not block the add.
    pub async fn add(&self, candidate: &CatalogCandidate) -> Result<TrackedItem, TrackerError> {
        let key = candidate.key();
        let (user_id, watch_preference) = {
            let inner = self.lock();
            let user_id = inner.user_id.ok_or(TrackerError::NoActiveUser)?;
            if inner.position(key).is_some() {
                return Err(TrackerError::Duplicate {
                    id: key.id,
                    kind: key.kind,
                });
            }
            let preference = inner
                .filter
                .watch_preference
                .selected()
                .unwrap_or(inner.preferences.default_watch_preference);
            (user_id, preference)
        };

        let detail = match self.catalog.details(key.kind, key.id).await {
            Ok(detail) => Some(detail),
            Err(source) => {
                let soft = TrackerError::DetailFetch { key, source };
                warn!("{}; adding without runtime", soft);
                None
            }
        };

        let new_item = candidate.to_new_item(detail.as_ref(), watch_preference);
        if let Err(e) = self.persistence.create_media(user_id, &new_item).await {
            if e.is_conflict() {
                return Err(TrackerError::Duplicate {
                    id: key.id,
                    kind: key.kind,
                });
            }
            return Err(TrackerError::Persist(e));
        }

        let item = new_item.into_tracked();
        {
            let mut inner = self.lock();
            if inner.user_id != Some(user_id) {
                debug!("User changed while adding {}; not adding locally", key);
                return Ok(item);
            }
            if inner.position(key).is_none() {
                inner.items.push(item.clone());
            }
        }
        info!("Added {} '{}' as {}", key, item.title, item.watch_preference);
        self.notify_changed();
        Ok(item)
    }

    /// Move an item to `status`. The item goes to the end of the list.
    ///
    /// A missing item is a no-op. If the write fails the status is rolled
    /// back, observers are told, and the error is returned.
    pub async fn update_status(&self, key: ItemKey, status: WatchStatus) -> Result<(), TrackerError> {
        self.apply_optimistic(key, Change::Status(status)).await
    }

    pub async fn update_preference(
        &self,
        key: ItemKey,
        preference: WatchPreference,
    ) -> Result<(), TrackerError> {
        self.apply_optimistic(key, Change::Preference(preference)).await
    }

    async fn apply_optimistic(&self, key: ItemKey, change: Change) -> Result<(), TrackerError> {
        let field = change.field();
        let (user_id, original, original_index, sequence, update) = {
            let mut inner = self.lock();
            let user_id = inner.user_id.ok_or(TrackerError::NoActiveUser)?;
            let Some(index) = inner.position(key) else {
                debug!("Ignoring {:?} for {}: not tracked", change, key);
                return Ok(());
            };

            let mut item = inner.items.remove(index);
            let original = change.apply(&mut item);
            let update = MediaUpdate::from(&item);
            match field {
                Field::Status => inner.items.push(item),
                Field::Preference => inner.items.insert(index, item),
            }

            inner.next_sequence += 1;
            let sequence = inner.next_sequence;
            inner.sequences.insert((key, field), sequence);
            (user_id, original, index, sequence, update)
        };
        self.notify_changed();

        let Err(source) = self.persistence.update_media(user_id, key, &update).await else {
            debug!("Saved {} for {}", update.status, key);
            return Ok(());
        };

        warn!("Failed to save change to {}: {}", key, source);
        let reverted = {
            let mut inner = self.lock();
            let latest = inner.user_id == Some(user_id)
                && inner.sequences.get(&(key, field)) == Some(&sequence);
            match inner.position(key) {
                Some(index) if latest => {
                    original.apply(&mut inner.items[index]);
                    if field == Field::Status && self.reposition == RepositionPolicy::Restore {
                        let item = inner.items.remove(index);
                        let target = original_index.min(inner.items.len());
                        inner.items.insert(target, item);
                    }
                    true
                }
                _ => false,
            }
        };

        if reverted {
            self.notify_changed();
        } else {
            debug!("Discarding stale rollback of {:?} for {}", original, key);
        }

        let error = TrackerError::Persist(source);
        self.notify_failed(&error);
        Err(error)
    }

    /// Delete an item. It leaves the local list only once the service has
    /// confirmed the delete.
    pub async fn remove(&self, key: ItemKey) -> Result<(), TrackerError> {
        let user_id = self.require_user()?;
        if self.lock().position(key).is_none() {
            debug!("Ignoring remove of {}: not tracked", key);
            return Ok(());
        }

        if let Err(source) = self.persistence.delete_media(user_id, key).await {
            let error = TrackerError::Persist(source);
            warn!("Failed to remove {}: {}", key, error);
            self.notify_failed(&error);
            return Err(error);
        }

        {
            let mut inner = self.lock();
            if inner.user_id == Some(user_id) {
                inner.items.retain(|item| item.key() != key);
                inner.sequences.retain(|(k, _), _| *k != key);
            }
        }
        info!("Removed {}", key);
        self.notify_changed();
        Ok(())
    }
}
