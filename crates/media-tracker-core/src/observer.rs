use media_tracker_models::TrackedItem;

use crate::error::TrackerError;

/// Receives re-render and failure signals from a [`crate::TrackerState`].
///
/// Both callbacks run synchronously on the task that made the change, with
/// no internal lock held, so an observer may read the state back.
pub trait TrackerObserver: Send + Sync {
    /// The list changed; `items` is the full list in its current order
    fn changed(&self, items: &[TrackedItem]);

    /// A mutation failed and any optimistic change has been handled
    fn failed(&self, error: &TrackerError);
}
