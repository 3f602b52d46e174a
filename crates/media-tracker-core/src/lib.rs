pub mod board;
pub mod error;
pub mod observer;
pub mod state;

pub use board::{board_columns, count_by_status, filter_items, matches_filter, BoardColumn};
pub use error::TrackerError;
pub use observer::TrackerObserver;
pub use state::TrackerState;
