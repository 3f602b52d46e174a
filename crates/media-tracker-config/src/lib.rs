pub mod config;
pub mod paths;
pub mod session;

pub use config::{CatalogConfig, Config, LoggingConfig, PersistenceConfig, RepositionPolicy, TrackerOptions};
pub use paths::{base_path_override, PathManager};
pub use session::SessionStore;
