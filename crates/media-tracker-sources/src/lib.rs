pub mod error;
pub mod http;
pub mod persistence;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use persistence::PersistenceClient;
pub use tmdb::TmdbClient;
pub use traits::{CatalogService, PersistenceService};
