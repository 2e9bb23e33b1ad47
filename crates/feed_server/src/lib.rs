//! Feed server: the collection source and the paginated search service.
mod collection;
mod config;
mod error;
mod params;
mod router;
mod search;

pub use collection::{Collection, REFERENCE_SIZE};
pub use config::ServerConfig;
pub use error::{ConfigError, ServerError};
pub use params::{SearchParams, DEFAULT_LIMIT, MAX_LIMIT};
pub use router::{internal_fault_layer, router, AppState};
pub use search::search;
