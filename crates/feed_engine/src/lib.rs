//! Feed engine: HTTP page fetching and effect execution off the UI thread.
mod engine;
mod fetch;
mod types;

pub use engine::EngineHandle;
pub use fetch::{FetchSettings, PageFetcher, PageRequest, ReqwestPageFetcher};
pub use types::{EngineEvent, FailureKind, FetchError};
