//! Feed core: pure pagination state machine, query debouncing and viewport
//! triggering. No IO lives here; effects are returned as data.
mod config;
mod cursor;
mod debounce;
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;
mod viewport;

pub use config::{FeedConfig, DEBOUNCE_QUIET_PERIOD, PAGE_SIZE};
pub use cursor::{check_page, continuation, Continuation, CursorError};
pub use debounce::Debouncer;
pub use effect::Effect;
pub use model::{Item, Page, Query};
pub use msg::Msg;
pub use state::{FeedState, InFlight, LoadKind, Phase, RequestId};
pub use update::update;
pub use view_model::FeedViewModel;
pub use viewport::{Observation, ViewportConfig, ViewportTrigger};
