use std::time::Instant;

use crate::{Observation, Page, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Controller attached to a view; loads the first page of the current query.
    Started,
    /// User edited the search box (raw, not yet committed).
    SearchInputChanged { value: String, at: Instant },
    /// User confirmed the search box; commits without waiting for the debounce.
    SearchSubmitted,
    /// User cleared the search box; commits the empty query immediately.
    SearchCleared,
    /// Commit a query directly, bypassing the search box.
    QueryChanged(String),
    /// Clock tick; drives debounce expiry.
    Tick { now: Instant },
    /// Explicit request for the next page.
    LoadMoreRequested,
    /// Sentinel layout changed.
    SentinelObserved(Observation),
    /// User asked to retry after a failure.
    RetryClicked,
    /// A page request finished successfully.
    PageLoaded { request: RequestId, page: Page },
    /// A page request failed.
    PageFailed { request: RequestId, error: String },
    /// Owning view went away.
    TornDown,
}
