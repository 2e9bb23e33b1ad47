use crate::{Query, RequestId};

/// Side effects requested by [`crate::update`]; executed by the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the search service for one page.
    FetchPage {
        request: RequestId,
        query: Query,
        offset: usize,
        limit: usize,
    },
    /// The accumulated list was replaced; the view should return to the top.
    ScrollToTop,
}
