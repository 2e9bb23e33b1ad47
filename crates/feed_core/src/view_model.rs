use crate::Item;

/// Read-only snapshot for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedViewModel {
    /// Committed, normalized query the items belong to.
    pub query: String,
    /// Raw search box contents, possibly not yet committed.
    pub search_input: String,
    pub items: Vec<Item>,
    /// Match count reported by the last page, if any page arrived.
    pub total: Option<usize>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub is_fetching_more: bool,
    pub dirty: bool,
}
