use std::time::Duration;

use crate::ViewportConfig;

/// Number of items requested per page.
pub const PAGE_SIZE: usize = 20;

/// Quiet period after the last keystroke before a query is committed.
pub const DEBOUNCE_QUIET_PERIOD: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedConfig {
    pub page_size: usize,
    pub debounce: Duration,
    pub viewport: ViewportConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            debounce: DEBOUNCE_QUIET_PERIOD,
            viewport: ViewportConfig::default(),
        }
    }
}
