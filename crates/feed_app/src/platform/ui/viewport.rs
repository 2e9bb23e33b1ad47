use feed_core::Observation;

pub const VIEWPORT_HEIGHT: f64 = 800.0;
pub const ROW_HEIGHT: f64 = 120.0;
pub const SENTINEL_HEIGHT: f64 = 40.0;

/// Fixed-height rows followed by the sentinel, scrolled by line commands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulatedViewport {
    scroll_top: f64,
}

impl SimulatedViewport {
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn scroll_by(&mut self, delta: f64, item_count: usize) {
        let max = (content_height(item_count) - VIEWPORT_HEIGHT).max(0.0);
        self.scroll_top = (self.scroll_top + delta).clamp(0.0, max);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0.0;
    }

    pub fn observe(&self, item_count: usize) -> Observation {
        Observation {
            viewport_top: self.scroll_top,
            viewport_height: VIEWPORT_HEIGHT,
            sentinel_top: item_count as f64 * ROW_HEIGHT,
            sentinel_height: SENTINEL_HEIGHT,
        }
    }
}

fn content_height(item_count: usize) -> f64 {
    item_count as f64 * ROW_HEIGHT + SENTINEL_HEIGHT
}
