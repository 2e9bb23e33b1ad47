/// Look-ahead and visibility settings for the sentinel observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Extra space around the viewport in which the sentinel already counts.
    pub margin: f64,
    /// Minimum visible fraction of the sentinel before it is "reached".
    pub threshold: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            margin: 200.0,
            threshold: 0.1,
        }
    }
}

/// One layout measurement, all values in the same unit and coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub viewport_top: f64,
    pub viewport_height: f64,
    pub sentinel_top: f64,
    pub sentinel_height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportTrigger {
    config: ViewportConfig,
    attached: bool,
}

impl ViewportTrigger {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            attached: true,
        }
    }

    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    /// Fraction of the sentinel inside the margin-expanded viewport.
    pub fn visible_fraction(&self, obs: &Observation) -> f64 {
        let top = obs.viewport_top - self.config.margin;
        let bottom = obs.viewport_top + obs.viewport_height.max(0.0) + self.config.margin;

        if obs.sentinel_height <= 0.0 {
            return if (top..=bottom).contains(&obs.sentinel_top) {
                1.0
            } else {
                0.0
            };
        }

        let sentinel_bottom = obs.sentinel_top + obs.sentinel_height;
        let overlap = bottom.min(sentinel_bottom) - top.max(obs.sentinel_top);
        (overlap.max(0.0) / obs.sentinel_height).min(1.0)
    }

    /// Whether this observation should request the next page.
    pub fn should_load(&self, obs: &Observation) -> bool {
        if !self.attached {
            return false;
        }
        let fraction = self.visible_fraction(obs);
        fraction > 0.0 && fraction >= self.config.threshold
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}
