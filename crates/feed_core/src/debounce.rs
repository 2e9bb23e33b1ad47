use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    value: String,
    deadline: Instant,
}

/// Explicit debounce timer handle.
///
/// Time is passed in by the caller, which keeps the handle deterministic:
/// the app feeds it `Instant::now()` from its tick loop, tests feed it
/// synthetic instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Record `value` and restart the quiet period from `now`.
    pub fn schedule(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            value: value.into(),
            deadline: now + self.quiet,
        });
    }

    /// Drop the pending value, if any, without committing it.
    pub fn cancel(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Cancel the timer and hand back `value` for an immediate commit.
    pub fn flush_now(&mut self, value: impl Into<String>) -> String {
        self.pending = None;
        value.into()
    }

    /// Returns the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.cancel(),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}
