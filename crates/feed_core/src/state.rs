use std::fmt;

use feed_logging::{feed_debug, feed_warn};

use crate::cursor::{self, Continuation};
use crate::view_model::FeedViewModel;
use crate::{Debouncer, FeedConfig, Item, Page, Query, ViewportTrigger};

/// Identifies one issued page request. Strictly increasing per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Initial,
    More,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    LoadingInitial,
    Ready,
    LoadingMore,
    Error(LoadKind),
    TornDown,
}

/// The single outstanding page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight {
    pub request: RequestId,
    pub query: Query,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    config: FeedConfig,
    phase: Phase,
    query: Query,
    search_input: String,
    pages: Vec<Page>,
    exhausted: bool,
    in_flight: Option<InFlight>,
    last_error: Option<String>,
    next_request: u64,
    debouncer: Debouncer,
    trigger: ViewportTrigger,
    dirty: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(FeedConfig::default())
    }
}

impl FeedState {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            query: Query::default(),
            search_input: String::new(),
            pages: Vec::new(),
            exhausted: false,
            in_flight: None,
            last_error: None,
            next_request: 1,
            debouncer: Debouncer::new(config.debounce),
            trigger: ViewportTrigger::new(config.viewport),
            dirty: false,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn trigger(&self) -> &ViewportTrigger {
        &self.trigger
    }

    pub fn is_torn_down(&self) -> bool {
        self.phase == Phase::TornDown
    }

    /// Offset of the next page for the current query.
    pub fn next_offset(&self) -> usize {
        self.pages.last().map_or(0, Page::end)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.pages.iter().flat_map(|page| page.items.iter())
    }

    pub fn view(&self) -> FeedViewModel {
        FeedViewModel {
            query: self.query.as_str().to_owned(),
            search_input: self.search_input.clone(),
            items: self.items().cloned().collect(),
            total: self.pages.last().map(|page| page.total),
            is_loading: self.phase == Phase::LoadingInitial,
            is_error: matches!(self.phase, Phase::Error(_)),
            error: self.last_error.clone(),
            has_more: !self.pages.is_empty() && !self.exhausted,
            is_fetching_more: self.phase == Phase::LoadingMore,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn debouncer_mut(&mut self) -> &mut Debouncer {
        &mut self.debouncer
    }

    pub(crate) fn set_search_input(&mut self, value: String) {
        if self.search_input != value {
            self.search_input = value;
            self.mark_dirty();
        }
    }

    /// Discard the accumulation and make `query` the active cache key.
    pub(crate) fn reset(&mut self, query: Query) {
        self.query = query;
        self.pages.clear();
        self.exhausted = false;
        self.in_flight = None;
        self.last_error = None;
        self.mark_dirty();
    }

    /// Register a new outstanding request at `offset`. Any previous one is superseded.
    pub(crate) fn begin_fetch(&mut self, kind: LoadKind, offset: usize) -> InFlight {
        let request = RequestId(self.next_request);
        self.next_request += 1;
        let in_flight = InFlight {
            request,
            query: self.query.clone(),
            offset,
        };
        self.in_flight = Some(in_flight.clone());
        self.last_error = None;
        self.phase = match kind {
            LoadKind::Initial => Phase::LoadingInitial,
            LoadKind::More => Phase::LoadingMore,
        };
        self.mark_dirty();
        in_flight
    }

    /// Take the in-flight slot if `request` is the current one.
    fn claim(&mut self, request: RequestId) -> Option<InFlight> {
        match &self.in_flight {
            Some(current) if current.request == request && current.query == self.query => {
                self.in_flight.take()
            }
            _ => {
                feed_debug!(
                    "Dropping stale response {} (current: {:?}, query {:?})",
                    request,
                    self.in_flight.as_ref().map(|f| f.request),
                    self.query.as_str()
                );
                None
            }
        }
    }

    pub(crate) fn apply_page(&mut self, request: RequestId, page: Page) {
        let Some(in_flight) = self.claim(request) else {
            return;
        };

        if let Err(err) = cursor::check_page(in_flight.offset, &page) {
            feed_warn!("Rejecting page for request {}: {}", request, err);
            self.fail(in_flight.offset, err.to_string());
            return;
        }

        self.exhausted = matches!(cursor::continuation(&page), Continuation::Exhausted);
        feed_debug!(
            "Request {} appended {} items at offset {} (total {}, exhausted {})",
            request,
            page.items.len(),
            page.offset,
            page.total,
            self.exhausted
        );
        self.pages.push(page);
        self.phase = Phase::Ready;
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, request: RequestId, error: String) {
        let Some(in_flight) = self.claim(request) else {
            return;
        };
        feed_warn!(
            "Request {} for offset {} failed: {}",
            request,
            in_flight.offset,
            error
        );
        self.fail(in_flight.offset, error);
    }

    fn fail(&mut self, offset: usize, error: String) {
        let kind = if offset == 0 && self.pages.is_empty() {
            LoadKind::Initial
        } else {
            LoadKind::More
        };
        self.phase = Phase::Error(kind);
        self.last_error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn tear_down(&mut self) {
        self.debouncer.cancel();
        self.trigger.detach();
        self.in_flight = None;
        self.phase = Phase::TornDown;
        self.mark_dirty();
    }
}
