use feed_logging::{feed_debug, feed_trace};

use crate::{Effect, FeedState, LoadKind, Msg, Phase, Query};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    if state.is_torn_down() {
        feed_trace!("Ignoring {:?} after teardown", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Started => {
            if state.phase() == Phase::Idle {
                let query = state.query().clone();
                start(&mut state, query)
            } else {
                Vec::new()
            }
        }
        Msg::SearchInputChanged { value, at } => {
            state.set_search_input(value.clone());
            state.debouncer_mut().schedule(value, at);
            Vec::new()
        }
        Msg::SearchSubmitted => {
            let input = state.search_input().to_owned();
            let value = state.debouncer_mut().flush_now(input);
            change_query(&mut state, &value)
        }
        Msg::SearchCleared => {
            state.set_search_input(String::new());
            let value = state.debouncer_mut().flush_now("");
            change_query(&mut state, &value)
        }
        Msg::QueryChanged(raw) => change_query(&mut state, &raw),
        Msg::Tick { now } => match state.debouncer_mut().poll(now) {
            Some(value) => change_query(&mut state, &value),
            None => Vec::new(),
        },
        Msg::LoadMoreRequested => load_more(&mut state),
        Msg::SentinelObserved(observation) => {
            if state.trigger().should_load(&observation) {
                load_more(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::RetryClicked => retry(&mut state),
        Msg::PageLoaded { request, page } => {
            state.apply_page(request, page);
            Vec::new()
        }
        Msg::PageFailed { request, error } => {
            state.apply_failure(request, error);
            Vec::new()
        }
        Msg::TornDown => {
            state.tear_down();
            Vec::new()
        }
    };

    (state, effects)
}

fn start(state: &mut FeedState, query: Query) -> Vec<Effect> {
    state.reset(query);
    vec![Effect::ScrollToTop, fetch(state, LoadKind::Initial, 0)]
}

fn change_query(state: &mut FeedState, raw: &str) -> Vec<Effect> {
    let query = Query::new(raw);
    // Before the first start there is no accumulation to keep, even for an equal key.
    if state.phase() != Phase::Idle && &query == state.query() {
        return Vec::new();
    }
    feed_debug!(
        "Query changed {:?} -> {:?}",
        state.query().as_str(),
        query.as_str()
    );
    start(state, query)
}

fn load_more(state: &mut FeedState) -> Vec<Effect> {
    if state.phase() != Phase::Ready || state.is_exhausted() || state.in_flight().is_some() {
        return Vec::new();
    }
    let offset = state.next_offset();
    vec![fetch(state, LoadKind::More, offset)]
}

fn retry(state: &mut FeedState) -> Vec<Effect> {
    match state.phase() {
        Phase::Error(kind) => {
            let offset = state.next_offset();
            vec![fetch(state, kind, offset)]
        }
        _ => Vec::new(),
    }
}

fn fetch(state: &mut FeedState, kind: LoadKind, offset: usize) -> Effect {
    let limit = state.config().page_size;
    let in_flight = state.begin_fetch(kind, offset);
    feed_debug!(
        "Fetch {} query={:?} offset={} limit={}",
        in_flight.request,
        in_flight.query.as_str(),
        offset,
        limit
    );
    Effect::FetchPage {
        request: in_flight.request,
        query: in_flight.query,
        offset,
        limit,
    }
}
