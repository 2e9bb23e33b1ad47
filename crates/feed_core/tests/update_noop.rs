use std::time::Instant;

use feed_core::{update, FeedState, Msg};

#[test]
fn tick_without_pending_search_is_noop() {
    let state = FeedState::new(Default::default());
    let (next, effects) = update(state.clone(), Msg::Tick { now: Instant::now() });

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn retry_outside_error_is_noop() {
    let state = FeedState::default();
    let (next, effects) = update(state.clone(), Msg::RetryClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
