use chrono::Utc;
use feed_core::{update, Effect, FeedConfig, FeedState, Msg, Query, RequestId};
use feed_server::{search, Collection, SearchParams};
use proptest::prelude::*;

fn next_fetch(effects: &[Effect]) -> Option<(RequestId, Query, usize, usize)> {
    effects.iter().find_map(|effect| match effect {
        Effect::FetchPage {
            request,
            query,
            offset,
            limit,
        } => Some((*request, query.clone(), *offset, *limit)),
        _ => None,
    })
}

/// Scrolls until the controller stops asking for pages; returns the fetch count.
fn scroll_to_end(collection: &Collection, state: FeedState, first: Vec<Effect>) -> (FeedState, usize) {
    let mut state = state;
    let mut effects = first;
    let mut fetches = 0;
    while let Some((request, query, offset, limit)) = next_fetch(&effects) {
        fetches += 1;
        let params = SearchParams::new(offset as i64, limit as i64, query.as_str());
        let page = search(collection, &params);
        let (next, _) = update(state, Msg::PageLoaded { request, page });
        let (next, more) = update(next, Msg::LoadMoreRequested);
        state = next;
        effects = more;
    }
    (state, fetches)
}

#[test]
fn reference_feed_loads_in_ten_pages() {
    let collection = Collection::generate(181, Utc::now());
    let (state, effects) = update(FeedState::default(), Msg::Started);
    let (state, fetches) = scroll_to_end(&collection, state, effects);

    assert_eq!(fetches, 10);
    assert_eq!(state.items().count(), 181);
    assert_eq!(state.pages().last().map(|page| page.items.len()), Some(1));
    assert!(!state.view().has_more);
}

proptest! {
    #[test]
    fn pages_concatenate_to_filtered_set(
        size in 0usize..250,
        page_size in 1usize..=100,
        raw_query in "[0-9#a-z ]{0,4}",
    ) {
        let collection = Collection::generate(size, Utc::now());
        let config = FeedConfig { page_size, ..FeedConfig::default() };
        let (state, effects) = update(FeedState::new(config), Msg::QueryChanged(raw_query.clone()));
        let (state, fetches) = scroll_to_end(&collection, state, effects);

        let query = Query::new(&raw_query);
        let expected: Vec<&str> = collection.filter(&query).map(|item| item.id.as_str()).collect();
        let loaded: Vec<&str> = state.items().map(|item| item.id.as_str()).collect();
        prop_assert_eq!(&loaded, &expected);
        prop_assert!(state.is_exhausted());
        for pair in state.pages().windows(2) {
            prop_assert_eq!(pair[0].end(), pair[1].offset);
        }
        let expected_fetches = expected.len().div_ceil(page_size).max(1);
        prop_assert_eq!(fetches, expected_fetches);
    }
}
