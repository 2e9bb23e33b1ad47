use feed_core::Page;

use crate::{Collection, SearchParams};

/// Filter-then-slice over `collection`.
///
/// `total` is the filtered count and is reported even when `offset` is past
/// the end, in which case `items` is empty.
pub fn search(collection: &Collection, params: &SearchParams) -> Page {
    let total = collection.filter(&params.query).count();
    let items = collection
        .filter(&params.query)
        .skip(params.offset)
        .take(params.limit)
        .cloned()
        .collect();
    Page {
        offset: params.offset,
        limit: params.limit,
        total,
        items,
    }
}
