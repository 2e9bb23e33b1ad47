//! Forward-only continuation over a stateless offset/limit API.
//!
//! The server remembers nothing between calls; everything needed to ask for
//! the next page is derived from the last page the client received.
use thiserror::Error;

use crate::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    More { next_offset: usize },
    Exhausted,
}

/// Decide whether another page exists after `page`.
///
/// An empty page is treated as exhausting the feed even when `total` claims
/// otherwise, so a misbehaving server can never make the client re-request
/// the same offset forever.
pub fn continuation(page: &Page) -> Continuation {
    let next_offset = page.end();
    if page.items.is_empty() || next_offset >= page.total {
        Continuation::Exhausted
    } else {
        Continuation::More { next_offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("requested offset {requested} but server answered for offset {returned}")]
    OffsetMismatch { requested: usize, returned: usize },
    #[error("page ends at {end} which is past the reported total {total}")]
    Overrun { end: usize, total: usize },
}

/// Validate a page against the offset it was requested for.
pub fn check_page(requested_offset: usize, page: &Page) -> Result<(), CursorError> {
    if page.offset != requested_offset {
        return Err(CursorError::OffsetMismatch {
            requested: requested_offset,
            returned: page.offset,
        });
    }
    if page.end() > page.total {
        return Err(CursorError::Overrun {
            end: page.end(),
            total: page.total,
        });
    }
    Ok(())
}
