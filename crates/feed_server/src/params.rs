//! Coercion of raw `offset`/`limit`/`q` parameters.
//!
//! Malformed input is never rejected: anything that does not parse falls
//! back to a default and everything that parses is clamped into range.
use feed_core::Query;

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

/// Validated search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub offset: usize,
    pub limit: usize,
    pub query: Query,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
            query: Query::default(),
        }
    }
}

impl SearchParams {
    /// Clamp numeric parameters: negative offsets become 0, limits land in
    /// `[1, MAX_LIMIT]` and a zero limit means "use the default".
    pub fn new(offset: i64, limit: i64, query: &str) -> Self {
        Self {
            offset: coerce_offset(Some(offset)),
            limit: coerce_limit(Some(limit)),
            query: Query::new(query),
        }
    }

    /// Parse an urlencoded query string such as `offset=20&limit=20&q=post`.
    ///
    /// The first occurrence of each key wins; unknown keys are ignored.
    pub fn from_query_string(raw: &str) -> Self {
        let mut offset = None;
        let mut limit = None;
        let mut q = None;
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "offset" if offset.is_none() => offset = Some(value.into_owned()),
                "limit" if limit.is_none() => limit = Some(value.into_owned()),
                "q" if q.is_none() => q = Some(value.into_owned()),
                _ => {}
            }
        }
        Self {
            offset: coerce_offset(offset.as_deref().and_then(parse_leading_int)),
            limit: coerce_limit(limit.as_deref().and_then(parse_leading_int)),
            query: Query::new(q.as_deref().unwrap_or_default()),
        }
    }
}

fn coerce_offset(raw: Option<i64>) -> usize {
    raw.map_or(0, |offset| usize::try_from(offset.max(0)).unwrap_or(usize::MAX))
}

fn coerce_limit(raw: Option<i64>) -> usize {
    match raw {
        None | Some(0) => DEFAULT_LIMIT,
        Some(limit) => limit.clamp(1, MAX_LIMIT as i64) as usize,
    }
}

/// Parse an optionally signed run of leading digits, ignoring anything after
/// it (`"12abc"` is 12, `"3.9"` is 3). Saturates instead of overflowing.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = rest[..digits_len].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
