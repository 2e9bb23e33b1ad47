use chrono::{DateTime, Utc};
use feed_core::{FeedViewModel, Item};

/// Tracks what has already been printed so each render only appends.
#[derive(Debug, Default)]
pub struct Renderer {
    shown: usize,
    /// Query of the list on screen; `None` until the first render.
    query: Option<String>,
    status: String,
}

impl Renderer {
    /// Lines to print for `view`: a header when the list was replaced,
    /// newly appended rows, then the status line if it changed.
    pub fn render(&mut self, view: &FeedViewModel, now: DateTime<Utc>) -> Vec<String> {
        let mut lines = Vec::new();

        if view.items.len() < self.shown || self.query.as_deref() != Some(view.query.as_str()) {
            self.shown = 0;
            self.query = Some(view.query.clone());
            self.status.clear();
            lines.push(header(view));
        }

        for item in &view.items[self.shown..] {
            lines.push(format_row(item, now));
        }
        self.shown = view.items.len();

        let status = status_line(view);
        if status != self.status {
            lines.push(status.clone());
            self.status = status;
        }
        lines
    }
}

fn header(view: &FeedViewModel) -> String {
    if view.query.is_empty() {
        "== all posts ==".to_string()
    } else {
        format!("== posts matching \"{}\" ==", view.query)
    }
}

pub fn status_line(view: &FeedViewModel) -> String {
    if view.is_loading {
        return "-- loading...".to_string();
    }
    if view.is_error && view.items.is_empty() {
        let reason = view.error.as_deref().unwrap_or("unknown error");
        return format!("-- failed to load posts: {reason} (/retry)");
    }
    let shown = view.items.len();
    let total = view.total.unwrap_or(shown);
    if shown == 0 {
        return "-- no posts found".to_string();
    }
    let tail = if view.is_error {
        let reason = view.error.as_deref().unwrap_or("unknown error");
        format!("failed to load more: {reason} (/retry)")
    } else if view.is_fetching_more {
        "loading more...".to_string()
    } else if view.has_more {
        "scroll for more".to_string()
    } else {
        "end of results".to_string()
    };
    format!(
        "-- showing {} of {} | {}",
        format_with_commas(shown),
        format_with_commas(total),
        tail
    )
}

fn format_row(item: &Item, now: DateTime<Utc>) -> String {
    match item.created_at {
        Some(created) => format!("{:>5}  {}  ({})", item.id, item.title, age(created, now)),
        None => format!("{:>5}  {}", item.id, item.title),
    }
}

fn age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - created).num_minutes().max(0);
    match minutes {
        0 => "just now".to_string(),
        m if m < 60 => format!("{m}m ago"),
        m if m < 60 * 24 => format!("{}h ago", m / 60),
        m => format!("{}d ago", m / (60 * 24)),
    }
}

fn format_with_commas(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn item(id: usize, now: DateTime<Utc>) -> Item {
        Item {
            id: id.to_string(),
            title: format!("Mock post #{id}"),
            body: String::new(),
            created_at: Some(now - Duration::minutes(id as i64)),
        }
    }

    fn ready(count: usize, total: usize, now: DateTime<Utc>) -> FeedViewModel {
        FeedViewModel {
            items: (1..=count).map(|id| item(id, now)).collect(),
            total: Some(total),
            has_more: count < total,
            ..FeedViewModel::default()
        }
    }

    #[test]
    fn appends_only_new_rows() {
        let now = Utc::now();
        let mut renderer = Renderer::default();

        let first = renderer.render(&ready(2, 4, now), now);
        assert_eq!(
            first,
            vec![
                "== all posts ==".to_string(),
                "    1  Mock post #1  (1m ago)".to_string(),
                "    2  Mock post #2  (2m ago)".to_string(),
                "-- showing 2 of 4 | scroll for more".to_string(),
            ]
        );

        let second = renderer.render(&ready(4, 4, now), now);
        assert_eq!(second.len(), 3);
        assert_eq!(second[2], "-- showing 4 of 4 | end of results");
    }

    #[test]
    fn replaced_list_starts_over() {
        let now = Utc::now();
        let mut renderer = Renderer::default();
        renderer.render(&ready(3, 3, now), now);

        let mut filtered = ready(1, 1, now);
        filtered.query = "#1".to_string();
        let lines = renderer.render(&filtered, now);
        assert_eq!(lines[0], "== posts matching \"#1\" ==");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn unchanged_view_prints_nothing() {
        let now = Utc::now();
        let mut renderer = Renderer::default();
        let view = ready(2, 2, now);
        renderer.render(&view, now);
        assert!(renderer.render(&view, now).is_empty());
    }

    #[test]
    fn status_reflects_loading_and_errors() {
        let loading = FeedViewModel {
            is_loading: true,
            ..FeedViewModel::default()
        };
        assert_eq!(status_line(&loading), "-- loading...");

        let failed = FeedViewModel {
            is_error: true,
            error: Some("HTTP 500".to_string()),
            ..FeedViewModel::default()
        };
        assert_eq!(status_line(&failed), "-- failed to load posts: HTTP 500 (/retry)");

        let empty = FeedViewModel {
            total: Some(0),
            ..FeedViewModel::default()
        };
        assert_eq!(status_line(&empty), "-- no posts found");
    }

    #[test]
    fn ages_are_coarse() {
        let now = Utc::now();
        assert_eq!(age(now, now), "just now");
        assert_eq!(age(now - Duration::minutes(90), now), "1h ago");
        assert_eq!(age(now - Duration::days(3), now), "3d ago");
    }

    #[test]
    fn large_totals_get_separators() {
        assert_eq!(format_with_commas(181), "181");
        assert_eq!(format_with_commas(1234567), "1,234,567");
    }
}
