use chrono::{DateTime, Duration, Utc};
use feed_core::{Item, Query};

/// Size of the reference collection.
pub const REFERENCE_SIZE: usize = 181;

/// Ordered, immutable list of items served by the search service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collection {
    items: Vec<Item>,
}

impl Collection {
    /// Generate `count` mock posts, newest first, ids `"1"..="count"`.
    pub fn generate(count: usize, now: DateTime<Utc>) -> Self {
        let items = (1..=count)
            .map(|i| Item {
                id: i.to_string(),
                title: format!("Mock post #{i}"),
                body: format!(
                    "This is the body of mock post number {i}. It contains some sample text to demonstrate pagination and search."
                ),
                created_at: Some(now - Duration::minutes(i as i64)),
            })
            .collect();
        Self { items }
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items whose title and body contain `query`, in collection order.
    pub fn filter<'a>(&'a self, query: &'a Query) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .filter(move |item| query.matches(&searchable_text(item)))
    }
}

fn searchable_text(item: &Item) -> String {
    format!("{} {}", item.title, item.body)
}
