use crate::domain::message::{Message, compare_asc, compare_desc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 500;

/// One slice of a conversation, oldest message first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub messages: Vec<Message>,
    /// Id of the oldest message in `messages` when older ones remain.
    pub next_cursor: Option<String>,
}

/// The materialized part of a conversation plus the cursor for the next
/// older page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageWindow {
    pub messages: Vec<Message>,
    pub next_cursor: Option<String>,
}

impl From<Page> for MessageWindow {
    fn from(page: Page) -> Self {
        Self { messages: page.messages, next_cursor: page.next_cursor }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1) }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the page that follows `cursor` in newest-first order.
    ///
    /// `None` starts from the most recent message. A cursor that matches no
    /// message also starts from the most recent one.
    #[must_use]
    pub fn page(&self, messages: &[Message], cursor: Option<&str>) -> Page {
        let mut ordered: Vec<&Message> = messages.iter().collect();
        ordered.sort_by(|a, b| compare_desc(a, b));

        let start = match cursor {
            Some(cursor_id) => {
                if let Some(index) = ordered.iter().position(|m| m.id == cursor_id) {
                    index + 1
                } else {
                    tracing::debug!(cursor = %cursor_id, "Cursor not found, starting from most recent");
                    0
                }
            }
            None => 0,
        };

        let end = start.saturating_add(self.page_size).min(ordered.len());
        let slice = ordered.get(start..end).unwrap_or_default();

        let next_cursor = if end < ordered.len() { slice.last().map(|m| m.id.clone()) } else { None };

        let mut page: Vec<Message> = slice.iter().map(|m| (*m).clone()).collect();
        page.sort_by(compare_asc);

        Page { messages: page, next_cursor }
    }
}

/// Pages with the default page size.
#[must_use]
pub fn paginate(messages: &[Message], cursor: Option<&str>) -> Page {
    Paginator::default().page(messages, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::tests::message_at;
    use std::collections::HashSet;
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};

    fn conversation(count: usize) -> Vec<Message> {
        let base = datetime!(2024-03-01 09:00 UTC);
        (1..=count).map(|i| message_at(&format!("m{i}"), base + Duration::minutes(i as i64))).collect()
    }

    fn ids(page: &Page) -> Vec<&str> {
        page.messages.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_first_page_is_most_recent_ascending() {
        let messages = conversation(25);

        let page = paginate(&messages, None);

        assert_eq!(ids(&page), vec!["m16", "m17", "m18", "m19", "m20", "m21", "m22", "m23", "m24", "m25"]);
        assert_eq!(page.next_cursor.as_deref(), Some("m16"));
    }

    #[test]
    fn test_chained_cursor_exhausts_25_messages_in_three_pages() {
        let messages = conversation(25);

        let first = paginate(&messages, None);
        let second = paginate(&messages, first.next_cursor.as_deref());
        assert_eq!(ids(&second).first().copied(), Some("m6"));
        assert_eq!(ids(&second).last().copied(), Some("m15"));
        assert_eq!(second.next_cursor.as_deref(), Some("m6"));

        let third = paginate(&messages, second.next_cursor.as_deref());
        assert_eq!(ids(&third), vec!["m1", "m2", "m3", "m4", "m5"]);
        assert_eq!(third.next_cursor, None);
    }

    #[test]
    fn test_enumerates_every_message_exactly_once() {
        for count in [0_usize, 1, 9, 10, 11, 20, 37] {
            let mut messages = conversation(count);
            messages.reverse();

            let mut seen = HashSet::new();
            let mut pages = 0;
            let mut cursor: Option<String> = None;
            loop {
                let page = paginate(&messages, cursor.as_deref());
                pages += 1;
                assert!(page.messages.len() <= DEFAULT_PAGE_SIZE);
                assert!(page.messages.windows(2).all(|w| compare_asc(&w[0], &w[1]).is_lt()));
                for m in &page.messages {
                    assert!(seen.insert(m.id.clone()), "duplicate {}", m.id);
                }
                match page.next_cursor {
                    Some(next) => cursor = Some(next),
                    None => break,
                }
            }

            assert_eq!(seen.len(), count);
            assert_eq!(pages, count.div_ceil(DEFAULT_PAGE_SIZE).max(1));
        }
    }

    #[test]
    fn test_exact_multiple_of_page_size_has_no_trailing_cursor() {
        let messages = conversation(20);

        let first = paginate(&messages, None);
        let second = paginate(&messages, first.next_cursor.as_deref());

        assert_eq!(second.messages.len(), 10);
        assert_eq!(second.next_cursor, None);
    }

    #[test]
    fn test_unknown_cursor_starts_from_most_recent() {
        let messages = conversation(15);

        let page = paginate(&messages, Some("missing"));

        assert_eq!(page, paginate(&messages, None));
    }

    #[test]
    fn test_tied_timestamps_paginate_deterministically() {
        let at = OffsetDateTime::UNIX_EPOCH;
        let messages: Vec<Message> = (0..12).map(|i| message_at(&format!("x{i:02}"), at)).collect();

        let first = paginate(&messages, None);
        let second = paginate(&messages, first.next_cursor.as_deref());

        assert_eq!(ids(&first).last().copied(), Some("x11"));
        assert_eq!(ids(&first).first().copied(), Some("x02"));
        assert_eq!(ids(&second), vec!["x00", "x01"]);
    }

    #[test]
    fn test_custom_page_size_and_zero_clamp() {
        let messages = conversation(5);

        let page = Paginator::new(2).page(&messages, None);
        assert_eq!(ids(&page), vec!["m4", "m5"]);

        assert_eq!(Paginator::new(0).page_size(), 1);
    }

    #[test]
    fn test_huge_page_size_with_cursor_returns_the_rest() {
        let messages = conversation(5);

        let page = Paginator::new(usize::MAX).page(&messages, Some("m4"));

        assert_eq!(ids(&page), vec!["m1", "m2", "m3"]);
        assert_eq!(page.next_cursor, None);
    }
}
