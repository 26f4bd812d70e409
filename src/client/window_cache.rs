use crate::domain::conversation::Conversation;
use crate::domain::message::{Message, compare_asc};
use crate::domain::pagination::{MessageWindow, Paginator};
use std::collections::HashMap;

/// Loaded message windows keyed by conversation id.
///
/// A window that has not been materialized yet is computed from the
/// conversation's first page on first access and kept from then on.
#[derive(Debug, Clone, Default)]
pub struct WindowCache {
    paginator: Paginator,
    windows: HashMap<String, MessageWindow>,
}

impl WindowCache {
    #[must_use]
    pub fn new(paginator: Paginator) -> Self {
        Self { paginator, windows: HashMap::new() }
    }

    #[must_use]
    pub fn get(&self, conversation_id: &str) -> Option<&MessageWindow> {
        self.windows.get(conversation_id)
    }

    pub fn get_or_compute(&mut self, conversation: &Conversation) -> &MessageWindow {
        let paginator = self.paginator;
        self.windows
            .entry(conversation.id.clone())
            .or_insert_with(|| paginator.page(&conversation.messages, None).into())
    }

    /// Prepends the page older than the window's cursor.
    ///
    /// Returns false without touching the window when it is already
    /// exhausted.
    pub fn load_older(&mut self, conversation: &Conversation) -> bool {
        let paginator = self.paginator;
        let window = self
            .windows
            .entry(conversation.id.clone())
            .or_insert_with(|| paginator.page(&conversation.messages, None).into());

        let Some(cursor) = window.next_cursor.as_deref() else {
            return false;
        };

        let page = paginator.page(&conversation.messages, Some(cursor));
        let mut messages = page.messages;
        messages.append(&mut window.messages);
        window.messages = messages;
        window.next_cursor = page.next_cursor;
        true
    }

    /// Places a locally sent message into a materialized window at its
    /// chronological position. The cursor is left as it was.
    pub fn insert_message(&mut self, message: Message) {
        let Some(window) = self.windows.get_mut(&message.conversation_id) else {
            return;
        };
        if window.messages.iter().any(|m| m.id == message.id) {
            return;
        }

        let index = window.messages.partition_point(|m| compare_asc(m, &message).is_lt());
        window.messages.insert(index, message);
    }

    pub fn clear(&mut self) {
        self.windows.clear();
    }
}
