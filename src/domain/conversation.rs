use crate::domain::message::{MediaFile, Message, MessageDirection, MessageStatus, compare_desc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub phone_number_id: String,
    pub user_id: String,
    pub title: String,
    pub counterparty_number: String,
    /// Kept in arrival order; readers sort with the message comparators.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A media file flattened out of the outbound message that carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMedia {
    #[serde(flatten)]
    pub file: MediaFile,
    pub message_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
    pub status: MessageStatus,
}

impl Conversation {
    #[must_use]
    pub fn latest_message(&self) -> Option<&Message> {
        self.messages.iter().min_by(|a, b| compare_desc(a, b))
    }

    #[must_use]
    pub fn last_activity_at(&self) -> Option<OffsetDateTime> {
        self.latest_message().map(|m| m.created_at)
    }

    /// Media attached to outbound messages, newest first.
    #[must_use]
    pub fn sent_media(&self) -> Vec<SentMedia> {
        let mut items: Vec<SentMedia> = self
            .messages
            .iter()
            .filter(|m| m.direction == MessageDirection::Outbound && m.has_media())
            .flat_map(|m| {
                m.media_files.iter().map(move |file| SentMedia {
                    file: file.clone(),
                    message_id: m.id.clone(),
                    sent_at: m.created_at,
                    status: m.status,
                })
            })
            .collect();
        items.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        items
    }

    /// Same conversation without its message list.
    #[must_use]
    pub fn summary(&self) -> Self {
        Self { messages: Vec::new(), ..self.clone() }
    }
}

/// Most recently active first. Conversations without messages go last and
/// keep their relative order.
pub fn sort_by_activity(conversations: &mut [Conversation]) {
    conversations.sort_by(compare_activity);
}

#[must_use]
pub fn compare_activity(a: &Conversation, b: &Conversation) -> Ordering {
    match (a.last_activity_at(), b.last_activity_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
