use crate::domain::conversation::Conversation;
use crate::domain::phone_number::PhoneNumber;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::RwLock;

pub mod conversation_repo;
pub mod message_repo;
pub mod phone_number_repo;
pub mod seed;

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) phone_numbers: Vec<PhoneNumber>,
    pub(crate) conversations: Vec<Conversation>,
}

/// Process-lifetime backing store for phone numbers, conversations and
/// their messages.
///
/// Clones share the same tables; separate `new()` calls are fully isolated.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_data(phone_numbers: Vec<PhoneNumber>, conversations: Vec<Conversation>) -> Self {
        Self { tables: Arc::new(RwLock::new(Tables { phone_numbers, conversations })) }
    }

    /// Store preloaded with the demo phone numbers and conversations owned by
    /// `user_id`, timestamped relative to `now`.
    #[must_use]
    pub fn seeded(user_id: &str, now: OffsetDateTime) -> Self {
        let (phone_numbers, conversations) = seed::demo_data(user_id, now);
        Self::with_data(phone_numbers, conversations)
    }
}

/// `<prefix>-<uuid v7>`, time-ordered so later ids sort after earlier ones.
#[must_use]
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::now_v7())
}
