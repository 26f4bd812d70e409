use crate::domain::phone_number::PhoneNumber;
use crate::storage::InMemoryStore;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    pub total_conversations: u64,
    pub total_messages: u64,
    pub total_phone_numbers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardHome {
    pub analytics: DashboardAnalytics,
    pub phone_numbers: Vec<PhoneNumber>,
}

#[derive(Clone, Debug)]
pub struct DashboardService {
    store: InMemoryStore,
}

impl DashboardService {
    #[must_use]
    pub const fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn home(&self, user_id: &str) -> DashboardHome {
        let (conversations, total_messages, phone_numbers) = tokio::join!(
            self.store.list_conversations(user_id),
            self.store.count_messages(user_id),
            self.store.list_phone_numbers(user_id)
        );

        DashboardHome {
            analytics: DashboardAnalytics {
                total_conversations: conversations.len() as u64,
                total_messages,
                total_phone_numbers: phone_numbers.len() as u64,
            },
            phone_numbers,
        }
    }
}
