use crate::config::Config;
use crate::storage::InMemoryStore;

pub mod conversation_service;
pub mod dashboard_service;
pub mod phone_number_service;

use conversation_service::ConversationService;
use dashboard_service::DashboardService;
use phone_number_service::PhoneNumberService;

/// Every service wired against one shared store.
#[derive(Clone, Debug)]
pub struct Services {
    pub phone_numbers: PhoneNumberService,
    pub conversations: ConversationService,
    pub dashboard: DashboardService,
}

impl Services {
    #[must_use]
    pub fn new(store: &InMemoryStore, config: &Config) -> Self {
        let phones = config.messaging.phone_normalizer();
        Self {
            phone_numbers: PhoneNumberService::new(store.clone(), phones.clone()),
            conversations: ConversationService::new(store.clone(), config.messaging.page_size, phones),
            dashboard: DashboardService::new(store.clone()),
        }
    }
}
