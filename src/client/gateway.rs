use crate::domain::conversation::Conversation;
use crate::domain::message::Message;
use crate::domain::phone_number::PhoneNumber;
use crate::error::Result;
use crate::services::Services;
use crate::services::conversation_service::CreateConversation;
use async_trait::async_trait;

/// Server round trips issued by the session.
#[async_trait]
pub trait Gateway: Send + Sync + std::fmt::Debug {
    async fn create_conversation(&self, cmd: CreateConversation) -> Result<Conversation>;

    async fn create_phone_number(&self, name: &str, phone: &str) -> Result<PhoneNumber>;

    async fn send_message(&self, conversation_id: &str, content: &str) -> Result<Message>;
}

/// Calls the services in-process on behalf of one user.
#[derive(Clone, Debug)]
pub struct LocalGateway {
    services: Services,
    user_id: String,
}

impl LocalGateway {
    pub fn new(services: Services, user_id: impl Into<String>) -> Self {
        Self { services, user_id: user_id.into() }
    }
}

#[async_trait]
impl Gateway for LocalGateway {
    async fn create_conversation(&self, cmd: CreateConversation) -> Result<Conversation> {
        self.services.conversations.create(&self.user_id, cmd).await
    }

    async fn create_phone_number(&self, name: &str, phone: &str) -> Result<PhoneNumber> {
        self.services.phone_numbers.create(&self.user_id, name, phone).await
    }

    async fn send_message(&self, conversation_id: &str, content: &str) -> Result<Message> {
        self.services.conversations.send_message(&self.user_id, conversation_id, content).await
    }
}
