use crate::domain::message::Message;
use crate::error::{AppError, Result};
use crate::storage::InMemoryStore;

impl InMemoryStore {
    /// Appends a message to the conversation named by `message.conversation_id`.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if `user_id` owns no such conversation.
    #[tracing::instrument(level = "debug", skip(self, message), fields(id = %message.id))]
    pub async fn append_message(&self, user_id: &str, message: Message) -> Result<()> {
        let mut tables = self.tables.write().await;

        let conversation = tables
            .conversations
            .iter_mut()
            .find(|c| c.user_id == user_id && c.id == message.conversation_id)
            .ok_or(AppError::NotFound)?;
        conversation.messages.push(message);
        Ok(())
    }

    pub async fn count_messages(&self, user_id: &str) -> u64 {
        let tables = self.tables.read().await;
        tables.conversations.iter().filter(|c| c.user_id == user_id).map(|c| c.messages.len() as u64).sum()
    }
}
