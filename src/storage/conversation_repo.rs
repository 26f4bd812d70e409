use crate::domain::conversation::Conversation;
use crate::error::{AppError, Result};
use crate::storage::InMemoryStore;

impl InMemoryStore {
    /// Stores a conversation.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the owner has no phone number
    /// `conversation.phone_number_id`.
    /// Returns `AppError::Conflict` if the id is taken.
    #[tracing::instrument(level = "debug", skip(self, conversation), fields(id = %conversation.id))]
    pub async fn insert_conversation(&self, conversation: Conversation) -> Result<()> {
        let mut tables = self.tables.write().await;

        let owns_phone = tables
            .phone_numbers
            .iter()
            .any(|p| p.user_id == conversation.user_id && p.id == conversation.phone_number_id);
        if !owns_phone {
            return Err(AppError::NotFound);
        }
        if tables.conversations.iter().any(|c| c.id == conversation.id) {
            return Err(AppError::Conflict(format!("Conversation id {} already exists", conversation.id)));
        }

        tables.conversations.push(conversation);
        Ok(())
    }

    /// Conversations owned by `user_id` including their messages.
    pub async fn list_conversations(&self, user_id: &str) -> Vec<Conversation> {
        let tables = self.tables.read().await;
        tables.conversations.iter().filter(|c| c.user_id == user_id).cloned().collect()
    }

    /// # Errors
    /// Returns `AppError::NotFound` if `user_id` owns no conversation `id`.
    pub async fn find_conversation(&self, user_id: &str, id: &str) -> Result<Conversation> {
        let tables = self.tables.read().await;
        tables.conversations.iter().find(|c| c.user_id == user_id && c.id == id).cloned().ok_or(AppError::NotFound)
    }

    /// # Errors
    /// Returns `AppError::NotFound` if `user_id` owns no conversation `id`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete_conversation(&self, user_id: &str, id: &str) -> Result<()> {
        let mut tables = self.tables.write().await;

        let before = tables.conversations.len();
        tables.conversations.retain(|c| !(c.user_id == user_id && c.id == id));
        if tables.conversations.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
