use crate::domain::conversation::{Conversation, sort_by_activity};
use crate::domain::message::{Message, MessageDirection, MessageStatus};
use crate::domain::pagination::{MessageWindow, Paginator};
use crate::domain::phone_number::PhoneNormalizer;
use crate::error::{AppError, Result};
use crate::storage::{InMemoryStore, new_id};
use time::OffsetDateTime;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateConversation {
    pub phone_number_id: String,
    pub title: Option<String>,
    pub counterparty_number: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ConversationService {
    store: InMemoryStore,
    paginator: Paginator,
    phones: PhoneNormalizer,
}

impl ConversationService {
    #[must_use]
    pub fn new(store: InMemoryStore, page_size: usize, phones: PhoneNormalizer) -> Self {
        Self { store, paginator: Paginator::new(page_size), phones }
    }

    /// Opens a conversation sending from `cmd.phone_number_id`.
    ///
    /// Without an explicit title the sending line's name is used.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the phone number does not exist.
    /// Returns `AppError::InvalidPhone` if the counterparty is not E.164.
    #[tracing::instrument(err(level = "warn"), skip(self, cmd), fields(phone_number_id = %cmd.phone_number_id))]
    pub async fn create(&self, user_id: &str, cmd: CreateConversation) -> Result<Conversation> {
        let phone_number = self.store.find_phone_number(user_id, &cmd.phone_number_id).await?;

        let counterparty_number = match cmd.counterparty_number.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() => self.phones.normalize(number)?,
            _ => phone_number.phone.clone(),
        };
        let title = cmd
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| phone_number.name.clone());

        let conversation = Conversation {
            id: new_id("conversation"),
            phone_number_id: phone_number.id,
            user_id: user_id.to_string(),
            title,
            counterparty_number,
            messages: Vec::new(),
        };
        self.store.insert_conversation(conversation.clone()).await?;

        tracing::info!(conversation_id = %conversation.id, "Conversation created");
        Ok(conversation)
    }

    /// Conversation summaries, most recently active first.
    pub async fn list(&self, user_id: &str) -> Vec<Conversation> {
        let mut conversations = self.store.list_conversations(user_id).await;
        sort_by_activity(&mut conversations);
        conversations.iter().map(Conversation::summary).collect()
    }

    /// # Errors
    /// Returns `AppError::NotFound` if the conversation does not exist.
    pub async fn get(&self, user_id: &str, id: &str) -> Result<Conversation> {
        self.store.find_conversation(user_id, id).await
    }

    /// # Errors
    /// Returns `AppError::NotFound` if the conversation does not exist.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
        self.store.delete_conversation(user_id, id).await?;
        tracing::info!("Conversation deleted");
        Ok(())
    }

    /// The page of messages older than `cursor`, or the latest page.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the conversation does not exist.
    #[tracing::instrument(level = "debug", err(level = "warn"), skip(self))]
    pub async fn messages(&self, user_id: &str, id: &str, cursor: Option<&str>) -> Result<MessageWindow> {
        let conversation = self.store.find_conversation(user_id, id).await?;
        let page = self.paginator.page(&conversation.messages, cursor);
        tracing::debug!(count = page.messages.len(), has_older = page.next_cursor.is_some(), "Message page served");
        Ok(page.into())
    }

    /// Records an outbound message from the conversation's phone number.
    ///
    /// Delivery is out of scope; the message stays `pending`.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if `content` is blank.
    /// Returns `AppError::NotFound` if the conversation does not exist.
    #[tracing::instrument(err(level = "warn"), skip(self, content))]
    pub async fn send_message(&self, user_id: &str, id: &str, content: &str) -> Result<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::BadRequest("Message content is required".to_string()));
        }

        let conversation = self.store.find_conversation(user_id, id).await?;
        let from_number = match self.store.find_phone_number(user_id, &conversation.phone_number_id).await {
            Ok(phone_number) => phone_number.phone,
            Err(_) => "unknown".to_string(),
        };

        let message = Message {
            id: new_id("msg"),
            conversation_id: conversation.id,
            user_id: user_id.to_string(),
            direction: MessageDirection::Outbound,
            status: MessageStatus::Pending,
            media_files: Vec::new(),
            from_number,
            content: content.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.store.append_message(user_id, message.clone()).await?;

        tracing::debug!(message_id = %message.id, "Message stored");
        Ok(message)
    }
}
