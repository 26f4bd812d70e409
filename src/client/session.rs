use crate::client::gateway::Gateway;
use crate::client::notice::{self, Notice};
use crate::client::route::{History, RouteSync};
use crate::client::window_cache::WindowCache;
use crate::domain::conversation::{Conversation, SentMedia, compare_activity};
use crate::domain::message::{Message, MessageDirection, MessageStatus};
use crate::domain::pagination::{MessageWindow, Paginator};
use crate::domain::phone_number::{PhoneNormalizer, PhoneNumber, is_duplicate};
use crate::error::AppError;
use crate::services::conversation_service::CreateConversation;
use crate::storage::new_id;
use std::sync::Arc;
use time::OffsetDateTime;

/// Inputs of the "new conversation" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationForm {
    pub open: bool,
    pub from_phone_number_id: String,
    pub name: String,
    pub recipient: String,
    pub submitting: bool,
}

/// Inputs of the "add phone number" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneForm {
    pub open: bool,
    pub name: String,
    pub phone: String,
    pub submitting: bool,
}

/// State behind the dashboard and conversation screens of one signed-in
/// user. Every transition is driven by a user or navigation event.
#[derive(Debug)]
pub struct Session {
    user_id: String,
    gateway: Arc<dyn Gateway>,
    phones: PhoneNormalizer,
    phone_numbers: Vec<PhoneNumber>,
    conversations: Vec<Conversation>,
    windows: WindowCache,
    route: RouteSync,
    draft: String,
    conversation_form: ConversationForm,
    phone_form: PhoneForm,
    notices: Vec<Notice>,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        gateway: Arc<dyn Gateway>,
        history: Box<dyn History>,
        paginator: Paginator,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            gateway,
            phones: PhoneNormalizer::default(),
            phone_numbers: Vec::new(),
            conversations: Vec::new(),
            windows: WindowCache::new(paginator),
            route: RouteSync::new(history),
            draft: String::new(),
            conversation_form: ConversationForm::default(),
            phone_form: PhoneForm::default(),
            notices: Vec::new(),
        }
    }

    /// Reads numbers typed without a `+` with `phones` instead of the
    /// default calling code.
    #[must_use]
    pub fn with_phone_normalizer(mut self, phones: PhoneNormalizer) -> Self {
        self.phones = phones;
        self
    }

    /// Replaces the loaded phone numbers and conversations and drops every
    /// cached window.
    pub fn load(&mut self, phone_numbers: Vec<PhoneNumber>, conversations: Vec<Conversation>) {
        self.phone_numbers = phone_numbers;
        self.conversations = conversations;
        self.windows.clear();
        self.ensure_sending_number();
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn phone_numbers(&self) -> &[PhoneNumber] {
        &self.phone_numbers
    }

    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    #[must_use]
    pub fn has_conversations(&self) -> bool {
        !self.conversations.is_empty()
    }

    /// Conversations with the most recent activity first.
    #[must_use]
    pub fn sorted_conversations(&self) -> Vec<&Conversation> {
        let mut sorted: Vec<&Conversation> = self.conversations.iter().collect();
        sorted.sort_by(|a, b| compare_activity(a, b));
        sorted
    }

    // Selection and navigation

    #[must_use]
    pub fn selected_conversation_id(&self) -> Option<&str> {
        self.route.selected()
    }

    #[must_use]
    pub fn current_path(&self) -> &str {
        self.route.current_path()
    }

    /// Selects a loaded conversation and pushes its path. Unknown ids are
    /// ignored.
    pub fn select_conversation(&mut self, conversation_id: &str) {
        if !self.conversations.iter().any(|c| c.id == conversation_id) {
            tracing::debug!(conversation_id, "Ignoring selection of unknown conversation");
            return;
        }
        self.route.select(conversation_id);
    }

    pub fn go_back(&mut self) -> bool {
        self.route.go_back()
    }

    pub fn go_forward(&mut self) -> bool {
        self.route.go_forward()
    }

    /// Re-reads the selection after the location changed outside the session.
    pub fn sync_from_history(&mut self) {
        self.route.sync_from_history();
    }

    #[must_use]
    pub fn selected_conversation(&self) -> Option<&Conversation> {
        let id = self.route.selected()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn selected_phone_number(&self) -> Option<&PhoneNumber> {
        let conversation = self.selected_conversation()?;
        self.phone_numbers.iter().find(|p| p.id == conversation.phone_number_id)
    }

    #[must_use]
    pub fn sent_media(&self) -> Vec<SentMedia> {
        self.selected_conversation().map(Conversation::sent_media).unwrap_or_default()
    }

    // Message window

    /// The selected conversation's window, materialized on first access.
    pub fn current_window(&mut self) -> Option<&MessageWindow> {
        let id = self.route.selected()?;
        let conversation = self.conversations.iter().find(|c| c.id == id)?;
        Some(self.windows.get_or_compute(conversation))
    }

    pub fn visible_messages(&mut self) -> &[Message] {
        match self.current_window() {
            Some(window) => &window.messages,
            None => &[],
        }
    }

    pub fn next_cursor(&mut self) -> Option<String> {
        self.current_window().and_then(|w| w.next_cursor.clone())
    }

    /// Prepends the next older page to the selected window. Returns false
    /// when nothing is selected or the window is exhausted.
    pub fn load_older_messages(&mut self) -> bool {
        let Some(id) = self.route.selected() else {
            return false;
        };
        let Some(conversation) = self.conversations.iter().find(|c| c.id == id) else {
            return false;
        };
        self.windows.load_older(conversation)
    }

    // Composer

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Sends the trimmed draft to the selected conversation.
    ///
    /// The message is shown immediately as `pending`; the server round trip
    /// that follows is not reconciled with local state.
    pub async fn submit_message(&mut self) -> Option<Message> {
        let content = self.draft.trim().to_string();
        if content.is_empty() {
            return None;
        }

        let conversation_id = self.route.selected()?.to_string();
        let index = self.conversations.iter().position(|c| c.id == conversation_id)?;

        let from_number = self
            .phone_numbers
            .iter()
            .find(|p| p.id == self.conversations[index].phone_number_id)
            .map_or_else(|| "unknown".to_string(), |p| p.phone.clone());

        let message = Message {
            id: new_id("msg"),
            conversation_id: conversation_id.clone(),
            user_id: self.user_id.clone(),
            direction: MessageDirection::Outbound,
            status: MessageStatus::Pending,
            media_files: Vec::new(),
            from_number,
            content: content.clone(),
            created_at: OffsetDateTime::now_utc(),
        };

        // The window has to exist before the master list grows, otherwise
        // the first page would already contain the message.
        self.windows.get_or_compute(&self.conversations[index]);
        self.conversations[index].messages.push(message.clone());
        self.windows.insert_message(message.clone());
        self.draft.clear();

        if let Err(e) = self.gateway.send_message(&conversation_id, &content).await {
            tracing::warn!(error = %e, conversation_id = %conversation_id, "Message round trip failed");
        }

        Some(message)
    }

    /// Ctrl+Enter submits the draft. Returns true when the key was handled.
    pub async fn handle_composer_key(&mut self, key: &str, ctrl: bool) -> bool {
        if key == "Enter" && ctrl {
            self.submit_message().await;
            return true;
        }
        false
    }

    // New conversation dialog

    #[must_use]
    pub const fn conversation_form(&self) -> &ConversationForm {
        &self.conversation_form
    }

    pub const fn conversation_form_mut(&mut self) -> &mut ConversationForm {
        &mut self.conversation_form
    }

    /// Opening keeps the inputs; closing resets them.
    pub fn open_create_conversation_dialog(&mut self, open: bool) {
        self.conversation_form.open = open;
        if !open {
            self.conversation_form = ConversationForm {
                from_phone_number_id: self.default_phone_number_id(),
                ..ConversationForm::default()
            };
        }
    }

    /// Validates the dialog and asks the server to open the conversation.
    /// Returns true when the conversation was created.
    pub async fn submit_create_conversation(&mut self) -> bool {
        let form = &self.conversation_form;
        let Some(phone_number) = self.phone_numbers.iter().find(|p| p.id == form.from_phone_number_id) else {
            self.notices.push(Notice::error(notice::SELECT_SENDING_NUMBER));
            return false;
        };
        let Ok(recipient) = self.phones.normalize(&form.recipient) else {
            self.notices.push(Notice::error(notice::INVALID_RECIPIENT_PHONE));
            return false;
        };

        let name = form.name.trim();
        let cmd = CreateConversation {
            phone_number_id: phone_number.id.clone(),
            title: (!name.is_empty()).then(|| name.to_string()),
            counterparty_number: Some(recipient),
        };

        self.conversation_form.submitting = true;
        let result = self.gateway.create_conversation(cmd).await;
        self.conversation_form.submitting = false;

        match result {
            Ok(conversation) => {
                tracing::info!(conversation_id = %conversation.id, "Conversation created");
                self.conversations.push(conversation);
                self.open_create_conversation_dialog(false);
                self.notices.push(Notice::success(notice::CONVERSATION_CREATED));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Conversation creation failed");
                self.notices.push(Notice::error(notice::CREATE_CONVERSATION_FAILED));
                false
            }
        }
    }

    // Add phone number dialog

    #[must_use]
    pub const fn phone_form(&self) -> &PhoneForm {
        &self.phone_form
    }

    pub const fn phone_form_mut(&mut self) -> &mut PhoneForm {
        &mut self.phone_form
    }

    pub fn open_add_phone_dialog(&mut self, open: bool) {
        self.phone_form.open = open;
        if !open {
            self.phone_form = PhoneForm::default();
        }
    }

    /// Validates the dialog and registers the phone number. Returns true
    /// when the number was added.
    pub async fn submit_add_phone_number(&mut self) -> bool {
        let name = self.phone_form.name.trim().to_string();
        if name.is_empty() || self.phone_form.phone.trim().is_empty() {
            self.notices.push(Notice::error(notice::PHONE_FIELDS_REQUIRED));
            return false;
        }
        let Ok(phone) = self.phones.normalize(&self.phone_form.phone) else {
            self.notices.push(Notice::error(notice::INVALID_PHONE));
            return false;
        };
        if is_duplicate(&self.phone_numbers, &phone) {
            self.notices.push(Notice::error(notice::DUPLICATE_PHONE));
            return false;
        }

        self.phone_form.submitting = true;
        let result = self.gateway.create_phone_number(&name, &phone).await;
        self.phone_form.submitting = false;

        match result {
            Ok(phone_number) => {
                tracing::info!(phone_number_id = %phone_number.id, "Phone number added");
                self.phone_numbers.push(phone_number);
                self.ensure_sending_number();
                self.open_add_phone_dialog(false);
                self.notices.push(Notice::success(notice::PHONE_ADDED));
                true
            }
            Err(AppError::Conflict(_)) => {
                self.notices.push(Notice::error(notice::DUPLICATE_PHONE));
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Phone number registration failed");
                self.notices.push(Notice::error(notice::ADD_PHONE_FAILED));
                false
            }
        }
    }

    // Notices

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn default_phone_number_id(&self) -> String {
        self.phone_numbers.first().map(|p| p.id.clone()).unwrap_or_default()
    }

    fn ensure_sending_number(&mut self) {
        let current = &self.conversation_form.from_phone_number_id;
        if !self.phone_numbers.iter().any(|p| &p.id == current) {
            self.conversation_form.from_phone_number_id = self.default_phone_number_id();
        }
    }
}
