#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

pub const SELECT_SENDING_NUMBER: &str = "Select a phone number to send from.";
pub const INVALID_RECIPIENT_PHONE: &str = "Use a valid recipient phone format, for example +14155551234.";
pub const CREATE_CONVERSATION_FAILED: &str = "Unable to create conversation right now.";
pub const CONVERSATION_CREATED: &str = "Conversation created.";
pub const PHONE_FIELDS_REQUIRED: &str = "Phone name and number are required.";
pub const INVALID_PHONE: &str = "Use a valid phone format, for example +13125551234.";
pub const DUPLICATE_PHONE: &str = "That phone number already exists.";
pub const ADD_PHONE_FAILED: &str = "Unable to add phone number right now.";
pub const PHONE_ADDED: &str = "Phone number added.";
