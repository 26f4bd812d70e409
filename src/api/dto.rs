use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhoneNumberRequest {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    pub phone_number_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub counterparty_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagesQuery {
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}
