use crate::api::AppState;
use crate::api::dto::{CreateConversationRequest, CreatedResponse, MessagesQuery, SendMessageRequest};
use crate::domain::conversation::Conversation;
use crate::domain::pagination::MessageWindow;
use crate::error::Result;
use crate::services::conversation_service::CreateConversation;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Json<Vec<Conversation>> {
    Json(state.services.conversations.list(state.user_id()).await)
}

/// Opens a conversation on one of the operator's phone numbers.
///
/// # Errors
/// Returns `AppError::NotFound` if the phone number does not exist.
/// Returns `AppError::InvalidPhone` if the counterparty number is malformed.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateConversationRequest>,
) -> Result<impl IntoResponse> {
    let cmd = CreateConversation {
        phone_number_id: payload.phone_number_id,
        title: payload.title,
        counterparty_number: payload.counterparty_number,
    };
    let conversation = state.services.conversations.create(state.user_id(), cmd).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: conversation.id })))
}

/// # Errors
/// Returns `AppError::NotFound` if the conversation does not exist.
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Conversation>> {
    let conversation = state.services.conversations.get(state.user_id(), &id).await?;
    Ok(Json(conversation.summary()))
}

/// # Errors
/// Returns `AppError::NotFound` if the conversation does not exist.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.services.conversations.delete(state.user_id(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// One page of messages, oldest first, with the cursor for the next older page.
///
/// # Errors
/// Returns `AppError::NotFound` if the conversation does not exist.
pub async fn messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<MessageWindow>> {
    let window = state.services.conversations.messages(state.user_id(), &id, query.cursor.as_deref()).await?;
    Ok(Json(window))
}

/// # Errors
/// Returns `AppError::BadRequest` for blank content.
/// Returns `AppError::NotFound` if the conversation does not exist.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse> {
    let message = state.services.conversations.send_message(state.user_id(), &id, &payload.content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
