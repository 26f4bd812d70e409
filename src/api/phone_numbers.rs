use crate::api::AppState;
use crate::api::dto::{CreatePhoneNumberRequest, CreatedResponse};
use crate::domain::phone_number::PhoneNumber;
use crate::error::Result;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Json<Vec<PhoneNumber>> {
    Json(state.services.phone_numbers.list(state.user_id()).await)
}

/// Registers a phone number.
///
/// # Errors
/// Returns `AppError::BadRequest` for a blank name and
/// `AppError::InvalidPhone` for a malformed phone.
/// Returns `AppError::Conflict` if the phone is already registered.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreatePhoneNumberRequest>,
) -> Result<impl IntoResponse> {
    let phone_number = state.services.phone_numbers.create(state.user_id(), &payload.name, &payload.phone).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: phone_number.id })))
}

/// # Errors
/// Returns `AppError::NotFound` if the phone number does not exist.
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<PhoneNumber>> {
    Ok(Json(state.services.phone_numbers.get(state.user_id(), &id).await?))
}

/// # Errors
/// Returns `AppError::NotFound` if the phone number does not exist.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.services.phone_numbers.delete(state.user_id(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
