use crate::api::AppState;
use crate::services::dashboard_service::DashboardHome;
use axum::{Json, extract::State};

pub async fn home(State(state): State<AppState>) -> Json<DashboardHome> {
    Json(state.services.dashboard.home(state.user_id()).await)
}
