use crate::config::Config;
use crate::services::Services;
use axum::body::Body;
use axum::http::{HeaderName, Request};
use axum::{Router, routing::get};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod conversations;
pub mod dashboard;
pub mod dto;
pub mod health;
pub mod phone_numbers;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub services: Services,
}

impl AppState {
    /// Owner of every record touched through the API.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.config.user_id
    }
}

/// Configures and returns the primary application router.
pub fn app_router(config: Config, services: Services) -> Router {
    let state = AppState { config, services };

    let api_routes = Router::new()
        .route("/dashboard", get(dashboard::home))
        .route("/phone-numbers", get(phone_numbers::list).post(phone_numbers::create))
        .route("/phone-numbers/{id}", get(phone_numbers::get).delete(phone_numbers::delete))
        .route("/conversations", get(conversations::list).post(conversations::create))
        .route("/conversations/{id}", get(conversations::get).delete(conversations::delete))
        .route("/conversations/{id}/messages", get(conversations::messages).post(conversations::send_message));

    Router::new()
        .route("/livez", get(health::livez))
        .nest("/v1", api_routes)
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                        let status = response.status();
                        span.record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(HeaderName::from_static("x-request-id"), MakeRequestUuid))
        .with_state(state)
}
