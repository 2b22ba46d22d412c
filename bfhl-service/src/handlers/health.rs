use axum::{extract::State, http::StatusCode, http::Uri, Json};
use service_core::error::AppError;

use crate::models::Envelope;
use crate::startup::AppState;

/// Liveness probe. Answers with the envelope minus `data`.
pub async fn health_check(State(state): State<AppState>) -> Json<Envelope> {
    Json(Envelope::ok(state.official_email()))
}

/// Readiness probe. The service holds no connections, so it is ready once it listens.
pub async fn readiness_check() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
