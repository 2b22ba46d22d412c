use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::models::{BfhlError, Envelope};
use crate::services::metrics;
use crate::startup::AppState;

/// `POST /bfhl`: run the single operation named in the body.
#[tracing::instrument(skip(state, payload))]
pub async fn bfhl(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = match payload {
        Ok(Json(Value::Object(body))) => state.dispatcher.handle(body).await,
        Ok(Json(_)) => Err(rejected_body(BfhlError::NotAnObject)),
        Err(rejection) => Err(rejected_body(BfhlError::MalformedBody(rejection.body_text()))),
    };

    match result {
        Ok(data) => (
            StatusCode::OK,
            Json(Envelope::success(state.official_email(), data)),
        )
            .into_response(),
        Err(err) => error_response(state.official_email(), &err),
    }
}

fn rejected_body(err: BfhlError) -> BfhlError {
    tracing::info!(error = %err, "Rejected request body");
    metrics::record_operation("invalid", err.kind());
    err
}

/// Render a failure as an envelope with the status its category maps to.
pub fn error_response(official_email: &str, err: &BfhlError) -> Response {
    (
        err.status_code(),
        Json(Envelope::failure(official_email, err.public_message())),
    )
        .into_response()
}
