// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /bert HTTP handler

use crate::api::bert::{BertRequest, BertResponse};
use crate::api::http_server::AppState;
use crate::api::ApiError;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::time::Instant;
use tracing::{debug, error, warn};

/// POST /bert handler
///
/// Embeds `text` with the loaded encoder and returns the mean-pooled vector.
///
/// # Request Body
/// ```json
/// { "text": "..." }
/// ```
///
/// # Response Body
/// ```json
/// { "vector": [0.1, 0.2, ...], "status": 2000 }
/// ```
///
/// # Errors
/// - 400 `invalid_request`: body is not JSON, or `text` is missing / not a string
/// - 500 `internal_error`: tokenizer or encoder failure
pub async fn bert_handler(
    State(state): State<AppState>,
    payload: Result<Json<BertRequest>, JsonRejection>,
) -> Result<Json<BertResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(status = %rejection.status(), "Rejected /bert request: {}", rejection.body_text());
        ApiError::InvalidRequest(rejection.body_text())
    })?;

    let text_chars = request.text.chars().count();
    let start = Instant::now();

    // Forward pass is blocking CPU work
    let encoder = state.encoder.clone();
    let text = request.text;
    let vector = tokio::task::spawn_blocking(move || encoder.encode(&text))
        .await
        .map_err(|e| {
            error!("Embedding task failed: {}", e);
            ApiError::InternalError(format!("Embedding task failed: {}", e))
        })?
        .map_err(|e| {
            error!(text_chars, "Embedding failed: {}", e);
            ApiError::from(e)
        })?;

    let response = BertResponse::new(vector);
    response.validate_dimensions(state.encoder.hidden_size())?;

    debug!(
        text_chars,
        dimensions = response.vector.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Generated embedding"
    );

    Ok(Json(response))
}

/// Any method other than POST on /bert
pub async fn bert_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("/bert only accepts POST".to_string())
}
