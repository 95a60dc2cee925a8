// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::api::http_server::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub hidden_size: usize,
    pub version: String,
}

/// GET /health
///
/// The model is loaded before the listener binds, so a reachable server is
/// always able to embed.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model: state.encoder.model_name().to_string(),
        hidden_size: state.encoder.hidden_size(),
        version: crate::version::VERSION_NUMBER.to_string(),
    })
}
