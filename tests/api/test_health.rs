// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /health tests

use crate::common::{app_with, body_json, send, HashEncoder};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use bert_vector_node::version::VERSION_NUMBER;

#[tokio::test]
async fn test_health_reports_loaded_model() {
    let app = app_with(HashEncoder { hidden_size: 312 });
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model"], "hash-encoder");
    assert_eq!(json["hiddenSize"], 312);
    assert_eq!(json["version"], VERSION_NUMBER);
}
