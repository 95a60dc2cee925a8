// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Error handling tests for POST /bert
//!
//! Malformed requests and encoder faults must never produce a 2000 response
//! and must come back as a JSON ErrorResponse.

use crate::common::{app_with, body_json, post_json, send, test_app, FailingEncoder};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};

#[tokio::test]
async fn test_missing_text_is_rejected() {
    let response = send(test_app(), post_json("/bert", "{}")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_ne!(json["status"], 2000);
    assert_eq!(json["error_type"], "invalid_request");
    assert!(
        json["message"].as_str().unwrap().contains("text"),
        "message should name the missing field: {}",
        json["message"]
    );
}

#[tokio::test]
async fn test_non_string_text_is_rejected() {
    let response = send(test_app(), post_json("/bert", r#"{"text": 12345}"#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let response = send(test_app(), post_json("/bert", r#"{"text": "#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/bert")
        .body(Body::from(r#"{"text": "hello"}"#))
        .unwrap();

    let response = send(test_app(), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_encoder_failure_is_internal_error() {
    let app = app_with(FailingEncoder);
    let response = send(app, post_json("/bert", r#"{"text": "anything"}"#)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error_type"], "internal_error");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("Tokenization failed"));
}

#[tokio::test]
async fn test_get_on_bert_is_method_not_allowed() {
    let request = Request::builder()
        .method("GET")
        .uri("/bert")
        .body(Body::empty())
        .unwrap();

    let response = send(test_app(), request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let json = body_json(response).await;
    assert_eq!(json["error_type"], "method_not_allowed");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = send(test_app(), post_json("/v1/embed", r#"{"text": "hi"}"#)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error_type"], "not_found");
    assert_eq!(json["details"]["path"], "/v1/embed");
}

#[tokio::test]
async fn test_failure_does_not_poison_later_requests() {
    let app = crate::common::test_app();

    let bad = send(app.clone(), post_json("/bert", "{}")).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let good = send(app, post_json("/bert", r#"{"text": "still works"}"#)).await;
    assert_eq!(good.status(), StatusCode::OK);
    assert_eq!(body_json(good).await["status"], 2000);
}
