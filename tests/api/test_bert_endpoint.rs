// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /bert success-path tests
//!
//! Runs the full router with a deterministic encoder so the wire contract,
//! determinism and per-request isolation can be checked without model files.

use crate::common::{body_json, post_json, send, test_app, HashEncoder, TEST_HIDDEN_SIZE};
use axum::http::StatusCode;
use bert_vector_node::{BertResponse, TextEncoder};

async fn embed(text: &str) -> BertResponse {
    let body = serde_json::json!({ "text": text }).to_string();
    let response = send(test_app(), post_json("/bert", body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_value(body_json(response).await).unwrap()
}

#[tokio::test]
async fn test_response_has_vector_and_status() {
    let body = serde_json::json!({ "text": "今天天气很好" }).to_string();
    let response = send(test_app(), post_json("/bert", body)).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], 2000);
    let vector = json["vector"].as_array().expect("vector should be an array");
    assert_eq!(vector.len(), TEST_HIDDEN_SIZE);
    assert!(vector.iter().all(|v| v.is_f64()));

    // Exactly two keys on the wire
    assert_eq!(json.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_vector_length_independent_of_input_length() {
    let short = embed("a").await;
    let long = embed(&"很长的句子。".repeat(500)).await;

    assert_eq!(short.vector.len(), TEST_HIDDEN_SIZE);
    assert_eq!(long.vector.len(), TEST_HIDDEN_SIZE);
}

#[tokio::test]
async fn test_identical_text_is_deterministic() {
    let first = embed("repeatable input").await;
    let second = embed("repeatable input").await;
    assert_eq!(first.vector, second.vector);
}

#[tokio::test]
async fn test_different_text_gives_different_vectors() {
    let cat = embed("the cat sat on the mat").await;
    let stocks = embed("quarterly earnings beat expectations").await;
    assert_ne!(cat.vector, stocks.vector);
}

#[tokio::test]
async fn test_empty_text_returns_vector() {
    let response = embed("").await;
    assert_eq!(response.status, 2000);
    assert_eq!(response.vector.len(), TEST_HIDDEN_SIZE);
}

#[tokio::test]
async fn test_extra_fields_are_ignored() {
    let body = r#"{"text": "hello", "model": "ignored", "extra": [1, 2, 3]}"#;
    let response = send(test_app(), post_json("/bert", body)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_concurrent_requests_get_their_own_vectors() {
    let app = test_app();
    let encoder = HashEncoder::default();

    let texts: Vec<String> = (0..16).map(|i| format!("concurrent request {}", i)).collect();

    let handles: Vec<_> = texts
        .iter()
        .cloned()
        .map(|text| {
            let app = app.clone();
            tokio::spawn(async move {
                let body = serde_json::json!({ "text": text }).to_string();
                let response = send(app, post_json("/bert", body)).await;
                assert_eq!(response.status(), StatusCode::OK);
                let parsed: BertResponse =
                    serde_json::from_value(body_json(response).await).unwrap();
                (text, parsed)
            })
        })
        .collect();

    for handle in handles {
        let (text, response) = handle.await.unwrap();
        let expected = encoder.encode(&text).unwrap();
        assert_eq!(response.vector, expected, "mixed result for {:?}", text);
    }
}
