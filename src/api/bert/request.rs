// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! BertRequest type for POST /bert

use serde::{Deserialize, Serialize};

/// Request body for POST /bert
///
/// `text` is required and passed to the tokenizer as-is: no length cap, no
/// trimming. An empty string is valid.
///
/// # Example
/// ```json
/// { "text": "今天天气很好" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BertRequest {
    pub text: String,
}

impl BertRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
