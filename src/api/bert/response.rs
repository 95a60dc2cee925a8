// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! BertResponse type for POST /bert

use crate::api::ApiError;
use serde::{Deserialize, Serialize};

/// Application-level success code carried in every successful response
pub const STATUS_OK: u32 = 2000;

/// Response body for POST /bert
///
/// # Example
/// ```json
/// { "vector": [0.12, -0.03, ...], "status": 2000 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BertResponse {
    /// Mean-pooled final hidden state, one entry per hidden unit
    pub vector: Vec<f32>,

    /// Always 2000 on success
    pub status: u32,
}

impl BertResponse {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            status: STATUS_OK,
        }
    }

    /// Checks the vector has exactly `hidden_size` entries
    pub fn validate_dimensions(&self, hidden_size: usize) -> Result<(), ApiError> {
        if self.vector.len() != hidden_size {
            return Err(ApiError::InternalError(format!(
                "embedding must be exactly {} dimensions (got {})",
                hidden_size,
                self.vector.len()
            )));
        }
        Ok(())
    }
}

impl From<Vec<f32>> for BertResponse {
    fn from(vector: Vec<f32>) -> Self {
        Self::new(vector)
    }
}
