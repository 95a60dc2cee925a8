// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text embedding: BERT encoder loading, inference and pooling

pub mod bert_model;
pub mod errors;
pub mod loader;
pub mod pooling;

pub use bert_model::{BertEmbeddingModel, SessionOptions};
pub use errors::EmbeddingError;
pub use loader::{default_model_dir, load_model, ModelConfig, MODEL_DIR_NAME};
pub use pooling::mean_pool;

/// Anything that turns one text into one fixed-length vector.
///
/// The HTTP layer only sees this trait, so handlers can be exercised without
/// model files on disk. `encode` is blocking.
pub trait TextEncoder: Send + Sync {
    /// Name reported by the health endpoint
    fn model_name(&self) -> &str;

    /// Length of every vector returned by `encode`
    fn hidden_size(&self) -> usize;

    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
