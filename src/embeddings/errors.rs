// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for BERT embedding inference
//!
//! Startup loading uses `anyhow` with context chains; these errors cover the
//! per-request path (tokenization, tensor building, ONNX forward pass, pooling)
//! so the HTTP layer can report them without knowing about ort or tokenizers.

use thiserror::Error;

/// Errors that can occur while turning one text into an embedding
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Tokenizer rejected the input
    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    /// Input tensor could not be shaped from the token ids
    #[error("Failed to build input tensor: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// ONNX Runtime failed during the forward pass
    #[error("Inference failed: {0}")]
    Inference(#[from] ort::Error),

    /// Encoder output is not `[batch, seq_len, hidden]`
    #[error("Model outputs unexpected shape {shape:?} (expected [batch, seq_len, hidden])")]
    UnexpectedOutput { shape: Vec<usize> },

    /// Attention mask length does not match the hidden-state sequence length
    #[error("Attention mask has {mask_len} entries but hidden states have {seq_len} tokens")]
    MaskLengthMismatch { mask_len: usize, seq_len: usize },

    /// Pooled vector length differs from the hidden size detected at load time
    #[error("Unexpected embedding dimension: {actual} (expected {expected})")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A previous request panicked while holding the session lock
    #[error("ONNX session lock poisoned")]
    SessionPoisoned,
}
