// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Mean pooling over final-layer hidden states

use crate::embeddings::EmbeddingError;
use ndarray::{Array1, ArrayView2};

/// Averages token vectors across the sequence axis, weighted by the attention mask.
///
/// `hidden` is `[seq_len, hidden]` for a single input. Positions with mask 0
/// (padding) are excluded; for an unpadded sequence every token counts,
/// `[CLS]` and `[SEP]` included.
pub fn mean_pool(hidden: ArrayView2<'_, f32>, attention_mask: &[i64]) -> Result<Vec<f32>, EmbeddingError> {
    let seq_len = hidden.nrows();
    if attention_mask.len() != seq_len {
        return Err(EmbeddingError::MaskLengthMismatch {
            mask_len: attention_mask.len(),
            seq_len,
        });
    }

    let mask: Array1<f32> = attention_mask.iter().map(|&m| m as f32).collect();
    let sum_mask = mask.sum().max(1e-9);

    // [hidden, seq_len] . [seq_len] -> [hidden]
    let summed = hidden.t().dot(&mask);

    Ok((summed / sum_mask).to_vec())
}
