// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX BERT encoder wrapper
//!
//! Wraps ONNX Runtime and a HuggingFace tokenizer to turn one text into a
//! single vector: the final-layer hidden states averaged over the sequence.
//!
//! Features:
//! - ONNX model + tokenizer loading from one directory
//! - Optional CUDA execution provider (with automatic CPU fallback)
//! - Hidden size detected from a probe inference at load time
//! - Mean pooling over token embeddings

use crate::embeddings::{mean_pool, EmbeddingError, TextEncoder};
use anyhow::{Context, Result};
use ndarray::{Array2, Axis, Ix2};
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info, warn};

/// ONNX graph file expected inside the model directory
pub const MODEL_FILE: &str = "model.onnx";

/// Tokenizer file expected inside the model directory
pub const TOKENIZER_FILE: &str = "tokenizer.json";

const PROBE_TEXT: &str = "validation test";

/// Runtime options for building the ONNX session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Truncate tokenized input to this many tokens (special tokens included)
    pub max_length: usize,
    /// ONNX Runtime intra-op thread count
    pub intra_threads: usize,
    /// Try the CUDA execution provider before CPU
    pub use_cuda: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_length: 512,
            intra_threads: 4,
            use_cuda: false,
        }
    }
}

/// BERT encoder loaded from an ONNX export
///
/// The session sits behind a `Mutex` because `Session::run` needs `&mut`;
/// tokenization and pooling run outside the lock.
///
/// # Model Details
/// - Inputs: `input_ids`, `attention_mask`, `token_type_ids` (`[1, seq_len]`, i64)
/// - Output 0: `last_hidden_state` (`[1, seq_len, hidden]`, f32)
/// - Embedding: attention-mask weighted mean over `seq_len`
#[derive(Clone)]
pub struct BertEmbeddingModel {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    hidden_size: usize,
    max_length: usize,
}

impl std::fmt::Debug for BertEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("hidden_size", &self.hidden_size)
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}

impl BertEmbeddingModel {
    /// Loads `model.onnx` and `tokenizer.json` from `model_dir`
    ///
    /// # Errors
    /// Returns error if:
    /// - Either file is missing
    /// - Tokenizer JSON is invalid
    /// - ONNX Runtime cannot build a session from the graph
    /// - The probe inference does not produce `[batch, seq_len, hidden]`
    ///
    /// This call blocks; run it off the async worker threads.
    pub fn load(model_dir: &Path, options: &SessionOptions) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        let model_name = model_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "bert".to_string());

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: options.max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;

        let mut session = build_session(&model_path, options)?;

        let hidden_size = probe_hidden_size(&mut session, &tokenizer)?;
        info!(
            model = %model_name,
            hidden_size,
            max_length = options.max_length,
            "BERT encoder validated"
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            hidden_size,
            max_length: options.max_length,
        })
    }

    /// Generates the mean-pooled embedding for a single text
    ///
    /// Empty input still yields a vector: the tokenizer emits `[CLS] [SEP]`.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let (input_ids, attention_mask, token_type_ids) = self.tokenize(text)?;
        let seq_len = input_ids.len();

        let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)?;
        let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask.clone())?;
        let token_type_ids_array = Array2::from_shape_vec((1, seq_len), token_type_ids)?;

        let pooled = {
            let mut session = self
                .session
                .lock()
                .map_err(|_| EmbeddingError::SessionPoisoned)?;
            let outputs = session.run(ort::inputs![
                "input_ids" => Value::from_array(input_ids_array)?,
                "attention_mask" => Value::from_array(attention_mask_array)?,
                "token_type_ids" => Value::from_array(token_type_ids_array)?
            ])?;

            // Index 0 rather than a name: exports differ in what they call last_hidden_state
            let output = outputs[0].try_extract_array::<f32>()?;
            if output.ndim() != 3 {
                return Err(EmbeddingError::UnexpectedOutput {
                    shape: output.shape().to_vec(),
                });
            }

            let tokens = output.index_axis(Axis(0), 0).into_dimensionality::<Ix2>()?;
            mean_pool(tokens, &attention_mask)?
        };

        if pooled.len() != self.hidden_size {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.hidden_size,
                actual: pooled.len(),
            });
        }

        debug!(seq_len, "Embedded text");
        Ok(pooled)
    }

    /// Counts tokens the encoder sees for `text`, special tokens included
    pub fn count_tokens(&self, text: &str) -> Result<usize, EmbeddingError> {
        let (input_ids, _, _) = self.tokenize(text)?;
        Ok(input_ids.len())
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn tokenize(&self, text: &str) -> Result<(Vec<i64>, Vec<i64>, Vec<i64>), EmbeddingError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EmbeddingError::Tokenization(e.to_string()))?;

        let input_ids = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids = encoding.get_type_ids().iter().map(|&t| t as i64).collect();

        Ok((input_ids, attention_mask, token_type_ids))
    }
}

impl TextEncoder for BertEmbeddingModel {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed(text)
    }
}

fn session_builder(options: &SessionOptions) -> Result<SessionBuilder> {
    Session::builder()
        .context("Failed to create session builder")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(options.intra_threads)
        .context("Failed to set intra threads")
}

fn build_session(model_path: &Path, options: &SessionOptions) -> Result<Session> {
    if options.use_cuda {
        info!("Attempting CUDA execution provider...");
        let cuda_result = session_builder(options)?
            .with_execution_providers([CUDAExecutionProvider::default().build()])
            .context("Failed to set CUDA execution provider")
            .and_then(|builder| {
                builder
                    .commit_from_file(model_path)
                    .context("Failed to load ONNX model with CUDA")
            });

        match cuda_result {
            Ok(session) => {
                info!("CUDA execution provider initialized");
                return Ok(session);
            }
            Err(e) => {
                warn!("CUDA execution provider failed: {:#}", e);
                warn!("Falling back to CPU execution provider");
            }
        }
    }

    session_builder(options)?
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .context("Failed to set CPU execution provider")?
        .commit_from_file(model_path)
        .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))
}

/// Runs one inference on a fixed text and returns the hidden size from the output shape
fn probe_hidden_size(session: &mut Session, tokenizer: &Tokenizer) -> Result<usize> {
    let encoding = tokenizer
        .encode(PROBE_TEXT, true)
        .map_err(|e| anyhow::anyhow!("Tokenizer validation failed: {}", e))?;

    let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
    let attention_mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| m as i64)
        .collect();
    let token_type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| t as i64).collect();
    let seq_len = input_ids.len();

    let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
        .context("Failed to create input_ids array")?;
    let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask)
        .context("Failed to create attention_mask array")?;
    let token_type_ids_array = Array2::from_shape_vec((1, seq_len), token_type_ids)
        .context("Failed to create token_type_ids array")?;

    let outputs = session
        .run(ort::inputs![
            "input_ids" => Value::from_array(input_ids_array)?,
            "attention_mask" => Value::from_array(attention_mask_array)?,
            "token_type_ids" => Value::from_array(token_type_ids_array)?
        ])
        .context("Probe inference failed")?;

    let output = outputs[0]
        .try_extract_array::<f32>()
        .context("Failed to extract output tensor")?;
    let shape = output.shape();

    if shape.len() != 3 || shape[1] != seq_len || shape[2] == 0 {
        anyhow::bail!(
            "Model outputs unexpected dimensions: {:?} (expected [1, {}, hidden])",
            shape,
            seq_len
        );
    }

    Ok(shape[2])
}
