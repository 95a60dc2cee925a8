// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! BERT model loader
//!
//! Resolves the model directory that ships next to the executable and loads
//! it exactly once at startup. Any failure here is fatal for the process.

use crate::embeddings::{BertEmbeddingModel, SessionOptions};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Subdirectory (next to the executable) holding `model.onnx` and `tokenizer.json`
pub const MODEL_DIR_NAME: &str = "bert-base-chinese";

/// Where to find the model and how to run it
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Directory containing `model.onnx` and `tokenizer.json`
    pub model_dir: PathBuf,
    /// ONNX session settings
    pub session: SessionOptions,
}

impl ModelConfig {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            session: SessionOptions::default(),
        }
    }
}

/// `<directory of the running executable>/bert-base-chinese`
pub fn default_model_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate running executable")?;
    let exe_dir = exe
        .parent()
        .context("Running executable has no parent directory")?;
    Ok(exe_dir.join(MODEL_DIR_NAME))
}

/// Loads the BERT encoder described by `config`
///
/// Runs on the blocking pool since ONNX session construction and the probe
/// inference are CPU-bound. Returns an error (never a partially loaded
/// model) if the directory is missing or malformed.
pub async fn load_model(config: &ModelConfig) -> Result<Arc<BertEmbeddingModel>> {
    let model_dir = config.model_dir.clone();
    if !model_dir.is_dir() {
        anyhow::bail!("Model directory not found: {}", model_dir.display());
    }

    info!(model_dir = %model_dir.display(), "Loading BERT model");
    let start = Instant::now();

    let options = config.session.clone();
    let dir = model_dir.clone();
    let result = tokio::task::spawn_blocking(move || BertEmbeddingModel::load(&dir, &options))
        .await
        .context("Model loading task failed")?;

    match result {
        Ok(model) => {
            info!(
                model = model.model_name(),
                hidden_size = model.hidden_size(),
                load_ms = start.elapsed().as_millis() as u64,
                "✓ BERT model loaded"
            );
            Ok(Arc::new(model))
        }
        Err(e) => {
            error!(model_dir = %model_dir.display(), "✗ Failed to load BERT model: {:#}", e);
            Err(e.context(format!(
                "Failed to load BERT model from {}",
                model_dir.display()
            )))
        }
    }
}
