// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::ServiceConfig;
use crate::embeddings::{default_model_dir, ModelConfig, SessionOptions};

/// BERT vector node
#[derive(Parser, Debug)]
#[command(name = "bert-vector-node")]
#[command(version)]
#[command(about = "Serves mean-pooled BERT embeddings over HTTP (POST /bert)", long_about = None)]
pub struct Cli {
    /// TCP port to listen on (bound on 0.0.0.0)
    pub port: u16,

    /// Directory holding model.onnx and tokenizer.json
    /// [default: <executable dir>/bert-base-chinese]
    #[arg(long, env = "BERT_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Maximum tokens per input, special tokens included
    #[arg(long, env = "BERT_MAX_LENGTH", default_value_t = 512)]
    pub max_length: usize,

    /// ONNX Runtime intra-op threads
    #[arg(long, env = "BERT_INTRA_THREADS", default_value_t = 4)]
    pub intra_threads: usize,

    /// Try the CUDA execution provider first (falls back to CPU)
    #[arg(long, env = "BERT_USE_CUDA")]
    pub cuda: bool,
}

impl Cli {
    /// Resolves the model directory and builds the service configuration
    pub fn into_config(self) -> Result<ServiceConfig> {
        let model_dir = match self.model_dir {
            Some(dir) => dir,
            None => default_model_dir()?,
        };

        let model = ModelConfig {
            model_dir,
            session: SessionOptions {
                max_length: self.max_length,
                intra_threads: self.intra_threads,
                use_cuda: self.cuda,
            },
        };

        let config = ServiceConfig::new(self.port, model);
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }
}
