// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration

use crate::embeddings::ModelConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Everything the node needs to start: where to listen and which model to load
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bind host; always all interfaces
    pub host: IpAddr,
    /// TCP port from the command line
    pub port: u16,
    /// Model location and session settings
    pub model: ModelConfig,
}

impl ServiceConfig {
    pub fn new(port: u16, model: ModelConfig) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port,
            model,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.session.max_length < 2 {
            return Err("max_length must leave room for [CLS] and [SEP]".to_string());
        }
        if self.model.session.intra_threads == 0 {
            return Err("intra_threads must be greater than 0".to_string());
        }
        Ok(())
    }
}
