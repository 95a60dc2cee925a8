// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! BERT vector API Module
//!
//! POST /bert: text in, mean-pooled encoder vector out.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{bert_handler, bert_method_not_allowed};
pub use request::BertRequest;
pub use response::{BertResponse, STATUS_OK};
