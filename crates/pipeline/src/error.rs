// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors surfaced by the cleaner processor. Validation rejections
/// (invalid type, unordered, duplicate) are not represented here — they
/// are dropped silently at info level, not surfaced as errors.
#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("pipeline::cleaner: read message: {0}")]
    ReadMessage(String),

    #[error("pipeline::cleaner: cancelled")]
    Cancelled,

    #[error("pipeline::cleaner: json parse: {0}")]
    JsonParse(String),

    #[error("pipeline::cleaner: write message: {0}")]
    WriteMessage(String),
}

/// Errors surfaced by the packer processor.
#[derive(Debug, Error)]
pub enum PackerError {
    #[error("pipeline::packer: read message: {0}")]
    ReadMessage(String),

    #[error("pipeline::packer: cancelled")]
    Cancelled,

    #[error("pipeline::packer: write message: {0}")]
    WriteMessage(String),
}
