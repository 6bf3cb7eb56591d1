// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::ContextError;
use thiserror::Error;

/// Errors surfaced by [`ProcessingBlock::process`](crate::traits::ProcessingBlock::process).
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Required input fields are missing or carry the wrong type.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Writing results back into the context failed.
    #[error("Context error: {0}")]
    Context(#[from] ContextError),
}

impl ProcessError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ProcessError::InvalidInput(message.into())
    }
}
