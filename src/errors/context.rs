// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while navigating or reading a [`Context`](crate::context::Context).

use thiserror::Error;

/// Failures of the context data model.
///
/// Every accessor fails loudly instead of returning a default, so a caller that
/// reads a node with the wrong accessor always gets `TypeMismatch`.
#[derive(Error, Debug)]
pub enum ContextError {
    /// The operation is not valid for the node's current tag.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Strict key lookup on an object missed.
    #[error("Key not found: '{0}'")]
    KeyNotFound(String),

    /// Array index past the end.
    #[error("Index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Malformed JSON handed to the JSON bridge.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContextError {
    pub(crate) fn mismatch(expected: &'static str, found: &'static str) -> Self {
        ContextError::TypeMismatch { expected, found }
    }
}
