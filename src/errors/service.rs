// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for service setup and processing block creation.

use super::ContextError;
use thiserror::Error;

/// Errors that can occur while creating a service or materializing a block.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Asset directory missing or unusable, or a block could not bind its resources.
    #[error("Initialization error: {0}")]
    InitializationError(String),

    /// The configuration has no `unit_type`, or names one this build does not provide.
    #[error("Unsupported unit type: {0}")]
    UnsupportedUnitType(String),

    /// The configuration context itself could not be read.
    #[error("Invalid configuration: {0}")]
    Context(#[from] ContextError),
}
