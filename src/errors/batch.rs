// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{ProcessError, ServiceError};
use thiserror::Error;

/// Errors from [`Service::process_batch`](crate::service::Service::process_batch).
#[derive(Error, Debug)]
pub enum BatchError {
    /// A block could not be created for the batch configuration.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The block processing input `index` failed.
    #[error("Input {index} failed: {source}")]
    Process {
        index: usize,
        #[source]
        source: ProcessError,
    },

    /// A blocking worker panicked or was cancelled.
    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
