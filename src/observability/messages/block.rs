// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processing block creation and the `process` lifecycle.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Block materialized from a configuration.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use face_sdk::observability::messages::block::BlockCreated;
///
/// let msg = BlockCreated {
///     unit_type: "FACE_DETECTOR",
///     model_path: Some("/opt/face_sdk/data/models/face_detector/face.yaml"),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct BlockCreated<'a> {
    pub unit_type: &'a str,
    pub model_path: Option<&'a str>,
}

impl Display for BlockCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.model_path {
            Some(path) => write!(f, "Processing block '{}' created with model '{}'", self.unit_type, path),
            None => write!(f, "Processing block '{}' created", self.unit_type),
        }
    }
}

impl StructuredLog for BlockCreated<'_> {
    fn log(&self) {
        tracing::info!(
            unit_type = self.unit_type,
            model_path = self.model_path,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("block", span_name = name, unit_type = self.unit_type)
    }
}

/// Configuration named no unit type, or one this build does not provide.
///
/// # Log Level
/// `warn!` - Caller error, no block created
pub struct UnitTypeRejected<'a> {
    pub requested: Option<&'a str>,
    pub reason: &'a str,
}

impl Display for UnitTypeRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rejected unit type {}: {}",
            self.requested.unwrap_or("<absent>"),
            self.reason
        )
    }
}

impl StructuredLog for UnitTypeRejected<'_> {
    fn log(&self) {
        tracing::warn!(requested = self.requested, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("unit_type_rejected", span_name = name, requested = self.requested)
    }
}

/// `process` started.
///
/// # Log Level
/// `debug!` - Per-call detail
pub struct BlockProcessStarted<'a> {
    pub unit_type: &'a str,
}

impl Display for BlockProcessStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Block '{}' processing started", self.unit_type)
    }
}

impl StructuredLog for BlockProcessStarted<'_> {
    fn log(&self) {
        tracing::debug!(unit_type = self.unit_type, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("process", span_name = name, unit_type = self.unit_type)
    }
}

/// `process` returned successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use face_sdk::observability::messages::block::BlockProcessCompleted;
/// use std::time::Duration;
///
/// let msg = BlockProcessCompleted {
///     unit_type: "FACE_DETECTOR",
///     objects: 2,
///     duration: Duration::from_millis(12),
/// };
///
/// assert!(msg.to_string().contains("2 objects"));
/// ```
pub struct BlockProcessCompleted<'a> {
    pub unit_type: &'a str,
    pub objects: usize,
    pub duration: Duration,
}

impl Display for BlockProcessCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Block '{}' completed: {} objects in {:?}",
            self.unit_type, self.objects, self.duration
        )
    }
}

impl StructuredLog for BlockProcessCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            unit_type = self.unit_type,
            objects = self.objects,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "process_completed",
            span_name = name,
            unit_type = self.unit_type,
            duration = ?self.duration,
        )
    }
}

/// `process` failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct BlockProcessFailed<'a> {
    pub unit_type: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for BlockProcessFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Block '{}' failed: {}", self.unit_type, self.error)
    }
}

impl StructuredLog for BlockProcessFailed<'_> {
    fn log(&self) {
        tracing::error!(
            unit_type = self.unit_type,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("process_failed", span_name = name, unit_type = self.unit_type)
    }
}
