// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for service setup events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Service created and bound to an asset directory.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use face_sdk::observability::messages::service::ServiceCreated;
///
/// let msg = ServiceCreated {
///     sdk_path: "/opt/face_sdk",
///     unit_types: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ServiceCreated<'a> {
    pub sdk_path: &'a str,
    pub unit_types: usize,
}

impl Display for ServiceCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Service created at '{}': {} unit types available",
            self.sdk_path, self.unit_types
        )
    }
}

impl StructuredLog for ServiceCreated<'_> {
    fn log(&self) {
        tracing::info!(
            sdk_path = self.sdk_path,
            unit_types = self.unit_types,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("service", span_name = name, sdk_path = self.sdk_path)
    }
}

/// Service could not be initialized.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ServiceInitializationFailed<'a> {
    pub sdk_path: &'a str,
    pub reason: &'a str,
}

impl Display for ServiceInitializationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Service initialization failed for '{}': {}",
            self.sdk_path, self.reason
        )
    }
}

impl StructuredLog for ServiceInitializationFailed<'_> {
    fn log(&self) {
        tracing::error!(sdk_path = self.sdk_path, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("service_init_failed", span_name = name, sdk_path = self.sdk_path)
    }
}
