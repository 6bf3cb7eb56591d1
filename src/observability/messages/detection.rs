// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Detector post-processing summary.
///
/// # Log Level
/// `debug!` - Per-call detail
pub struct DetectionSummary<'a> {
    pub backend: &'a str,
    pub candidates: usize,
    pub above_threshold: usize,
    pub kept: usize,
}

impl Display for DetectionSummary<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Backend '{}' proposed {} candidates, {} above threshold, {} kept after NMS",
            self.backend, self.candidates, self.above_threshold, self.kept
        )
    }
}

impl StructuredLog for DetectionSummary<'_> {
    fn log(&self) {
        tracing::debug!(
            backend = self.backend,
            candidates = self.candidates,
            above_threshold = self.above_threshold,
            kept = self.kept,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("detection", span_name = name, backend = self.backend)
    }
}
