// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Templates extracted by the face recognizer.
///
/// # Log Level
/// `debug!` - Per-call detail
pub struct TemplatesComputed<'a> {
    pub backend: &'a str,
    pub faces: usize,
    pub skipped: usize,
    pub template_size: usize,
}

impl Display for TemplatesComputed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Backend '{}' computed {} templates of size {} ({} non-face objects skipped)",
            self.backend, self.faces, self.template_size, self.skipped
        )
    }
}

impl StructuredLog for TemplatesComputed<'_> {
    fn log(&self) {
        tracing::debug!(
            backend = self.backend,
            faces = self.faces,
            skipped = self.skipped,
            template_size = self.template_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("recognition", span_name = name, backend = self.backend)
    }
}
