// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::detection::{Candidate, FaceDetectionBackend, ImageView};
use crate::backends::local::recognition::FaceEmbeddingBackend;

/// A detection backend that proposes the same candidates for every image
pub struct FixedCandidatesBackend {
    pub candidates: Vec<Candidate>,
}

impl FixedCandidatesBackend {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl FaceDetectionBackend for FixedCandidatesBackend {
    fn detect(&self, _image: &ImageView<'_>) -> Vec<Candidate> {
        self.candidates.clone()
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// An embedding backend whose template is the box itself
pub struct BboxTemplateBackend;

impl FaceEmbeddingBackend for BboxTemplateBackend {
    fn embed(&self, _image: &ImageView<'_>, bbox: [f64; 4]) -> Vec<f64> {
        bbox.to_vec()
    }

    fn template_size(&self) -> usize {
        4
    }

    fn name(&self) -> &'static str {
        "bbox"
    }
}
