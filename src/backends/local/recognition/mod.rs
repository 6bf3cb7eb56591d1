// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Face template extraction used by the face recognizer block.
//!
//! A [`FaceEmbeddingBackend`] turns one face region of an image into a raw
//! descriptor. The block L2-normalizes it, so templates from any backend can be
//! compared by the matcher's squared distance.

pub mod luma_grid;

pub use luma_grid::LumaGridBackend;

use crate::backends::local::detection::ImageView;

/// Pluggable face descriptor.
pub trait FaceEmbeddingBackend: Send + Sync {
    /// Raw descriptor of the face inside `bbox` (normalized `[x1, y1, x2, y2]`).
    ///
    /// Must return exactly [`template_size`](Self::template_size) values.
    fn embed(&self, image: &ImageView<'_>, bbox: [f64; 4]) -> Vec<f64>;

    fn template_size(&self) -> usize;

    fn name(&self) -> &'static str;
}

/// Scales `values` to unit length. An all-zero vector stays zero.
pub fn l2_normalize(values: &mut [f64]) {
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 && norm.is_finite() {
        values.iter_mut().for_each(|v| *v /= norm);
    }
}
