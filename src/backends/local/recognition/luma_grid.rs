// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in face descriptor: the face crop's luma, resampled to a fixed grid and
//! centred on its mean.
//!
//! Mean removal makes the descriptor insensitive to uniform brightness shifts;
//! the block's normalization takes care of contrast.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

use super::FaceEmbeddingBackend;
use crate::backends::local::detection::ImageView;
use crate::config::FaceRecognizerModel;

/// Slack when mapping normalized coordinates back to pixels, so `k / w * w`
/// lands on `k` instead of spilling into the next pixel.
const PIXEL_EPSILON: f64 = 1e-6;

pub struct LumaGridBackend {
    model: FaceRecognizerModel,
}

impl LumaGridBackend {
    pub fn new(model: FaceRecognizerModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &FaceRecognizerModel {
        &self.model
    }

    /// Pixel span `[start, end)` of a normalized interval, widened by the model
    /// margin and kept non-empty inside `0..len`.
    fn span(&self, lo: f64, hi: f64, len: usize) -> (u32, u32) {
        let extent = len as f64;
        let pad = (hi - lo) * self.model.margin;
        let start = ((lo - pad) * extent + PIXEL_EPSILON).floor().clamp(0.0, extent - 1.0) as usize;
        let end = ((hi + pad) * extent - PIXEL_EPSILON).ceil().clamp(0.0, extent) as usize;
        (start as u32, end.max(start + 1) as u32)
    }
}

fn luma(pixel: &[u8]) -> u8 {
    match pixel {
        [r, g, b, ..] => {
            (0.299 * *r as f64 + 0.587 * *g as f64 + 0.114 * *b as f64).round() as u8
        }
        [gray, ..] => *gray,
        [] => 0,
    }
}

impl FaceEmbeddingBackend for LumaGridBackend {
    fn embed(&self, image: &ImageView<'_>, bbox: [f64; 4]) -> Vec<f64> {
        let [x1, y1, x2, y2] = bbox;
        let (left, right) = self.span(x1, x2, image.width);
        let (top, bottom) = self.span(y1, y2, image.height);

        let crop = GrayImage::from_fn(right - left, bottom - top, |x, y| {
            Luma([luma(image.pixel((left + x) as usize, (top + y) as usize))])
        });
        let grid = imageops::resize(&crop, self.model.grid, self.model.grid, FilterType::Triangle);

        let mut values: Vec<f64> = grid.pixels().map(|p| p[0] as f64).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter_mut().for_each(|v| *v -= mean);
        values
    }

    fn template_size(&self) -> usize {
        self.model.template_size()
    }

    fn name(&self) -> &'static str {
        "luma_grid"
    }
}
