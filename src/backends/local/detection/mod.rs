// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Face detection internals shared by the face detector block.
//!
//! The block owns a [`FaceDetectionBackend`] that turns a validated
//! [`ImageView`] into pixel-space [`Candidate`]s. Everything after that
//! (thresholding, suppression, normalization) is backend independent and lives
//! in [`nms`].

pub mod image_input;
pub mod nms;
pub mod skin_region;

pub use image_input::ImageView;
pub use skin_region::SkinRegionBackend;

/// A proposed face box in pixel coordinates of the input image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub confidence: f64,
}

impl Candidate {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, confidence: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
        }
    }

    pub fn area(&self) -> f64 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }

    pub(crate) fn is_finite(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2, self.confidence]
            .iter()
            .all(|v| v.is_finite())
    }

    /// `[x1, y1, x2, y2]` divided by the image size and clipped to `[0, 1]`.
    pub fn normalized(&self, width: usize, height: usize) -> [f64; 4] {
        let (w, h) = (width as f64, height as f64);
        [self.x1 / w, self.y1 / h, self.x2 / w, self.y2 / h].map(|v| v.clamp(0.0, 1.0))
    }
}

/// Pluggable face detection backend.
///
/// Implement this trait to run a different detector inside
/// [`FaceDetectorBlock`](crate::backends::local::FaceDetectorBlock).
pub trait FaceDetectionBackend: Send + Sync {
    /// Proposes face boxes for `image`. Order and overlap do not matter.
    fn detect(&self, image: &ImageView<'_>) -> Vec<Candidate>;

    fn name(&self) -> &'static str;
}
