// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in face detection backend: skin-tone segmentation plus region analysis.
//!
//! 1. Classify each pixel as skin when its YCbCr chroma falls inside the model's window
//! 2. Label 8-connected skin regions
//! 3. Keep regions that are large enough, roughly face shaped and densely filled
//!
//! Confidence is the fill ratio of a region's bounding box. Grayscale input has no
//! chroma and never yields candidates.

use super::{Candidate, FaceDetectionBackend, ImageView};
use crate::config::FaceDetectorModel;
use image::{GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};
use std::collections::BTreeMap;

const SKIN: u8 = 255;

pub struct SkinRegionBackend {
    model: FaceDetectorModel,
}

/// Bounding box and pixel count of one labelled region.
#[derive(Debug, Clone, Copy)]
struct Region {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    pixels: u32,
}

impl Region {
    fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    fn fill_ratio(&self) -> f64 {
        self.pixels as f64 / (self.width() as f64 * self.height() as f64)
    }

    fn aspect_ratio(&self) -> f64 {
        self.width() as f64 / self.height() as f64
    }
}

impl SkinRegionBackend {
    pub fn new(model: FaceDetectorModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &FaceDetectorModel {
        &self.model
    }

    fn is_skin(&self, rgb: &[u8]) -> bool {
        let (r, g, b) = (rgb[0] as f64, rgb[1] as f64, rgb[2] as f64);
        let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
        let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
        let [cb_lo, cb_hi] = self.model.skin.cb;
        let [cr_lo, cr_hi] = self.model.skin.cr;
        (cb_lo as f64..=cb_hi as f64).contains(&cb) && (cr_lo as f64..=cr_hi as f64).contains(&cr)
    }

    fn skin_mask(&self, image: &ImageView<'_>) -> Option<GrayImage> {
        let mut mask = Vec::with_capacity(image.width * image.height);
        for y in 0..image.height {
            for x in 0..image.width {
                let value = if self.is_skin(image.pixel(x, y)) { SKIN } else { 0 };
                mask.push(value);
            }
        }
        GrayImage::from_raw(image.width as u32, image.height as u32, mask)
    }

    fn regions(mask: &GrayImage) -> Vec<Region> {
        let labeled = connected_components(mask, Connectivity::Eight, Luma([0u8]));

        let mut regions: BTreeMap<u32, Region> = BTreeMap::new();
        for (x, y, label) in labeled.enumerate_pixels() {
            let label = label[0];
            if label == 0 {
                continue;
            }
            regions
                .entry(label)
                .and_modify(|r| {
                    r.min_x = r.min_x.min(x);
                    r.min_y = r.min_y.min(y);
                    r.max_x = r.max_x.max(x);
                    r.max_y = r.max_y.max(y);
                    r.pixels += 1;
                })
                .or_insert(Region {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                    pixels: 1,
                });
        }
        regions.into_values().collect()
    }
}

impl FaceDetectionBackend for SkinRegionBackend {
    fn detect(&self, image: &ImageView<'_>) -> Vec<Candidate> {
        if image.channels < 3 {
            return Vec::new();
        }
        let Some(mask) = self.skin_mask(image) else {
            return Vec::new();
        };

        let image_area = (image.width * image.height) as f64;
        let [aspect_lo, aspect_hi] = self.model.aspect_ratio;

        Self::regions(&mask)
            .into_iter()
            .filter(|r| r.pixels as f64 / image_area >= self.model.min_region_fraction)
            .filter(|r| (aspect_lo..=aspect_hi).contains(&r.aspect_ratio()))
            .filter(|r| r.fill_ratio() >= self.model.min_fill_ratio)
            .map(|r| {
                Candidate::new(
                    r.min_x as f64,
                    r.min_y as f64,
                    (r.max_x + 1) as f64,
                    (r.max_y + 1) as f64,
                    r.fill_ratio().min(1.0),
                )
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "skin_region"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{canvas_with_squares, image_context};

    fn detect(width: usize, height: usize, blob: Vec<u8>, channels: i64) -> Vec<Candidate> {
        let ctx = image_context(height as i64, width as i64, channels, blob);
        let view = ImageView::from_context(&ctx).unwrap();
        SkinRegionBackend::new(FaceDetectorModel::default()).detect(&view)
    }

    #[test]
    fn test_black_image_has_no_candidates() {
        assert!(detect(2, 2, vec![0; 12], 3).is_empty());
    }

    #[test]
    fn test_single_square_is_found() {
        let blob = canvas_with_squares(40, 30, &[(10, 5, 12)]);
        let found = detect(40, 30, blob, 3);

        assert_eq!(found.len(), 1);
        let c = found[0];
        assert_eq!((c.x1, c.y1, c.x2, c.y2), (10.0, 5.0, 22.0, 17.0));
        assert!((c.confidence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_separate_squares() {
        let blob = canvas_with_squares(60, 30, &[(2, 2, 10), (40, 10, 12)]);
        assert_eq!(detect(60, 30, blob, 3).len(), 2);
    }

    #[test]
    fn test_thin_strip_fails_aspect_filter() {
        let mut blob = vec![0u8; 50 * 20 * 3];
        for x in 0..50 {
            let at = (10 * 50 + x) * 3;
            blob[at..at + 3].copy_from_slice(&crate::test_support::SKIN);
        }
        assert!(detect(50, 20, blob, 3).is_empty());
    }

    #[test]
    fn test_grayscale_is_ignored() {
        assert!(detect(4, 4, vec![200; 16], 1).is_empty());
    }
}
