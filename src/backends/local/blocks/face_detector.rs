// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Instant;

use crate::backends::local::detection::{
    nms, Candidate, FaceDetectionBackend, ImageView, SkinRegionBackend,
};
use crate::config::consts::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_IOU_THRESHOLD, MODEL_PATH_KEY,
};
use crate::config::{f64_option, load_detector_model, string_option, UnitType};
use crate::context::Context;
use crate::errors::{ProcessError, ServiceError};
use crate::observability::messages::block::{
    BlockProcessCompleted, BlockProcessFailed, BlockProcessStarted,
};
use crate::observability::messages::detection::DetectionSummary;
use crate::observability::messages::StructuredLog;
use crate::traits::ProcessingBlock;

pub const OBJECTS_KEY: &str = "objects";
pub const FACE_CLASS: &str = "face";

/// `FACE_DETECTOR` block: finds faces in `image` and appends them to `objects`.
///
/// Each appended object carries `id` (Int64), `class` ("face"), `confidence`
/// (Float64) and `bbox` (`[x1, y1, x2, y2]`, normalized to `[0, 1]`).
pub struct FaceDetectorBlock {
    backend: Box<dyn FaceDetectionBackend>,
    confidence_threshold: f64,
    iou_threshold: f64,
}

impl FaceDetectorBlock {
    /// Binds the detector model named by the config's `model_path`.
    pub fn from_config(config: &Context) -> Result<Self, ServiceError> {
        let model_path = string_option(config, MODEL_PATH_KEY)?.ok_or_else(|| {
            ServiceError::InitializationError(format!(
                "{} requires '{}'",
                UnitType::FaceDetector,
                MODEL_PATH_KEY
            ))
        })?;
        let model = load_detector_model(&model_path)?;
        Self::from_config_with_backend(config, Box::new(SkinRegionBackend::new(model)))
    }

    /// Same option handling as [`from_config`](Self::from_config) but with a caller-supplied backend.
    pub fn from_config_with_backend(
        config: &Context,
        backend: Box<dyn FaceDetectionBackend>,
    ) -> Result<Self, ServiceError> {
        let confidence_threshold =
            f64_option(config, "confidence_threshold", DEFAULT_CONFIDENCE_THRESHOLD)?;
        let iou_threshold = f64_option(config, "iou_threshold", DEFAULT_IOU_THRESHOLD)?;
        for (key, value) in [
            ("confidence_threshold", confidence_threshold),
            ("iou_threshold", iou_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ServiceError::InitializationError(format!(
                    "option '{}' must be within [0, 1], got {}",
                    key, value
                )));
            }
        }
        Ok(Self::with_backend(backend, confidence_threshold, iou_threshold))
    }

    pub fn with_backend(
        backend: Box<dyn FaceDetectionBackend>,
        confidence_threshold: f64,
        iou_threshold: f64,
    ) -> Self {
        Self {
            backend,
            confidence_threshold,
            iou_threshold,
        }
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    pub fn iou_threshold(&self) -> f64 {
        self.iou_threshold
    }

    fn detect(&self, image: &ImageView<'_>) -> Vec<Candidate> {
        let candidates = self.backend.detect(image);
        let proposed = candidates.len();
        let confident = nms::filter_by_confidence(candidates, self.confidence_threshold);
        let above_threshold = confident.len();
        let kept = nms::non_max_suppression(confident, self.iou_threshold);

        DetectionSummary {
            backend: self.backend.name(),
            candidates: proposed,
            above_threshold,
            kept: kept.len(),
        }
        .log();
        kept
    }

    /// Returns the number of objects appended.
    fn run(&self, ctx: &mut Context) -> Result<usize, ProcessError> {
        if !ctx.is_none() && !ctx.is_object() {
            return Err(ProcessError::invalid(format!(
                "io context must be an object, found {}",
                ctx.kind()
            )));
        }

        let (width, height, detections) = {
            let image = ImageView::from_context(ctx)?;
            (image.width, image.height, self.detect(&image))
        };

        let objects = ctx.get_or_insert_by_key(OBJECTS_KEY)?;
        if !objects.is_none() && !objects.is_array() {
            return Err(ProcessError::invalid(format!(
                "'{}' must be an array, found {}",
                OBJECTS_KEY,
                objects.kind()
            )));
        }
        if objects.is_none() {
            *objects = Context::new_array();
        }

        let first_id = objects.size() as i64;
        for (offset, candidate) in detections.iter().enumerate() {
            let object = objects.push_back(Context::new_object())?;
            object
                .get_or_insert_by_key("id")?
                .set_int64(first_id + offset as i64)?;
            object.get_or_insert_by_key("class")?.set_string(FACE_CLASS)?;
            object
                .get_or_insert_by_key("confidence")?
                .set_double(candidate.confidence)?;
            let bbox = object.get_or_insert_by_key("bbox")?;
            *bbox = Context::new_array();
            for coordinate in candidate.normalized(width, height) {
                bbox.push_back(coordinate)?;
            }
        }
        Ok(detections.len())
    }
}

impl ProcessingBlock for FaceDetectorBlock {
    fn process(&mut self, ctx: &mut Context) -> Result<(), ProcessError> {
        let unit_type = self.unit_type().as_str();
        BlockProcessStarted { unit_type }.log();
        let started = Instant::now();

        match self.run(ctx) {
            Ok(objects) => {
                BlockProcessCompleted {
                    unit_type,
                    objects,
                    duration: started.elapsed(),
                }
                .log();
                Ok(())
            }
            Err(error) => {
                BlockProcessFailed {
                    unit_type,
                    error: &error,
                }
                .log();
                Err(error)
            }
        }
    }

    fn unit_type(&self) -> UnitType {
        UnitType::FaceDetector
    }

    fn name(&self) -> &'static str {
        "face_detector"
    }
}
