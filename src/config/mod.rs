// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod detector_model;
mod options;
mod recognizer_model;
mod unit_type;

pub mod consts;

pub use detector_model::{load_detector_model, parse_detector_model, FaceDetectorModel, SkinBounds};
pub use options::{f64_option, string_option};
pub use recognizer_model::{load_recognizer_model, parse_recognizer_model, FaceRecognizerModel};
pub use unit_type::UnitType;
