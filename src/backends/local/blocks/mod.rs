// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod face_detector;
pub mod face_recognizer;
pub mod matcher;

pub use face_detector::FaceDetectorBlock;
pub use face_recognizer::FaceRecognizerBlock;
pub use matcher::MatcherBlock;
