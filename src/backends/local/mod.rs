// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod blocks;
pub mod detection;
pub mod factory;
pub mod recognition;

pub use blocks::*;
pub use detection::{Candidate, FaceDetectionBackend};
pub use factory::BlockFactory;
pub use recognition::FaceEmbeddingBackend;
