// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::UNIT_TYPE_KEY;
use crate::config::UnitType;
use crate::context::Context;
use crate::errors::ServiceError;
use crate::traits::ProcessingBlock;

use super::blocks::{FaceDetectorBlock, FaceRecognizerBlock, MatcherBlock};

/// Factory for creating in-process processing blocks.
pub struct BlockFactory;

impl BlockFactory {
    /// Creates a block from a fully stamped configuration.
    ///
    /// The `unit_type` key selects the block:
    /// - "FACE_DETECTOR" -> FaceDetectorBlock (requires `model_path`)
    /// - "FACE_RECOGNIZER" -> FaceRecognizerBlock (requires `model_path`)
    /// - "MATCHER_MODULE" -> MatcherBlock
    pub fn create_block(config: &Context) -> Result<Box<dyn ProcessingBlock>, ServiceError> {
        match Self::read_unit_type(config)? {
            UnitType::FaceDetector => Ok(Box::new(FaceDetectorBlock::from_config(config)?)),
            UnitType::FaceRecognizer => Ok(Box::new(FaceRecognizerBlock::from_config(config)?)),
            UnitType::Matcher => Ok(Box::new(MatcherBlock::from_config(config)?)),
        }
    }

    /// Resolves the config's `unit_type`. Absent, `None` or non-string values are unsupported.
    pub fn read_unit_type(config: &Context) -> Result<UnitType, ServiceError> {
        let node = config.get_by_key(UNIT_TYPE_KEY).map_err(|_| {
            ServiceError::UnsupportedUnitType(format!("configuration has no '{}'", UNIT_TYPE_KEY))
        })?;
        let name = node.get_string().map_err(|e| {
            ServiceError::UnsupportedUnitType(format!("'{}' must be a string: {}", UNIT_TYPE_KEY, e))
        })?;
        name.parse()
    }

    /// List all unit types this build can create
    pub fn list_available_unit_types() -> Vec<&'static str> {
        UnitType::ALL.iter().map(UnitType::as_str).collect()
    }

    pub fn is_unit_type_available(name: &str) -> bool {
        Self::list_available_unit_types().contains(&name)
    }
}
