// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Loader for the face detector's model asset.
//!
//! The asset is a YAML parameter file bound once when the block is created.
//! Every field is optional and falls back to the built-in default.
//!
//! # Example
//! ```yaml
//! name: skin-region-v1
//! skin:
//!   cb: [77, 127]
//!   cr: [133, 173]
//! min_region_fraction: 0.002
//! aspect_ratio: [0.5, 2.0]
//! min_fill_ratio: 0.35
//! ```

use crate::errors::ServiceError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Inclusive chroma window (YCbCr) classifying a pixel as skin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkinBounds {
    pub cb: [u8; 2],
    pub cr: [u8; 2],
}

impl Default for SkinBounds {
    fn default() -> Self {
        Self {
            cb: [77, 127],
            cr: [133, 173],
        }
    }
}

/// Parameters of the built-in skin-region face detector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaceDetectorModel {
    pub name: String,
    pub skin: SkinBounds,
    /// Smallest region kept, as a fraction of the image area.
    pub min_region_fraction: f64,
    /// Allowed width / height range of a region's bounding box.
    pub aspect_ratio: [f64; 2],
    /// Smallest share of a bounding box that must be skin pixels.
    pub min_fill_ratio: f64,
}

impl Default for FaceDetectorModel {
    fn default() -> Self {
        Self {
            name: "skin-region".to_string(),
            skin: SkinBounds::default(),
            min_region_fraction: 0.002,
            aspect_ratio: [0.5, 2.0],
            min_fill_ratio: 0.35,
        }
    }
}

impl FaceDetectorModel {
    fn validate(&self) -> Result<(), String> {
        if self.skin.cb[0] > self.skin.cb[1] || self.skin.cr[0] > self.skin.cr[1] {
            return Err("skin chroma bounds must be ordered [low, high]".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_region_fraction) {
            return Err(format!(
                "min_region_fraction must be within [0, 1], got {}",
                self.min_region_fraction
            ));
        }
        if !(0.0..=1.0).contains(&self.min_fill_ratio) {
            return Err(format!(
                "min_fill_ratio must be within [0, 1], got {}",
                self.min_fill_ratio
            ));
        }
        if self.aspect_ratio[0] <= 0.0 || self.aspect_ratio[0] > self.aspect_ratio[1] {
            return Err("aspect_ratio must be a positive, ordered [low, high] pair".to_string());
        }
        Ok(())
    }
}

/// Parses a detector model from YAML text.
pub fn parse_detector_model(yaml: &str) -> Result<FaceDetectorModel, ServiceError> {
    let model: FaceDetectorModel = if yaml.trim().is_empty() {
        FaceDetectorModel::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|e| {
            ServiceError::InitializationError(format!("malformed detector model: {}", e))
        })?
    };
    model
        .validate()
        .map_err(|reason| ServiceError::InitializationError(format!("invalid detector model: {}", reason)))?;
    Ok(model)
}

/// Reads and validates the detector model file at `path`.
pub fn load_detector_model<P: AsRef<Path>>(path: P) -> Result<FaceDetectorModel, ServiceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        ServiceError::InitializationError(format!(
            "cannot read detector model '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_detector_model(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let model = parse_detector_model("min_fill_ratio: 0.5\n").unwrap();
        assert_eq!(model.min_fill_ratio, 0.5);
        assert_eq!(model.skin, SkinBounds::default());
        assert_eq!(model.aspect_ratio, [0.5, 2.0]);
    }

    #[test]
    fn test_empty_file_is_default_model() {
        assert_eq!(parse_detector_model("").unwrap(), FaceDetectorModel::default());
    }

    #[test]
    fn test_unordered_bounds_are_rejected() {
        let yaml = "skin:\n  cb: [127, 77]\n";
        assert!(matches!(
            parse_detector_model(yaml),
            Err(ServiceError::InitializationError(_))
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_detector_model("aspect_ratio: nope").is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name: test-model").unwrap();
        let model = load_detector_model(file.path()).unwrap();
        assert_eq!(model.name, "test-model");
    }

    #[test]
    fn test_missing_file_is_initialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_detector_model(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ServiceError::InitializationError(_))));
    }
}
