// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Loader for the face recognizer's model asset.
//!
//! ```yaml
//! name: luma-grid-v1
//! grid: 16
//! margin: 0.1
//! ```

use crate::errors::ServiceError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Parameters of the built-in luma-grid face descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaceRecognizerModel {
    pub name: String,
    /// Side of the square grid the face crop is resampled to; the template has `grid * grid` entries.
    pub grid: u32,
    /// Extra context around each box, as a fraction of the box size per side.
    pub margin: f64,
}

impl Default for FaceRecognizerModel {
    fn default() -> Self {
        Self {
            name: "luma-grid".to_string(),
            grid: 16,
            margin: 0.0,
        }
    }
}

impl FaceRecognizerModel {
    pub fn template_size(&self) -> usize {
        (self.grid * self.grid) as usize
    }

    fn validate(&self) -> Result<(), String> {
        if !(2..=64).contains(&self.grid) {
            return Err(format!("grid must be within [2, 64], got {}", self.grid));
        }
        if !(0.0..=0.5).contains(&self.margin) {
            return Err(format!("margin must be within [0, 0.5], got {}", self.margin));
        }
        Ok(())
    }
}

pub fn parse_recognizer_model(yaml: &str) -> Result<FaceRecognizerModel, ServiceError> {
    let model: FaceRecognizerModel = if yaml.trim().is_empty() {
        FaceRecognizerModel::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|e| {
            ServiceError::InitializationError(format!("malformed recognizer model: {}", e))
        })?
    };
    model.validate().map_err(|reason| {
        ServiceError::InitializationError(format!("invalid recognizer model: {}", reason))
    })?;
    Ok(model)
}

pub fn load_recognizer_model<P: AsRef<Path>>(path: P) -> Result<FaceRecognizerModel, ServiceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        ServiceError::InitializationError(format!(
            "cannot read recognizer model '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_recognizer_model(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let model = parse_recognizer_model("grid: 8\n").unwrap();
        assert_eq!(model.grid, 8);
        assert_eq!(model.margin, 0.0);
        assert_eq!(model.template_size(), 64);
    }

    #[test]
    fn test_grid_bounds() {
        assert!(matches!(
            parse_recognizer_model("grid: 1\n"),
            Err(ServiceError::InitializationError(_))
        ));
        assert!(parse_recognizer_model("grid: 64\n").is_ok());
    }

    #[test]
    fn test_missing_file_is_initialization_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_recognizer_model(dir.path().join("recognizer.yaml")),
            Err(ServiceError::InitializationError(_))
        ));
    }
}
