// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Registry of the unit types this build can materialize.

use crate::errors::ServiceError;
use std::fmt;
use std::str::FromStr;

/// Algorithm selector read from a block configuration's `unit_type` key.
///
/// Each variant knows the model asset it binds at construction, relative to the
/// service's asset directory.
///
/// # Example
/// ```
/// use face_sdk::config::UnitType;
///
/// let unit: UnitType = "FACE_DETECTOR".parse().unwrap();
/// assert_eq!(unit, UnitType::FaceDetector);
/// assert_eq!(unit.model_asset(), Some("data/models/face_detector/face.yaml"));
/// assert!("SPEECH_RECOGNIZER".parse::<UnitType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitType {
    FaceDetector,
    FaceRecognizer,
    Matcher,
}

impl UnitType {
    pub const ALL: [UnitType; 3] = [
        UnitType::FaceDetector,
        UnitType::FaceRecognizer,
        UnitType::Matcher,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::FaceDetector => "FACE_DETECTOR",
            UnitType::FaceRecognizer => "FACE_RECOGNIZER",
            UnitType::Matcher => "MATCHER_MODULE",
        }
    }

    /// Model asset path relative to the service root, if the unit needs one.
    pub fn model_asset(&self) -> Option<&'static str> {
        match self {
            UnitType::FaceDetector => Some("data/models/face_detector/face.yaml"),
            UnitType::FaceRecognizer => Some("data/models/recognizer/recognizer.yaml"),
            UnitType::Matcher => None,
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitType::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| ServiceError::UnsupportedUnitType(format!("'{}' is not a known unit type", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_unit_parses_from_its_name() {
        for unit in UnitType::ALL {
            assert_eq!(unit.as_str().parse::<UnitType>().unwrap(), unit);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(matches!(
            "face_detector".parse::<UnitType>(),
            Err(ServiceError::UnsupportedUnitType(_))
        ));
    }

    #[test]
    fn test_matcher_needs_no_asset() {
        assert!(UnitType::Matcher.model_asset().is_none());
    }

    #[test]
    fn test_recognizer_binds_its_own_model() {
        let unit: UnitType = "FACE_RECOGNIZER".parse().unwrap();
        assert_eq!(unit.model_asset(), Some("data/models/recognizer/recognizer.yaml"));
    }
}
