// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Instant;

use crate::config::consts::DEFAULT_MATCHER_THRESHOLD;
use crate::config::{f64_option, UnitType};
use crate::context::Context;
use crate::errors::{ContextError, ProcessError, ServiceError};
use crate::observability::messages::block::{
    BlockProcessCompleted, BlockProcessFailed, BlockProcessStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::ProcessingBlock;

use super::face_recognizer::TEMPLATE_KEY;

pub const VERIFICATION_KEY: &str = "verification";

/// `MATCHER_MODULE` block: compares the templates of two faces.
///
/// Reads `verification.objects[0..2].template` and writes
/// `verification.result.distance` (squared L2) and
/// `verification.result.verdict` (`distance < threshold`).
pub struct MatcherBlock {
    threshold: f64,
}

impl MatcherBlock {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &Context) -> Result<Self, ServiceError> {
        let threshold = f64_option(config, "threshold", DEFAULT_MATCHER_THRESHOLD)?;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ServiceError::InitializationError(format!(
                "option 'threshold' must be a non-negative number, got {}",
                threshold
            )));
        }
        Ok(Self::new(threshold))
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn run(&self, ctx: &mut Context) -> Result<f64, ProcessError> {
        let distance = {
            let verification = ctx
                .get_by_key(VERIFICATION_KEY)
                .map_err(|_| ProcessError::invalid("missing 'verification' object"))?;
            let objects = verification
                .get_by_key("objects")
                .map_err(|_| ProcessError::invalid("missing 'verification.objects'"))?;
            if !objects.is_array() || objects.size() != 2 {
                return Err(ProcessError::invalid(
                    "'verification.objects' must be an array of exactly two objects",
                ));
            }
            let first = read_template(objects.get_by_index(0)?)?;
            let second = read_template(objects.get_by_index(1)?)?;
            if first.len() != second.len() {
                return Err(ProcessError::invalid(format!(
                    "template lengths differ: {} vs {}",
                    first.len(),
                    second.len()
                )));
            }
            squared_l2(&first, &second)
        };

        let verdict = distance < self.threshold;
        write_result(ctx.get_by_key_mut(VERIFICATION_KEY)?, distance, verdict).map_err(|e| {
            ProcessError::invalid(format!("'verification.result' cannot hold the match result: {}", e))
        })?;
        Ok(distance)
    }
}

/// Fails when `result` or one of its fields is already shaped as something else.
fn write_result(verification: &mut Context, distance: f64, verdict: bool) -> Result<(), ContextError> {
    let result = verification.get_or_insert_by_key("result")?;
    result.get_or_insert_by_key("distance")?.set_double(distance)?;
    result.get_or_insert_by_key("verdict")?.set_bool(verdict)?;
    Ok(())
}

fn read_template(object: &Context) -> Result<Vec<f64>, ProcessError> {
    let template = object
        .get_by_key(TEMPLATE_KEY)
        .map_err(|_| ProcessError::invalid("each verification object needs a 'template'"))?;
    if !template.is_array() || template.size() == 0 {
        return Err(ProcessError::invalid("'template' must be a non-empty array"));
    }
    template
        .iter()
        .map(|v| {
            v.get_double()
                .map_err(|e| ProcessError::invalid(format!("'template' entries must be doubles: {}", e)))
        })
        .collect()
}

pub fn squared_l2(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl ProcessingBlock for MatcherBlock {
    fn process(&mut self, ctx: &mut Context) -> Result<(), ProcessError> {
        let unit_type = self.unit_type().as_str();
        BlockProcessStarted { unit_type }.log();
        let started = Instant::now();

        match self.run(ctx) {
            Ok(distance) => {
                tracing::debug!(unit_type, distance, threshold = self.threshold, "Templates compared");
                BlockProcessCompleted {
                    unit_type,
                    objects: 2,
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
        UnitType::Matcher
    }

    fn name(&self) -> &'static str {
        "matcher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verification(a: serde_json::Value, b: serde_json::Value) -> Context {
        Context::from_json(&json!({
            "verification": {
                "objects": [{"template": a}, {"template": b}]
            }
        }))
    }

    fn result(ctx: &Context) -> (f64, bool) {
        let result = ctx
            .get_by_key("verification")
            .unwrap()
            .get_by_key("result")
            .unwrap();
        (
            result.get_by_key("distance").unwrap().get_double().unwrap(),
            result.get_by_key("verdict").unwrap().get_bool().unwrap(),
        )
    }

    #[test]
    fn test_identical_templates_match() {
        let mut ctx = verification(json!([0.5, 0.25, 1.5]), json!([0.5, 0.25, 1.5]));
        MatcherBlock::new(DEFAULT_MATCHER_THRESHOLD).process(&mut ctx).unwrap();
        assert_eq!(result(&ctx), (0.0, true));
    }

    #[test]
    fn test_distant_templates_do_not_match() {
        let mut ctx = verification(json!([0.0, 0.0]), json!([1.0, 1.0]));
        MatcherBlock::new(DEFAULT_MATCHER_THRESHOLD).process(&mut ctx).unwrap();
        assert_eq!(result(&ctx), (2.0, false));
    }

    #[test]
    fn test_length_mismatch_is_invalid_input() {
        let mut ctx = verification(json!([0.0, 0.5]), json!([1.0]));
        let err = MatcherBlock::new(1.0).process(&mut ctx).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidInput(_)));
    }

    #[test]
    fn test_integer_template_is_invalid_input() {
        let mut ctx = verification(json!([1, 2]), json!([1.0, 2.0]));
        let err = MatcherBlock::new(1.0).process(&mut ctx).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidInput(_)));
    }

    #[test]
    fn test_requires_exactly_two_objects() {
        let mut ctx = Context::from_json(&json!({
            "verification": {"objects": [{"template": [1.0]}]}
        }));
        let err = MatcherBlock::new(1.0).process(&mut ctx).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidInput(_)));
    }

    #[test]
    fn test_leaf_result_slot_is_invalid_input() {
        let mut ctx = Context::from_json(&json!({
            "verification": {
                "objects": [{"template": [1.0]}, {"template": [1.0]}],
                "result": 5
            }
        }));
        let err = MatcherBlock::new(1.0).process(&mut ctx).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidInput(_)));
    }

    #[test]
    fn test_populated_distance_slot_is_invalid_input() {
        let mut ctx = Context::from_json(&json!({
            "verification": {
                "objects": [{"template": [1.0]}, {"template": [0.0]}],
                "result": {"distance": [1.0, 2.0]}
            }
        }));
        let err = MatcherBlock::new(1.0).process(&mut ctx).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidInput(_)));
    }

    #[test]
    fn test_previous_result_is_overwritten() {
        let mut ctx = Context::from_json(&json!({
            "verification": {
                "objects": [{"template": [0.0]}, {"template": [2.0]}],
                "result": {"distance": 0.0, "verdict": true}
            }
        }));
        MatcherBlock::new(1.0).process(&mut ctx).unwrap();
        assert_eq!(result(&ctx), (4.0, false));
    }

    #[test]
    fn test_threshold_from_config() {
        let block = MatcherBlock::from_config(&Context::from_json(&json!({"threshold": 0.4}))).unwrap();
        assert_eq!(block.threshold(), 0.4);

        let block = MatcherBlock::from_config(&Context::from_json(&json!({}))).unwrap();
        assert_eq!(block.threshold(), DEFAULT_MATCHER_THRESHOLD);
    }
}
