// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Entry point of the SDK.
//!
//! A [`Service`] is bound to an asset directory. It hands out empty contexts and
//! turns configuration contexts into ready-to-run [`ProcessingBlock`]s.
//!
//! ```text
//! <sdk_path>/
//!   data/models/
//!     face_detector/face.yaml
//! ```
//!
//! # Example
//! ```no_run
//! use face_sdk::service::Service;
//!
//! let service = Service::create_service("/opt/face_sdk")?;
//! let mut config = service.create_context();
//! config.get_or_insert_by_key("unit_type")?.set_string("FACE_DETECTOR")?;
//! let mut detector = service.create_processing_block(&config)?;
//!
//! let mut io = service.create_context();
//! // fill io["image"] with blob / dtype / format / shape ...
//! detector.process(&mut io)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```


use std::path::{Path, PathBuf};

use crate::backends::local::BlockFactory;
use crate::config::consts::{MODELS_DIR, MODEL_PATH_KEY, SDK_PATH_KEY, UNIT_TYPE_KEY};
use crate::context::Context;
use crate::errors::{BatchError, ContextError, ServiceError};
use crate::observability::messages::block::{BlockCreated, UnitTypeRejected};
use crate::observability::messages::service::{ServiceCreated, ServiceInitializationFailed};
use crate::observability::messages::StructuredLog;
use crate::traits::ProcessingBlock;

/// Handle to an initialized SDK installation.
///
/// Cheap to clone; holds no state besides the asset directory, so clones can be
/// moved into worker tasks freely.
#[derive(Debug, Clone)]
pub struct Service {
    sdk_path: PathBuf,
}

impl Service {
    /// Binds a service to `sdk_path`, which must be a directory containing `data/models/`.
    pub fn create_service<P: AsRef<Path>>(sdk_path: P) -> Result<Self, ServiceError> {
        let sdk_path = sdk_path.as_ref();
        let display = sdk_path.display().to_string();

        let fail = |reason: String| {
            ServiceInitializationFailed {
                sdk_path: &display,
                reason: &reason,
            }
            .log();
            ServiceError::InitializationError(reason)
        };

        if !sdk_path.is_dir() {
            return Err(fail(format!("'{}' is not a directory", display)));
        }
        let models = sdk_path.join(MODELS_DIR);
        if !models.is_dir() {
            return Err(fail(format!(
                "asset directory '{}' is missing",
                models.display()
            )));
        }

        ServiceCreated {
            sdk_path: &display,
            unit_types: BlockFactory::list_available_unit_types().len(),
        }
        .log();

        Ok(Self {
            sdk_path: sdk_path.to_path_buf(),
        })
    }

    pub fn sdk_path(&self) -> &Path {
        &self.sdk_path
    }

    /// A fresh, empty (`None`) context.
    pub fn create_context(&self) -> Context {
        Context::new()
    }

    /// A context built from JSON text; empty text yields an empty context.
    pub fn create_context_from_json(&self, json: &str) -> Result<Context, ContextError> {
        Context::from_json_str(json)
    }

    /// Copy of `config` with the service's reserved keys filled in.
    ///
    /// `@sdk_path` is always overwritten; `model_path` is only filled when the
    /// caller did not supply one and the unit type has a model asset.
    pub fn resolve_config(&self, config: &Context) -> Result<Context, ServiceError> {
        let unit_type = BlockFactory::read_unit_type(config)?;

        let mut resolved = config.clone();
        let sdk_path = self.sdk_path.display().to_string();
        resolved.get_or_insert_by_key(SDK_PATH_KEY)?.set_string(sdk_path)?;

        if let Some(asset) = unit_type.model_asset() {
            let model_path = resolved.get_or_insert_by_key(MODEL_PATH_KEY)?;
            if model_path.is_none() {
                model_path.set_string(self.sdk_path.join(asset).display().to_string())?;
            }
        }
        Ok(resolved)
    }

    /// Materializes the block selected by `config["unit_type"]`.
    ///
    /// The caller's `config` is never modified.
    pub fn create_processing_block(
        &self,
        config: &Context,
    ) -> Result<Box<dyn ProcessingBlock>, ServiceError> {
        let resolved = match self.resolve_config(config) {
            Ok(resolved) => resolved,
            Err(error) => {
                let requested = config
                    .get_by_key(UNIT_TYPE_KEY)
                    .and_then(Context::get_string)
                    .ok();
                UnitTypeRejected {
                    requested,
                    reason: &error.to_string(),
                }
                .log();
                return Err(error);
            }
        };

        let block = BlockFactory::create_block(&resolved)?;
        let model_path = resolved
            .get_by_key(MODEL_PATH_KEY)
            .and_then(Context::get_string)
            .ok();
        BlockCreated {
            unit_type: block.unit_type().as_str(),
            model_path,
        }
        .log();
        Ok(block)
    }

    /// Runs one `config` block per input on tokio's blocking pool.
    ///
    /// Each input gets its own block instance, so no block is ever shared between
    /// threads. Every worker is awaited before returning, even after a failure, so
    /// no block is still running once this resolves. Outputs come back in input
    /// order; on failure the lowest failing input index is reported and the other
    /// outputs are discarded.
    pub async fn process_batch(
        &self,
        config: &Context,
        inputs: Vec<Context>,
    ) -> Result<Vec<Context>, BatchError> {
        let mut handles = Vec::with_capacity(inputs.len());
        for mut input in inputs {
            let mut block = self.create_processing_block(config)?;
            handles.push(tokio::task::spawn_blocking(move || {
                block.process(&mut input).map(|()| input)
            }));
        }

        let mut outputs = Vec::with_capacity(handles.len());
        let mut first_failure: Option<BatchError> = None;
        for (index, handle) in handles.into_iter().enumerate() {
            let failure = match handle.await {
                Ok(Ok(output)) => {
                    outputs.push(output);
                    continue;
                }
                Ok(Err(source)) => BatchError::Process { index, source },
                Err(join_error) => BatchError::Join(join_error),
            };
            if first_failure.is_some() {
                tracing::warn!(index, error = %failure, "Additional batch input failed");
            } else {
                first_failure = Some(failure);
            }
        }

        match first_failure {
            Some(failure) => Err(failure),
            None => Ok(outputs),
        }
    }
}
