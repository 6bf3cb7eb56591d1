// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processing block implementations.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process Rust blocks, selected by the configuration's `unit_type`:
//! - **FACE_DETECTOR**: face boxes from an `image` object, appended to `objects`
//! - **FACE_RECOGNIZER**: unit-length `template` per face object
//! - **MATCHER_MODULE**: squared L2 comparison of two face templates
//!
//! The face detector delegates the actual detection to a
//! [`FaceDetectionBackend`](local::FaceDetectionBackend); the built-in one is a
//! skin-region detector parameterized by a YAML model file. The recognizer does
//! the same with a [`FaceEmbeddingBackend`](local::FaceEmbeddingBackend).
//!
//! ## Stub Backend (Test-Only)
//! - **FixedCandidatesBackend**: detection backend with canned output, for
//!   exercising thresholding and output layout without real images
//! - **BboxTemplateBackend**: embedding backend that echoes the box as its template
//!
//! # Architecture
//!
//! ```text
//! Configuration → BlockFactory → ProcessingBlock → process(&mut Context)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use face_sdk::backends::local::BlockFactory;
//! use face_sdk::context::Context;
//! use face_sdk::traits::ProcessingBlock;
//! use serde_json::json;
//!
//! let config = Context::from_json(&json!({"unit_type": "MATCHER_MODULE"}));
//! let mut block = BlockFactory::create_block(&config)?;
//!
//! let mut io = Context::from_json(&json!({
//!     "verification": {"objects": [{"template": [0.5, 0.5]}, {"template": [0.5, 0.75]}]}
//! }));
//! block.process(&mut io)?;
//! assert!(io.get_by_key("verification")?.get_by_key("result")?.get_by_key("verdict")?.get_bool()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
