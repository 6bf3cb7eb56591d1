// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic the SDK emits is a small message struct with a `Display`
//! implementation, so log text lives in one place instead of being scattered
//! through the code as format strings.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::service` - service setup events
//! * `messages::block` - block creation and `process` lifecycle
//! * `messages::detection` - face detector internals
//! * `messages::recognition` - face recognizer internals
//!
//! # Usage
//!
//! ```rust
//! use face_sdk::observability::messages::block::BlockProcessFailed;
//! use face_sdk::observability::messages::StructuredLog;
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
//! BlockProcessFailed {
//!     unit_type: "FACE_DETECTOR",
//!     error: &error,
//! }
//! .log();
//! ```

pub mod messages;
