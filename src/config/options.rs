// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed reads of optional keys in a block configuration context.

use crate::context::Context;
use crate::errors::ServiceError;

/// Reads an optional `Float64` option, falling back to `default` when absent or `None`.
///
/// A present value of any other type is a configuration error: numeric options are
/// never coerced from `Int64`.
pub fn f64_option(config: &Context, key: &str, default: f64) -> Result<f64, ServiceError> {
    match config.get_by_key(key) {
        Ok(node) if node.is_none() => Ok(default),
        Ok(node) => node.get_double().map_err(|e| {
            ServiceError::InitializationError(format!("option '{}' must be a double: {}", key, e))
        }),
        Err(_) => Ok(default),
    }
}

/// Reads an optional `String` option.
pub fn string_option(config: &Context, key: &str) -> Result<Option<String>, ServiceError> {
    match config.get_by_key(key) {
        Ok(node) if node.is_none() => Ok(None),
        Ok(node) => node.get_string().map(|s| Some(s.to_string())).map_err(|e| {
            ServiceError::InitializationError(format!("option '{}' must be a string: {}", key, e))
        }),
        Err(_) => Ok(None),
    }
}
