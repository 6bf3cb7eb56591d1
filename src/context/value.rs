// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed leaf values carried by a [`Context`](super::Context).

use crate::errors::ContextError;

/// A single typed leaf.
///
/// Exactly one variant is active. Reads through the wrong accessor fail with
/// [`ContextError::TypeMismatch`]; there is no numeric coercion between
/// `Int64` and `Float64`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(String),
    /// Owned byte sequence. Its length is fixed once assigned.
    Blob(Vec<u8>),
}

impl Value {
    /// Name of the active variant, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "double",
            Value::String(_) => "string",
            Value::Blob(_) => "blob",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int64(&self) -> bool {
        matches!(self, Value::Int64(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Value::Float64(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, Value::Blob(_))
    }

    pub fn as_bool(&self) -> Result<bool, ContextError> {
        match self {
            Value::Bool(v) => Ok(*v),
            other => Err(ContextError::mismatch("bool", other.type_name())),
        }
    }

    pub fn as_int64(&self) -> Result<i64, ContextError> {
        match self {
            Value::Int64(v) => Ok(*v),
            other => Err(ContextError::mismatch("int64", other.type_name())),
        }
    }

    pub fn as_double(&self) -> Result<f64, ContextError> {
        match self {
            Value::Float64(v) => Ok(*v),
            other => Err(ContextError::mismatch("double", other.type_name())),
        }
    }

    pub fn as_str(&self) -> Result<&str, ContextError> {
        match self {
            Value::String(v) => Ok(v),
            other => Err(ContextError::mismatch("string", other.type_name())),
        }
    }

    pub fn as_blob(&self) -> Result<&[u8], ContextError> {
        match self {
            Value::Blob(v) => Ok(v),
            other => Err(ContextError::mismatch("blob", other.type_name())),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        let value = Value::default();
        assert!(value.is_none());
        assert_eq!(value.type_name(), "none");
    }

    #[test]
    fn test_int64_does_not_coerce_to_double() {
        let value = Value::from(42i64);
        assert!(value.is_int64());
        assert!(!value.is_double());
        assert_eq!(value.as_int64().unwrap(), 42);

        match value.as_double() {
            Err(ContextError::TypeMismatch { expected, found }) => {
                assert_eq!(expected, "double");
                assert_eq!(found, "int64");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_double_does_not_coerce_to_int64() {
        let value = Value::from(1.0f64);
        assert!(value.as_int64().is_err());
        assert_eq!(value.as_double().unwrap(), 1.0);
    }

    #[test]
    fn test_blob_and_string_accessors() {
        let blob = Value::Blob(vec![1, 2, 3]);
        assert_eq!(blob.as_blob().unwrap(), &[1, 2, 3]);
        assert!(blob.as_str().is_err());

        let text = Value::from("face");
        assert_eq!(text.as_str().unwrap(), "face");
        assert!(text.as_blob().is_err());
        assert!(text.as_bool().is_err());
    }
}
