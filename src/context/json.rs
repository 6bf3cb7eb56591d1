// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON bridge for [`Context`].
//!
//! Mapping:
//! * `null` <-> `None`
//! * booleans, strings, objects and arrays map one to one (object key order is kept)
//! * integers that fit `i64` become `Int64`; every other number becomes `Float64`
//! * a `Blob` is written as a standard base64 string and reads back as a `String`
//!
//! The blob mapping is lossy on purpose: JSON has no byte type, and guessing
//! which strings were blobs would break plain string round trips.

use super::{Context, Node, Value};
use crate::errors::ContextError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

impl Context {
    /// Builds a context tree from a parsed JSON document.
    pub fn from_json(json: &serde_json::Value) -> Context {
        let node = match json {
            serde_json::Value::Null => Node::Value(Value::None),
            serde_json::Value::Bool(b) => Node::Value(Value::Bool(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Node::Value(Value::Int64(i)),
                None => Node::Value(Value::Float64(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => Node::Value(Value::String(s.clone())),
            serde_json::Value::Array(items) => {
                Node::Array(items.iter().map(Context::from_json).collect())
            }
            serde_json::Value::Object(map) => Node::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), Context::from_json(child)))
                    .collect::<IndexMap<_, _>>(),
            ),
        };
        Context { node }
    }

    /// Parses JSON text into a context tree. An empty string yields a `None` context.
    pub fn from_json_str(text: &str) -> Result<Context, ContextError> {
        if text.trim().is_empty() {
            return Ok(Context::new());
        }
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Context::from_json(&json))
    }

    /// Converts the tree into a JSON document. Non-finite doubles become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match &self.node {
            Node::Value(value) => match value {
                Value::None => serde_json::Value::Null,
                Value::Bool(b) => serde_json::Value::Bool(*b),
                Value::Int64(i) => serde_json::Value::from(*i),
                Value::Float64(f) => serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
                Value::String(s) => serde_json::Value::String(s.clone()),
                Value::Blob(bytes) => serde_json::Value::String(STANDARD.encode(bytes)),
            },
            Node::Array(items) => {
                serde_json::Value::Array(items.iter().map(Context::to_json).collect())
            }
            Node::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), child.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String, ContextError> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.node {
            Node::Value(value) => match value {
                Value::None => serializer.serialize_none(),
                Value::Bool(b) => serializer.serialize_bool(*b),
                Value::Int64(i) => serializer.serialize_i64(*i),
                Value::Float64(f) => serializer.serialize_f64(*f),
                Value::String(s) => serializer.serialize_str(s),
                Value::Blob(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            },
            Node::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, child) in map {
                    out.serialize_entry(key, child)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Context {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(Context::from_json(&json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_builds_expected_tags() {
        let ctx = Context::from_json(&json!({
            "unit_type": "FACE_DETECTOR",
            "confidence_threshold": 0.7,
            "shape": [2, 2, 3],
            "raw_output": false,
            "missing": null
        }));

        assert!(ctx.is_object());
        assert_eq!(ctx.get_by_key("unit_type").unwrap().get_string().unwrap(), "FACE_DETECTOR");
        assert_eq!(ctx.get_by_key("confidence_threshold").unwrap().get_double().unwrap(), 0.7);
        assert!(!ctx.get_by_key("raw_output").unwrap().get_bool().unwrap());
        assert!(ctx.get_by_key("missing").unwrap().is_none());

        let shape = ctx.get_by_key("shape").unwrap();
        assert_eq!(shape.size(), 3);
        assert!(shape.get_by_index(0).unwrap().is_int64());
    }

    #[test]
    fn test_key_order_survives_round_trip() {
        let ctx = Context::from_json_str(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(ctx.to_json_string(false).unwrap(), r#"{"b":1,"a":2,"c":3}"#);
    }

    #[test]
    fn test_blob_serialises_as_base64() {
        let mut ctx = Context::new();
        ctx.get_or_insert_by_key("blob").unwrap().set_blob(vec![0u8, 1, 2]).unwrap();

        assert_eq!(ctx.to_json(), json!({"blob": "AAEC"}));
        assert_eq!(ctx.to_json_string(false).unwrap(), r#"{"blob":"AAEC"}"#);

        let back = Context::from_json(&ctx.to_json());
        assert!(back.get_by_key("blob").unwrap().is_string());
    }

    #[test]
    fn test_empty_text_is_none_and_garbage_is_error() {
        assert!(Context::from_json_str("").unwrap().is_none());
        assert!(matches!(
            Context::from_json_str("{not json"),
            Err(ContextError::Json(_))
        ));
    }

    #[test]
    fn test_deserialize_through_serde() {
        let ctx: Context = serde_json::from_str(r#"[1, 2.5, "x"]"#).unwrap();
        assert!(ctx.get_by_index(0).unwrap().is_int64());
        assert!(ctx.get_by_index(1).unwrap().is_double());
        assert!(ctx.get_by_index(2).unwrap().is_string());
    }
}
