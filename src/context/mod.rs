// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The universal exchange structure passed to and from processing blocks.
//!
//! A [`Context`] is a recursive, dynamically-typed node: a typed [`Value`] leaf
//! (including the default `None`), an ordered array of children, or an object
//! mapping string keys to children. Objects keep insertion order, so iteration
//! and serialisation are deterministic.
//!
//! # Ownership
//!
//! A `Context` value owns its whole subtree. Navigation (`get_by_key`,
//! `get_by_index`, `get_or_insert_by_key`) hands out borrows of the children:
//! these are the non-owning views of the tree. The borrow checker guarantees a
//! view never outlives its owner and that no view is alive while the owner is
//! structurally mutated. Dropping the root releases everything deterministically.
//!
//! # Promotion rules
//!
//! * A `None` node becomes an object on `get_or_insert_by_key` and an array on
//!   `push_back`.
//! * Key operations on an array (and index operations on an object) fail with
//!   [`ContextError::TypeMismatch`].
//! * Scalar setters overwrite `None`/value nodes and empty containers, but never
//!   silently demote a container that still has children.
//!
//! # Example
//!
//! ```
//! use face_sdk::context::Context;
//!
//! let mut ctx = Context::new();
//! ctx.get_or_insert_by_key("unit_type")?.set_string("FACE_DETECTOR")?;
//!
//! let shape = ctx.get_or_insert_by_key("image")?.get_or_insert_by_key("shape")?;
//! for dim in [480i64, 640, 3] {
//!     shape.push_back(dim)?;
//! }
//!
//! assert_eq!(ctx.get_by_key("image")?.get_by_key("shape")?.size(), 3);
//! assert_eq!(ctx.get_by_key("unit_type")?.get_string()?, "FACE_DETECTOR");
//! # Ok::<(), face_sdk::errors::ContextError>(())
//! ```

mod json;
mod value;

pub use value::Value;

use crate::errors::ContextError;
use indexmap::IndexMap;
use std::fmt;

/// Tag of a [`Context`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    None,
    Object,
    Array,
    Value,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextKind::None => "none",
            ContextKind::Object => "object",
            ContextKind::Array => "array",
            ContextKind::Value => "value",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Value(Value),
    Array(Vec<Context>),
    Object(IndexMap<String, Context>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Value(Value::None)
    }
}

/// Recursive node of the exchange tree. See the [module docs](self).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Context {
    node: Node,
}

impl Context {
    /// A fresh `None` node.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty array node.
    pub fn new_array() -> Self {
        Self {
            node: Node::Array(Vec::new()),
        }
    }

    /// An empty object node.
    pub fn new_object() -> Self {
        Self {
            node: Node::Object(IndexMap::new()),
        }
    }

    pub fn kind(&self) -> ContextKind {
        match &self.node {
            Node::Value(Value::None) => ContextKind::None,
            Node::Value(_) => ContextKind::Value,
            Node::Array(_) => ContextKind::Array,
            Node::Object(_) => ContextKind::Object,
        }
    }

    /// Precise tag name: `object`, `array`, or the leaf's value type.
    pub(crate) fn tag_name(&self) -> &'static str {
        match &self.node {
            Node::Value(v) => v.type_name(),
            Node::Array(_) => "array",
            Node::Object(_) => "object",
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind() == ContextKind::None
    }

    pub fn is_array(&self) -> bool {
        matches!(self.node, Node::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.node, Node::Object(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(&self.node, Node::Value(v) if v.is_bool())
    }

    pub fn is_int64(&self) -> bool {
        matches!(&self.node, Node::Value(v) if v.is_int64())
    }

    pub fn is_double(&self) -> bool {
        matches!(&self.node, Node::Value(v) if v.is_double())
    }

    pub fn is_string(&self) -> bool {
        matches!(&self.node, Node::Value(v) if v.is_string())
    }

    pub fn is_blob(&self) -> bool {
        matches!(&self.node, Node::Value(v) if v.is_blob())
    }

    /// Element count for arrays, key count for objects, `0` for `None` and value leaves.
    pub fn size(&self) -> usize {
        match &self.node {
            Node::Array(items) => items.len(),
            Node::Object(map) => map.len(),
            Node::Value(_) => 0,
        }
    }

    /// Strict lookup of an existing child.
    ///
    /// Fails with `KeyNotFound` on an object (or `None` node) lacking `key`, and with
    /// `TypeMismatch` on arrays and value leaves.
    pub fn get_by_key(&self, key: &str) -> Result<&Context, ContextError> {
        match &self.node {
            Node::Object(map) => map
                .get(key)
                .ok_or_else(|| ContextError::KeyNotFound(key.to_string())),
            Node::Value(Value::None) => Err(ContextError::KeyNotFound(key.to_string())),
            _ => Err(ContextError::mismatch("object", self.tag_name())),
        }
    }

    /// Mutable variant of [`get_by_key`](Self::get_by_key).
    pub fn get_by_key_mut(&mut self, key: &str) -> Result<&mut Context, ContextError> {
        let found = self.tag_name();
        match &mut self.node {
            Node::Object(map) => map
                .get_mut(key)
                .ok_or_else(|| ContextError::KeyNotFound(key.to_string())),
            Node::Value(Value::None) => Err(ContextError::KeyNotFound(key.to_string())),
            _ => Err(ContextError::mismatch("object", found)),
        }
    }

    /// Returns the child under `key`, inserting a `None` child if absent.
    ///
    /// A `None` node is promoted to an empty object first. Calling this twice
    /// with the same key yields the same child; existing children are never
    /// overwritten.
    pub fn get_or_insert_by_key(&mut self, key: &str) -> Result<&mut Context, ContextError> {
        if self.is_none() {
            self.node = Node::Object(IndexMap::new());
        }
        let found = self.tag_name();
        match &mut self.node {
            Node::Object(map) => Ok(map.entry(key.to_string()).or_default()),
            _ => Err(ContextError::mismatch("object", found)),
        }
    }

    pub fn get_by_index(&self, index: usize) -> Result<&Context, ContextError> {
        match &self.node {
            Node::Array(items) => items.get(index).ok_or(ContextError::IndexOutOfRange {
                index,
                len: items.len(),
            }),
            _ => Err(ContextError::mismatch("array", self.tag_name())),
        }
    }

    pub fn get_by_index_mut(&mut self, index: usize) -> Result<&mut Context, ContextError> {
        let found = self.tag_name();
        match &mut self.node {
            Node::Array(items) => {
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or(ContextError::IndexOutOfRange { index, len })
            }
            _ => Err(ContextError::mismatch("array", found)),
        }
    }

    /// Appends `child` to the end of this array and returns the new element.
    ///
    /// The child is moved in; pass `other.clone()` to append a copy and keep the
    /// original. A `None` node is promoted to an empty array first.
    pub fn push_back(&mut self, child: impl Into<Context>) -> Result<&mut Context, ContextError> {
        if self.is_none() {
            self.node = Node::Array(Vec::new());
        }
        let found = self.tag_name();
        match &mut self.node {
            Node::Array(items) => {
                items.push(child.into());
                let last = items.len() - 1;
                Ok(&mut items[last])
            }
            _ => Err(ContextError::mismatch("array", found)),
        }
    }

    /// True when this node is an object holding `key`. Never fails.
    pub fn contains(&self, key: &str) -> bool {
        matches!(&self.node, Node::Object(map) if map.contains_key(key))
    }

    /// Removes and returns the child under `key`, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Result<Option<Context>, ContextError> {
        let found = self.tag_name();
        match &mut self.node {
            Node::Object(map) => Ok(map.shift_remove(key)),
            Node::Value(Value::None) => Ok(None),
            _ => Err(ContextError::mismatch("object", found)),
        }
    }

    /// Object keys in insertion order; empty for anything but an object.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|(key, _)| key)
    }

    /// Object entries in insertion order; empty for anything but an object.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Context)> {
        let map = match &self.node {
            Node::Object(map) => Some(map),
            _ => None,
        };
        map.into_iter()
            .flat_map(|map| map.iter().map(|(key, child)| (key.as_str(), child)))
    }

    /// Array children in order; empty for anything but an array.
    pub fn iter(&self) -> std::slice::Iter<'_, Context> {
        match &self.node {
            Node::Array(items) => items.iter(),
            _ => Default::default(),
        }
    }

    /// Resets the node to `None`, dropping every child it owned.
    pub fn clear(&mut self) {
        self.node = Node::default();
    }

    /// Deep-copies this subtree into `dst`, replacing whatever `dst` held.
    pub fn copy_into(&self, dst: &mut Context) {
        dst.clone_from(self);
    }

    /// Overwrites this node with a leaf value.
    ///
    /// Legal on `None`, value leaves and empty containers. A container that still
    /// has children fails with `TypeMismatch`. Writing `Value::None` resets the node.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<(), ContextError> {
        let value = value.into();
        match &self.node {
            Node::Array(items) if !items.is_empty() => {
                return Err(ContextError::mismatch(value.type_name(), "array"));
            }
            Node::Object(map) if !map.is_empty() => {
                return Err(ContextError::mismatch(value.type_name(), "object"));
            }
            _ => {}
        }
        self.node = Node::Value(value);
        Ok(())
    }

    pub fn set_bool(&mut self, v: bool) -> Result<(), ContextError> {
        self.set_value(Value::Bool(v))
    }

    pub fn set_int64(&mut self, v: i64) -> Result<(), ContextError> {
        self.set_value(Value::Int64(v))
    }

    pub fn set_double(&mut self, v: f64) -> Result<(), ContextError> {
        self.set_value(Value::Float64(v))
    }

    pub fn set_string(&mut self, v: impl Into<String>) -> Result<(), ContextError> {
        self.set_value(Value::String(v.into()))
    }

    /// Replaces the node with a blob. There is no partial overwrite.
    pub fn set_blob(&mut self, bytes: impl Into<Vec<u8>>) -> Result<(), ContextError> {
        self.set_value(Value::Blob(bytes.into()))
    }

    /// The leaf value of this node (`Value::None` for an unpopulated node).
    pub fn value(&self) -> Result<&Value, ContextError> {
        match &self.node {
            Node::Value(v) => Ok(v),
            _ => Err(ContextError::mismatch("value", self.tag_name())),
        }
    }

    pub fn get_bool(&self) -> Result<bool, ContextError> {
        self.value()
            .map_err(|_| ContextError::mismatch("bool", self.tag_name()))?
            .as_bool()
    }

    pub fn get_int64(&self) -> Result<i64, ContextError> {
        self.value()
            .map_err(|_| ContextError::mismatch("int64", self.tag_name()))?
            .as_int64()
    }

    pub fn get_double(&self) -> Result<f64, ContextError> {
        self.value()
            .map_err(|_| ContextError::mismatch("double", self.tag_name()))?
            .as_double()
    }

    pub fn get_string(&self) -> Result<&str, ContextError> {
        self.value()
            .map_err(|_| ContextError::mismatch("string", self.tag_name()))?
            .as_str()
    }

    pub fn get_blob(&self) -> Result<&[u8], ContextError> {
        self.value()
            .map_err(|_| ContextError::mismatch("blob", self.tag_name()))?
            .as_blob()
    }
}

impl From<Value> for Context {
    fn from(value: Value) -> Self {
        Self {
            node: Node::Value(value),
        }
    }
}

impl From<bool> for Context {
    fn from(v: bool) -> Self {
        Value::Bool(v).into()
    }
}

impl From<i64> for Context {
    fn from(v: i64) -> Self {
        Value::Int64(v).into()
    }
}

impl From<f64> for Context {
    fn from(v: f64) -> Self {
        Value::Float64(v).into()
    }
}

impl From<&str> for Context {
    fn from(v: &str) -> Self {
        Value::from(v).into()
    }
}

impl From<String> for Context {
    fn from(v: String) -> Self {
        Value::String(v).into()
    }
}

impl From<Vec<Context>> for Context {
    fn from(items: Vec<Context>) -> Self {
        Self {
            node: Node::Array(items),
        }
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = &'a Context;
    type IntoIter = std::slice::Iter<'a, Context>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_with(keys: &[&str]) -> Context {
        let mut ctx = Context::new();
        for (i, key) in keys.iter().enumerate() {
            ctx.get_or_insert_by_key(key).unwrap().set_int64(i as i64).unwrap();
        }
        ctx
    }

    #[test]
    fn test_new_context_is_none() {
        let ctx = Context::new();
        assert!(ctx.is_none());
        assert_eq!(ctx.kind(), ContextKind::None);
        assert_eq!(ctx.size(), 0);
    }

    #[test]
    fn test_get_or_insert_is_idempotent() {
        let mut ctx = Context::new();
        ctx.get_or_insert_by_key("a").unwrap().set_int64(7).unwrap();

        // Second call hands back the existing child, not a fresh one.
        let again = ctx.get_or_insert_by_key("a").unwrap();
        assert_eq!(again.get_int64().unwrap(), 7);
        again.set_int64(8).unwrap();

        assert_eq!(ctx.get_by_key("a").unwrap().get_int64().unwrap(), 8);
        assert_eq!(ctx.size(), 1);
        assert!(ctx.is_object());
    }

    #[test]
    fn test_distinct_keys_are_distinct_children() {
        let mut ctx = Context::new();
        ctx.get_or_insert_by_key("k1").unwrap().set_string("one").unwrap();
        ctx.get_or_insert_by_key("k2").unwrap().set_string("two").unwrap();

        let k1 = ctx.get_by_key("k1").unwrap();
        let k2 = ctx.get_by_key("k2").unwrap();
        assert!(!std::ptr::eq(k1, k2));
        assert_eq!(k1.get_string().unwrap(), "one");
        assert_eq!(k2.get_string().unwrap(), "two");
    }

    #[test]
    fn test_fresh_key_is_none() {
        let mut ctx = Context::new();
        assert!(ctx.get_or_insert_by_key("fresh").unwrap().is_none());
    }

    #[test]
    fn test_missing_key_then_insert() {
        let mut ctx = object_with(&["present"]);

        match ctx.get_by_key("missing") {
            Err(ContextError::KeyNotFound(key)) => assert_eq!(key, "missing"),
            other => panic!("Expected KeyNotFound, got {:?}", other),
        }

        ctx.get_or_insert_by_key("missing").unwrap();
        assert!(ctx.contains("missing"));
        assert!(ctx.get_by_key("missing").is_ok());
    }

    #[test]
    fn test_key_on_array_is_type_mismatch() {
        let mut ctx = Context::new();
        ctx.push_back(1i64).unwrap();

        assert!(matches!(
            ctx.get_by_key("a"),
            Err(ContextError::TypeMismatch { expected: "object", found: "array" })
        ));
        assert!(matches!(
            ctx.get_or_insert_by_key("a"),
            Err(ContextError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_index_on_object_is_type_mismatch() {
        let mut ctx = object_with(&["a"]);
        assert!(matches!(
            ctx.get_by_index(0),
            Err(ContextError::TypeMismatch { expected: "array", found: "object" })
        ));
        assert!(matches!(ctx.push_back(1i64), Err(ContextError::TypeMismatch { .. })));
    }

    #[test]
    fn test_push_back_order_and_bounds() {
        let mut ctx = Context::new();
        for i in 0..5i64 {
            ctx.push_back(i * 10).unwrap();
        }

        assert!(ctx.is_array());
        assert_eq!(ctx.size(), 5);
        for i in 0..5usize {
            assert_eq!(ctx.get_by_index(i).unwrap().get_int64().unwrap(), i as i64 * 10);
        }

        match ctx.get_by_index(5) {
            Err(ContextError::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 5);
                assert_eq!(len, 5);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_push_back_copy_leaves_source_untouched() {
        let mut item = Context::new();
        item.get_or_insert_by_key("x").unwrap().set_double(0.5).unwrap();

        let mut list = Context::new();
        list.push_back(item.clone()).unwrap();
        list.get_by_index_mut(0)
            .unwrap()
            .get_by_key_mut("x")
            .unwrap()
            .set_double(0.9)
            .unwrap();

        assert_eq!(item.get_by_key("x").unwrap().get_double().unwrap(), 0.5);
    }

    #[test]
    fn test_int64_round_trip_and_mismatch() {
        let mut ctx = Context::new();
        ctx.set_int64(-12).unwrap();

        assert_eq!(ctx.get_int64().unwrap(), -12);
        assert!(ctx.is_int64());
        assert!(!ctx.is_double());
        assert!(!ctx.is_string());
        assert!(matches!(
            ctx.get_double(),
            Err(ContextError::TypeMismatch { expected: "double", found: "int64" })
        ));
    }

    #[test]
    fn test_setter_overwrites_previous_leaf() {
        let mut ctx = Context::new();
        ctx.set_string("before").unwrap();
        ctx.set_bool(true).unwrap();
        assert!(ctx.is_bool());
        assert!(ctx.get_bool().unwrap());
        assert!(ctx.get_string().is_err());
    }

    #[test]
    fn test_setter_refuses_to_demote_populated_container() {
        let mut ctx = object_with(&["a", "b"]);
        assert!(matches!(ctx.set_int64(1), Err(ContextError::TypeMismatch { .. })));
        assert_eq!(ctx.size(), 2);

        let mut empty = Context::new_array();
        empty.set_double(2.5).unwrap();
        assert!(empty.is_double());
    }

    #[test]
    fn test_setter_refuses_populated_array() {
        let mut arr = Context::new();
        arr.push_back(1i64).unwrap();
        arr.push_back(2i64).unwrap();

        assert!(matches!(
            arr.set_string("flat"),
            Err(ContextError::TypeMismatch { expected: "string", found: "array" })
        ));
        assert!(arr.is_array());
        assert_eq!(arr.size(), 2);
    }

    #[test]
    fn test_navigation_on_value_leaf_is_type_mismatch() {
        let mut leaf = Context::from(3i64);

        assert!(matches!(
            leaf.get_by_key("a"),
            Err(ContextError::TypeMismatch { expected: "object", found: "int64" })
        ));
        assert!(matches!(
            leaf.get_or_insert_by_key("a"),
            Err(ContextError::TypeMismatch { expected: "object", .. })
        ));
        assert!(matches!(
            leaf.push_back(1i64),
            Err(ContextError::TypeMismatch { expected: "array", .. })
        ));
        assert!(matches!(
            leaf.get_by_index(0),
            Err(ContextError::TypeMismatch { expected: "array", .. })
        ));
        // failed navigation leaves the leaf untouched
        assert_eq!(leaf.get_int64().unwrap(), 3);
    }

    #[test]
    fn test_set_none_resets_node() {
        let mut ctx = Context::new();
        ctx.set_string("filled").unwrap();
        ctx.set_value(Value::None).unwrap();
        assert!(ctx.is_none());
        assert_eq!(ctx.kind(), ContextKind::None);

        // a reset node can be promoted again
        ctx.get_or_insert_by_key("k").unwrap().set_bool(true).unwrap();
        assert!(ctx.is_object());
    }

    #[test]
    fn test_getter_on_container_is_type_mismatch() {
        let ctx = Context::new_object();
        assert!(matches!(
            ctx.get_string(),
            Err(ContextError::TypeMismatch { expected: "string", found: "object" })
        ));
    }

    #[test]
    fn test_blob_replacement_is_whole_value() {
        let mut ctx = Context::new();
        ctx.set_blob(vec![0u8; 12]).unwrap();
        assert_eq!(ctx.get_blob().unwrap().len(), 12);

        ctx.set_blob(vec![1u8, 2]).unwrap();
        assert_eq!(ctx.get_blob().unwrap(), &[1, 2]);
        assert_eq!(ctx.size(), 0);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = Context::new();
        original
            .get_or_insert_by_key("image")
            .unwrap()
            .get_or_insert_by_key("dtype")
            .unwrap()
            .set_string("uint8_t")
            .unwrap();

        let mut copy = original.clone();
        copy.get_by_key_mut("image")
            .unwrap()
            .get_by_key_mut("dtype")
            .unwrap()
            .set_string("float")
            .unwrap();

        let dtype = original.get_by_key("image").unwrap().get_by_key("dtype").unwrap();
        assert_eq!(dtype.get_string().unwrap(), "uint8_t");
    }

    #[test]
    fn test_copy_into_replaces_destination() {
        let src = object_with(&["a", "b"]);
        let mut dst = Context::new();
        dst.push_back(true).unwrap();

        src.copy_into(&mut dst);
        assert_eq!(dst, src);
        assert!(dst.is_object());
    }

    #[test]
    fn test_clear_resets_to_none() {
        let mut ctx = object_with(&["a", "b", "c"]);
        assert_eq!(ctx.size(), 3);

        ctx.clear();
        assert_eq!(ctx.size(), 0);
        assert!(ctx.is_none());
        assert!(!ctx.is_object());
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let ctx = object_with(&["zeta", "alpha", "mid"]);
        let keys: Vec<&str> = ctx.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let mut ctx = object_with(&["a", "b", "c"]);
        let removed = ctx.remove("b").unwrap();
        assert_eq!(removed.unwrap().get_int64().unwrap(), 1);
        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(ctx.remove("b").unwrap().is_none());
    }

    #[test]
    fn test_iteration_on_wrong_kind_is_empty() {
        let ctx = object_with(&["a"]);
        assert_eq!(ctx.iter().count(), 0);

        let mut arr = Context::new();
        arr.push_back("x").unwrap();
        assert_eq!(arr.keys().count(), 0);
        assert_eq!((&arr).into_iter().count(), 1);
    }
}
