//! # Value Model
//!
//! The recursive representation of encodable data.
//!
//! [`Value`] covers the JSON scalars and containers plus two variants JSON
//! has no spelling for: [`Value::Binary`], an opaque byte payload that the
//! encoder lifts out into the attachment list, and [`Value::Placeholder`],
//! the numbered reference left in its place.
//!
//! `Placeholder` is a first-class variant rather than a mapping that happens
//! to have the reserved shape: on the producing side a placeholder exists
//! only because the encoder (or a caller constructing a skeleton directly)
//! put one there. Shape-based detection is confined to [`Value::from_wire`],
//! the trust boundary where externally received JSON is parsed.

use bytes::Bytes;
use indexmap::IndexMap;
use serde_json::Number;

use crate::error::{CodecError, Result};

/// Reserved key marking the placeholder mapping shape on the wire.
pub const PLACEHOLDER_KEY: &str = "_placeholder";

/// Key carrying the attachment index in the placeholder mapping shape.
pub const PLACEHOLDER_NUM_KEY: &str = "num";

/// A JSON-like value that may carry raw binary leaves at any depth.
///
/// Object entries preserve insertion order; equality compares objects as
/// maps (same keys, same values, order ignored).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
    /// An opaque byte payload; the only variant the encoder extracts.
    Binary(Bytes),
    /// A zero-based reference into the owning packet's attachment list.
    /// Appears only in skeletons.
    Placeholder(usize),
}

impl Value {
    /// Depth-first pre-order traversal. Visits `self`, then array children in
    /// index order, then object children in insertion order.
    pub fn visit(&self, f: &mut impl FnMut(&Value)) {
        f(self);
        match self {
            Value::Array(items) => {
                for item in items {
                    item.visit(f);
                }
            }
            Value::Object(entries) => {
                for value in entries.values() {
                    value.visit(f);
                }
            }
            _ => {}
        }
    }

    /// Number of reachable `Binary` leaves.
    pub fn binary_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |v| {
            if matches!(v, Value::Binary(_)) {
                count += 1;
            }
        });
        count
    }

    /// Placeholder indices in visitation order.
    pub fn placeholder_nums(&self) -> Vec<usize> {
        let mut nums = Vec::new();
        self.visit(&mut |v| {
            if let Value::Placeholder(num) = v {
                nums.push(*num);
            }
        });
        nums
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Value::Binary(_))
    }

    /// Convert a skeleton to its wire JSON representation.
    ///
    /// `Placeholder(n)` becomes the reserved two-field mapping
    /// `{"_placeholder": true, "num": n}`. A reachable `Binary` leaf is an
    /// error: binary cannot ride a text frame, which is the reason this codec
    /// exists, so only encoder output (or otherwise binary-free values) may
    /// be serialized.
    pub fn to_wire(&self) -> Result<serde_json::Value> {
        match self {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Number(n) => Ok(serde_json::Value::Number(n.clone())),
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Array(items) => Ok(serde_json::Value::Array(
                items.iter().map(Value::to_wire).collect::<Result<_>>()?,
            )),
            Value::Object(entries) => {
                let mut map = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key.clone(), value.to_wire()?);
                }
                Ok(serde_json::Value::Object(map))
            }
            Value::Binary(_) => Err(CodecError::BinaryInSkeleton),
            Value::Placeholder(num) => {
                let mut map = serde_json::Map::with_capacity(2);
                map.insert(PLACEHOLDER_KEY.to_string(), serde_json::Value::Bool(true));
                map.insert(
                    PLACEHOLDER_NUM_KEY.to_string(),
                    serde_json::Value::Number(Number::from(*num as u64)),
                );
                Ok(serde_json::Value::Object(map))
            }
        }
    }

    /// Parse wire JSON into a value, recognizing the reserved placeholder
    /// shape.
    ///
    /// Exactly the two-field mapping `{"_placeholder": true, "num": <n>}`
    /// with a non-negative integer `n` becomes `Placeholder(n)`; no other
    /// shape is recognized. A two-field mapping with `_placeholder: true`
    /// whose `num` is negative, fractional, or not a number at all is a
    /// malformed reference and rejected outright rather than smuggled
    /// through as data.
    ///
    /// User data that happens to match the reserved shape is indistinguishable
    /// from a genuine placeholder here; that collision is an accepted
    /// protocol limitation.
    pub fn from_wire(wire: serde_json::Value) -> Result<Value> {
        match wire {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => Ok(Value::Number(n)),
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Array(items) => Ok(Value::Array(
                items.into_iter().map(Value::from_wire).collect::<Result<_>>()?,
            )),
            serde_json::Value::Object(map) => {
                if map.len() == 2
                    && map.get(PLACEHOLDER_KEY) == Some(&serde_json::Value::Bool(true))
                {
                    // Two fields, one of them `_placeholder: true`. With a
                    // "num" field this is the reserved shape; without one it
                    // is ordinary data.
                    if let Some(num) = map.get(PLACEHOLDER_NUM_KEY) {
                        return match num.as_u64() {
                            Some(n) => Ok(Value::Placeholder(n as usize)),
                            None => Err(CodecError::InvalidEnvelope(format!(
                                "placeholder 'num' is not a non-negative integer: {num}"
                            ))),
                        };
                    }
                }
                let mut entries = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    entries.insert(key, Value::from_wire(value)?);
                }
                Ok(Value::Object(entries))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Object(entries)
    }
}

impl From<Bytes> for Value {
    fn from(payload: Bytes) -> Self {
        Value::Binary(payload)
    }
}
