//! # Encoder
//!
//! Binary extraction: turn a value tree into a binary-free skeleton plus an
//! ordered attachment list.
//!
//! The walk is depth-first pre-order. Each `Binary` leaf is appended to the
//! attachment list and replaced by a `Placeholder` carrying the index it was
//! appended at, so `num` values come out contiguous, zero-based, and in
//! visitation order. Encoding is a pure transform: the input is never
//! mutated, and any well-formed value encodes successfully.

use bytes::Bytes;

use crate::core::packet::Packet;
use crate::core::value::Value;

/// Extract every binary leaf from `value`.
///
/// Returns the skeleton (no `Binary` leaves remain) and the extracted
/// payloads, ordered by the placeholder numbers that now reference them.
///
/// A `Placeholder` already present in the input passes through untouched:
/// placeholders are first-class variants on the producing side, and a caller
/// that constructs one is trusted to know what it references.
pub fn encode(value: &Value) -> (Value, Vec<Bytes>) {
    let mut extractor = Extractor {
        attachments: Vec::new(),
    };
    let skeleton = extractor.strip(value);
    (skeleton, extractor.attachments)
}

/// Encode `value` into a [`Packet`] ready for frame sequencing.
///
/// This is the application-facing entry point for the send path.
pub fn encode_for_send(value: &Value) -> Packet {
    let (skeleton, attachments) = encode(value);
    Packet {
        skeleton,
        attachments,
    }
}

/// Single-owner traversal state. The next placeholder number is always the
/// current attachment count, so the counter and the output list cannot drift
/// apart, and concurrent encode calls share nothing.
struct Extractor {
    attachments: Vec<Bytes>,
}

impl Extractor {
    fn strip(&mut self, value: &Value) -> Value {
        match value {
            Value::Binary(payload) => {
                let num = self.attachments.len();
                self.attachments.push(payload.clone());
                Value::Placeholder(num)
            }
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.strip(item)).collect())
            }
            Value::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), self.strip(value)))
                    .collect(),
            ),
            scalar => scalar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn obj(entries: Vec<(&str, Value)>) -> Value {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<IndexMap<_, _>>(),
        )
    }

    #[test]
    fn nested_binaries_number_in_visitation_order() {
        let b1 = Bytes::from_static(b"first");
        let b2 = Bytes::from_static(b"second");
        let value = obj(vec![(
            "foo",
            Value::from(vec![
                Value::Binary(b1.clone()),
                obj(vec![("bar", Value::Binary(b2.clone()))]),
            ]),
        )]);

        let (skeleton, attachments) = encode(&value);

        let expected = obj(vec![(
            "foo",
            Value::from(vec![
                Value::Placeholder(0),
                obj(vec![("bar", Value::Placeholder(1))]),
            ]),
        )]);
        assert_eq!(skeleton, expected);
        assert_eq!(attachments, vec![b1, b2]);
    }

    #[test]
    fn skeleton_has_no_binary_leaves() {
        let value = Value::from(vec![
            Value::Binary(Bytes::from_static(b"a")),
            Value::from("text"),
            Value::Binary(Bytes::from_static(b"b")),
        ]);
        let (skeleton, _) = encode(&value);
        assert_eq!(skeleton.binary_count(), 0);
    }

    #[test]
    fn binary_free_value_is_unchanged() {
        let value = obj(vec![
            ("n", Value::from(42i64)),
            ("s", Value::from("hello")),
            ("l", Value::from(vec![Value::Bool(true), Value::Null])),
        ]);
        let (skeleton, attachments) = encode(&value);
        assert_eq!(skeleton, value);
        assert!(attachments.is_empty());
    }

    #[test]
    fn input_placeholder_passes_through() {
        let value = Value::from(vec![
            Value::Placeholder(7),
            Value::Binary(Bytes::from_static(b"x")),
        ]);
        let (skeleton, attachments) = encode(&value);
        assert_eq!(
            skeleton,
            Value::from(vec![Value::Placeholder(7), Value::Placeholder(0)])
        );
        assert_eq!(attachments.len(), 1);
    }

    #[test]
    fn input_is_not_mutated() {
        let value = Value::Binary(Bytes::from_static(b"payload"));
        let before = value.clone();
        let _ = encode(&value);
        assert_eq!(value, before);
    }
}
