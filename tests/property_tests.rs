//! Property-based tests using proptest
//!
//! These tests validate codec invariants across a wide range of randomly
//! generated value trees, ensuring robust behavior under all conditions.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use attachment_codec::config::UnusedAttachmentsPolicy;
use attachment_codec::core::decode::decode;
use attachment_codec::core::encode::encode;
use attachment_codec::core::packet::parse_text_frame;
use attachment_codec::core::value::Value;
use attachment_codec::{encode_for_send, CodecError};
use bytes::Bytes;
use indexmap::IndexMap;
use proptest::prelude::*;

/// Recursive strategy over value trees, binary leaves included.
/// Placeholders are excluded: they only appear in encoder output.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
        prop::collection::vec(any::<u8>(), 0..64)
            .prop_map(|bytes| Value::Binary(Bytes::from(bytes))),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(|entries| {
                Value::Object(entries.into_iter().collect::<IndexMap<_, _>>())
            }),
        ]
    })
}

// Property: decoding an encoded value reproduces the original exactly
proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(value in arb_value()) {
        let (skeleton, attachments) = encode(&value);
        let restored = decode(&skeleton, &attachments, UnusedAttachmentsPolicy::Strict)
            .expect("own output must decode");
        prop_assert_eq!(restored, value);
    }
}

// Property: the skeleton never leaks a binary leaf
proptest! {
    #[test]
    fn prop_skeleton_has_no_binary_leaves(value in arb_value()) {
        let (skeleton, _) = encode(&value);
        prop_assert_eq!(skeleton.binary_count(), 0);
    }
}

// Property: placeholder numbers are exactly 0..k in visitation order
proptest! {
    #[test]
    fn prop_placeholder_numbering_is_contiguous(value in arb_value()) {
        let binary_leaves = value.binary_count();
        let (skeleton, _) = encode(&value);

        let nums = skeleton.placeholder_nums();
        let expected: Vec<usize> = (0..binary_leaves).collect();
        prop_assert_eq!(nums, expected);
    }
}

// Property: attachment count equals the number of binary leaves
proptest! {
    #[test]
    fn prop_attachment_count_matches_binary_leaves(value in arb_value()) {
        let binary_leaves = value.binary_count();
        let (_, attachments) = encode(&value);
        prop_assert_eq!(attachments.len(), binary_leaves);
    }
}

// Property: the text frame round-trips skeleton and declared count
proptest! {
    #[test]
    fn prop_text_frame_roundtrip(value in arb_value()) {
        let packet = encode_for_send(&value);
        let frame = packet.to_text_frame().expect("skeleton is binary-free");

        let (skeleton, declared) = parse_text_frame(&frame, &Default::default())
            .expect("own frames must parse");
        prop_assert_eq!(declared, packet.attachments.len());
        prop_assert_eq!(skeleton, packet.skeleton);
    }
}

// Property: truncating the attachment list always fails strict decoding
proptest! {
    #[test]
    fn prop_missing_attachment_fails_decode(value in arb_value()) {
        let (skeleton, mut attachments) = encode(&value);
        prop_assume!(!attachments.is_empty());
        attachments.pop();

        let result = decode(&skeleton, &attachments, UnusedAttachmentsPolicy::Strict);
        let is_invalid_reference = matches!(result, Err(CodecError::InvalidReference { .. }));
        prop_assert!(is_invalid_reference);
    }
}
