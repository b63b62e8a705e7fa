//! # Decoder
//!
//! Placeholder resolution: splice a packet's attachments back into its
//! skeleton, reproducing the original value tree.
//!
//! The walk mirrors the encoder's. Decoding either returns the fully
//! reconstructed value or a typed error; it never exposes a partially
//! rebuilt tree and never mutates caller-visible state.

use bytes::Bytes;
use tracing::warn;

use crate::config::UnusedAttachmentsPolicy;
use crate::core::value::Value;
use crate::error::{CodecError, Result};

/// Reconstruct the original value from a skeleton and its complete,
/// ordered attachment list.
///
/// Fails with [`CodecError::InvalidReference`] if any placeholder's `num`
/// is not an index into `attachments`. After the walk, attachments no
/// placeholder referenced are handled per `policy`: [`Strict`] fails with
/// [`CodecError::UnusedAttachments`] since stray attachments indicate a
/// framing desynchronization; [`Lenient`] logs a warning and returns the
/// value anyway.
///
/// [`Strict`]: UnusedAttachmentsPolicy::Strict
/// [`Lenient`]: UnusedAttachmentsPolicy::Lenient
pub fn decode(
    skeleton: &Value,
    attachments: &[Bytes],
    policy: UnusedAttachmentsPolicy,
) -> Result<Value> {
    let mut used = vec![false; attachments.len()];
    let value = resolve(skeleton, attachments, &mut used)?;

    let unused = used.iter().filter(|referenced| !**referenced).count();
    if unused > 0 {
        match policy {
            UnusedAttachmentsPolicy::Strict => {
                return Err(CodecError::UnusedAttachments {
                    unused,
                    total: attachments.len(),
                });
            }
            UnusedAttachmentsPolicy::Lenient => {
                warn!(
                    unused,
                    total = attachments.len(),
                    "tolerating attachments never referenced by a placeholder"
                );
            }
        }
    }

    Ok(value)
}

/// Application-facing entry point for the receive path: hand over a complete
/// packet's skeleton and attachments, get the original value back.
pub fn on_packet_complete(
    skeleton: &Value,
    attachments: &[Bytes],
    policy: UnusedAttachmentsPolicy,
) -> Result<Value> {
    decode(skeleton, attachments, policy)
}

fn resolve(skeleton: &Value, attachments: &[Bytes], used: &mut [bool]) -> Result<Value> {
    match skeleton {
        Value::Placeholder(num) => {
            let payload = attachments
                .get(*num)
                .ok_or(CodecError::InvalidReference {
                    num: *num,
                    available: attachments.len(),
                })?;
            used[*num] = true;
            Ok(Value::Binary(payload.clone()))
        }
        Value::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(|item| resolve(item, attachments, used))
                .collect::<Result<_>>()?,
        )),
        Value::Object(entries) => {
            let mut resolved = indexmap::IndexMap::with_capacity(entries.len());
            for (key, value) in entries {
                resolved.insert(key.clone(), resolve(value, attachments, used)?);
            }
            Ok(Value::Object(resolved))
        }
        scalar => Ok(scalar.clone()),
    }
}
