//! # Packet & Wire Envelope
//!
//! A packet pairs one skeleton with its ordered attachment list; frames are
//! the transport-shaped pieces it travels as.
//!
//! ## Wire Format
//! ```text
//! [count ASCII digits] [-] [skeleton JSON]
//! ```
//!
//! The attachment count rides as a decimal prefix on the text frame, so the
//! receiver learns how many binary frames to expect without walking the
//! skeleton for placeholders. The binary frames follow in `num` order,
//! `0..count`.
//!
//! ## Security
//! - The declared count is validated against the configured cap before any
//!   buffer is sized from it

use bytes::Bytes;

use crate::config::CodecConfig;
use crate::core::value::Value;
use crate::error::{constants, CodecError, Result};

/// One transport message: either a text frame or an opaque binary frame.
/// Mixed content in a single frame is exactly what this codec exists to
/// avoid.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Text(String),
    Binary(Bytes),
}

/// One skeleton plus its complete, ordered attachment list: the unit of
/// reconstruction. Attachment numbering is local to the packet; packets
/// never share attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    pub skeleton: Value,
    pub attachments: Vec<Bytes>,
}

impl Packet {
    /// Serialize the skeleton into its count-prefixed text frame.
    pub fn to_text_frame(&self) -> Result<String> {
        let wire = self.skeleton.to_wire()?;
        let body = serde_json::to_string(&wire)
            .map_err(|e| CodecError::SerializeError(e.to_string()))?;
        Ok(format!("{}-{}", self.attachments.len(), body))
    }

    /// Sequence the packet into its frame order: the text frame first, then
    /// one binary frame per attachment in `num` order.
    pub fn into_frames(self) -> Result<Vec<Frame>> {
        let mut frames = Vec::with_capacity(1 + self.attachments.len());
        frames.push(Frame::Text(self.to_text_frame()?));
        frames.extend(self.attachments.into_iter().map(Frame::Binary));
        Ok(frames)
    }
}

/// Parse a text frame into its skeleton and declared attachment count.
///
/// The count prefix must be one or more ASCII digits terminated by `-`, and
/// is checked against `config.max_attachments` before the JSON body is even
/// parsed, let alone before any attachment buffer is allocated from it.
pub fn parse_text_frame(frame: &str, config: &CodecConfig) -> Result<(Value, usize)> {
    if frame.is_empty() {
        return Err(CodecError::InvalidEnvelope(
            constants::ERR_EMPTY_FRAME.to_string(),
        ));
    }

    let digits_end = frame
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(frame.len());
    if digits_end == 0 || frame[digits_end..].as_bytes().first() != Some(&b'-') {
        return Err(CodecError::InvalidEnvelope(
            constants::ERR_MISSING_COUNT_SEPARATOR.to_string(),
        ));
    }

    let declared = frame[..digits_end]
        .parse::<usize>()
        .map_err(|e| CodecError::InvalidEnvelope(format!("bad attachment count: {e}")))?;
    if declared > config.max_attachments {
        return Err(CodecError::TooManyAttachments {
            declared,
            limit: config.max_attachments,
        });
    }

    let body = &frame[digits_end + 1..];
    let wire: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| CodecError::InvalidEnvelope(format!("invalid JSON body: {e}")))?;
    let skeleton = Value::from_wire(wire)?;

    Ok((skeleton, declared))
}
