//! # Packet Assembler
//!
//! Receive-side state machine: collect one skeleton frame and its declared
//! number of binary frames into a complete [`Packet`].
//!
//! The assembler holds the only mutable state in the codec core — the single
//! in-flight packet slot. It expects exactly the send-side frame order (one
//! text frame, then the declared binary frames) and assumes in-order
//! delivery; transports that can reorder frames are out of scope. One packet
//! is in flight at a time per logical stream: attachments never interleave
//! across packets in this model. Multiplexing would need a packet identifier
//! in the envelope, which is deliberately not part of this protocol.
//!
//! Every error is scoped to the packet it occurred in. The assembler itself
//! survives all of them and processes the next frame normally; timeouts for
//! attachments that never arrive belong to the session layer above, which
//! should call [`Assembler::reset`] to discard a stalled packet.

use bytes::Bytes;
use std::mem;
use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::core::packet::{parse_text_frame, Frame, Packet};
use crate::core::value::Value;
use crate::error::{constants, CodecError, Result};

/// Receive-side frame collector for one ordered frame stream.
#[derive(Debug, Default)]
pub struct Assembler {
    config: CodecConfig,
    state: State,
}

#[derive(Debug, Default)]
enum State {
    /// No skeleton parsed yet.
    #[default]
    AwaitingSkeleton,
    /// Skeleton parsed; binary frames outstanding.
    Collecting {
        skeleton: Value,
        expected: usize,
        collected: Vec<Bytes>,
    },
}

impl Assembler {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            state: State::AwaitingSkeleton,
        }
    }

    /// Deliver the next inbound frame.
    ///
    /// Returns `Ok(Some(packet))` when the frame completes a packet,
    /// `Ok(None)` when more frames are outstanding, and `Err` when the frame
    /// violates the per-packet protocol. An error discards at most the
    /// in-flight packet; the assembler remains usable.
    pub fn push_frame(&mut self, frame: Frame) -> Result<Option<Packet>> {
        match frame {
            Frame::Text(text) => self.push_text(&text),
            Frame::Binary(payload) => self.push_binary(payload),
        }
    }

    /// Deliver an inbound skeleton (text) frame.
    ///
    /// A skeleton declaring zero attachments completes immediately. A
    /// skeleton arriving while another packet is still collecting is a
    /// frame-order violation: the in-flight packet is discarded and the
    /// interrupting frame is dropped with it, since the stream is
    /// desynchronized either way.
    pub fn push_text(&mut self, frame: &str) -> Result<Option<Packet>> {
        if let State::Collecting {
            expected,
            collected,
            ..
        } = &self.state
        {
            warn!(
                expected,
                collected = collected.len(),
                "skeleton frame interrupted an in-flight packet; discarding both"
            );
            self.state = State::AwaitingSkeleton;
            return Err(CodecError::FrameOrderViolation(
                constants::ERR_SKELETON_INTERRUPTED.to_string(),
            ));
        }

        let (skeleton, expected) = parse_text_frame(frame, &self.config)?;
        if expected == 0 {
            return Ok(Some(Packet {
                skeleton,
                attachments: Vec::new(),
            }));
        }

        debug!(expected, "skeleton received, collecting attachments");
        self.state = State::Collecting {
            skeleton,
            expected,
            collected: Vec::with_capacity(expected),
        };
        Ok(None)
    }

    /// Deliver an inbound binary frame.
    ///
    /// With no packet in flight there is nothing to own the payload — this
    /// is also the path an excess frame takes after its packet already
    /// completed, so surplus frames error instead of vanishing.
    pub fn push_binary(&mut self, payload: Bytes) -> Result<Option<Packet>> {
        if payload.len() > self.config.max_attachment_size {
            let size = payload.len();
            if !matches!(self.state, State::AwaitingSkeleton) {
                warn!(size, "oversized binary frame; discarding in-flight packet");
                self.state = State::AwaitingSkeleton;
            }
            return Err(CodecError::OversizedFrame {
                size,
                limit: self.config.max_attachment_size,
            });
        }

        match mem::take(&mut self.state) {
            State::AwaitingSkeleton => Err(CodecError::FrameOrderViolation(
                constants::ERR_BINARY_WITHOUT_PACKET.to_string(),
            )),
            State::Collecting {
                skeleton,
                expected,
                mut collected,
            } => {
                collected.push(payload);
                if collected.len() == expected {
                    debug!(expected, "all attachments collected, packet complete");
                    return Ok(Some(Packet {
                        skeleton,
                        attachments: collected,
                    }));
                }
                self.state = State::Collecting {
                    skeleton,
                    expected,
                    collected,
                };
                Ok(None)
            }
        }
    }

    /// `(collected, expected)` for the in-flight packet, if any. Intended
    /// for the session layer's liveness checks.
    pub fn expecting(&self) -> Option<(usize, usize)> {
        match &self.state {
            State::AwaitingSkeleton => None,
            State::Collecting {
                expected,
                collected,
                ..
            } => Some((collected.len(), *expected)),
        }
    }

    /// Discard the in-flight packet, if any, without decoding anything.
    ///
    /// This is the cancellation/timeout hook: no partial value is ever
    /// exposed, the buffer entry is simply released.
    pub fn reset(&mut self) {
        if let State::Collecting {
            expected,
            collected,
            ..
        } = &self.state
        {
            debug!(
                expected,
                collected = collected.len(),
                "discarding in-flight packet"
            );
        }
        self.state = State::AwaitingSkeleton;
    }
}
