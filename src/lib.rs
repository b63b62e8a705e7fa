//! # Attachment Codec
//!
//! Codec core for transmitting JSON-like value trees that carry raw binary
//! payloads over transports that can only move one text frame or one opaque
//! binary frame per message.
//!
//! The encoder walks a [`Value`] tree, lifts every binary leaf out into an
//! ordered attachment list, and leaves a numbered placeholder behind. The
//! resulting binary-free *skeleton* travels as a single text frame, followed
//! by one binary frame per attachment. On the receive side an [`Assembler`]
//! buffers frames until a packet is whole, and the decoder splices the
//! attachments back into place.
//!
//! ## Components
//! - **Value model**: tagged union over JSON scalars, containers, binary
//!   leaves, and placeholder references ([`core::value`])
//! - **Encoder/Decoder**: pure tree transforms ([`core::encode`],
//!   [`core::decode`])
//! - **Packet & frames**: wire envelope and send-side sequencing
//!   ([`core::packet`])
//! - **Assembler**: receive-side state machine ([`protocol::assembler`])
//!
//! ## Example
//! ```
//! use attachment_codec::{encode_for_send, on_packet_complete};
//! use attachment_codec::config::UnusedAttachmentsPolicy;
//! use attachment_codec::core::value::Value;
//! use bytes::Bytes;
//!
//! let value = Value::from(vec![
//!     Value::from("thumbnail"),
//!     Value::Binary(Bytes::from_static(b"\x89PNG...")),
//! ]);
//!
//! let packet = encode_for_send(&value);
//! assert_eq!(packet.attachments.len(), 1);
//!
//! let restored = on_packet_complete(
//!     &packet.skeleton,
//!     &packet.attachments,
//!     UnusedAttachmentsPolicy::Strict,
//! ).unwrap();
//! assert_eq!(restored, value);
//! ```
//!
//! Transport selection, event dispatch, reconnection, and acknowledgment
//! semantics are deliberately out of scope: this crate is the tree codec and
//! the per-packet framing discipline, nothing more. Errors never outlive the
//! packet they occur in; the session layer above decides what to do with them.

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;

pub use crate::core::decode::{decode, on_packet_complete};
pub use crate::core::encode::{encode, encode_for_send};
pub use crate::core::packet::{Frame, Packet};
pub use crate::core::value::Value;
pub use crate::error::{CodecError, Result};
pub use crate::protocol::assembler::Assembler;
