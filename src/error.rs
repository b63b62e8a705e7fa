//! # Error Types
//!
//! Error taxonomy for the attachment codec.
//!
//! Every failure in this crate is scoped to a single packet: an error returned
//! from decoding or frame assembly means *that packet* is lost, never the
//! session or the underlying transport connection. The caller owns the
//! decision to tear anything down.
//!
//! ## Error Categories
//! - **Reconstruction errors**: placeholder references that cannot be
//!   resolved, attachments that were never referenced
//! - **Framing errors**: frames arriving in an order the protocol forbids,
//!   malformed envelopes
//! - **Resource-limit errors**: declared counts or frame sizes beyond the
//!   configured caps, rejected before allocation
//! - **Configuration errors**: invalid TOML or out-of-range settings
//!
//! All errors implement `std::error::Error` for interoperability.

use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
/// Static strings are borrowed, avoiding heap allocations for common cases.
pub mod constants {
    /// Framing errors
    pub const ERR_BINARY_WITHOUT_PACKET: &str =
        "binary frame arrived with no in-flight packet to own it";
    pub const ERR_SKELETON_INTERRUPTED: &str =
        "skeleton frame arrived while a packet was still collecting attachments";
    pub const ERR_MISSING_COUNT_SEPARATOR: &str =
        "attachment count prefix is not terminated by '-'";
    pub const ERR_EMPTY_FRAME: &str = "empty text frame";
}

/// Primary error type for all codec operations.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A placeholder's `num` does not index into the packet's attachment list.
    #[error("invalid attachment reference: num {num} with {available} attachment(s)")]
    InvalidReference { num: usize, available: usize },

    /// Attachments were delivered but never referenced by any placeholder,
    /// which indicates a framing desynchronization under the strict policy.
    #[error("{unused} of {total} attachment(s) never referenced by a placeholder")]
    UnusedAttachments { unused: usize, total: usize },

    /// A frame arrived in an order the per-packet protocol forbids.
    #[error("frame order violation: {0}")]
    FrameOrderViolation(String),

    /// A skeleton was asked to serialize while still holding a `Binary` leaf.
    #[error("value still contains raw binary and cannot be serialized as a skeleton")]
    BinaryInSkeleton,

    /// The text frame's count prefix or JSON body could not be parsed.
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// A binary frame exceeded the configured per-attachment size cap.
    #[error("frame of {size} bytes exceeds limit of {limit} bytes")]
    OversizedFrame { size: usize, limit: usize },

    /// The envelope declared more attachments than the configured cap allows.
    #[error("{declared} declared attachment(s) exceed limit of {limit}")]
    TooManyAttachments { declared: usize, limit: usize },

    #[error("serialize error: {0}")]
    SerializeError(String),

    #[error("deserialize error: {0}")]
    DeserializeError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
