//! # Core Codec Components
//!
//! The value model and the pure tree transforms over it.
//!
//! This module provides the foundation of the codec: the recursive value
//! representation, binary extraction into numbered attachments, placeholder
//! resolution back into binary leaves, and the per-packet wire envelope.
//!
//! ## Components
//! - **Value**: tagged union over JSON scalars, containers, binary leaves,
//!   and placeholder references
//! - **Encoder**: lifts binary leaves out of a tree, numbering them 0..N
//! - **Decoder**: splices attachments back in place of their placeholders
//! - **Packet**: skeleton + ordered attachments, and its frame sequence
//!
//! ## Wire Format
//! ```text
//! text frame:    [count ASCII digits] [-] [skeleton JSON]
//! binary frames: [attachment 0] [attachment 1] ... [attachment count-1]
//! ```
//!
//! ## Security
//! - Declared attachment counts are capped before buffer allocation
//! - Placeholder shape detection happens only on externally received frames

pub mod decode;
pub mod encode;
pub mod packet;
pub mod value;
