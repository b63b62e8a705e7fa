//! # Protocol Layer
//!
//! Receive-side packet assembly.
//!
//! The codec in [`crate::core`] is pure; everything stateful about the
//! per-packet protocol lives here. The [`assembler::Assembler`] buffers the
//! skeleton frame and its binary frames until a packet is whole, enforcing
//! the frame-order discipline along the way.

pub mod assembler;
