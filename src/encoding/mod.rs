// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire encoding and decoding.
//!
//! This module provides:
//! - [`varint`] - Varint, zigzag and float quantization algorithms
//! - [`ByteBuffer`] / [`ByteCursor`] - Write and read primitives
//! - [`wire`] - Statically typed messages ([`Message`], [`WireField`])
//! - [`MessageEncoder`] / [`MessageDecoder`] - Schema-driven codec over [`CodecValue`](crate::CodecValue)
//! - [`SchemaCodec`] - Owned schema with JSON helpers

pub mod buffer;
pub mod codec;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod json;
pub mod varint;
pub mod wire;

pub use buffer::ByteBuffer;
pub use codec::{peek_version, SchemaCodec};
pub use cursor::ByteCursor;
pub use decoder::MessageDecoder;
pub use encoder::MessageEncoder;
pub use json::JsonConverter;
pub use wire::{Message, WireField};
