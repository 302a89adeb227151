// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # BitPacker
//!
//! Compact, versioned, schema-positional binary codec.
//!
//! A payload is a length-prefixed version string followed by the message
//! fields in declared order. There are no field tags: encoder and decoder
//! must share the same message definition, and only the top-level version
//! tag guards against a mismatch.
//!
//! ## Architecture
//!
//! - `core/` - Errors, the dynamic value model and configuration
//! - `encoding/` - Wire primitives ([`ByteBuffer`], [`ByteCursor`]), the
//!   static [`Message`] contract and the schema-driven [`SchemaCodec`]
//! - `schema/` - The message definition IR and the `.buff` parser
//!
//! ## Example: Static messages
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bitpacker::{message, Message};
//!
//! message! {
//!     #[version = "1.0.0"]
//!     pub struct Item {
//!         pub id: i32,
//!         pub name: String,
//!         pub weight: f32,
//!     }
//! }
//!
//! let item = Item { id: 1, name: "Excalibur".into(), weight: 15.0 };
//! let bytes = item.encode();
//! assert_eq!(Item::decode(&bytes)?, item);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Schema-driven
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bitpacker::SchemaCodec;
//!
//! let codec = SchemaCodec::parse("version = 1.0.0\nclass Item { int id; string name; float weight; }")?;
//! let bytes = codec.encode_json("Item", r#"{"id": 1, "name": "Excalibur", "weight": 15}"#)?;
//! let back = codec.decode_json("Item", &bytes)?;
//! assert_eq!(back["name"], "Excalibur");
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use crate::core::{CodecConfig, CodecError, CodecValue, DecodedMessage, Result};

// Encoding/decoding
pub mod encoding;

pub use encoding::{
    peek_version, ByteBuffer, ByteCursor, JsonConverter, Message, MessageDecoder, MessageEncoder,
    SchemaCodec, WireField,
};

// Schema IR and parsing
pub mod schema;

pub use schema::{parse_schema, parse_schema_file, FieldDef, FieldType, MessageDef, Schema};
