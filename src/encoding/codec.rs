// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Owned schema plus codec configuration behind one entry point.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bitpacker::SchemaCodec;
//!
//! let codec = SchemaCodec::parse("version = 1.0.0\nclass Vec3 { int x; int y; int z; }")?;
//! let bytes = codec.encode_json("Vec3", r#"{"x": 10, "y": -20, "z": 30}"#)?;
//! assert_eq!(&bytes[6..], &[0x14, 0x27, 0x3C]);
//!
//! let json = codec.decode_json("Vec3", &bytes)?;
//! assert_eq!(json["y"], -20);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use crate::core::{CodecConfig, CodecError, DecodedMessage, Result};
use crate::schema::{parse_schema, parse_schema_file, Schema};

use super::json::JsonConverter;
use super::{ByteCursor, MessageDecoder, MessageEncoder};

/// A schema paired with codec configuration.
#[derive(Debug, Clone)]
pub struct SchemaCodec {
    schema: Schema,
    config: CodecConfig,
}

impl SchemaCodec {
    /// Wrap an already validated schema.
    pub fn new(schema: Schema) -> Self {
        Self::with_config(schema, CodecConfig::default())
    }

    /// Wrap a schema with explicit configuration.
    pub fn with_config(schema: Schema, config: CodecConfig) -> Self {
        Self { schema, config }
    }

    /// Parse `.buff` text.
    pub fn parse(definition: &str) -> Result<Self> {
        parse_schema(definition).map(Self::new)
    }

    /// Load a `.buff` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        parse_schema_file(path).map(Self::new)
    }

    /// Replace the configuration.
    pub fn config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// The wrapped schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Name of the root message, the default type for bare payloads.
    pub fn root_name(&self) -> Result<&str> {
        self.schema
            .root()
            .map(|def| def.name.as_str())
            .ok_or_else(|| CodecError::invalid_schema("schema", "no messages defined"))
    }

    /// An encoder borrowing this schema.
    pub fn encoder(&self) -> MessageEncoder<'_> {
        MessageEncoder::with_config(&self.schema, self.config)
    }

    /// A decoder borrowing this schema.
    pub fn decoder(&self) -> MessageDecoder<'_> {
        MessageDecoder::with_config(&self.schema, self.config)
    }

    /// Encode a message as a versioned payload.
    pub fn encode(&self, type_name: &str, message: &DecodedMessage) -> Result<Vec<u8>> {
        self.encoder().encode(type_name, message)
    }

    /// Decode a versioned payload.
    pub fn decode(&self, type_name: &str, data: &[u8]) -> Result<DecodedMessage> {
        self.decoder().decode(type_name, data)
    }

    /// Encode a JSON document as a versioned payload.
    pub fn encode_json(&self, type_name: &str, json: &str) -> Result<Vec<u8>> {
        let message = JsonConverter::new(&self.schema).parse_str(type_name, json)?;
        self.encode(type_name, &message)
    }

    /// Decode a versioned payload to a JSON value in declared field order.
    pub fn decode_json(&self, type_name: &str, data: &[u8]) -> Result<serde_json::Value> {
        let message = self.decode(type_name, data)?;
        JsonConverter::new(&self.schema).to_json(type_name, &message)
    }
}

/// Read the version tag at the start of a payload without checking it.
///
/// Returns the tag and the offset where the message body starts.
pub fn peek_version(data: &[u8]) -> Result<(String, usize)> {
    let mut cursor = ByteCursor::new(data);
    let version = cursor.get_string()?;
    Ok((version, cursor.position()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GRID: &str = "version = 0.2\nclass Grid { string name; double[][] cells; }";

    #[test]
    fn test_root_name() {
        let codec = SchemaCodec::parse(GRID).unwrap();
        assert_eq!(codec.root_name().unwrap(), "Grid");
    }

    #[test]
    fn test_json_round_trip() {
        let codec = SchemaCodec::parse(GRID).unwrap();
        let input = json!({"name": "g", "cells": [[0.5, -1.25], [], [3.0]]});
        let bytes = codec.encode_json("Grid", &input.to_string()).unwrap();
        assert_eq!(codec.decode_json("Grid", &bytes).unwrap(), input);
    }

    #[test]
    fn test_peek_version() {
        let codec = SchemaCodec::parse(GRID).unwrap();
        let bytes = codec
            .encode_json("Grid", r#"{"name": "", "cells": []}"#)
            .unwrap();
        let (version, body) = peek_version(&bytes).unwrap();
        assert_eq!(version, "0.2");
        assert_eq!(body, 4);
        assert_eq!(&bytes[body..], &[0x00, 0x00]);
    }

    #[test]
    fn test_config_limits_decoding() {
        let codec = SchemaCodec::parse(GRID).unwrap();
        let bytes = codec
            .encode_json("Grid", r#"{"name": "", "cells": [[1], [2]]}"#)
            .unwrap();
        let strict = codec.config(CodecConfig::new().with_max_collection_len(1));
        assert!(matches!(
            strict.decode("Grid", &bytes),
            Err(CodecError::LengthExceeded { .. })
        ));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            SchemaCodec::from_file("/nonexistent.buff"),
            Err(CodecError::Io { .. })
        ));
    }
}
