// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven decoder producing [`CodecValue`] trees.

use crate::core::{CodecConfig, CodecValue, DecodedMessage, Result};
use crate::schema::{FieldType, MessageDef, Schema};

use super::encoder::{depth_exceeded, MAX_DEPTH};
use super::ByteCursor;

/// Decodes wire bytes into [`DecodedMessage`] values using a [`Schema`].
///
/// Decoded scalars use the variant matching the declared field type:
/// `int` becomes [`CodecValue::Int32`], `float` becomes
/// [`CodecValue::Float32`] and so on.
#[derive(Debug, Clone)]
pub struct MessageDecoder<'a> {
    schema: &'a Schema,
    config: CodecConfig,
}

impl<'a> MessageDecoder<'a> {
    /// Create a decoder with default limits.
    pub fn new(schema: &'a Schema) -> Self {
        Self::with_config(schema, CodecConfig::default())
    }

    /// Create a decoder with explicit limits.
    pub fn with_config(schema: &'a Schema, config: CodecConfig) -> Self {
        Self { schema, config }
    }

    /// Decode a versioned top-level payload of type `type_name`.
    ///
    /// The version tag is checked before any field is read. Bytes after the
    /// message body are ignored.
    pub fn decode(&self, type_name: &str, data: &[u8]) -> Result<DecodedMessage> {
        let def = self.schema.require(type_name)?;
        let mut cursor = ByteCursor::with_config(data, &self.config);
        cursor.expect_version(&def.version_tag)?;
        let message = self.decode_fields(def, &mut cursor, 0)?;
        tracing::debug!(
            message = type_name,
            bytes = cursor.position(),
            trailing = cursor.remaining(),
            "decoded message"
        );
        Ok(message)
    }

    /// Read the fields of `type_name` from `cursor` without a version check.
    pub fn decode_from(&self, type_name: &str, cursor: &mut ByteCursor<'_>) -> Result<DecodedMessage> {
        let def = self.schema.require(type_name)?;
        self.decode_fields(def, cursor, 0)
    }

    fn decode_fields(
        &self,
        def: &MessageDef,
        cursor: &mut ByteCursor<'_>,
        depth: usize,
    ) -> Result<DecodedMessage> {
        if depth > MAX_DEPTH {
            return Err(depth_exceeded(&def.name));
        }

        let mut message = DecodedMessage::with_capacity(def.fields.len());
        for field in &def.fields {
            let value = self.decode_value(&field.field_type, cursor, depth)?;
            message.insert(field.name.clone(), value);
        }
        Ok(message)
    }

    fn decode_value(
        &self,
        field_type: &FieldType,
        cursor: &mut ByteCursor<'_>,
        depth: usize,
    ) -> Result<CodecValue> {
        Ok(match field_type {
            FieldType::Int32 => CodecValue::Int32(cursor.get_int32()?),
            FieldType::Int64 => CodecValue::Int64(cursor.get_int64()?),
            FieldType::Float32 => CodecValue::Float32(cursor.get_float()?),
            FieldType::Float64 => CodecValue::Float64(cursor.get_double()?),
            FieldType::Bool => CodecValue::Bool(cursor.get_bool()?),
            FieldType::String => CodecValue::String(cursor.get_string()?),
            FieldType::Repeated(inner) => {
                if depth >= MAX_DEPTH {
                    return Err(depth_exceeded(&field_type.to_string()));
                }
                let count = cursor.get_count()?;
                let mut items = Vec::with_capacity(cursor.reserve_hint(count));
                for _ in 0..count {
                    items.push(self.decode_value(inner, cursor, depth + 1)?);
                }
                CodecValue::Array(items)
            }
            FieldType::Message(name) => {
                let def = self.schema.require(name)?;
                CodecValue::Struct(self.decode_fields(def, cursor, depth + 1)?)
            }
        })
    }
}
