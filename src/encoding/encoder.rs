// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven encoder over [`CodecValue`] trees.
//!
//! Produces the same bytes as the statically declared messages for the same
//! definition, but looks field types up in a [`Schema`] at run time.

use crate::core::{CodecConfig, CodecError, CodecValue, DecodedMessage, Result};
use crate::schema::{FieldType, MessageDef, Schema};

use super::ByteBuffer;

/// Nesting depth past which encoding or decoding gives up.
///
/// Both nested messages and repeated layers count toward it.
pub(crate) const MAX_DEPTH: usize = 64;

pub(crate) fn depth_exceeded(context: &str) -> CodecError {
    CodecError::invalid_schema(context, format!("maximum nesting depth exceeded ({MAX_DEPTH})"))
}

/// Encodes [`DecodedMessage`] values against a [`Schema`].
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use bitpacker::{parse_schema, CodecValue, DecodedMessage, MessageEncoder};
///
/// let schema = parse_schema("version = 1.0.0\nclass Vec3 { int x; int y; int z; }")?;
/// let mut message = DecodedMessage::new();
/// message.insert("x".to_string(), CodecValue::Int32(10));
/// message.insert("y".to_string(), CodecValue::Int32(-20));
/// message.insert("z".to_string(), CodecValue::Int32(30));
///
/// let bytes = MessageEncoder::new(&schema).encode("Vec3", &message)?;
/// assert_eq!(&bytes[6..], &[0x14, 0x27, 0x3C]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MessageEncoder<'a> {
    schema: &'a Schema,
    config: CodecConfig,
}

impl<'a> MessageEncoder<'a> {
    /// Create an encoder with default configuration.
    pub fn new(schema: &'a Schema) -> Self {
        Self::with_config(schema, CodecConfig::default())
    }

    /// Create an encoder with explicit configuration.
    pub fn with_config(schema: &'a Schema, config: CodecConfig) -> Self {
        Self { schema, config }
    }

    /// Encode `message` as a versioned top-level payload of type `type_name`.
    pub fn encode(&self, type_name: &str, message: &DecodedMessage) -> Result<Vec<u8>> {
        let def = self.schema.require(type_name)?;
        let mut buf = ByteBuffer::with_capacity(self.config.initial_capacity);
        buf.put_string(&def.version_tag);
        self.encode_fields(def, message, &mut buf, "", 0)?;
        let bytes = buf.finish();
        tracing::debug!(message = type_name, bytes = bytes.len(), "encoded message");
        Ok(bytes)
    }

    /// Append the fields of `message` to `buf` with no version tag.
    ///
    /// On error `buf` is restored to its previous length.
    pub fn encode_into(
        &self,
        type_name: &str,
        message: &DecodedMessage,
        buf: &mut ByteBuffer,
    ) -> Result<()> {
        let def = self.schema.require(type_name)?;
        let start = buf.len();
        self.encode_fields(def, message, buf, "", 0)
            .inspect_err(|_| buf.truncate(start))
    }

    fn encode_fields(
        &self,
        def: &MessageDef,
        message: &DecodedMessage,
        buf: &mut ByteBuffer,
        path: &str,
        depth: usize,
    ) -> Result<()> {
        if depth > MAX_DEPTH {
            return Err(depth_exceeded(&def.name));
        }

        for field in &def.fields {
            let value = message
                .get(&field.name)
                .ok_or_else(|| CodecError::missing_field(&def.name, &field.name))?;
            let field_path = if path.is_empty() {
                field.name.clone()
            } else {
                format!("{path}.{}", field.name)
            };
            self.encode_value(value, &field.field_type, buf, &field_path, depth)?;
        }
        Ok(())
    }

    fn encode_value(
        &self,
        value: &CodecValue,
        field_type: &FieldType,
        buf: &mut ByteBuffer,
        path: &str,
        depth: usize,
    ) -> Result<()> {
        match field_type {
            FieldType::Int32 => {
                let v = value
                    .as_i32()
                    .ok_or_else(|| mismatch(path, field_type, value))?;
                buf.put_int32(v);
            }
            FieldType::Int64 => {
                let v = value
                    .as_i64()
                    .ok_or_else(|| mismatch(path, field_type, value))?;
                buf.put_int64(v);
            }
            FieldType::Float32 => match value {
                CodecValue::Float32(v) => buf.put_float(*v),
                other => {
                    let v = other
                        .as_f64()
                        .ok_or_else(|| mismatch(path, field_type, value))?;
                    buf.put_float(v as f32);
                }
            },
            FieldType::Float64 => {
                let v = value
                    .as_f64()
                    .ok_or_else(|| mismatch(path, field_type, value))?;
                buf.put_double(v);
            }
            FieldType::Bool => {
                let v = value
                    .as_bool()
                    .ok_or_else(|| mismatch(path, field_type, value))?;
                buf.put_bool(v);
            }
            FieldType::String => {
                let v = value
                    .as_str()
                    .ok_or_else(|| mismatch(path, field_type, value))?;
                buf.put_string(v);
            }
            FieldType::Repeated(inner) => {
                if depth >= MAX_DEPTH {
                    return Err(depth_exceeded(path));
                }
                let items = value
                    .as_array()
                    .ok_or_else(|| mismatch(path, field_type, value))?;
                buf.put_length(items.len());
                for (i, item) in items.iter().enumerate() {
                    self.encode_value(item, inner, buf, &format!("{path}[{i}]"), depth + 1)?;
                }
            }
            FieldType::Message(name) => {
                let fields = value
                    .as_struct()
                    .ok_or_else(|| mismatch(path, field_type, value))?;
                let def = self.schema.require(name)?;
                self.encode_fields(def, fields, buf, path, depth + 1)?;
            }
        }
        Ok(())
    }
}

fn mismatch(path: &str, expected: &FieldType, actual: &CodecValue) -> CodecError {
    let actual = match actual {
        CodecValue::Int64(v) if matches!(expected, FieldType::Int32) => {
            format!("long {v} out of int range")
        }
        other => other.type_name().to_string(),
    };
    CodecError::type_mismatch(path, expected.to_string(), actual)
}
