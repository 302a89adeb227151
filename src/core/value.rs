// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec value type system.
//!
//! Provides the dynamic value representation used by the schema-driven
//! encoder and decoder. Each variant corresponds to one wire field type;
//! nested messages are maps from field name to value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type alias for a decoded message as field name -> value mapping.
///
/// Field order is not carried here; the message definition supplies it.
pub type DecodedMessage = HashMap<String, CodecValue>;

/// Unified value type for schema-driven encoding and decoding.
///
/// The variants mirror the field types a message definition can declare:
/// `Int32`, `Int64`, `Float32`, `Float64`, `Bool`, `String`, repeated
/// fields (`Array`) and nested messages (`Struct`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodecValue {
    // Boolean
    Bool(bool),

    // Signed integers
    Int32(i32),
    Int64(i64),

    // Floating point (fixed-point quantized on the wire)
    Float32(f32),
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Repeated field elements
    Array(Vec<CodecValue>),

    // Nested message
    Struct(DecodedMessage),
}

impl CodecValue {
    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodecValue::Int32(v) => Some(*v as f64),
            CodecValue::Int64(v) => Some(*v as f64),
            CodecValue::Float32(v) => Some(*v as f64),
            CodecValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CodecValue::Int32(v) => Some(*v as i64),
            CodecValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert this value to i32, if it is an integer that fits.
    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    /// Try to get the inner bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CodecValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CodecValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner struct.
    pub fn as_struct(&self) -> Option<&DecodedMessage> {
        match self {
            CodecValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&[CodecValue]> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            CodecValue::Bool(_) => "bool",
            CodecValue::Int32(_) => "int",
            CodecValue::Int64(_) => "long",
            CodecValue::Float32(_) => "float",
            CodecValue::Float64(_) => "double",
            CodecValue::String(_) => "string",
            CodecValue::Array(_) => "array",
            CodecValue::Struct(_) => "struct",
        }
    }
}

impl From<i32> for CodecValue {
    fn from(v: i32) -> Self {
        CodecValue::Int32(v)
    }
}

impl From<i64> for CodecValue {
    fn from(v: i64) -> Self {
        CodecValue::Int64(v)
    }
}

impl From<f32> for CodecValue {
    fn from(v: f32) -> Self {
        CodecValue::Float32(v)
    }
}

impl From<f64> for CodecValue {
    fn from(v: f64) -> Self {
        CodecValue::Float64(v)
    }
}

impl From<bool> for CodecValue {
    fn from(v: bool) -> Self {
        CodecValue::Bool(v)
    }
}

impl From<&str> for CodecValue {
    fn from(v: &str) -> Self {
        CodecValue::String(v.to_string())
    }
}

impl From<String> for CodecValue {
    fn from(v: String) -> Self {
        CodecValue::String(v)
    }
}

impl<T: Into<CodecValue>> From<Vec<T>> for CodecValue {
    fn from(v: Vec<T>) -> Self {
        CodecValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<DecodedMessage> for CodecValue {
    fn from(v: DecodedMessage) -> Self {
        CodecValue::Struct(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_f64() {
        assert_eq!(CodecValue::Int32(3).as_f64(), Some(3.0));
        assert_eq!(CodecValue::Int64(-3).as_f64(), Some(-3.0));
        assert_eq!(CodecValue::Float32(1.5).as_f64(), Some(1.5));
        assert_eq!(CodecValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_as_i32_range() {
        assert_eq!(CodecValue::Int64(7).as_i32(), Some(7));
        assert_eq!(CodecValue::Int64(i64::from(i32::MAX) + 1).as_i32(), None);
        assert_eq!(CodecValue::Float64(1.0).as_i32(), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(CodecValue::from("hi").as_str(), Some("hi"));
        assert_eq!(CodecValue::Bool(false).as_bool(), Some(false));
        assert_eq!(
            CodecValue::from(vec![1, 2]).as_array(),
            Some(&[CodecValue::Int32(1), CodecValue::Int32(2)][..])
        );

        let mut inner = DecodedMessage::new();
        inner.insert("x".to_string(), CodecValue::Int32(1));
        let value = CodecValue::from(inner);
        assert_eq!(value.as_struct().unwrap()["x"], CodecValue::Int32(1));
        assert_eq!(value.as_array(), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(CodecValue::Int32(0).type_name(), "int");
        assert_eq!(CodecValue::Int64(0).type_name(), "long");
        assert_eq!(CodecValue::Float32(0.0).type_name(), "float");
        assert_eq!(CodecValue::Float64(0.0).type_name(), "double");
        assert_eq!(CodecValue::Array(vec![]).type_name(), "array");
    }

    #[test]
    fn test_serialization() {
        let value = CodecValue::Int64(42);
        let json = serde_json::to_string(&value).unwrap();
        let back: CodecValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }
}
