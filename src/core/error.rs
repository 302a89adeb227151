// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for bitpacker.
//!
//! Every failure aborts the current encode or decode call. There is no
//! partial-success state: a decode either yields a complete value or one of
//! these errors, and re-running it on the same bytes yields the same error.

use thiserror::Error;

/// Errors that can occur while encoding, decoding or loading schemas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The top-level version tag does not match the expected message version.
    #[error("Version mismatch: expected '{expected}', got '{actual}'")]
    VersionMismatch {
        /// Version tag of the message being decoded
        expected: String,
        /// Version tag found in the payload
        actual: String,
    },

    /// A read requested more bytes than remain in the input.
    #[error(
        "Buffer underflow: requested {requested} bytes at position {position}, but only {available} bytes available"
    )]
    BufferUnderflow {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when the read was attempted
        position: usize,
    },

    /// A varint ran past the 10-byte limit without terminating.
    #[error("Malformed varint at position {position}: exceeds 10 bytes")]
    MalformedVarint {
        /// Position of the first byte of the varint
        position: usize,
    },

    /// A string length or element count prefix decoded to a negative value.
    #[error("Invalid length {length} at position {position}")]
    InvalidLength {
        /// The decoded (negative) length
        length: i64,
        /// Position of the length prefix
        position: usize,
    },

    /// An element count exceeded the configured decode limit.
    #[error("Length {length} exceeds limit {limit} at position {position}")]
    LengthExceeded {
        /// Decoded element count
        length: usize,
        /// Configured maximum
        limit: usize,
        /// Position of the count prefix
        position: usize,
    },

    /// String bytes were not valid UTF-8.
    #[error("Invalid UTF-8 string at position {position}: {message}")]
    InvalidUtf8 {
        /// Position of the first string byte
        position: usize,
        /// Underlying UTF-8 error
        message: String,
    },

    /// A field required by the message definition is absent from the value.
    #[error("Missing field '{field}' in message '{message}'")]
    MissingField {
        /// Message type name
        message: String,
        /// Field name
        field: String,
    },

    /// A value does not match the type declared for its field.
    #[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Field name (dotted path for nested values)
        field: String,
        /// Declared field type
        expected: String,
        /// Type of the supplied value
        actual: String,
    },

    /// Message type not found in the schema.
    #[error("Type not found: '{type_name}'")]
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Schema failed validation.
    #[error("Invalid schema '{schema_name}': {reason}")]
    InvalidSchema {
        /// Schema or message name
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// Parse error in schema text or JSON input.
    #[error("Parse error in {context}: {message}")]
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// I/O failure while loading a schema file.
    #[error("I/O error: {message}")]
    Io {
        /// Error message
        message: String,
    },
}

impl CodecError {
    /// Create a version mismatch error.
    pub fn version_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        CodecError::VersionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a buffer underflow error.
    pub fn buffer_underflow(requested: usize, available: usize, position: usize) -> Self {
        CodecError::BufferUnderflow {
            requested,
            available,
            position,
        }
    }

    /// Create a malformed varint error.
    pub fn malformed_varint(position: usize) -> Self {
        CodecError::MalformedVarint { position }
    }

    /// Create an invalid length error.
    pub fn invalid_length(length: i64, position: usize) -> Self {
        CodecError::InvalidLength { length, position }
    }

    /// Create a length exceeded error.
    pub fn length_exceeded(length: usize, limit: usize, position: usize) -> Self {
        CodecError::LengthExceeded {
            length,
            limit,
            position,
        }
    }

    /// Create a missing field error.
    pub fn missing_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        CodecError::MissingField {
            message: message.into(),
            field: field.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        CodecError::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        CodecError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from reading malformed or mismatched wire bytes.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            CodecError::VersionMismatch { .. }
                | CodecError::BufferUnderflow { .. }
                | CodecError::MalformedVarint { .. }
                | CodecError::InvalidLength { .. }
                | CodecError::LengthExceeded { .. }
                | CodecError::InvalidUtf8 { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::VersionMismatch { expected, actual } => {
                vec![("expected", expected.clone()), ("actual", actual.clone())]
            }
            CodecError::BufferUnderflow {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::MalformedVarint { position } => vec![("position", position.to_string())],
            CodecError::InvalidLength { length, position } => vec![
                ("length", length.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::LengthExceeded {
                length,
                limit,
                position,
            } => vec![
                ("length", length.to_string()),
                ("limit", limit.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::InvalidUtf8 { position, message } => vec![
                ("position", position.to_string()),
                ("message", message.clone()),
            ],
            CodecError::MissingField { message, field } => {
                vec![("message", message.clone()), ("field", field.clone())]
            }
            CodecError::TypeMismatch {
                field,
                expected,
                actual,
            } => vec![
                ("field", field.clone()),
                ("expected", expected.clone()),
                ("actual", actual.clone()),
            ],
            CodecError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::Io { message } => vec![("message", message.clone())],
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for bitpacker operations.
pub type Result<T> = std::result::Result<T, CodecError>;
