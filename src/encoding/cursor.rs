// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Read cursor for decoding wire bytes.
//!
//! Every read is bounds-checked: running out of input yields
//! [`CodecError::BufferUnderflow`] instead of a panic or a silent default.

use crate::core::config::DEFAULT_MAX_COLLECTION_LEN;
use crate::{CodecConfig, CodecError, Result};

use super::varint::{dequantize_f32, dequantize_f64, zigzag_decode32, zigzag_decode64, MAX_VARINT_LEN};

/// Cursor over an immutable byte slice.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use bitpacker::ByteCursor;
///
/// let data = [0x14, 0x27, 0x3C];
/// let mut cursor = ByteCursor::new(&data);
/// assert_eq!(cursor.get_int32()?, 10);
/// assert_eq!(cursor.get_int32()?, -20);
/// assert_eq!(cursor.get_int32()?, 30);
/// assert!(cursor.is_at_end());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    /// The input bytes
    data: &'a [u8],
    /// Current read position
    offset: usize,
    /// Maximum accepted repeated-field count
    max_collection_len: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `data` with default limits.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
        }
    }

    /// Create a cursor that applies the limits from `config`.
    pub fn with_config(data: &'a [u8], config: &CodecConfig) -> Self {
        Self {
            data,
            offset: 0,
            max_collection_len: config.max_collection_len,
        }
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Whether all input has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        match self.data.get(self.offset) {
            Some(&byte) => {
                self.offset += 1;
                Ok(byte)
            }
            None => Err(CodecError::buffer_underflow(1, 0, self.offset)),
        }
    }

    /// Read `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::buffer_underflow(
                count,
                self.remaining(),
                self.offset,
            ));
        }
        let bytes = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(bytes)
    }

    /// Read an unsigned varint of at most ten bytes.
    ///
    /// Bits beyond the 64th in a tenth byte are discarded.
    pub fn get_var_int(&mut self) -> Result<u64> {
        let start = self.offset;
        let mut value = 0u64;
        for index in 0..MAX_VARINT_LEN {
            let byte = self.read_u8()?;
            value |= u64::from(byte & 0x7F) << (7 * index);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CodecError::malformed_varint(start))
    }

    /// Read a zigzag-mapped 32-bit integer.
    ///
    /// The varint is truncated to its low 32 bits before unmapping.
    pub fn get_int32(&mut self) -> Result<i32> {
        Ok(zigzag_decode32(self.get_var_int()? as u32))
    }

    /// Read a zigzag-mapped 64-bit integer.
    pub fn get_int64(&mut self) -> Result<i64> {
        Ok(zigzag_decode64(self.get_var_int()?))
    }

    /// Read a quantized `f32`.
    pub fn get_float(&mut self) -> Result<f32> {
        Ok(dequantize_f32(self.get_int64()?))
    }

    /// Read a quantized `f64`.
    pub fn get_double(&mut self) -> Result<f64> {
        Ok(dequantize_f64(self.get_int64()?))
    }

    /// Read a bool; any nonzero byte is `true`.
    pub fn get_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a string length or count prefix, rejecting negative values.
    pub fn get_length(&mut self) -> Result<usize> {
        let position = self.offset;
        let length = self.get_int64()?;
        usize::try_from(length).map_err(|_| CodecError::invalid_length(length, position))
    }

    /// Read a repeated-field element count.
    ///
    /// Counts above the configured limit are rejected before any element is
    /// read or allocated.
    pub fn get_count(&mut self) -> Result<usize> {
        let position = self.offset;
        let count = self.get_length()?;
        if count > self.max_collection_len {
            return Err(CodecError::length_exceeded(
                count,
                self.max_collection_len,
                position,
            ));
        }
        Ok(count)
    }

    /// Read a length-prefixed string borrowed from the input.
    pub fn get_str(&mut self) -> Result<&'a str> {
        let length = self.get_length()?;
        let position = self.offset;
        let bytes = self.read_bytes(length)?;
        std::str::from_utf8(bytes).map_err(|e| CodecError::InvalidUtf8 {
            position,
            message: e.to_string(),
        })
    }

    /// Read a length-prefixed string.
    pub fn get_string(&mut self) -> Result<String> {
        self.get_str().map(str::to_owned)
    }

    /// Read the leading version tag and compare it with `expected`.
    ///
    /// Fails with [`CodecError::VersionMismatch`] without reading further.
    pub fn expect_version(&mut self, expected: &str) -> Result<()> {
        let actual = self.get_str()?;
        if actual != expected {
            let err = CodecError::version_mismatch(expected, actual);
            tracing::warn!(fields = ?err.log_fields(), "payload version mismatch");
            return Err(err);
        }
        Ok(())
    }

    /// Number of elements worth preallocating for `count` items.
    ///
    /// Every element occupies at least one byte, so the remaining input bounds
    /// how many can actually follow.
    #[inline]
    pub fn reserve_hint(&self, count: usize) -> usize {
        count.min(self.remaining())
    }
}
