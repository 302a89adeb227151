// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Growable write buffer with the wire encoding primitives.
//!
//! A [`ByteBuffer`] owns one contiguous region and a write offset. It is
//! created per encode call and consumed with [`ByteBuffer::finish`]; the
//! read side lives in [`ByteCursor`](super::ByteCursor), so a value is
//! always either being written or being read, never both.

use super::varint::{
    encode_varint, quantize_f32, quantize_f64, varint_len, zigzag_encode32, zigzag_encode64,
    MAX_VARINT_LEN,
};

/// Default initial capacity for a buffer created with [`ByteBuffer::new`].
const DEFAULT_CAPACITY: usize = 64;

/// Growable byte buffer used for encoding.
///
/// The backing region is kept zero-filled up to its capacity and grows to
/// `max(2 * capacity, len + n)` when a write of `n` bytes does not fit, so
/// appends are amortized O(1) per byte.
///
/// # Example
///
/// ```
/// use bitpacker::ByteBuffer;
///
/// let mut buf = ByteBuffer::new();
/// buf.put_int32(10);
/// buf.put_int32(-20);
/// buf.put_string("hi");
/// assert_eq!(buf.finish(), vec![0x14, 0x27, 0x04, b'h', b'i']);
/// ```
#[derive(Debug, Clone)]
pub struct ByteBuffer {
    /// Backing region; its length is the buffer capacity
    buffer: Vec<u8>,
    /// Current write position
    offset: usize,
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteBuffer {
    /// Create an empty buffer with a small default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity],
            offset: 0,
        }
    }

    /// Number of bytes written so far.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.offset
    }

    /// Whether nothing has been written yet.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.offset == 0
    }

    /// Bytes that can be written before the next growth.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// The bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.offset]
    }

    /// Consume the buffer and return the written bytes.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.buffer.truncate(self.offset);
        self.buffer
    }

    /// Discard written bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.offset = 0;
    }

    /// Drop everything written after the first `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.offset = self.offset.min(len);
    }

    /// Guarantee that `additional` more bytes fit without another growth.
    pub fn ensure_capacity(&mut self, additional: usize) {
        let needed = self.offset + additional;
        if needed > self.buffer.len() {
            let grown = needed.max(self.buffer.len() * 2);
            self.buffer.resize(grown, 0);
        }
    }

    /// Append raw bytes with no prefix.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        self.buffer[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
    }

    /// Write an unsigned varint.
    ///
    /// Values below 128 and below 16384 take one- and two-byte fast paths;
    /// both produce the same bytes as [`encode_varint`].
    pub fn put_var_int(&mut self, value: u64) {
        if value < 0x80 {
            self.ensure_capacity(1);
            self.buffer[self.offset] = value as u8;
            self.offset += 1;
            return;
        }
        if value < 0x4000 {
            self.ensure_capacity(2);
            self.buffer[self.offset] = (value as u8 & 0x7F) | 0x80;
            self.buffer[self.offset + 1] = (value >> 7) as u8;
            self.offset += 2;
            return;
        }

        self.ensure_capacity(varint_len(value));
        let mut scratch = [0u8; MAX_VARINT_LEN];
        let len = encode_varint(value, &mut scratch);
        self.buffer[self.offset..self.offset + len].copy_from_slice(&scratch[..len]);
        self.offset += len;
    }

    /// Write a zigzag-mapped 32-bit integer.
    #[inline]
    pub fn put_int32(&mut self, value: i32) {
        self.put_var_int(u64::from(zigzag_encode32(value)));
    }

    /// Write a zigzag-mapped 64-bit integer.
    #[inline]
    pub fn put_int64(&mut self, value: i64) {
        self.put_var_int(zigzag_encode64(value));
    }

    /// Write an `f32` as a quantized zigzag varint.
    #[inline]
    pub fn put_float(&mut self, value: f32) {
        self.put_int64(quantize_f32(value));
    }

    /// Write an `f64` as a quantized zigzag varint.
    #[inline]
    pub fn put_double(&mut self, value: f64) {
        self.put_int64(quantize_f64(value));
    }

    /// Write a bool as a single `0` or `1` byte.
    #[inline]
    pub fn put_bool(&mut self, value: bool) {
        self.ensure_capacity(1);
        self.buffer[self.offset] = u8::from(value);
        self.offset += 1;
    }

    /// Write a string length or repeated-field count prefix.
    ///
    /// For every length up to `i32::MAX` the bytes equal `put_int32(len)`.
    #[inline]
    pub fn put_length(&mut self, len: usize) {
        self.put_int64(len as i64);
    }

    /// Write a length-prefixed UTF-8 string with no terminator.
    pub fn put_string(&mut self, value: &str) {
        self.put_length(value.len());
        self.put_bytes(value.as_bytes());
    }
}
