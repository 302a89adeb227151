// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar wire algorithms: varint, zigzag and fixed-point float quantization.
//!
//! These are the pieces every implementation of the format must reproduce
//! bit for bit:
//! - varints are base-128, least significant group first, with the high bit
//!   of each byte set on every group except the last;
//! - signed integers are zigzag-mapped before varint encoding;
//! - floats are multiplied by [`FLOAT_SCALE`], truncated toward zero and
//!   sent as a zigzag varint of the resulting 64-bit integer.

/// Maximum encoded width of a 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Fixed-point scale factor applied to floats on the wire.
pub const FLOAT_SCALE: f64 = 10_000.0;

/// [`FLOAT_SCALE`] in single precision, used for `f32` quantization.
pub const FLOAT_SCALE_F32: f32 = 10_000.0;

/// Map a signed 32-bit value onto an unsigned one so small magnitudes stay small.
#[inline]
pub const fn zigzag_encode32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

/// Inverse of [`zigzag_encode32`].
#[inline]
pub const fn zigzag_decode32(u: u32) -> i32 {
    ((u >> 1) as i32) ^ -((u & 1) as i32)
}

/// Map a signed 64-bit value onto an unsigned one so small magnitudes stay small.
#[inline]
pub const fn zigzag_encode64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`zigzag_encode64`].
#[inline]
pub const fn zigzag_decode64(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

/// Number of bytes `value` occupies as a varint.
#[inline]
pub const fn varint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Encode `value` with the general multi-byte loop.
///
/// Returns the number of bytes written to the front of `out`. This is the
/// reference form; [`ByteBuffer::put_var_int`](super::ByteBuffer::put_var_int)
/// must produce identical bytes through its fast paths.
pub fn encode_varint(mut value: u64, out: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut len = 0;
    while value >= 0x80 {
        out[len] = (value as u8 & 0x7F) | 0x80;
        value >>= 7;
        len += 1;
    }
    out[len] = value as u8;
    len + 1
}

/// Quantize an `f32` to the wire integer.
///
/// The product is formed in single precision, then truncated toward zero.
/// Out-of-range products saturate and NaN maps to zero.
#[inline]
pub fn quantize_f32(value: f32) -> i64 {
    (value * FLOAT_SCALE_F32) as i64
}

/// Quantize an `f64` to the wire integer, truncating toward zero.
///
/// Out-of-range products saturate and NaN maps to zero.
#[inline]
pub fn quantize_f64(value: f64) -> i64 {
    (value * FLOAT_SCALE) as i64
}

/// Recover an `f32` from its wire integer.
#[inline]
pub fn dequantize_f32(quantized: i64) -> f32 {
    (quantized as f64 / FLOAT_SCALE) as f32
}

/// Recover an `f64` from its wire integer.
#[inline]
pub fn dequantize_f64(quantized: i64) -> f64 {
    quantized as f64 / FLOAT_SCALE
}
