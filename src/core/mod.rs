// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout bitpacker.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error handling for every encode/decode call
//! - [`CodecValue`] - Dynamic value representation for schema-driven coding
//! - [`CodecConfig`] - Buffer sizing and decode limits

pub mod config;
pub mod error;
pub mod value;

pub use config::CodecConfig;
pub use error::{CodecError, Result};
pub use value::{CodecValue, DecodedMessage};
