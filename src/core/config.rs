// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec configuration.
//!
//! Only buffer sizing and decode limits are configurable. The float scale
//! factor and the varint width cap are part of the wire format and live in
//! [`crate::encoding::varint`].

/// Default starting capacity of a top-level encode buffer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Default upper bound on a decoded repeated-field element count.
pub const DEFAULT_MAX_COLLECTION_LEN: usize = 10_000_000;

/// Configuration shared by encoders and decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Starting capacity of the buffer allocated for each top-level encode
    pub initial_capacity: usize,
    /// Maximum element count accepted for a repeated field on decode
    pub max_collection_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
        }
    }
}

impl CodecConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting buffer capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the maximum decoded element count.
    pub fn with_max_collection_len(mut self, limit: usize) -> Self {
        self.max_collection_len = limit;
        self
    }
}
