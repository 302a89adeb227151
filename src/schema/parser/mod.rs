// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parser implementations.

pub mod buff_parser;

use std::path::Path;

use crate::core::Result;
use crate::schema::Schema;

/// Parse a schema from `.buff` text.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let schema = bitpacker::parse_schema("version = 1.0.0\nclass Vec3 { float x; float y; float z; }")?;
/// assert_eq!(schema.root().map(|m| m.name.as_str()), Some("Vec3"));
/// # Ok(())
/// # }
/// ```
pub fn parse_schema(definition: &str) -> Result<Schema> {
    buff_parser::parse(definition)
}

/// Read and parse a `.buff` schema file.
pub fn parse_schema_file(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let definition = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "loading schema file");
    parse_schema(&definition)
}
