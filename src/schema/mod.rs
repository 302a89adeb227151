// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message definitions and the `.buff` schema format.
//!
//! This module provides:
//! - [`FieldType`], [`FieldDef`], [`MessageDef`] and [`Schema`], the typed IR
//!   both codec paths are driven by
//! - [`parse_schema`] / [`parse_schema_file`] for `.buff` text

pub mod ast;
pub mod parser;

pub use ast::{FieldDef, FieldType, MessageDef, Schema, MAX_ARRAY_DIMENSIONS};
pub use parser::{parse_schema, parse_schema_file};
