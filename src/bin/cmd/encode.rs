// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - JSON document to wire bytes.

use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{load_codec, resolve_message, Result};

/// Encode a JSON document as a versioned payload.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// Schema file (.buff)
    #[arg(short, long, value_name = "SCHEMA")]
    schema: PathBuf,

    /// Message type (defaults to the first class in the schema)
    #[arg(short, long, value_name = "NAME")]
    message: Option<String>,

    /// JSON input file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file for the encoded bytes
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,
}

impl EncodeCmd {
    pub fn run(self) -> Result<()> {
        let codec = load_codec(&self.schema)?;
        let message = resolve_message(&codec, self.message)?;

        let json = fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let bytes = codec.encode_json(&message, &json)?;

        fs::write(&self.output, &bytes)
            .with_context(|| format!("failed to write {}", self.output.display()))?;
        println!(
            "Encoded {} -> {} ({} bytes)",
            message,
            self.output.display(),
            bytes.len()
        );
        Ok(())
    }
}
