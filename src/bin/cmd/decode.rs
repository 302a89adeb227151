// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - wire bytes to JSON on stdout.

use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{load_codec, resolve_message, Result};

/// Decode a versioned payload and print it as JSON.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Schema file (.buff)
    #[arg(short, long, value_name = "SCHEMA")]
    schema: PathBuf,

    /// Message type (defaults to the first class in the schema)
    #[arg(short, long, value_name = "NAME")]
    message: Option<String>,

    /// Encoded input file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

impl DecodeCmd {
    pub fn run(self) -> Result<()> {
        let codec = load_codec(&self.schema)?;
        let message = resolve_message(&codec, self.message)?;

        let data = fs::read(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let value = codec.decode_json(&message, &data)?;

        if self.pretty {
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{value}");
        }
        Ok(())
    }
}
