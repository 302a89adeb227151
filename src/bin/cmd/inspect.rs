// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show the version tag and a hex dump of a payload.

use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{hex_rows, Result};

/// Show the version tag and body bytes of an encoded payload.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Encoded input file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Maximum number of body bytes to dump
    #[arg(long, value_name = "N", default_value_t = 256)]
    limit: usize,
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        let data = fs::read(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let (version, body_start) = bitpacker::peek_version(&data)
            .with_context(|| format!("{} does not start with a version tag", self.input.display()))?;
        let body = &data[body_start..];

        println!("=== {} ===", self.input.display());
        println!("Version:    {version}");
        println!("Total size: {} bytes", data.len());
        println!("Body:       {} bytes at offset {}", body.len(), body_start);
        println!();

        let shown = &body[..body.len().min(self.limit)];
        for row in hex_rows(shown, body_start) {
            println!("{row}");
        }
        if shown.len() < body.len() {
            println!("... {} more bytes", body.len() - shown.len());
        }
        Ok(())
    }
}
