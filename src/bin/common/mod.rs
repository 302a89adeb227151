// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use bitpacker::SchemaCodec;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` overrides the default level, which is `debug` with `-v` and
/// `warn` otherwise.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}

/// Load a `.buff` schema file.
pub fn load_codec(path: &Path) -> Result<SchemaCodec> {
    if path.extension().and_then(|e| e.to_str()) != Some("buff") {
        tracing::warn!(path = %path.display(), "schema file does not have a .buff extension");
    }
    SchemaCodec::from_file(path).with_context(|| format!("failed to load schema {}", path.display()))
}

/// Resolve the message type to use, defaulting to the schema root.
pub fn resolve_message(codec: &SchemaCodec, message: Option<String>) -> Result<String> {
    match message {
        Some(name) => {
            codec.schema().require(&name)?;
            Ok(name)
        }
        None => Ok(codec.root_name()?.to_string()),
    }
}

/// Print `value` as pretty JSON, or run the human-readable printer.
pub fn output_json_or<T>(json: bool, value: &T, human_fn: impl FnOnce()) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn();
    }
    Ok(())
}

/// Format bytes as hex rows of 16, each prefixed with its offset.
pub fn hex_rows(data: &[u8], base: usize) -> Vec<String> {
    data.chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let hex = hex::encode(chunk);
            let spaced: Vec<&str> = (0..chunk.len()).map(|j| &hex[j * 2..j * 2 + 2]).collect();
            format!("{:08x}  {}", base + i * 16, spaced.join(" "))
        })
        .collect()
}
