// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # BitPacker CLI
//!
//! Command-line front end for `.buff` schemas and encoded payloads.
//!
//! ## Usage
//!
//! ```sh
//! # Show a parsed schema
//! bitpacker schema show game.buff
//!
//! # Encode JSON using the root message
//! bitpacker encode --schema game.buff world.json -o world.bin
//!
//! # Decode back to JSON
//! bitpacker decode --schema game.buff world.bin --pretty
//!
//! # Peek at the version tag and body bytes
//! bitpacker inspect world.bin
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeCmd, EncodeCmd, InspectCmd, SchemaCmd};
use common::Result;

/// BitPacker - compact versioned binary codec
///
/// Encode and decode schema-positional payloads described by `.buff` files.
#[derive(Parser, Clone)]
#[command(name = "bitpacker")]
#[command(about = "Compact versioned binary codec driven by .buff schemas", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Schema operations (show, check)
    #[command(subcommand)]
    Schema(SchemaCmd),

    /// Encode a JSON document into wire bytes
    Encode(EncodeCmd),

    /// Decode wire bytes into JSON
    Decode(DecodeCmd),

    /// Show the version tag and hex dump of a payload
    Inspect(InspectCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    match cli.command {
        Commands::Schema(cmd) => cmd.run(),
        Commands::Encode(cmd) => cmd.run(),
        Commands::Decode(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
