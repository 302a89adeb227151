// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - show and validate `.buff` schemas.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{load_codec, output_json_or, Result};

/// Schema operations.
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// Print every message definition in the schema
    Show {
        /// Schema file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Validate a schema without printing it
    Check {
        /// Schema file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        match self {
            SchemaCmd::Show { input, json } => cmd_show(input, json),
            SchemaCmd::Check { input } => cmd_check(input),
        }
    }
}

fn cmd_show(input: PathBuf, json: bool) -> Result<()> {
    let codec = load_codec(&input)?;
    let schema = codec.schema();

    output_json_or(json, schema, || {
        println!("=== Schema {} ===", input.display());
        println!("Version: {}", schema.version);
        println!();
        for (i, def) in schema.messages().iter().enumerate() {
            let marker = if i == 0 { " (root)" } else { "" };
            println!("class {}{} {{", def.name, marker);
            for field in &def.fields {
                println!("    {} {};", field.field_type, field.name);
            }
            println!("}}");
            println!();
        }
    })
}

fn cmd_check(input: PathBuf) -> Result<()> {
    let codec = load_codec(&input)?;
    let schema = codec.schema();
    let fields: usize = schema.messages().iter().map(|m| m.fields.len()).sum();
    println!(
        "OK: {} (version {}, {} messages, {} fields, root {})",
        input.display(),
        schema.version,
        schema.len(),
        fields,
        codec.root_name()?
    );
    Ok(())
}
