// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! uamgen - Generate OPC UA ComplexObject Encode/Decode overrides.
//!
//! Usage:
//!   uamgen generate Shared/OptionalFields.json
//!   uamgen generate --check Models/*.yaml
//!   uamgen inspect Models/Mixed.yaml --format yaml
//!   uamgen trace Models/Mixed.yaml --type Reading --discriminator 2

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use commands::GenerateOptions;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uamgen_core::HeaderValues;

#[derive(Parser)]
#[command(name = "uamgen")]
#[command(about = "OPC UA complex object Encode/Decode generator")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate `.uamgen.cs` files from declaration trees
    Generate {
        /// Declaration tree documents (.json, .yaml, .yml)
        #[arg(value_name = "TREE", required = true)]
        trees: Vec<PathBuf>,

        /// Generator configuration (YAML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Source unit path, overriding the tree's `source_file`
        #[arg(long, value_name = "PATH")]
        source: Option<PathBuf>,

        /// Print generated text instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Write nothing; fail when an existing output is stale
        #[arg(long, conflicts_with = "stdout")]
        check: bool,
    },

    /// Print the extracted unit metadata
    Inspect {
        /// Declaration tree document
        #[arg(value_name = "TREE")]
        tree: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Generator configuration (YAML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show the field accesses of one type for given header values
    Trace {
        /// Declaration tree document
        #[arg(value_name = "TREE")]
        tree: PathBuf,

        /// Type to trace
        #[arg(long = "type", value_name = "NAME")]
        type_name: String,

        /// SwitchField value (decimal, 0x hex or 0b binary)
        #[arg(long, default_value = "0", value_parser = parse_header)]
        discriminator: u32,

        /// EncodingMask value (decimal, 0x hex or 0b binary)
        #[arg(long, default_value = "0", value_parser = parse_header)]
        mask: u32,

        /// Generator configuration (YAML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

fn parse_header(value: &str) -> Result<u32, String> {
    uamgen_core::plan::parse_literal(value)
        .ok_or_else(|| format!("'{value}' is not an unsigned 32-bit integer literal"))
}

fn init_logging(level: &str) {
    // Generated text may go to stdout, so logs stay on stderr.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    } else {
        let filter = level.parse().unwrap_or(tracing::Level::INFO);
        tracing_subscriber::fmt()
            .with_max_level(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Generate {
            trees,
            config,
            source,
            stdout,
            check,
        } => {
            let config = commands::load_config(config.as_deref())?;
            let options = GenerateOptions {
                source,
                stdout,
                check,
            };
            if stdout {
                let mut status = io::stderr();
                commands::cmd_generate(&trees, config, &options, &mut out, &mut status)?;
            } else {
                let mut status = io::sink();
                commands::cmd_generate(&trees, config, &options, &mut status, &mut out)?;
            }
        }
        Commands::Inspect {
            tree,
            format,
            config,
        } => {
            let config = commands::load_config(config.as_deref())?;
            commands::cmd_inspect(&tree, config, format, &mut out)?;
        }
        Commands::Trace {
            tree,
            type_name,
            discriminator,
            mask,
            config,
        } => {
            let config = commands::load_config(config.as_deref())?;
            let header = HeaderValues {
                discriminator,
                mask,
            };
            commands::cmd_trace(&tree, config, &type_name, header, &mut out)?;
        }
    }

    Ok(())
}
