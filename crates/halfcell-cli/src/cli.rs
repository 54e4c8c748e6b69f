// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Argument parsing and command dispatch.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use halfcell_app_core::config::ConfigService;
use halfcell_app_core::prefs::{EditorPrefs, PREFS_KEY};
use halfcell_config_fs::FsConfigStore;
use tracing::{debug, warn};

use crate::report::{decode_base64, encode_json, frame, inspect};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "halfcell", author, version, about = "Inspect and build halfcell stamps")]
pub struct Cli {
    /// Read editor prefs from DIR instead of the platform config dir
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a base64 stamp and list its records
    Inspect {
        /// Base64 stamp
        stamp: String,
        /// Print the decoded stamp as JSON (the form `encode` reads)
        #[arg(long)]
        json: bool,
    },
    /// Print a stamp's bounds, grid-aligned frame and view box
    Bounds {
        /// Base64 stamp
        stamp: String,
    },
    /// Read a JSON stamp from FILE ("-" for stdin) and print it as base64
    Encode {
        /// JSON stamp file
        file: PathBuf,
    },
}

/// Parse the process arguments and run to stdout.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}

/// Run `cli`, writing results to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Inspect { stamp, json } => {
            let stamp = decode_base64(&stamp)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &stamp)?;
                writeln!(out)?;
            } else {
                let prefs = load_prefs(cli.config_dir.as_deref());
                for record in inspect(&stamp, &prefs) {
                    writeln!(out, "{record}")?;
                }
                writeln!(out, "{} record(s)", stamp.len())?;
            }
        }
        Commands::Bounds { stamp } => {
            let stamp = decode_base64(&stamp)?;
            let prefs = load_prefs(cli.config_dir.as_deref());
            match frame(&stamp, &prefs.grid) {
                Some(frame) => writeln!(out, "{frame}")?,
                None => writeln!(out, "empty stamp")?,
            }
        }
        Commands::Encode { file } => {
            let json = if file == Path::new("-") {
                io::read_to_string(io::stdin()).context("failed to read stdin")?
            } else {
                fs::read_to_string(&file)
                    .with_context(|| format!("failed to read {}", file.display()))?
            };
            writeln!(out, "{}", encode_json(&json)?)?;
        }
    }
    Ok(())
}

/// Saved prefs, or defaults when none are saved or they cannot be read.
fn load_prefs(config_dir: Option<&Path>) -> EditorPrefs {
    let store = match config_dir {
        Some(dir) => FsConfigStore::with_base(dir),
        None => FsConfigStore::new(),
    };
    let loaded = store.and_then(|store| {
        debug!(base = %store.base().display(), "loading editor prefs");
        ConfigService::new(store).load_or_default::<EditorPrefs>(PREFS_KEY)
    });
    loaded.unwrap_or_else(|err| {
        warn!(error = %err, "using default editor prefs");
        EditorPrefs::default()
    })
}
