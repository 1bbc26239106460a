//! # hexed
//!
//! Command-line hex viewer and scripted byte editor.
//!
//! ## Commands
//!
//! - `info`: Show size and content fingerprint
//! - `dump`: Print a hex dump
//! - `find`: Find a byte pattern
//! - `count`: Count pattern occurrences
//! - `inspect`: Decode the bytes at an offset as numbers
//! - `edit`: Apply insert/delete/replace/undo/redo operations and save
//!
//! ## Example
//!
//! ```bash
//! # Where is the first "PNG"?
//! hexed find image.png text:PNG
//!
//! # Patch four bytes, refusing if the file changed underneath us
//! hexed edit firmware.bin -e "replace 0x10 hex:deadbeef"
//!
//! # Decode a big-endian header field
//! hexed inspect image.png 0x10 --big-endian
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{count, dump, edit, find, info, inspect, offset_arg};
use config::Config;

/// Command-line hex viewer and scripted byte editor.
#[derive(Parser, Debug)]
#[command(name = "hexed")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (default: hexed.toml in the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show file size and fingerprint
    Info {
        /// File to read
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a hex dump
    Dump {
        /// File to read
        file: PathBuf,

        /// First byte to show (decimal or 0x hex)
        #[arg(long, short, default_value = "0", value_parser = offset_arg)]
        offset: usize,

        /// Number of bytes to show (default: to end of file)
        #[arg(long, short = 'n', value_parser = offset_arg)]
        length: Option<usize>,
    },

    /// Find a byte pattern and print its offset
    Find {
        /// File to search
        file: PathBuf,

        /// Pattern, optionally prefixed: text:, hex:, bits:, u8: .. u64:
        pattern: String,

        /// Encoding for the whole pattern (text, hex, bits, decimal, u8 .. u64)
        #[arg(long, short)]
        encoding: Option<String>,

        /// Start offset
        #[arg(long, value_parser = offset_arg)]
        from: Option<usize>,

        /// Search toward the start of the file
        #[arg(long, short)]
        backward: bool,

        /// Print every match
        #[arg(long, short)]
        all: bool,
    },

    /// Count pattern occurrences (overlaps included)
    Count {
        /// File to search
        file: PathBuf,

        /// Pattern, optionally prefixed: text:, hex:, bits:, u8: .. u64:
        pattern: String,

        /// Encoding for the whole pattern
        #[arg(long, short)]
        encoding: Option<String>,
    },

    /// Decode the bytes at an offset as integers and floats
    Inspect {
        /// File to read
        file: PathBuf,

        /// Offset to decode (decimal or 0x hex)
        #[arg(value_parser = offset_arg)]
        offset: usize,

        /// Read multi-byte values as big endian
        #[arg(long)]
        big_endian: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Apply edit operations and save
    Edit {
        /// File to edit
        file: PathBuf,

        /// Operation, e.g. "insert 0x10 hex:00ff" (repeatable)
        #[arg(long = "exec", short = 'e')]
        ops: Vec<String>,

        /// File with one operation per line, run before any -e operations
        #[arg(long)]
        script: Option<PathBuf>,

        /// Write the result here instead of back to FILE
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Apply the operations but write nothing
        #[arg(long)]
        dry_run: bool,

        /// Overwrite FILE even if it changed since it was read
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!("Loaded config: {:?}", config);

    match cli.command {
        Commands::Info { file, json } => {
            info::run(&file, &config, json)?;
        }
        Commands::Dump {
            file,
            offset,
            length,
        } => {
            dump::run(&file, &config, offset, length)?;
        }
        Commands::Find {
            file,
            pattern,
            encoding,
            from,
            backward,
            all,
        } => {
            let options = find::FindOptions {
                encoding,
                from,
                backward,
                all,
            };
            find::run(&file, &config, &pattern, &options)?;
        }
        Commands::Count {
            file,
            pattern,
            encoding,
        } => {
            count::run(&file, &config, &pattern, encoding.as_deref())?;
        }
        Commands::Inspect {
            file,
            offset,
            big_endian,
            json,
        } => {
            inspect::run(&file, &config, offset, big_endian, json)?;
        }
        Commands::Edit {
            file,
            ops,
            script,
            output,
            dry_run,
            force,
        } => {
            let options = edit::EditOptions {
                ops,
                script,
                output,
                dry_run,
                force,
            };
            edit::run(&file, &config, &options)?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` is honored when set; otherwise the default is `warn`. `-v`
/// and `-vv` force `debug` and `trace`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let mut filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    if verbose > 0 {
        filter = filter.add_directive(level.into());
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
