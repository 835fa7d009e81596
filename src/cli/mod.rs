//! Command-line interface for inspecting and editing store files.
//!
//! Every invocation builds a fresh [`Manager`](crate::config_store::Manager)
//! over a schema-less [`Document`](crate::config::Document), so any store
//! file can be read or edited without knowing its concrete type.

mod commands;
pub mod formatting;
mod types;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use commands::{execute, parse_value};
pub use types::{CliError, CommandResult};

/// Inspect and edit versioned, optionally obfuscated configuration files.
#[derive(Debug, Parser)]
#[command(name = "confsync", version)]
pub struct Cli {
    /// Configuration file to operate on
    #[arg(long, short)]
    pub file: PathBuf,

    /// Obfuscation secret; its UTF-8 bytes must be 16, 24 or 32 long
    #[arg(long, env = "CONFSYNC_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Encoding of the file on disk
    #[arg(long, value_enum, default_value = "toml")]
    pub format: Format,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// On-disk encodings selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Pretty-printed TOML
    Toml,
    /// Pretty-printed JSON
    Json,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load the file, creating it from defaults if it does not exist
    Init,

    /// Print the whole configuration
    Show,

    /// Print the value at a dot-separated path
    Get {
        /// Configuration path (e.g. "server.port")
        path: String,
    },

    /// Set the value at a dot-separated path and save
    Set {
        /// Configuration path (e.g. "server.port")
        path: String,
        /// New value; bool, integer and float are detected, anything else is a string
        value: String,
    },

    /// Poll the file and report changes
    Watch {
        /// Delay between polls in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
        /// Stop after this many polls (at least one)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,
    },
}
