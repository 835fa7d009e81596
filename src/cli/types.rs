use std::io;

use thiserror::Error;

use crate::config_store::ConfigError;

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// An error occurred in the configuration store.
    ///
    /// Wraps sync failures such as unreadable files, version conflicts
    /// or invalid document paths.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing command output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Type alias for command execution results.
///
/// Commands return the text to print on success.
pub type CommandResult = Result<String, CliError>;
