//! confsync - inspect and edit versioned configuration files from the shell.

use std::{error::Error, io, process};

use clap::Parser;
use confsync::{
    cli::{Cli, execute, formatting::format_error},
    tracing_config,
};
use tracing::debug;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_config::init()?;

    let cli = Cli::parse();
    debug!(file = %cli.file.display(), "running command");

    let result = {
        let mut stdout = io::stdout().lock();
        execute(&cli, &mut stdout)
    };

    match result {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{}", output.trim_end());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
