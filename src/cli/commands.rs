use std::{io::Write, thread, time::Duration};

use tracing::instrument;

use crate::{
    config::{Document, JsonSerializer, Serializer, TomlSerializer, VersionedConfig},
    config_store::{ConfigError, Manager},
};

use super::{
    Cli, CliError, CommandResult, Commands, Format,
    formatting::{format_value, format_warning},
};

/// Runs the parsed command line, streaming `watch` output to `out`.
///
/// # Errors
/// Returns `CliError` if the store cannot be read or written, the path is
/// invalid, or `out` cannot be written.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> CommandResult {
    match cli.format {
        Format::Toml => run(open(cli, TomlSerializer), &cli.command, out),
        Format::Json => run(open(cli, JsonSerializer), &cli.command, out),
    }
}

/// Parses a command-line value, detecting bool, integer and float before
/// falling back to a string.
pub fn parse_value(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        return toml::Value::Boolean(b);
    }

    if let Ok(i) = raw.parse::<i64>() {
        return toml::Value::Integer(i);
    }

    if let Ok(f) = raw.parse::<f64>() {
        return toml::Value::Float(f);
    }

    toml::Value::String(raw.to_string())
}

fn open<S: Serializer>(cli: &Cli, serializer: S) -> Manager<Document, S> {
    let manager = Manager::new(&cli.file).with_serializer(serializer);

    match &cli.key {
        Some(key) => manager.with_obfuscation_key(key.as_str()),
        None => manager,
    }
}

fn run<S: Serializer>(
    mut manager: Manager<Document, S>,
    command: &Commands,
    out: &mut dyn Write,
) -> CommandResult {
    match command {
        Commands::Init => render(&manager.init()?),
        Commands::Show => render(&load(&mut manager)?),
        Commands::Get { path } => {
            let document = load(&mut manager)?;
            Ok(format_value(document.get_by_path(path)?))
        }
        Commands::Set { path, value } => set(&mut manager, path, value),
        Commands::Watch { interval_ms, count } => watch(
            &mut manager,
            Duration::from_millis(*interval_ms),
            *count,
            out,
        ),
    }
}

fn load<S: Serializer>(manager: &mut Manager<Document, S>) -> Result<Document, CliError> {
    manager.reload()?;
    Ok(manager.current()?.unwrap_or_default())
}

fn render(document: &Document) -> CommandResult {
    toml::to_string_pretty(document.as_table()).map_err(|e| {
        CliError::Config(ConfigError::Encode {
            details: e.to_string(),
        })
    })
}

#[instrument(skip(manager), fields(file = %manager.path().display()))]
fn set<S: Serializer>(manager: &mut Manager<Document, S>, path: &str, raw: &str) -> CommandResult {
    if manager.path().exists() {
        manager.reload()?;
    }

    let value = parse_value(raw);
    let mut document = manager.current()?.unwrap_or_default();
    document.set_by_path(path, value.clone())?;

    if !manager.save(document)? {
        return Ok(format!(
            "'{}' is already {}; nothing written",
            path,
            format_value(&value)
        ));
    }

    Ok(format!(
        "Set '{}' to {} (version {})",
        path,
        format_value(&value),
        manager.version().unwrap_or_default()
    ))
}

fn watch<S: Serializer>(
    manager: &mut Manager<Document, S>,
    interval: Duration,
    count: Option<u64>,
    out: &mut dyn Write,
) -> CommandResult {
    let mut polls: u64 = 0;

    loop {
        match manager.reload() {
            Ok(true) => {
                let document = manager.current()?.unwrap_or_default();
                writeln!(out, "version {}: configuration changed", document.version())?;
            }
            Ok(false) => {}
            Err(e) if e.is_version_conflict() => {
                writeln!(out, "{}", format_warning(&e.to_string()))?;
            }
            Err(e) => return Err(e.into()),
        }

        polls += 1;
        if count.is_some_and(|limit| polls >= limit) {
            break;
        }

        thread::sleep(interval);
    }

    Ok(format!("Watch ended after {polls} polls"))
}
