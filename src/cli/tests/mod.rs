//! Unit tests for CLI module
//!
//! Commands run against temporary files; output is captured in memory.

#![allow(clippy::unwrap_used)]

use std::{fs, path::Path, thread, time::Duration};

use clap::Parser;
use toml::Value;

use crate::cli::{Cli, CliError, Commands, Format, execute, formatting::format_value, parse_value};

fn cli(file: &Path, args: &[&str]) -> Cli {
    let file = file.to_string_lossy().to_string();
    let mut argv = vec!["confsync", "--file", file.as_str()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn run(file: &Path, args: &[&str]) -> Result<String, CliError> {
    let mut out = Vec::new();
    execute(&cli(file, args), &mut out)
}

#[test]
fn parse_value_detects_types() {
    assert_eq!(parse_value("true"), Value::Boolean(true));
    assert_eq!(parse_value("42"), Value::Integer(42));
    assert_eq!(parse_value("-2.5"), Value::Float(-2.5));
    assert_eq!(parse_value("localhost"), Value::String("localhost".to_string()));
}

#[test]
fn format_value_prints_strings_bare() {
    assert_eq!(format_value(&Value::String("plain".to_string())), "plain");
    assert_eq!(format_value(&Value::Boolean(false)), "false");
    assert_eq!(format_value(&Value::Integer(-7)), "-7");
}

#[test]
fn parses_global_flags() {
    let parsed = cli(
        Path::new("/tmp/config.json"),
        &["--format", "json", "--key", "0123456789abcdef", "get", "server.port"],
    );

    assert_eq!(parsed.format, Format::Json);
    assert_eq!(parsed.key.as_deref(), Some("0123456789abcdef"));
    assert!(matches!(parsed.command, Commands::Get { ref path } if path == "server.port"));
}

#[test]
fn set_then_get_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("store.toml");

    let output = run(&file, &["set", "server.port", "8080"]).unwrap();
    assert!(output.contains("version 0"), "{output}");

    let output = run(&file, &["set", "server.host", "example.org"]).unwrap();
    assert!(output.contains("version 1"), "{output}");

    assert_eq!(run(&file, &["get", "server.port"]).unwrap(), "8080");
    assert_eq!(run(&file, &["get", "server.host"]).unwrap(), "example.org");
}

#[test]
fn set_with_same_value_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("store.toml");
    run(&file, &["set", "enabled", "true"]).unwrap();

    let output = run(&file, &["set", "enabled", "true"]).unwrap();

    assert!(output.contains("nothing written"), "{output}");
    assert!(run(&file, &["show"]).unwrap().contains("version = 0"));
}

#[test]
fn init_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("store.toml");

    let output = run(&file, &["init"]).unwrap();

    assert!(file.exists());
    assert!(output.contains("version = 0"), "{output}");
}

#[test]
fn get_unknown_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("store.toml");
    run(&file, &["set", "a", "1"]).unwrap();

    assert!(matches!(
        run(&file, &["get", "b.c"]),
        Err(CliError::Config(_))
    ));
}

#[test]
fn obfuscated_store_needs_key() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("store.bin");
    let key = ["--key", "0123456789abcdef0123456789abcdef"];

    let mut args = key.to_vec();
    args.extend(["set", "token", "very-secret-token-value"]);
    run(&file, &args).unwrap();

    assert!(!fs::read(&file).unwrap().starts_with(b"token"));
    assert!(run(&file, &["get", "token"]).is_err());

    let mut args = key.to_vec();
    args.extend(["get", "token"]);
    assert_eq!(run(&file, &args).unwrap(), "very-secret-token-value");
}

#[test]
fn json_format_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("store.json");

    run(&file, &["--format", "json", "set", "name", "demo"]).unwrap();

    let raw = fs::read_to_string(&file).unwrap();
    assert!(raw.trim_start().starts_with('{'), "{raw}");
    assert_eq!(
        run(&file, &["--format", "json", "get", "name"]).unwrap(),
        "demo"
    );
}

#[test]
fn watch_reports_initial_load_and_stops() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("store.toml");
    run(&file, &["set", "name", "watched"]).unwrap();

    let mut out = Vec::new();
    let summary = execute(
        &cli(&file, &["watch", "--interval-ms", "1", "--count", "2"]),
        &mut out,
    )
    .unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed.matches("configuration changed").count(), 1);
    assert_eq!(summary, "Watch ended after 2 polls");
}

#[test]
fn watch_of_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("absent.toml");

    assert!(matches!(
        run(&file, &["watch", "--count", "1"]),
        Err(CliError::Config(crate::config_store::ConfigError::Stat { .. }))
    ));
}

#[test]
fn watch_rejects_zero_count() {
    let parsed = Cli::try_parse_from([
        "confsync",
        "--file",
        "/tmp/config.toml",
        "watch",
        "--count",
        "0",
    ]);

    assert!(parsed.is_err());
}

#[test]
fn watch_warns_on_version_conflict_and_keeps_polling() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("store.toml");
    run(&file, &["set", "name", "watched"]).unwrap();

    let editor = {
        let file = file.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(150));
            fs::write(&file, "version = 7\nname = \"edited elsewhere\"\n").unwrap();
        })
    };

    let mut out = Vec::new();
    let summary = execute(
        &cli(&file, &["watch", "--interval-ms", "500", "--count", "3"]),
        &mut out,
    )
    .unwrap();
    editor.join().unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(
        printed.contains("expected 0, found 7"),
        "{printed}"
    );
    assert_eq!(summary, "Watch ended after 3 polls");
    assert_eq!(run(&file, &["get", "name"]).unwrap(), "watched");
}

#[test]
fn non_integer_version_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("store.toml");
    fs::write(&file, "version = \"3\"\nname = \"x\"\n").unwrap();

    assert!(matches!(
        run(&file, &["get", "name"]),
        Err(CliError::Config(crate::config_store::ConfigError::Decode { .. }))
    ));
}
