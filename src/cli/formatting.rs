//! Formatting utilities for CLI output.

use toml::Value;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats warnings with yellow styling
pub fn format_warning(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::YELLOW, text, Colors::RESET)
}

/// Formats a TOML value for CLI output.
///
/// Strings are printed bare so they can be piped; everything else uses its
/// inline TOML form.
///
/// # Examples
///
/// ```
/// use confsync::cli::formatting::format_value;
///
/// let value = toml::Value::String("hello".to_string());
/// assert_eq!(format_value(&value), "hello");
///
/// let value = toml::Value::Integer(42);
/// assert_eq!(format_value(&value), "42");
/// ```
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
