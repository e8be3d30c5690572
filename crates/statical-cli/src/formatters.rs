//! Output formatters for CLI commands.
//!
//! Provides consistent formatting across all CLI commands for JSON, text, and pretty output modes.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::types::OutputFormat;

/// Format data according to the specified output format.
///
/// # Arguments
///
/// * `data` - The data to format (must be serializable)
/// * `format` - The output format (Json, Text, Pretty)
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use statical_cli::formatters::format_output;
/// use statical_cli::types::OutputFormat;
///
/// #[derive(Serialize)]
/// struct Entry {
///     name: String,
///     size: u64,
/// }
///
/// let entry = Entry {
///     name: "hello.txt".to_string(),
///     size: 2,
/// };
///
/// let output = format_output(&entry, OutputFormat::Json)?;
/// assert!(output.contains("\"name\""));
///
/// let output = format_output(&entry, OutputFormat::Text)?;
/// assert_eq!(output, "name\thello.txt\nsize\t2");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON.
    ///
    /// Uses pretty-printing with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(json)
    }

    /// Format data as compact JSON (no formatting).
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string(data)?;
        Ok(json)
    }
}

/// Plain text output formatting.
///
/// Line oriented and uncolored so output can be piped into `cut`, `awk`
/// or `grep`.
pub mod text {
    use super::{Result, Serialize, Value, json};

    /// Format data as plain text.
    ///
    /// Arrays print one element per line, objects print one `key<TAB>value`
    /// line per field, and elements that are objects print their values
    /// tab-separated in field order. Anything nested deeper falls back to
    /// compact JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let lines: Vec<String> = match &value {
            Value::Array(items) => items.iter().map(row).collect::<Result<_>>()?,
            Value::Object(fields) => fields
                .iter()
                .map(|(key, field)| Ok(format!("{key}\t{}", scalar(field)?)))
                .collect::<Result<_>>()?,
            other => vec![scalar(other)?],
        };
        Ok(lines.join("\n"))
    }

    fn row(item: &Value) -> Result<String> {
        match item {
            Value::Object(fields) => {
                let cells = fields.values().map(scalar).collect::<Result<Vec<_>>>()?;
                Ok(cells.join("\t"))
            }
            other => scalar(other),
        }
    }

    fn scalar(value: &Value) -> Result<String> {
        match value {
            Value::Null => Ok("-".to_string()),
            Value::String(s) => Ok(s.clone()),
            Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
            Value::Array(_) | Value::Object(_) => json::format_compact(value),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value};

    /// Format data as colorized, human-readable output.
    ///
    /// Objects render as aligned `key: value` blocks, arrays as `-` items.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&mut out, &value, 0);
        Ok(out.trim_end().to_string())
    }

    fn write_value(out: &mut String, value: &Value, indent: usize) {
        match value {
            Value::Array(items) if items.is_empty() => out.push_str(&format!("{}\n", "(none)".dimmed())),
            Value::Array(items) => {
                for item in items {
                    out.push_str(&"  ".repeat(indent));
                    out.push_str(&format!("{} ", "-".dimmed()));
                    if item.is_object() {
                        out.push('\n');
                        write_value(out, item, indent + 1);
                    } else {
                        out.push_str(&format!("{}\n", scalar(item)));
                    }
                }
            }
            Value::Object(fields) => {
                let width = fields.keys().map(String::len).max().unwrap_or(0);
                for (key, field) in fields {
                    out.push_str(&"  ".repeat(indent));
                    out.push_str(&format!("{:width$}  ", key.blue().bold()));
                    if field.is_object() || matches!(field, Value::Array(items) if !items.is_empty()) {
                        out.push('\n');
                        write_value(out, field, indent + 1);
                    } else if field.is_array() {
                        out.push_str(&format!("{}\n", "(none)".dimmed()));
                    } else {
                        out.push_str(&format!("{}\n", scalar(field)));
                    }
                }
            }
            other => out.push_str(&format!("{}\n", scalar(other))),
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "-".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(_) | Value::Object(_) => value.to_string(),
        }
    }
}
