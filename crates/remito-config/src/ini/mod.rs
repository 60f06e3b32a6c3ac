//! INI-style configuration parsing and serialization
//!
//! The format is the usual `[section]` / `key=value` text. Parsing is
//! lenient: anything that cannot be read as a header or a pair is skipped,
//! so a damaged file degrades to fewer entries instead of an error.

use camino::Utf8Path;
use remito_core::error::RemitoError;
use remito_core::types::{ConfigMapping, ConfigValue};
use tracing::debug;

use crate::ConfigResult;

/// Value stored for a bare `key` line without `=`
const FLAG_VALUE: &str = "true";

/// Parse INI text into a configuration mapping
///
/// - `;` and `#` start comment lines
/// - `[name]` opens a section; dotted names are kept verbatim and a
///   trailing comment is allowed
/// - keys before the first header become top-level scalars
/// - unquoted values lose trailing `;`/`#` comments
pub fn parse_ini(content: &str) -> ConfigMapping {
    let mut mapping = ConfigMapping::new();
    let mut current_section: Option<String> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = parse_section_header(line) {
            mapping.section_mut(name);
            current_section = Some(name.to_string());
            continue;
        }

        let (key, value) = match line.split_once('=') {
            Some((key, value)) => (unquote(key.trim()), unquote(value.trim())),
            None => (unquote(line), FLAG_VALUE.to_string()),
        };

        if key.is_empty() {
            debug!(line = index + 1, "skipping INI line without a key");
            continue;
        }

        match &current_section {
            Some(section) => {
                mapping.section_mut(section).insert(key, value);
            }
            None => {
                mapping.insert(key, value);
            }
        }
    }

    mapping
}

/// Serialize a mapping back to INI text
///
/// Top-level scalars come first since they cannot follow a section header.
pub fn serialize_ini(mapping: &ConfigMapping) -> String {
    let mut output = String::new();

    for (key, value) in mapping {
        if let ConfigValue::Scalar(value) = value {
            push_pair(&mut output, key, value);
        }
    }

    for (name, value) in mapping {
        if let ConfigValue::Section(section) = value {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push('[');
            output.push_str(name);
            output.push_str("]\n");
            for (key, value) in section {
                push_pair(&mut output, key, value);
            }
        }
    }

    output
}

/// Load and parse an INI file
///
/// A missing or unreadable file is an error here; the loader decides how
/// to degrade.
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<ConfigMapping> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RemitoError::io(format!("Failed to read {}", path), e))?;

    Ok(parse_ini(&content))
}

/// Section name of a `[name]` line, which may carry a trailing comment
fn parse_section_header(line: &str) -> Option<&str> {
    let (name, rest) = line.strip_prefix('[')?.split_once(']')?;
    let name = name.trim();
    if name.is_empty() || !is_comment_or_empty(rest) {
        None
    } else {
        Some(name)
    }
}

fn is_comment_or_empty(text: &str) -> bool {
    let text = text.trim_start();
    text.is_empty() || text.starts_with(';') || text.starts_with('#')
}

/// Strip outer quotes, or an inline comment from an unquoted value
///
/// A quoted value keeps everything up to its closing quote; only a comment
/// may follow it.
fn unquote(value: &str) -> String {
    if let Some(quote) = value.chars().next().filter(|c| matches!(c, '"' | '\'')) {
        let body = &value[1..];
        if let Some(end) = body.find(quote) {
            if is_comment_or_empty(&body[end + 1..]) {
                return body[..end].to_string();
            }
        }
    }

    let mut result = String::with_capacity(value.len());
    let mut escaped = false;
    for ch in value.chars() {
        if escaped {
            if !matches!(ch, ';' | '#' | '\\') {
                result.push('\\');
            }
            result.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            ';' | '#' => break,
            _ => result.push(ch),
        }
    }
    if escaped {
        result.push('\\');
    }

    result.trim().to_string()
}

fn push_pair(output: &mut String, key: &str, value: &str) {
    output.push_str(&quote_if_needed(key));
    output.push('=');
    output.push_str(&quote_if_needed(value));
    output.push('\n');
}

fn quote_if_needed(value: &str) -> String {
    let needs_quotes = value.contains(|c: char| matches!(c, ';' | '#' | '=' | '\\'))
        || value.starts_with(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == '[')
        || value.ends_with(char::is_whitespace);

    if needs_quotes && !value.contains('"') {
        format!("\"{}\"", value)
    } else if needs_quotes {
        format!("'{}'", value)
    } else {
        value.to_string()
    }
}
