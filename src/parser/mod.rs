//! Markdown post parser.
//!
//! Pure functions that turn the text of a markdown file into a [`Post`].
//! Front matter is accepted in two dialects:
//!
//! - `---` fenced, YAML-style `key: value` lines with quoted strings,
//!   inline `[a, b]` lists, and `- item` block lists
//! - `+++` fenced TOML
//!
//! Both dialects are normalised into a JSON object and deserialized into the
//! same raw struct, so field names and defaults are defined once.

pub mod blocks;

pub use blocks::{first_code_block, split_blocks, BodyBlock};

use crate::model::{PaletteColor, ParseError, Post, PostMeta, PostType, Slug};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

const YAML_FENCE: &str = "---";
const TOML_FENCE: &str = "+++";

/// Raw front matter as written by authors.
#[derive(Debug, Deserialize)]
struct RawFrontMatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, rename = "type")]
    post_type: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    video: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, rename = "wingetId", alias = "winget_id")]
    winget_id: Option<String>,
}

/// Front matter dialect, chosen by the opening fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Yaml,
    Toml,
}

/// Parse a markdown file into a post. The slug is the file stem.
///
/// # Errors
///
/// Returns a [`ParseError`] naming `path` when the front matter is missing,
/// unterminated, malformed, or lacks a title.
pub fn parse_post(path: &Path, raw: &str) -> Result<Post, ParseError> {
    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| Slug::new(s).ok())
        .ok_or_else(|| ParseError::InvalidSlug {
            path: path.to_path_buf(),
        })?;

    let (dialect, front_matter, body) = split_front_matter(path, raw)?;
    let fields = match dialect {
        Dialect::Yaml => parse_yaml_fields(front_matter),
        Dialect::Toml => parse_toml_fields(path, front_matter)?,
    };

    let raw_meta: RawFrontMatter =
        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            ParseError::InvalidFrontMatter {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

    let meta = build_meta(path, raw_meta)?;
    Ok(Post::new(slug, meta, body))
}

/// Split `raw` into dialect, front matter text, and body.
fn split_front_matter<'a>(
    path: &Path,
    raw: &'a str,
) -> Result<(Dialect, &'a str, &'a str), ParseError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = raw.split_inclusive('\n');
    let first = lines.next().unwrap_or_default();
    let (dialect, fence) = match first.trim_end() {
        YAML_FENCE => (Dialect::Yaml, YAML_FENCE),
        TOML_FENCE => (Dialect::Toml, TOML_FENCE),
        _ => {
            return Err(ParseError::MissingFrontMatter {
                path: path.to_path_buf(),
            })
        }
    };

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == fence {
            let front_matter = &raw[start..offset];
            let body = raw[offset + line.len()..]
                .trim_start_matches(['\r', '\n'])
                .trim_end();
            return Ok((dialect, front_matter, body));
        }
        offset += line.len();
    }

    Err(ParseError::UnterminatedFrontMatter {
        path: path.to_path_buf(),
    })
}

/// Interpret YAML-style `key: value` lines.
///
/// Lines that match no rule are ignored.
fn parse_yaml_fields(front_matter: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    let mut pending_list: Option<(String, Vec<Value>)> = None;

    for line in front_matter.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix('-')) {
            if let Some((_, items)) = pending_list.as_mut() {
                items.push(Value::String(unquote(item.trim()).to_string()));
            } else {
                debug!(line = trimmed, "List item outside of a list key, ignoring");
            }
            continue;
        }

        if let Some((key, items)) = pending_list.take() {
            if !items.is_empty() {
                fields.insert(key, Value::Array(items));
            }
        }

        let Some((key, value)) = split_key_value(trimmed) else {
            debug!(line = trimmed, "Unrecognised front matter line, ignoring");
            continue;
        };

        if value.is_empty() {
            pending_list = Some((key.to_string(), Vec::new()));
        } else if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            let items = inner
                .split(',')
                .map(|item| unquote(item.trim()))
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect();
            fields.insert(key.to_string(), Value::Array(items));
        } else {
            fields.insert(key.to_string(), Value::String(unquote(value).to_string()));
        }
    }

    if let Some((key, items)) = pending_list {
        if !items.is_empty() {
            fields.insert(key, Value::Array(items));
        }
    }

    fields
}

/// Split `key: value` where key is `[A-Za-z0-9_]+`.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let valid_key = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid_key.then(|| (key, value.trim()))
}

/// Strip one pair of matching single or double quotes.
fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse TOML front matter and convert it to JSON values.
fn parse_toml_fields(path: &Path, front_matter: &str) -> Result<Map<String, Value>, ParseError> {
    let table: toml::Table =
        toml::from_str(front_matter).map_err(|e| ParseError::InvalidFrontMatter {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

/// TOML datetimes become strings so `date` deserializes the same way in both dialects.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Validate raw fields into display metadata.
fn build_meta(path: &Path, raw: RawFrontMatter) -> Result<PostMeta, ParseError> {
    let title = raw.title.ok_or_else(|| ParseError::MissingField {
        path: path.to_path_buf(),
        field: "title",
    })?;

    let post_type = match raw.post_type.as_deref() {
        None => PostType::default(),
        Some(t) => PostType::parse(t).ok_or_else(|| ParseError::InvalidFrontMatter {
            path: path.to_path_buf(),
            reason: format!("unknown type `{t}`"),
        })?,
    };

    let date = match raw.date.as_deref() {
        None => None,
        Some(d) => Some(parse_date(d).ok_or_else(|| ParseError::InvalidFrontMatter {
            path: path.to_path_buf(),
            reason: format!("invalid date `{d}`"),
        })?),
    };

    let color = raw.color.as_deref().and_then(|c| {
        let parsed = PaletteColor::parse(c);
        if parsed.is_none() {
            debug!(path = %path.display(), color = c, "Unknown palette color, ignoring");
        }
        parsed
    });

    Ok(PostMeta {
        title,
        date,
        tags: raw.tags,
        post_type,
        icon: non_empty(raw.icon),
        color,
        image: non_empty(raw.image),
        video: non_empty(raw.video),
        url: non_empty(raw.url),
        winget_id: non_empty(raw.winget_id),
    })
}

/// Accept `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
