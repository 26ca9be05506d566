//! Front-matter parsing
//!
//! Content files may open with a small metadata block:
//!
//! ```text
//! ---
//! title: My Project
//! tags: [rust, "web"]
//! year: 2024
//! ---
//! Markdown body...
//! ```
//!
//! This is not YAML. Each line is a single `key: value` pair, and values are
//! coerced to strings, numbers, booleans, or flat lists of strings. Parsing never
//! fails: anything malformed degrades to "no front-matter".

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::helpers::parse_date;

/// Marker line that opens and closes a front-matter block
pub const DELIMITER: &str = "---";

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
}

impl MetaValue {
    /// Coerce a trimmed raw value.
    ///
    /// Precedence: bracketed list, boolean literal, number, quoted string, plain string.
    pub fn coerce(raw: &str) -> Self {
        if raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']') {
            return MetaValue::List(parse_list(&raw[1..raw.len() - 1]));
        }

        match raw {
            "true" => return MetaValue::Bool(true),
            "false" => return MetaValue::Bool(false),
            _ => {}
        }

        if let Some(number) = parse_number(raw) {
            return number;
        }

        MetaValue::String(strip_quotes(raw).to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Tag-style view: lists keep their non-empty items, a bare string is one tag
    pub fn to_tags(&self) -> Vec<String> {
        match self {
            MetaValue::List(items) => items.iter().filter(|t| !t.is_empty()).cloned().collect(),
            MetaValue::String(s) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// Numeric view of the value; integers widen to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Integer(i) => Some(*i as f64),
            MetaValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::String(s) => f.write_str(s),
            MetaValue::Integer(i) => write!(f, "{}", i),
            MetaValue::Float(x) => write!(f, "{}", x),
            MetaValue::Bool(b) => write!(f, "{}", b),
            MetaValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Parsed front-matter together with the remaining markdown body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    /// Metadata keyed by field name
    pub meta: HashMap<String, MetaValue>,
    /// Raw markdown after the closing delimiter
    pub body: String,
}

impl FrontMatter {
    /// Split `content` into metadata and body.
    ///
    /// Content without an opening delimiter, or with one that is never closed,
    /// comes back untouched as the body with empty metadata.
    pub fn parse(content: &str) -> Self {
        if !content.starts_with(DELIMITER) {
            return Self::passthrough(content);
        }

        let lines: Vec<&str> = content.split('\n').collect();
        let close = match lines
            .iter()
            .skip(1)
            .position(|line| line.trim() == DELIMITER)
        {
            Some(offset) => offset + 1,
            None => return Self::passthrough(content),
        };

        let mut meta = HashMap::new();
        for line in &lines[1..close] {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            // Later keys overwrite earlier ones
            meta.insert(key.trim().to_string(), MetaValue::coerce(value.trim()));
        }

        Self {
            meta,
            body: lines[close + 1..].join("\n"),
        }
    }

    fn passthrough(content: &str) -> Self {
        Self {
            meta: HashMap::new(),
            body: content.to_string(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.meta.get(key)
    }

    /// String value of `key`, skipping empty strings
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(MetaValue::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(MetaValue::as_list)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(MetaValue::as_bool)
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn tags(&self) -> Vec<String> {
        self.get("tags").map(MetaValue::to_tags).unwrap_or_default()
    }

    /// The `date` field, if it holds a recognizable date
    pub fn date(&self) -> Option<NaiveDate> {
        self.get("date").and_then(|v| parse_date(&v.to_string()))
    }
}

/// Parse the inside of `[a, 'b', "c"]`
fn parse_list(inner: &str) -> Vec<String> {
    if inner.trim().is_empty() {
        return Vec::new();
    }

    inner
        .split(',')
        .map(|item| strip_quotes(item.trim()).to_string())
        .collect()
}

/// Integer if the whole string is an `i64`, otherwise a finite float
fn parse_number(raw: &str) -> Option<MetaValue> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(i) = raw.parse::<i64>() {
        return Some(MetaValue::Integer(i));
    }

    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(MetaValue::Float(f)),
        _ => None,
    }
}

/// Remove one layer of matching single or double quotes
fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}
