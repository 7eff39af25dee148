// File: src/messages.rs
// Purpose: Read-only message catalog and code-chain message resolution

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::model::MessageSourceResolvable;
use crate::value::Value;

/// Key -> template catalog. Templates use `{0}`, `{1}`, ... placeholders.
///
/// Resolution never fails: when no candidate code is present, the default
/// message is used, then the last candidate code itself.
#[derive(Debug, Clone, Default)]
pub struct MessageSource {
    messages: HashMap<String, String>,
}

impl MessageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a properties-style catalog.
    pub fn from_properties(content: &str) -> Self {
        Self {
            messages: parse_properties(content),
        }
    }

    /// Load a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read message catalog: {:?}", path))?;
        Ok(Self::from_properties(&content))
    }

    /// Add the entries of `other` that are not already present.
    ///
    /// Catalogs are merged in basename order, so the first one wins.
    pub fn merge(&mut self, other: MessageSource) {
        for (key, template) in other.messages {
            self.messages.entry(key).or_insert(template);
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(key.into(), template.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Look up a single code and format it.
    pub fn get_message(&self, code: &str, arguments: &[Value]) -> Option<String> {
        let template = self.messages.get(code)?;
        Some(self.format(template, arguments))
    }

    /// Walk `codes` in order and return the first hit.
    pub fn resolve_codes(&self, codes: &[String], arguments: &[Value], fallback: Option<&str>) -> String {
        if let Some(message) = codes.iter().find_map(|code| self.get_message(code, arguments)) {
            return message;
        }
        if let Some(fallback) = fallback {
            return self.format(fallback, arguments);
        }
        tracing::trace!("No message found under codes {:?}", codes);
        codes.last().cloned().unwrap_or_default()
    }

    pub fn resolve(&self, resolvable: &(impl MessageSourceResolvable + ?Sized)) -> String {
        self.resolve_codes(
            resolvable.codes(),
            resolvable.arguments(),
            resolvable.default_message(),
        )
    }

    fn format(&self, template: &str, arguments: &[Value]) -> String {
        // Templates without arguments are not run through the formatter,
        // so a lone quote stays a quote.
        if arguments.is_empty() {
            return template.to_string();
        }
        let rendered: Vec<String> = arguments.iter().map(|arg| self.render_argument(arg)).collect();
        format_message(template, &rendered)
    }

    fn render_argument(&self, arg: &Value) -> String {
        match arg {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => group_thousands(*n),
            Value::Text(s) => s.clone(),
            Value::Message(resolvable) => self.resolve(resolvable),
        }
    }
}

/// Positional formatting with message-format quoting rules.
fn format_message(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    out.push('\'');
                } else {
                    quoted = !quoted;
                }
            }
            '{' if !quoted => {
                let mut index = String::new();
                let mut closed = false;
                for d in chars.by_ref() {
                    if d == '}' {
                        closed = true;
                        break;
                    }
                    index.push(d);
                }
                match index.trim().parse::<usize>().ok().and_then(|i| args.get(i)) {
                    Some(arg) if closed => out.push_str(arg),
                    _ => {
                        out.push('{');
                        out.push_str(&index);
                        if closed {
                            out.push('}');
                        }
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// `10000` -> `10,000`
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, d) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(d);
    }
    grouped
}

/// Parse `key=value` lines. `#`/`!` start comments, `:` and whitespace also
/// separate, and an odd number of trailing backslashes continues the logical
/// line. Keys and values are unescaped after splitting.
fn parse_properties(content: &str) -> HashMap<String, String> {
    let mut messages = HashMap::new();
    let mut logical = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if logical.is_empty() && (trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!')) {
            continue;
        }
        if continues(trimmed) {
            logical.push_str(&trimmed[..trimmed.len() - 1]);
            continue;
        }
        logical.push_str(trimmed);
        let (key, value) = split_entry(&logical);
        messages.insert(key, value);
        logical.clear();
    }
    if !logical.is_empty() {
        let (key, value) = split_entry(&logical);
        messages.insert(key, value);
    }
    messages
}

fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

const BLANKS: [char; 3] = [' ', '\t', '\u{c}'];

fn split_entry(line: &str) -> (String, String) {
    let mut key_end = line.len();
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(BLANKS);
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (unescape(&line[..key_end]), unescape(rest.trim_start_matches(BLANKS)))
}

/// Decode `\t`, `\n`, `\r`, `\f` and `\uXXXX` (surrogate pairs included);
/// any other escaped character stands for itself.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        let decoded = match c {
            '\\' => match chars.next() {
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    match u16::from_str_radix(&hex, 16) {
                        Ok(unit) if hex.len() == 4 => {
                            units.push(unit);
                            continue;
                        }
                        // malformed escapes are kept as written
                        _ => {
                            flush_utf16(&mut units, &mut out);
                            out.push_str("\\u");
                            out.push_str(&hex);
                            continue;
                        }
                    }
                }
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\u{c}',
                Some(other) => other,
                None => continue,
            },
            other => other,
        };
        flush_utf16(&mut units, &mut out);
        out.push(decoded);
    }
    flush_utf16(&mut units, &mut out);
    out
}

fn flush_utf16(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(char::decode_utf16(units.drain(..)).map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)));
}
