// File: src/codes.rs
// Purpose: Build message-code candidates for an error, most specific first

use serde::{Deserialize, Serialize};

/// Separator between the parts of a message code.
pub const CODE_SEPARATOR: &str = ".";

/// Where the error code goes in a generated message code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeFormat {
    /// `required.item.itemName`
    #[default]
    #[serde(alias = "prefix")]
    PrefixErrorCode,
    /// `item.itemName.required`
    #[serde(alias = "postfix")]
    PostfixErrorCode,
}

impl CodeFormat {
    fn join(self, error_code: &str, parts: &[&str]) -> String {
        let mut all: Vec<&str> = Vec::with_capacity(parts.len() + 1);
        match self {
            CodeFormat::PrefixErrorCode => {
                all.push(error_code);
                all.extend_from_slice(parts);
            }
            CodeFormat::PostfixErrorCode => {
                all.extend_from_slice(parts);
                all.push(error_code);
            }
        }
        all.retain(|part| !part.is_empty());
        all.join(CODE_SEPARATOR)
    }
}

/// Maps an error code plus its context to the ordered list of lookup keys.
///
/// For an object error: `code.object`, `code`.
/// For a field error: `code.object.field`, `code.field`, `code.type`, `code`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCodesResolver {
    prefix: String,
    format: CodeFormat,
}

impl MessageCodesResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix prepended to every generated code (e.g. `"validation."`).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_format(mut self, format: CodeFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> CodeFormat {
        self.format
    }

    /// Dispatches on whether a field is present.
    pub fn resolve(
        &self,
        error_code: &str,
        object_name: &str,
        field: Option<&str>,
        field_type: Option<&str>,
    ) -> Vec<String> {
        match field {
            Some(field) if !field.is_empty() => {
                self.resolve_field_codes(error_code, object_name, field, field_type)
            }
            _ => self.resolve_object_codes(error_code, object_name),
        }
    }

    pub fn resolve_object_codes(&self, error_code: &str, object_name: &str) -> Vec<String> {
        vec![
            self.post_process(self.format.join(error_code, &[object_name])),
            self.post_process(error_code.to_string()),
        ]
    }

    pub fn resolve_field_codes(
        &self,
        error_code: &str,
        object_name: &str,
        field: &str,
        field_type: Option<&str>,
    ) -> Vec<String> {
        let mut codes = Codes::default();

        let mut fields = Vec::new();
        build_field_list(field, &mut fields);
        for f in &fields {
            codes.push(self.post_process(self.format.join(error_code, &[object_name, f])));
        }

        // `address.city` also gets the `code.city` variants
        if let Some(dot) = field.rfind('.') {
            build_field_list(&field[dot + 1..], &mut fields);
        }
        for f in &fields {
            codes.push(self.post_process(self.format.join(error_code, &[f])));
        }

        if let Some(field_type) = field_type {
            codes.push(self.post_process(self.format.join(error_code, &[field_type])));
        }
        codes.push(self.post_process(error_code.to_string()));
        codes.0
    }

    fn post_process(&self, code: String) -> String {
        if self.prefix.is_empty() {
            code
        } else {
            format!("{}{}", self.prefix, code)
        }
    }
}

/// Insertion-ordered, first occurrence wins.
#[derive(Default)]
struct Codes(Vec<String>);

impl Codes {
    fn push(&mut self, code: String) {
        if !self.0.contains(&code) {
            self.0.push(code);
        }
    }
}

/// `items[0].name` -> `items[0].name`, `items.name`
fn build_field_list(field: &str, out: &mut Vec<String>) {
    out.push(field.to_string());
    let mut plain = field.to_string();
    while let Some(open) = plain.rfind('[') {
        let Some(close) = plain[open..].find(']').map(|i| open + i) else {
            break;
        };
        plain = format!("{}{}", &plain[..open], &plain[close + 1..]);
        out.push(plain.clone());
    }
}
