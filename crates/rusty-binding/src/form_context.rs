// File: src/form_context.rs
// Purpose: Rendered messages and redisplay values for re-showing a rejected form

use serde::Serialize;
use std::collections::HashMap;

use crate::messages::MessageSource;
use crate::result::BindingResult;

/// What a view needs to redraw a form after a failed pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContext {
    /// Field name to resolved messages, in recording order
    pub errors: HashMap<String, Vec<String>>,
    /// Resolved object-level messages
    pub global_errors: Vec<String>,
    /// Field name to the text to put back into the input
    pub values: HashMap<String, String>,
}

impl FormContext {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve every error of `result` against `messages`.
    ///
    /// A field gets a prefill value unless its error did not track the
    /// submitted input or the value is null.
    pub fn from_result(result: &BindingResult, messages: &MessageSource) -> Self {
        let mut context = Self::empty();

        for error in result.field_errors() {
            context
                .errors
                .entry(error.field.clone())
                .or_default()
                .push(messages.resolve(error));
        }
        context.global_errors = result
            .global_errors()
            .into_iter()
            .map(|error| messages.resolve(error))
            .collect();

        for field in result.field_names() {
            match result.field_value(field) {
                Some(value) if !value.is_null() => {
                    context.values.insert(field.to_string(), value.to_string());
                }
                _ => {}
            }
        }
        context
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// First message for a field.
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)?.first().map(String::as_str)
    }

    pub fn get_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || !self.global_errors.is_empty()
    }

    pub fn get_value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// `class` plus `error_class` when the field has an error.
    pub fn field_class(&self, field: &str, class: &str, error_class: &str) -> String {
        if self.has_error(field) {
            format!("{} {}", class, error_class)
        } else {
            class.to_string()
        }
    }
}
