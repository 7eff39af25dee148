// File: src/result.rs
// Purpose: Append-only error collector for one validation pass over one object

use std::fmt;

use crate::codes::MessageCodesResolver;
use crate::error::Error;
use crate::model::{ErrorEntry, FieldError, ObjectError};
use crate::target::Bindable;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
struct FieldSnapshot {
    name: &'static str,
    type_name: &'static str,
    value: Value,
}

/// Errors collected for one named object during one pass.
///
/// Errors are kept in insertion order and never removed: once a pass has
/// failed it stays failed. Messages are not rendered here; errors carry
/// only codes, arguments and a fallback.
#[derive(Debug, Clone)]
pub struct BindingResult {
    object_name: String,
    fields: Vec<FieldSnapshot>,
    errors: Vec<ErrorEntry>,
    codes_resolver: MessageCodesResolver,
}

impl BindingResult {
    /// Collector without a target; rejected values must be supplied by hand.
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            fields: Vec::new(),
            errors: Vec::new(),
            codes_resolver: MessageCodesResolver::default(),
        }
    }

    /// Collector that snapshots the target's fields, so `reject_value` can
    /// pick up the rejected value and field type itself.
    pub fn for_target<T: Bindable>(object_name: impl Into<String>, target: &T) -> Self {
        let fields = T::FIELDS
            .iter()
            .map(|spec| FieldSnapshot {
                name: spec.name,
                type_name: spec.kind.type_name(),
                value: target.field_value(spec.name).unwrap_or(Value::Null),
            })
            .collect();
        Self {
            fields,
            ..Self::new(object_name)
        }
    }

    pub fn with_codes_resolver(mut self, codes_resolver: MessageCodesResolver) -> Self {
        self.codes_resolver = codes_resolver;
        self
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn codes_resolver(&self) -> &MessageCodesResolver {
        &self.codes_resolver
    }

    /// Append a prebuilt error. Its object name must match this result's.
    pub fn add_error(&mut self, error: impl Into<ErrorEntry>) -> Result<(), Error> {
        let error = error.into();
        if error.object_name() != self.object_name {
            return Err(Error::ObjectNameMismatch {
                expected: self.object_name.clone(),
                error: error.object_name().to_string(),
            });
        }
        self.errors.push(error);
        Ok(())
    }

    pub(crate) fn push(&mut self, error: ErrorEntry) {
        self.errors.push(error);
    }

    /// Object-level error under `code`.
    pub fn reject(&mut self, code: &str) {
        self.reject_with(code, Vec::new(), None);
    }

    pub fn reject_with(&mut self, code: &str, arguments: Vec<Value>, default_message: Option<&str>) {
        let codes = self.resolve_message_codes(code, None);
        self.errors.push(ErrorEntry::Object(ObjectError::coded(
            self.object_name.clone(),
            codes,
            arguments,
            default_message.map(str::to_string),
        )));
    }

    /// Field-level error under `code`, keeping the field's current value as
    /// the rejected value.
    pub fn reject_value(&mut self, field: &str, code: &str) {
        self.reject_value_with(field, code, Vec::new(), None);
    }

    pub fn reject_value_with(
        &mut self,
        field: &str,
        code: &str,
        arguments: Vec<Value>,
        default_message: Option<&str>,
    ) {
        if field.is_empty() {
            self.reject_with(code, arguments, default_message);
            return;
        }
        let codes = self.resolve_message_codes(code, Some(field));
        let rejected = self.field_value(field).unwrap_or(Value::Null);
        let mut error = FieldError::rejected(self.object_name.clone(), field, rejected)
            .with_codes(codes)
            .with_arguments(arguments);
        error.default_message = default_message.map(str::to_string);
        self.errors.push(ErrorEntry::Field(error));
    }

    /// Codes this result would record for `code` on `field` (or on the object).
    pub fn resolve_message_codes(&self, code: &str, field: Option<&str>) -> Vec<String> {
        match field {
            Some(field) if !field.is_empty() => self.codes_resolver.resolve_field_codes(
                code,
                &self.object_name,
                field,
                self.field_type(field),
            ),
            _ => self.codes_resolver.resolve_object_codes(code, &self.object_name),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Every error in the order it was recorded.
    pub fn all_errors(&self) -> &[ErrorEntry] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ErrorEntry> {
        self.errors
    }

    pub fn global_errors(&self) -> Vec<&ObjectError> {
        self.errors.iter().filter_map(ErrorEntry::as_object).collect()
    }

    pub fn global_error(&self) -> Option<&ObjectError> {
        self.errors.iter().find_map(ErrorEntry::as_object)
    }

    pub fn has_global_errors(&self) -> bool {
        self.global_error().is_some()
    }

    pub fn field_errors(&self) -> Vec<&FieldError> {
        self.errors.iter().filter_map(ErrorEntry::as_field).collect()
    }

    pub fn field_errors_for(&self, field: &str) -> Vec<&FieldError> {
        self.errors
            .iter()
            .filter_map(ErrorEntry::as_field)
            .filter(|e| e.field == field)
            .collect()
    }

    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.errors
            .iter()
            .filter_map(ErrorEntry::as_field)
            .find(|e| e.field == field)
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.field_error(field).is_some()
    }

    /// Value to put back into the form for `field`.
    ///
    /// With an error on the field this is its rejected value (`None` when the
    /// error did not track one); otherwise the target's current value.
    pub fn field_value(&self, field: &str) -> Option<Value> {
        if let Some(error) = self.field_error(field) {
            return error.rejected_value.clone();
        }
        self.fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.value.clone())
    }

    pub fn field_type(&self, field: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.type_name)
    }

    /// Snapshotted field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

impl fmt::Display for BindingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BindingResult '{}': {} errors", self.object_name, self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n{}", error)?;
        }
        Ok(())
    }
}
