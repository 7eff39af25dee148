// File: src/target.rs
// Purpose: Field metadata and access for objects that can be bound and validated

use std::str::FromStr;

use crate::value::Value;

/// Declared type of a bindable field. The type name feeds the
/// `code.Type` message-code candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Long,
}

impl FieldKind {
    pub fn type_name(self) -> &'static str {
        match self {
            FieldKind::Text => "String",
            FieldKind::Integer => "Integer",
            FieldKind::Long => "Long",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Long)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Integer }
    }

    pub const fn long(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Long }
    }
}

/// Why a raw parameter could not be applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindFailure {
    UnknownField,
    TypeMismatch,
}

/// An object whose fields can be read by name, and written from raw form text.
///
/// `FIELDS` is in declaration order; constraint evaluation and binding both
/// follow it, which fixes the order errors are reported in.
pub trait Bindable: 'static {
    const FIELDS: &'static [FieldSpec];

    /// Current value of a field, `None` for an unknown field.
    fn field_value(&self, field: &str) -> Option<Value>;

    /// Apply submitted text to a field.
    fn bind_field(&mut self, field: &str, raw: &str) -> Result<(), BindFailure>;

    fn field_spec(field: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS.iter().find(|spec| spec.name == field)
    }
}

/// Numeric conversion: blank input binds to null, anything unparsable is a
/// type mismatch.
pub fn parse_number<N: FromStr>(raw: &str) -> Result<Option<N>, BindFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| BindFailure::TypeMismatch)
}

/// Text binds as submitted, including the empty string.
pub fn bind_text(raw: &str) -> Option<String> {
    Some(raw.to_string())
}
