// File: src/constraints.rs
// Purpose: Declarative per-field constraints, selectable by group

use std::fmt;
use std::marker::PhantomData;

use crate::error::Error;
use crate::model::{FieldError, Resolvable};
use crate::result::BindingResult;
use crate::target::{Bindable, FieldSpec};
use crate::validation::validators::{has_text, is_valid_email};
use crate::value::Value;

/// Tag selecting which constraints run for an operation (e.g. save vs update).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group(&'static str);

impl Group {
    pub const fn new(name: &'static str) -> Self {
        Group(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    NotNull,
    NotBlank,
    Min(i64),
    Max(i64),
    Range { min: i64, max: i64 },
    Email,
}

impl ConstraintKind {
    /// Error code, also the first segment of every generated message code.
    pub fn code(&self) -> &'static str {
        match self {
            ConstraintKind::NotNull => "NotNull",
            ConstraintKind::NotBlank => "NotBlank",
            ConstraintKind::Min(_) => "Min",
            ConstraintKind::Max(_) => "Max",
            ConstraintKind::Range { .. } => "Range",
            ConstraintKind::Email => "Email",
        }
    }

    /// Null passes every check except `NotNull`/`NotBlank`; an empty string
    /// passes `Email`.
    fn is_satisfied(&self, value: &Value) -> bool {
        match self {
            ConstraintKind::NotNull => !value.is_null(),
            ConstraintKind::NotBlank => has_text(value.as_text()),
            ConstraintKind::Min(min) => value.as_int().map_or(true, |v| v >= *min),
            ConstraintKind::Max(max) => value.as_int().map_or(true, |v| v <= *max),
            ConstraintKind::Range { min, max } => value.as_int().map_or(true, |v| v >= *min && v <= *max),
            ConstraintKind::Email => match value.as_text() {
                Some(s) if !s.is_empty() => is_valid_email(s),
                _ => true,
            },
        }
    }

    /// Attribute arguments, ordered by attribute name (`max` before `min`).
    fn attributes(&self) -> Vec<Value> {
        match self {
            ConstraintKind::Min(value) | ConstraintKind::Max(value) => vec![Value::Int(*value)],
            ConstraintKind::Range { min, max } => vec![Value::Int(*max), Value::Int(*min)],
            ConstraintKind::NotNull | ConstraintKind::NotBlank | ConstraintKind::Email => Vec::new(),
        }
    }

    fn default_message(&self) -> String {
        match self {
            ConstraintKind::NotNull => "must not be null".to_string(),
            ConstraintKind::NotBlank => "must not be blank".to_string(),
            ConstraintKind::Min(min) => format!("must be greater than or equal to {}", min),
            ConstraintKind::Max(max) => format!("must be less than or equal to {}", max),
            ConstraintKind::Range { min, max } => format!("must be between {} and {}", min, max),
            ConstraintKind::Email => "must be a well-formed email address".to_string(),
        }
    }

    fn check(&self, spec: &FieldSpec) -> Result<(), Error> {
        match self {
            ConstraintKind::NotBlank | ConstraintKind::Email if spec.kind.is_numeric() => Err(
                Error::invalid_constraint(spec.name, format!("{} needs a text field", self.code())),
            ),
            ConstraintKind::Min(_) | ConstraintKind::Max(_) | ConstraintKind::Range { .. }
                if !spec.kind.is_numeric() =>
            {
                Err(Error::invalid_constraint(
                    spec.name,
                    format!("{} needs a numeric field", self.code()),
                ))
            }
            ConstraintKind::Range { min, max } if min > max => Err(Error::invalid_constraint(
                spec.name,
                format!("Range min {} is greater than max {}", min, max),
            )),
            _ => Ok(()),
        }
    }
}

/// One declared constraint and the groups it belongs to.
/// No groups means it applies to every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    kind: ConstraintKind,
    groups: Vec<Group>,
}

impl Constraint {
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            kind,
            groups: Vec::new(),
        }
    }

    pub fn not_null() -> Self {
        Self::new(ConstraintKind::NotNull)
    }

    pub fn not_blank() -> Self {
        Self::new(ConstraintKind::NotBlank)
    }

    pub fn min(value: i64) -> Self {
        Self::new(ConstraintKind::Min(value))
    }

    pub fn max(value: i64) -> Self {
        Self::new(ConstraintKind::Max(value))
    }

    pub fn range(min: i64, max: i64) -> Self {
        Self::new(ConstraintKind::Range { min, max })
    }

    pub fn email() -> Self {
        Self::new(ConstraintKind::Email)
    }

    pub fn groups(mut self, groups: &[Group]) -> Self {
        self.groups = groups.to_vec();
        self
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn group_tags(&self) -> &[Group] {
        &self.groups
    }

    /// Untagged constraints always apply; tagged ones only for a matching group.
    pub fn applies_to(&self, active: Option<Group>) -> bool {
        self.groups.is_empty() || active.is_some_and(|g| self.groups.contains(&g))
    }
}

#[derive(Debug, Clone)]
struct FieldConstraints {
    spec: FieldSpec,
    constraints: Vec<Constraint>,
}

/// Constraint registry for one target type, in field-declaration order.
pub struct ConstraintSet<T> {
    fields: Vec<FieldConstraints>,
    _target: PhantomData<fn(&T)>,
}

pub struct ConstraintSetBuilder<T> {
    entries: Vec<(&'static str, Vec<Constraint>)>,
    _target: PhantomData<fn(&T)>,
}

impl<T> fmt::Debug for ConstraintSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintSet").field("fields", &self.fields).finish()
    }
}

impl<T: Bindable> ConstraintSet<T> {
    pub fn builder() -> ConstraintSetBuilder<T> {
        ConstraintSetBuilder {
            entries: Vec::new(),
            _target: PhantomData,
        }
    }

    /// Fields that carry constraints, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.spec.name)
    }

    pub fn constraints_for(&self, field: &str) -> &[Constraint] {
        self.fields
            .iter()
            .find(|f| f.spec.name == field)
            .map(|f| f.constraints.as_slice())
            .unwrap_or(&[])
    }

    /// Evaluate every constraint that applies to `group` and record each
    /// violation as a field error. Fields that already failed to bind are
    /// skipped.
    pub fn validate(&self, target: &T, group: Option<Group>, errors: &mut BindingResult) {
        for field in &self.fields {
            let name = field.spec.name;
            if errors.field_errors_for(name).iter().any(|e| e.binding_failure) {
                continue;
            }
            let value = target.field_value(name).unwrap_or(Value::Null);

            for constraint in field.constraints.iter().filter(|c| c.applies_to(group)) {
                if constraint.kind.is_satisfied(&value) {
                    continue;
                }
                let kind = &constraint.kind;
                let codes = errors.codes_resolver().resolve_field_codes(
                    kind.code(),
                    errors.object_name(),
                    name,
                    Some(field.spec.kind.type_name()),
                );
                let mut arguments = vec![Value::Message(Resolvable::for_field(errors.object_name(), name))];
                arguments.extend(kind.attributes());

                let error = FieldError::rejected(errors.object_name(), name, value.clone())
                    .with_codes(codes)
                    .with_arguments(arguments)
                    .with_default_message(kind.default_message());
                errors.push(error.into());
            }
        }
    }
}

impl<T: Bindable> ConstraintSetBuilder<T> {
    /// Declare constraints for a field. Order within a field is kept.
    pub fn field(mut self, name: &'static str, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.entries.push((name, constraints.into_iter().collect()));
        self
    }

    /// Check the metadata against `T` and order it by field declaration.
    pub fn build(self) -> Result<ConstraintSet<T>, Error> {
        let mut fields: Vec<(usize, FieldConstraints)> = Vec::with_capacity(self.entries.len());

        for (name, constraints) in self.entries {
            let position = T::FIELDS
                .iter()
                .position(|spec| spec.name == name)
                .ok_or_else(|| Error::invalid_constraint(name, "no such field"))?;
            if fields.iter().any(|(p, _)| *p == position) {
                return Err(Error::invalid_constraint(name, "field declared twice"));
            }
            let spec = T::FIELDS[position];
            for constraint in &constraints {
                constraint.kind.check(&spec)?;
            }
            fields.push((position, FieldConstraints { spec, constraints }));
        }

        fields.sort_by_key(|(position, _)| *position);
        Ok(ConstraintSet {
            fields: fields.into_iter().map(|(_, f)| f).collect(),
            _target: PhantomData,
        })
    }
}
