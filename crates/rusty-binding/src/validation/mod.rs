// File: src/validation/mod.rs
// Purpose: Validator trait and checked invocation

use std::any::{Any, TypeId};

use crate::error::Error;
use crate::result::BindingResult;

pub mod validators;

/// A reusable validator for one or more target types.
///
/// Callers must check `supports` before `validate`; `invoke_validator` does
/// that and reports a mismatch as an error instead of skipping.
pub trait Validator: Send + Sync {
    /// Name used in error reports.
    fn name(&self) -> &str;

    /// Whether this validator can validate values of the given type.
    fn supports(&self, target: TypeId) -> bool;

    /// Record failures for `target` into `errors`. Never stops at the first
    /// failure.
    ///
    /// # Panics
    ///
    /// Implementations panic when `target` is not a supported type.
    fn validate(&self, target: &dyn Any, errors: &mut BindingResult);
}

/// Convenience for `supports(TypeId::of::<T>())`.
pub fn supports_type<T: 'static>(validator: &dyn Validator) -> bool {
    validator.supports(TypeId::of::<T>())
}

/// Run `validator` on `target` after checking it is supported.
pub fn invoke_validator(
    validator: &dyn Validator,
    target: &dyn Any,
    errors: &mut BindingResult,
) -> Result<(), Error> {
    if !validator.supports(target.type_id()) {
        return Err(Error::UnsupportedTarget {
            validator: validator.name().to_string(),
            target: errors.object_name().to_string(),
        });
    }
    tracing::debug!("Invoking validator {} on '{}'", validator.name(), errors.object_name());
    validator.validate(target, errors);
    Ok(())
}
