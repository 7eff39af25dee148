// File: src/orchestrator.rs
// Purpose: One validation pass: declarative constraints, validators, then object-level checks

use std::any::TypeId;

use crate::codes::MessageCodesResolver;
use crate::constraints::{ConstraintSet, Group};
use crate::error::Error;
use crate::result::BindingResult;
use crate::target::Bindable;
use crate::validation::Validator;

/// Cross-field rule run after the per-field checks. Records object errors.
pub type ObjectCheck<T> = Box<dyn Fn(&T, &mut BindingResult) + Send + Sync>;

/// Runs every configured check on a candidate and collects all failures.
///
/// Stages run in a fixed order: constraints for the active group, then
/// validators in registration order, then object checks. No stage stops
/// the pass early.
pub struct Orchestrator<T> {
    object_name: String,
    constraints: Option<ConstraintSet<T>>,
    validators: Vec<Box<dyn Validator>>,
    object_checks: Vec<ObjectCheck<T>>,
    codes_resolver: MessageCodesResolver,
}

pub struct OrchestratorBuilder<T> {
    object_name: String,
    constraints: Option<ConstraintSet<T>>,
    validators: Vec<Box<dyn Validator>>,
    object_checks: Vec<ObjectCheck<T>>,
    codes_resolver: MessageCodesResolver,
}

impl<T: Bindable> Orchestrator<T> {
    pub fn builder(object_name: impl Into<String>) -> OrchestratorBuilder<T> {
        OrchestratorBuilder {
            object_name: object_name.into(),
            constraints: None,
            validators: Vec::new(),
            object_checks: Vec::new(),
            codes_resolver: MessageCodesResolver::default(),
        }
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn codes_resolver(&self) -> &MessageCodesResolver {
        &self.codes_resolver
    }

    /// Validate `candidate` in a fresh binding result.
    pub fn run(&self, candidate: &T, group: Option<Group>) -> BindingResult {
        let mut errors = BindingResult::for_target(self.object_name.clone(), candidate)
            .with_codes_resolver(self.codes_resolver.clone());
        self.run_into(candidate, group, &mut errors);
        errors
    }

    /// Validate `candidate` into an existing result, typically one that
    /// already holds binding failures.
    pub fn run_into(&self, candidate: &T, group: Option<Group>, errors: &mut BindingResult) {
        tracing::debug!(
            "Validating '{}' (group: {})",
            self.object_name,
            group.map(|g| g.name()).unwrap_or("default")
        );
        let before = errors.error_count();

        if let Some(constraints) = &self.constraints {
            constraints.validate(candidate, group, errors);
        }
        for validator in &self.validators {
            tracing::debug!("Invoking validator {} on '{}'", validator.name(), self.object_name);
            validator.validate(candidate, errors);
        }
        for check in &self.object_checks {
            check(candidate, errors);
        }

        if errors.has_errors() {
            tracing::info!(
                "Validation of '{}' failed: {} errors ({} new)",
                self.object_name,
                errors.error_count(),
                errors.error_count() - before
            );
        }
    }
}

impl<T: Bindable> OrchestratorBuilder<T> {
    pub fn constraints(mut self, constraints: ConstraintSet<T>) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn object_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&T, &mut BindingResult) + Send + Sync + 'static,
    {
        self.object_checks.push(Box::new(check));
        self
    }

    pub fn codes_resolver(mut self, codes_resolver: MessageCodesResolver) -> Self {
        self.codes_resolver = codes_resolver;
        self
    }

    /// Every registered validator must support `T`.
    pub fn build(self) -> Result<Orchestrator<T>, Error> {
        if let Some(validator) = self
            .validators
            .iter()
            .find(|v| !v.supports(TypeId::of::<T>()))
        {
            return Err(Error::UnsupportedTarget {
                validator: validator.name().to_string(),
                target: self.object_name,
            });
        }
        Ok(Orchestrator {
            object_name: self.object_name,
            constraints: self.constraints,
            validators: self.validators,
            object_checks: self.object_checks,
            codes_resolver: self.codes_resolver,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Constraint;
    use crate::target::{BindFailure, FieldSpec};
    use crate::validation::supports_type;
    use crate::value::Value;
    use pretty_assertions::assert_eq;
    use std::any::Any;

    #[derive(Default)]
    struct Order {
        label: Option<String>,
        amount: Option<i32>,
    }

    impl Bindable for Order {
        const FIELDS: &'static [FieldSpec] = &[FieldSpec::text("label"), FieldSpec::integer("amount")];

        fn field_value(&self, field: &str) -> Option<Value> {
            match field {
                "label" => Some(self.label.clone().into()),
                "amount" => Some(self.amount.into()),
                _ => None,
            }
        }

        fn bind_field(&mut self, _field: &str, _raw: &str) -> Result<(), BindFailure> {
            Err(BindFailure::UnknownField)
        }
    }

    struct AmountValidator;

    impl Validator for AmountValidator {
        fn name(&self) -> &str {
            "AmountValidator"
        }

        fn supports(&self, target: TypeId) -> bool {
            target == TypeId::of::<Order>()
        }

        fn validate(&self, target: &dyn Any, errors: &mut BindingResult) {
            let Some(order) = target.downcast_ref::<Order>() else {
                panic!("AmountValidator cannot validate '{}'", errors.object_name());
            };
            if order.amount.is_some_and(|a| a % 2 != 0) {
                errors.reject_value("amount", "even");
            }
        }
    }

    struct Unrelated;

    impl Validator for Unrelated {
        fn name(&self) -> &str {
            "Unrelated"
        }

        fn supports(&self, _target: TypeId) -> bool {
            false
        }

        fn validate(&self, _target: &dyn Any, _errors: &mut BindingResult) {
            unreachable!("Unrelated supports nothing")
        }
    }

    fn orchestrator() -> Orchestrator<Order> {
        let constraints = ConstraintSet::builder()
            .field("label", [Constraint::not_blank()])
            .build()
            .unwrap();
        Orchestrator::builder("order")
            .constraints(constraints)
            .validator(AmountValidator)
            .object_check(|order: &Order, errors: &mut BindingResult| {
                if order.amount.unwrap_or(0) < 10 {
                    errors.reject_with("minimum", vec![Value::Int(10)], None);
                }
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_stages_run_in_order() {
        let order = Order {
            label: None,
            amount: Some(3),
        };
        let result = orchestrator().run(&order, None);
        let codes: Vec<&str> = result
            .all_errors()
            .iter()
            .map(|e| e.as_field().and_then(|f| f.code()).or_else(|| e.as_object().and_then(|o| o.code())).unwrap_or(""))
            .collect();
        assert_eq!(codes, vec!["NotBlank", "even", "minimum"]);
    }

    #[test]
    fn test_clean_candidate_passes() {
        let order = Order {
            label: Some("ok".to_string()),
            amount: Some(12),
        };
        assert!(!orchestrator().run(&order, None).has_errors());
        assert!(supports_type::<Order>(&AmountValidator));
    }

    #[test]
    fn test_runs_are_independent() {
        let order = Order::default();
        let orchestrator = orchestrator();
        let first = orchestrator.run(&order, None);
        let second = orchestrator.run(&order, None);
        assert_eq!(first.all_errors(), second.all_errors());
    }

    #[test]
    fn test_unsupported_validator_fails_at_build() {
        let result = Orchestrator::<Order>::builder("order").validator(Unrelated).build();
        assert!(matches!(result, Err(Error::UnsupportedTarget { .. })));
    }
}
