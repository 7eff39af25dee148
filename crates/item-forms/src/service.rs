// File: src/service.rs
// Purpose: Entry points for each way of validating a submitted item form

use anyhow::Result;
use rusty_binding::{
    invoke_validator, BindingResult, DataBinder, Error, FormContext, FormData, MessageCodesResolver,
    MessageSource, Orchestrator,
};

use crate::config::{Config, ItemRules};
use crate::constraints::{item_constraints, save_form_constraints, update_form_constraints, SAVE_CHECK, UPDATE_CHECK};
use crate::forms::{ItemSaveForm, ItemUpdateForm};
use crate::inline::{validate_inline, InlineStyle};
use crate::item::{Item, Priced, OBJECT_NAME};
use crate::item_validator::ItemValidator;
use crate::total_price::check_total_price;

/// A bound candidate together with everything recorded about it.
#[derive(Debug, Clone)]
pub struct Submission<T> {
    pub target: T,
    pub errors: BindingResult,
}

impl<T> Submission<T> {
    pub fn is_valid(&self) -> bool {
        !self.errors.has_errors()
    }

    /// The candidate when the pass was clean, the errors otherwise.
    pub fn into_result(self) -> std::result::Result<T, BindingResult> {
        if self.errors.has_errors() {
            Err(self.errors)
        } else {
            Ok(self.target)
        }
    }
}

/// The item form validations, built once at startup and shared by handlers.
pub struct ItemValidations {
    rules: ItemRules,
    messages: MessageSource,
    codes_resolver: MessageCodesResolver,
    validator: ItemValidator,
    bound_validator: Orchestrator<Item>,
    item_groups: Orchestrator<Item>,
    save_form: Orchestrator<ItemSaveForm>,
    update_form: Orchestrator<ItemUpdateForm>,
}

impl ItemValidations {
    /// Fails when the configured rules produce malformed constraints.
    pub fn new(rules: ItemRules, messages: MessageSource, codes_resolver: MessageCodesResolver) -> Result<Self, Error> {
        let min_total = rules.min_total_price;
        let validator = ItemValidator::new(rules);

        let bound_validator = Orchestrator::builder(OBJECT_NAME)
            .validator(validator.clone())
            .codes_resolver(codes_resolver.clone())
            .build()?;
        let item_groups = Orchestrator::builder(OBJECT_NAME)
            .constraints(item_constraints(&rules)?)
            .object_check(move |item: &Item, errors: &mut BindingResult| check_total_price(item, min_total, errors))
            .codes_resolver(codes_resolver.clone())
            .build()?;
        let save_form = Orchestrator::builder(OBJECT_NAME)
            .constraints(save_form_constraints(&rules)?)
            .object_check(move |form: &ItemSaveForm, errors: &mut BindingResult| {
                check_total_price(form, min_total, errors)
            })
            .codes_resolver(codes_resolver.clone())
            .build()?;
        let update_form = Orchestrator::builder(OBJECT_NAME)
            .constraints(update_form_constraints(&rules)?)
            .object_check(move |form: &ItemUpdateForm, errors: &mut BindingResult| {
                check_total_price(form, min_total, errors)
            })
            .codes_resolver(codes_resolver.clone())
            .build()?;

        Ok(Self {
            rules,
            messages,
            codes_resolver,
            validator,
            bound_validator,
            item_groups,
            save_form,
            update_form,
        })
    }

    /// Rules, codes format and message catalogs from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let messages = config.messages.message_source()?;
        Ok(Self::new(config.rules, messages, config.messages.codes_resolver())?)
    }

    pub fn rules(&self) -> &ItemRules {
        &self.rules
    }

    pub fn messages(&self) -> &MessageSource {
        &self.messages
    }

    pub fn codes_resolver(&self) -> &MessageCodesResolver {
        &self.codes_resolver
    }

    pub fn save_form_orchestrator(&self) -> &Orchestrator<ItemSaveForm> {
        &self.save_form
    }

    fn binder(&self) -> DataBinder {
        DataBinder::new(OBJECT_NAME).with_codes_resolver(self.codes_resolver.clone())
    }

    /// Bind form parameters onto a new item. Conversion failures are
    /// already recorded in the returned result.
    pub fn bind_item(&self, form: &FormData) -> Submission<Item> {
        let (target, errors) = self.binder().bind::<Item>(form);
        Submission { target, errors }
    }

    /// Hand-written checks in the given style.
    pub fn validate_inline(&self, form: &FormData, style: InlineStyle) -> Result<Submission<Item>, Error> {
        let mut submission = self.bind_item(form);
        validate_inline(style, &submission.target, &self.rules, &mut submission.errors)?;
        log_outcome("inline", &submission);
        Ok(submission)
    }

    /// `ItemValidator` called directly, checking `supports` first.
    pub fn validate_with_validator(&self, form: &FormData) -> Result<Submission<Item>, Error> {
        let mut submission = self.bind_item(form);
        invoke_validator(&self.validator, &submission.target, &mut submission.errors)?;
        log_outcome("validator", &submission);
        Ok(submission)
    }

    /// `ItemValidator` registered with an orchestrator.
    pub fn validate_bound(&self, form: &FormData) -> Submission<Item> {
        let mut submission = self.bind_item(form);
        self.bound_validator
            .run_into(&submission.target, None, &mut submission.errors);
        log_outcome("bound validator", &submission);
        submission
    }

    /// Add: item constraints in the save group plus the total-price rule.
    pub fn create(&self, form: &FormData) -> Submission<Item> {
        let mut submission = self.bind_item(form);
        self.item_groups
            .run_into(&submission.target, Some(SAVE_CHECK), &mut submission.errors);
        log_outcome("create", &submission);
        submission
    }

    /// Edit: item constraints in the update group plus the total-price rule.
    pub fn update(&self, form: &FormData) -> Submission<Item> {
        let mut submission = self.bind_item(form);
        self.item_groups
            .run_into(&submission.target, Some(UPDATE_CHECK), &mut submission.errors);
        log_outcome("update", &submission);
        submission
    }

    /// Add through the dedicated form object.
    pub fn save_form(&self, form: &FormData) -> Submission<ItemSaveForm> {
        let (target, mut errors) = self.binder().bind::<ItemSaveForm>(form);
        self.save_form.run_into(&target, None, &mut errors);
        let submission = Submission { target, errors };
        log_outcome("save form", &submission);
        submission
    }

    /// Edit through the dedicated form object.
    pub fn update_form(&self, form: &FormData) -> Submission<ItemUpdateForm> {
        let (target, mut errors) = self.binder().bind::<ItemUpdateForm>(form);
        self.update_form.run_into(&target, None, &mut errors);
        let submission = Submission { target, errors };
        log_outcome("update form", &submission);
        submission
    }

    /// Messages and redisplay values for re-showing the form.
    pub fn form_context(&self, errors: &BindingResult) -> FormContext {
        FormContext::from_result(errors, &self.messages)
    }
}

fn log_outcome<T: Priced>(approach: &str, submission: &Submission<T>) {
    if submission.errors.has_errors() {
        tracing::info!("{} - {}", approach, submission.errors);
    } else {
        tracing::debug!(
            "{} - accepted (price={:?}, quantity={:?})",
            approach,
            submission.target.price(),
            submission.target.quantity()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn validations() -> ItemValidations {
        ItemValidations::from_config(&Config::default()).unwrap()
    }

    fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_create_accepts_valid_item() {
        let submission = validations().create(&form(&[
            ("itemName", "pen"),
            ("price", "10000"),
            ("quantity", "10"),
            ("email", "a@b.com"),
        ]));
        assert!(submission.is_valid());
        let item = submission.into_result().unwrap();
        assert_eq!(item.price, Some(10_000));
    }

    #[test]
    fn test_update_requires_id() {
        let submission = validations().update(&form(&[
            ("itemName", "pen"),
            ("price", "10000"),
            ("quantity", "10"),
            ("email", "a@b.com"),
        ]));
        assert_eq!(submission.errors.field_error("id").unwrap().code(), Some("NotNull"));
    }

    #[test]
    fn test_bound_validator_matches_direct_call() {
        let input = form(&[("itemName", ""), ("price", "500"), ("quantity", "1"), ("email", "x")]);
        let validations = validations();
        let direct = validations.validate_with_validator(&input).unwrap();
        let bound = validations.validate_bound(&input);
        assert_eq!(direct.errors.all_errors(), bound.errors.all_errors());
    }

    #[test]
    fn test_form_context_after_failed_create() {
        let validations = validations();
        let submission = validations.create(&form(&[("itemName", "pen"), ("price", "qqq"), ("quantity", "1")]));
        let context = validations.form_context(&submission.errors);
        assert_eq!(context.get_error("price"), Some("Please enter a number."));
        assert_eq!(context.get_value("price"), Some("qqq"));
        assert_eq!(context.get_value("itemName"), Some("pen"));
    }
}
