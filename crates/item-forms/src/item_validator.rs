// File: src/item_validator.rs
// Purpose: Reusable validator holding the item business rules

use rusty_binding::{has_text, is_valid_email, BindingResult, Validator, Value};
use std::any::{Any, TypeId};

use crate::config::ItemRules;
use crate::item::Item;
use crate::total_price::check_total_price;

/// Validates `Item` only.
#[derive(Debug, Clone, Default)]
pub struct ItemValidator {
    rules: ItemRules,
}

impl ItemValidator {
    pub fn new(rules: ItemRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ItemRules {
        &self.rules
    }
}

impl Validator for ItemValidator {
    fn name(&self) -> &str {
        "ItemValidator"
    }

    fn supports(&self, target: TypeId) -> bool {
        target == TypeId::of::<Item>()
    }

    fn validate(&self, target: &dyn Any, errors: &mut BindingResult) {
        let Some(item) = target.downcast_ref::<Item>() else {
            panic!(
                "{} cannot validate '{}': only Item is supported",
                self.name(),
                errors.object_name()
            );
        };
        check_item(item, &self.rules, errors);
    }
}

/// Every item rule, recorded through generated message codes.
pub(crate) fn check_item(item: &Item, rules: &ItemRules, errors: &mut BindingResult) {
    if !has_text(item.item_name.as_deref()) {
        errors.reject_value("itemName", "required");
    }

    let price_ok = item
        .price
        .map(i64::from)
        .is_some_and(|p| p >= rules.price_min && p <= rules.price_max);
    if !price_ok {
        errors.reject_value_with(
            "price",
            "range",
            vec![Value::Int(rules.price_min), Value::Int(rules.price_max)],
            None,
        );
    }

    let quantity_ok = item.quantity.is_some_and(|q| i64::from(q) <= rules.quantity_max);
    if !quantity_ok {
        errors.reject_value_with("quantity", "max", vec![Value::Int(rules.quantity_max)], None);
    }

    match item.email.as_deref() {
        email if !has_text(email) => errors.reject_value("email", "required"),
        Some(email) if !is_valid_email(email) => errors.reject_value("email", "incorrect"),
        _ => {}
    }

    check_total_price(item, rules.min_total_price, errors);
}
