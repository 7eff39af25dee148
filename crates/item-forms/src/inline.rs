// File: src/inline.rs
// Purpose: Hand-written item checks, in increasingly reusable error styles

use rusty_binding::{group_thousands, has_text, BindingResult, Error, FieldError, ObjectError, Value};
use serde::{Deserialize, Serialize};

use crate::config::ItemRules;
use crate::item::Item;
use crate::item_validator::check_item;
use crate::total_price::{total_price, total_price_arguments, TOTAL_PRICE_CODE};

/// How an inline rule records its failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InlineStyle {
    /// Literal text only; the rejected input is not kept.
    DefaultMessages,
    /// Literal text plus the rejected input.
    RejectedValues,
    /// Explicit single message codes with arguments.
    MessageCodes,
    /// `reject_value`/`reject`, codes generated by the resolver.
    RejectValue,
}

impl InlineStyle {
    pub const ALL: [InlineStyle; 4] = [
        InlineStyle::DefaultMessages,
        InlineStyle::RejectedValues,
        InlineStyle::MessageCodes,
        InlineStyle::RejectValue,
    ];
}

fn price_out_of_range(price: Option<i32>, rules: &ItemRules) -> bool {
    price.map_or(true, |p| {
        let p = i64::from(p);
        p < rules.price_min || p > rules.price_max
    })
}

fn quantity_over_max(quantity: Option<i32>, rules: &ItemRules) -> bool {
    quantity.map_or(true, |q| i64::from(q) > rules.quantity_max)
}

/// Check `item` the way `style` records errors.
pub fn validate_inline(
    style: InlineStyle,
    item: &Item,
    rules: &ItemRules,
    errors: &mut BindingResult,
) -> Result<(), Error> {
    match style {
        InlineStyle::DefaultMessages => default_messages(item, rules, errors, false),
        InlineStyle::RejectedValues => default_messages(item, rules, errors, true),
        InlineStyle::MessageCodes => message_codes(item, rules, errors),
        InlineStyle::RejectValue => {
            check_item(item, rules, errors);
            Ok(())
        }
    }
}

fn default_messages(
    item: &Item,
    rules: &ItemRules,
    errors: &mut BindingResult,
    keep_rejected: bool,
) -> Result<(), Error> {
    let object = errors.object_name().to_string();
    let field_error = |field: &str, value: Value, message: String| {
        if keep_rejected {
            FieldError::rejected(object.clone(), field, value).with_default_message(message)
        } else {
            FieldError::new(object.clone(), field, message)
        }
    };

    if !has_text(item.item_name.as_deref()) {
        errors.add_error(field_error(
            "itemName",
            item.item_name.clone().into(),
            "Item name is required.".to_string(),
        ))?;
    }
    if price_out_of_range(item.price, rules) {
        errors.add_error(field_error(
            "price",
            item.price.into(),
            format!(
                "Price must be between {} and {}.",
                group_thousands(rules.price_min),
                group_thousands(rules.price_max)
            ),
        ))?;
    }
    if quantity_over_max(item.quantity, rules) {
        errors.add_error(field_error(
            "quantity",
            item.quantity.into(),
            format!("Quantity must be at most {}.", group_thousands(rules.quantity_max)),
        ))?;
    }
    if let Some(total) = total_price(item).filter(|t| *t < rules.min_total_price) {
        errors.add_error(ObjectError::new(
            object.clone(),
            format!(
                "Price * quantity must be at least {}. Current value = {}",
                group_thousands(rules.min_total_price),
                total
            ),
        ))?;
    }
    Ok(())
}

fn message_codes(item: &Item, rules: &ItemRules, errors: &mut BindingResult) -> Result<(), Error> {
    let object = errors.object_name().to_string();

    if !has_text(item.item_name.as_deref()) {
        errors.add_error(
            FieldError::rejected(object.clone(), "itemName", item.item_name.clone())
                .with_codes([format!("required.{}.itemName", object)]),
        )?;
    }
    if price_out_of_range(item.price, rules) {
        errors.add_error(
            FieldError::rejected(object.clone(), "price", item.price)
                .with_codes([format!("range.{}.price", object)])
                .with_arguments(vec![Value::Int(rules.price_min), Value::Int(rules.price_max)]),
        )?;
    }
    if quantity_over_max(item.quantity, rules) {
        errors.add_error(
            FieldError::rejected(object.clone(), "quantity", item.quantity)
                .with_codes([format!("max.{}.quantity", object)])
                .with_arguments(vec![Value::Int(rules.quantity_max)]),
        )?;
    }
    if let Some(total) = total_price(item).filter(|t| *t < rules.min_total_price) {
        errors.add_error(ObjectError::coded(
            object.clone(),
            vec![TOTAL_PRICE_CODE.to_string()],
            total_price_arguments(rules.min_total_price, total),
            None,
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rusty_binding::MessageSource;

    fn bad_item() -> Item {
        Item {
            item_name: Some(" ".to_string()),
            price: Some(500),
            quantity: Some(1),
            ..Item::default()
        }
    }

    fn run(style: InlineStyle, item: &Item) -> BindingResult {
        let mut errors = BindingResult::for_target("item", item);
        validate_inline(style, item, &ItemRules::default(), &mut errors).unwrap();
        errors
    }

    #[test]
    fn test_default_messages_drop_rejected_value() {
        let errors = run(InlineStyle::DefaultMessages, &bad_item());
        let price = errors.field_error("price").unwrap();
        assert_eq!(price.rejected_value, None);
        assert_eq!(
            price.default_message.as_deref(),
            Some("Price must be between 1,000 and 1,000,000.")
        );
        assert_eq!(errors.field_value("price"), None);
        assert_eq!(
            errors.global_error().unwrap().default_message.as_deref(),
            Some("Price * quantity must be at least 10,000. Current value = 500")
        );
    }

    #[test]
    fn test_rejected_values_are_kept() {
        let errors = run(InlineStyle::RejectedValues, &bad_item());
        assert_eq!(errors.field_value("price"), Some(Value::Int(500)));
        assert_eq!(errors.field_value("itemName"), Some(Value::from(" ")));
    }

    #[test]
    fn test_message_codes_resolve_through_catalog() {
        let errors = run(InlineStyle::MessageCodes, &bad_item());
        let messages = MessageSource::from_properties(
            "range.item.price=Price must be between {0} and {1}.\n\
             totalPrice=Price * quantity must be at least {0}. Current value = {1}",
        );
        assert_eq!(errors.field_error("price").unwrap().codes, vec!["range.item.price"]);
        assert_eq!(
            messages.resolve(errors.field_error("price").unwrap()),
            "Price must be between 1,000 and 1,000,000."
        );
        assert_eq!(
            messages.resolve(errors.global_error().unwrap()),
            "Price * quantity must be at least 10,000. Current value = 500"
        );
    }

    #[test]
    fn test_every_style_reports_the_same_fields() {
        for style in InlineStyle::ALL {
            let errors = run(style, &bad_item());
            let fields: Vec<&str> = errors.field_errors().iter().map(|e| e.field.as_str()).collect();
            // only the generated-code style checks email
            let expected = match style {
                InlineStyle::RejectValue => vec!["itemName", "price", "email"],
                _ => vec!["itemName", "price"],
            };
            assert_eq!(fields, expected, "{:?}", style);
            assert_eq!(errors.global_errors().len(), 1, "{:?}", style);
        }
    }

    #[test]
    fn test_clean_item_passes_every_style() {
        let item = Item::new("pen", 10_000, 10).with_email("a@b.com");
        for style in InlineStyle::ALL {
            assert!(!run(style, &item).has_errors(), "{:?}", style);
        }
    }
}
