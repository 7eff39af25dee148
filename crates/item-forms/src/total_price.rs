// File: src/total_price.rs
// Purpose: Cross-field rule: price * quantity must reach a minimum total

use rusty_binding::{BindingResult, Value};

use crate::item::Priced;

/// Object error code recorded when the total is too low.
pub const TOTAL_PRICE_CODE: &str = "totalPrice";

/// `price * quantity`, or `None` while either is missing.
pub fn total_price(target: &impl Priced) -> Option<i64> {
    Some(i64::from(target.price()?) * i64::from(target.quantity()?))
}

/// Arguments are `[minimum, actual]`.
pub fn total_price_arguments(minimum: i64, actual: i64) -> Vec<Value> {
    vec![Value::Int(minimum), Value::Int(actual)]
}

/// Reject the whole object when the total is below `minimum`. Skipped
/// while either number is missing; those fields report their own errors.
pub fn check_total_price(target: &impl Priced, minimum: i64, errors: &mut BindingResult) {
    if let Some(total) = total_price(target) {
        if total < minimum {
            errors.reject_with(TOTAL_PRICE_CODE, total_price_arguments(minimum, total), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_low_total_is_one_object_error() {
        let item = Item::new("pen", 100, 1);
        let mut errors = BindingResult::for_target("item", &item);
        check_total_price(&item, 10_000, &mut errors);

        assert_eq!(errors.error_count(), 1);
        let error = errors.global_error().unwrap();
        assert_eq!(error.code(), Some("totalPrice"));
        assert_eq!(error.codes, vec!["totalPrice.item", "totalPrice"]);
        assert_eq!(error.arguments, vec![Value::Int(10_000), Value::Int(100)]);
    }

    #[rstest]
    #[case(Some(1000), Some(10), false)]
    #[case(Some(999), Some(10), true)]
    #[case(None, Some(10), false)]
    #[case(Some(500), None, false)]
    fn test_threshold(#[case] price: Option<i32>, #[case] quantity: Option<i32>, #[case] rejected: bool) {
        let item = Item {
            price,
            quantity,
            ..Item::default()
        };
        let mut errors = BindingResult::new("item");
        check_total_price(&item, 10_000, &mut errors);
        assert_eq!(errors.has_global_errors(), rejected);
    }

    #[test]
    fn test_large_totals_do_not_overflow() {
        let item = Item::new("crate", i32::MAX, i32::MAX);
        assert_eq!(total_price(&item), Some(i64::from(i32::MAX) * i64::from(i32::MAX)));
    }
}
