// File: src/constraints.rs
// Purpose: Declared field constraints for items and the add/edit form objects

use rusty_binding::{Constraint, ConstraintSet, Error, Group};

use crate::config::ItemRules;
use crate::forms::{ItemSaveForm, ItemUpdateForm};
use crate::item::Item;

/// Constraints that apply when adding an item.
pub const SAVE_CHECK: Group = Group::new("SaveCheck");
/// Constraints that apply when editing an item.
pub const UPDATE_CHECK: Group = Group::new("UpdateCheck");

const BOTH: &[Group] = &[SAVE_CHECK, UPDATE_CHECK];

/// One set for both operations; the active group picks the subset.
pub fn item_constraints(rules: &ItemRules) -> Result<ConstraintSet<Item>, Error> {
    ConstraintSet::builder()
        .field("id", [Constraint::not_null().groups(&[UPDATE_CHECK])])
        .field("itemName", [Constraint::not_blank().groups(BOTH)])
        .field(
            "price",
            [
                Constraint::not_null().groups(BOTH),
                Constraint::range(rules.price_min, rules.price_max).groups(BOTH),
            ],
        )
        .field(
            "quantity",
            [
                Constraint::not_null().groups(BOTH),
                Constraint::max(rules.quantity_max).groups(&[SAVE_CHECK]),
            ],
        )
        .field("email", [Constraint::not_blank().groups(BOTH), Constraint::email()])
        .build()
}

pub fn save_form_constraints(rules: &ItemRules) -> Result<ConstraintSet<ItemSaveForm>, Error> {
    ConstraintSet::builder()
        .field("itemName", [Constraint::not_blank()])
        .field(
            "price",
            [Constraint::not_null(), Constraint::range(rules.price_min, rules.price_max)],
        )
        .field("quantity", [Constraint::not_null(), Constraint::max(rules.quantity_max)])
        .field("email", [Constraint::email()])
        .build()
}

/// Same as the save form but with a required id and no quantity cap.
pub fn update_form_constraints(rules: &ItemRules) -> Result<ConstraintSet<ItemUpdateForm>, Error> {
    ConstraintSet::builder()
        .field("id", [Constraint::not_null()])
        .field("itemName", [Constraint::not_blank()])
        .field(
            "price",
            [Constraint::not_null(), Constraint::range(rules.price_min, rules.price_max)],
        )
        .field("quantity", [Constraint::not_null()])
        .field("email", [Constraint::email()])
        .build()
}
