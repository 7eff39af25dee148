// File: src/forms.rs
// Purpose: Per-operation form objects for adding and editing items

use rusty_binding::{bind_text, parse_number, BindFailure, Bindable, FieldSpec, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::item::{display_opt, Item, Priced};

/// Submitted fields of the add form. Has no id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemSaveForm {
    pub item_name: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
    pub email: Option<String>,
}

/// Submitted fields of the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemUpdateForm {
    pub id: Option<i64>,
    pub item_name: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
    pub email: Option<String>,
}

impl ItemSaveForm {
    pub fn new(item_name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            item_name: Some(item_name.into()),
            price: Some(price),
            quantity: Some(quantity),
            email: None,
        }
    }
}

impl From<ItemSaveForm> for Item {
    fn from(form: ItemSaveForm) -> Self {
        Item {
            id: None,
            item_name: form.item_name,
            price: form.price,
            quantity: form.quantity,
            email: form.email,
        }
    }
}

impl From<ItemUpdateForm> for Item {
    fn from(form: ItemUpdateForm) -> Self {
        Item {
            id: form.id,
            item_name: form.item_name,
            price: form.price,
            quantity: form.quantity,
            email: form.email,
        }
    }
}

impl Priced for ItemSaveForm {
    fn price(&self) -> Option<i32> {
        self.price
    }

    fn quantity(&self) -> Option<i32> {
        self.quantity
    }
}

impl Priced for ItemUpdateForm {
    fn price(&self) -> Option<i32> {
        self.price
    }

    fn quantity(&self) -> Option<i32> {
        self.quantity
    }
}

impl Bindable for ItemSaveForm {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("itemName"),
        FieldSpec::integer("price"),
        FieldSpec::integer("quantity"),
        FieldSpec::text("email"),
    ];

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "itemName" => Some(self.item_name.clone().into()),
            "price" => Some(self.price.into()),
            "quantity" => Some(self.quantity.into()),
            "email" => Some(self.email.clone().into()),
            _ => None,
        }
    }

    fn bind_field(&mut self, field: &str, raw: &str) -> Result<(), BindFailure> {
        match field {
            "itemName" => self.item_name = bind_text(raw),
            "price" => self.price = parse_number(raw)?,
            "quantity" => self.quantity = parse_number(raw)?,
            "email" => self.email = bind_text(raw),
            _ => return Err(BindFailure::UnknownField),
        }
        Ok(())
    }
}

impl Bindable for ItemUpdateForm {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::long("id"),
        FieldSpec::text("itemName"),
        FieldSpec::integer("price"),
        FieldSpec::integer("quantity"),
        FieldSpec::text("email"),
    ];

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.into()),
            "itemName" => Some(self.item_name.clone().into()),
            "price" => Some(self.price.into()),
            "quantity" => Some(self.quantity.into()),
            "email" => Some(self.email.clone().into()),
            _ => None,
        }
    }

    fn bind_field(&mut self, field: &str, raw: &str) -> Result<(), BindFailure> {
        match field {
            "id" => self.id = parse_number(raw)?,
            "itemName" => self.item_name = bind_text(raw),
            "price" => self.price = parse_number(raw)?,
            "quantity" => self.quantity = parse_number(raw)?,
            "email" => self.email = bind_text(raw),
            _ => return Err(BindFailure::UnknownField),
        }
        Ok(())
    }
}

impl fmt::Display for ItemSaveForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ItemSaveForm(itemName={}, price={}, quantity={}, email={})",
            display_opt(&self.item_name),
            display_opt(&self.price),
            display_opt(&self.quantity),
            display_opt(&self.email)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_form_into_item_has_no_id() {
        let form = ItemSaveForm::new("pen", 1000, 10);
        let item: Item = form.into();
        assert_eq!(item.id, None);
        assert_eq!(item.item_name.as_deref(), Some("pen"));
    }

    #[test]
    fn test_update_form_keeps_id() {
        let form = ItemUpdateForm {
            id: Some(7),
            ..ItemUpdateForm::default()
        };
        assert_eq!(Item::from(form).id, Some(7));
    }

    #[test]
    fn test_save_form_json_missing_fields_are_null() {
        let form: ItemSaveForm = serde_json::from_str(r#"{"itemName":"pen","price":1000}"#).unwrap();
        assert_eq!(form.quantity, None);
        assert_eq!(form.price, Some(1000));
    }

    #[test]
    fn test_save_form_has_no_id_field() {
        assert!(ItemSaveForm::field_spec("id").is_none());
        assert!(ItemUpdateForm::field_spec("id").is_some());
    }
}
