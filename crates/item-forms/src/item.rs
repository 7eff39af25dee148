// File: src/item.rs
// Purpose: The item record bound from add/edit forms

use rusty_binding::{bind_text, parse_number, BindFailure, Bindable, FieldSpec, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Object name every item pass records its errors under.
pub const OBJECT_NAME: &str = "item";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Option<i64>,
    pub item_name: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
    pub email: Option<String>,
}

impl Item {
    pub fn new(item_name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            id: None,
            item_name: Some(item_name.into()),
            price: Some(price),
            quantity: Some(quantity),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Anything carrying the two numbers the total-price rule multiplies.
pub trait Priced {
    fn price(&self) -> Option<i32>;
    fn quantity(&self) -> Option<i32>;
}

impl Priced for Item {
    fn price(&self) -> Option<i32> {
        self.price
    }

    fn quantity(&self) -> Option<i32> {
        self.quantity
    }
}

impl Bindable for Item {
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

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Item(id={}, itemName={}, price={}, quantity={}, email={})",
            display_opt(&self.id),
            display_opt(&self.item_name),
            display_opt(&self.price),
            display_opt(&self.quantity),
            display_opt(&self.email)
        )
    }
}

pub(crate) fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "null".to_string(), |v| v.to_string())
}
