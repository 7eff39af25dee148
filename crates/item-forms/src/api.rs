// File: src/api.rs
// Purpose: JSON variant of the add-item submission

use rusty_binding::{ErrorEntry, Error};
use serde::Serialize;

use crate::forms::ItemSaveForm;
use crate::service::ItemValidations;

/// Response body: the error list when rejected, the accepted form otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiOutcome {
    Rejected(Vec<ErrorEntry>),
    Accepted(ItemSaveForm),
}

impl ApiOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ApiOutcome::Accepted(_))
    }
}

/// Parse and validate a JSON add-item body.
///
/// A body that is not valid JSON for the form (including a number field
/// sent as text) is an error: validation never runs on it.
pub fn add_item_json(validations: &ItemValidations, body: &str) -> Result<ApiOutcome, Error> {
    tracing::info!("API add item request");
    let form: ItemSaveForm = serde_json::from_str(body)?;

    let errors = validations.save_form_orchestrator().run(&form, None);

    if errors.has_errors() {
        tracing::warn!("Validation errors - {}", errors);
        return Ok(ApiOutcome::Rejected(errors.into_errors()));
    }
    tracing::info!("Accepted {}", form);
    Ok(ApiOutcome::Accepted(form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    fn validations() -> ItemValidations {
        ItemValidations::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn test_valid_body_is_echoed() {
        let outcome = add_item_json(
            &validations(),
            r#"{"itemName":"pen","price":10000,"quantity":10,"email":"a@b.com"}"#,
        )
        .unwrap();
        assert!(outcome.is_accepted());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["itemName"], "pen");
        assert_eq!(json["price"], 10000);
    }

    #[test]
    fn test_invalid_body_returns_error_list() {
        let outcome = add_item_json(&validations(), r#"{"itemName":"pen","price":100,"quantity":1}"#).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();

        let list = json.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["field"], "price");
        assert_eq!(list[0]["code"], "Range");
        assert_eq!(list[0]["rejectedValue"], 100);
        assert_eq!(list[1]["code"], "totalPrice");
        assert_eq!(list[1]["arguments"], serde_json::json!([10000, 100]));
    }

    #[test]
    fn test_unreadable_body_is_an_error() {
        let err = add_item_json(&validations(), r#"{"itemName":"pen","price":"qqq"}"#).unwrap_err();
        assert!(matches!(err, Error::Unreadable(_)));
        assert!(add_item_json(&validations(), "not json").is_err());
    }
}
