// File: src/binder.rs
// Purpose: Bind submitted form parameters onto a target, recording conversion failures

use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::codes::MessageCodesResolver;
use crate::model::{FieldError, Resolvable};
use crate::result::BindingResult;
use crate::target::{BindFailure, Bindable};
use crate::value::Value;

/// Submitted parameters, as raw text.
///
/// Values are kept exactly as submitted (no trimming) so that a rejected
/// value is redisplayed the way the user typed it.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    raw_json: Option<JsonValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self {
            fields,
            raw_json: None,
        }
    }

    /// Parse an `application/x-www-form-urlencoded` body. The first
    /// occurrence of a repeated key wins.
    pub fn from_urlencoded(body: &str) -> Self {
        let mut fields = HashMap::new();
        for pair in body.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            if key.is_empty() {
                continue;
            }
            fields.entry(key).or_insert_with(|| decode_component(value));
        }
        Self::from_fields(fields)
    }

    /// Flatten a JSON object. Strings are taken as-is, other scalars by
    /// their JSON text, and `null` counts as not submitted.
    pub fn from_json(json: JsonValue) -> Self {
        let mut fields = HashMap::new();
        if let JsonValue::Object(map) = &json {
            for (key, value) in map {
                match value {
                    JsonValue::Null => {}
                    JsonValue::String(s) => {
                        fields.insert(key.clone(), s.clone());
                    }
                    other => {
                        fields.insert(key.clone(), other.to_string());
                    }
                }
            }
        }
        Self {
            fields,
            raw_json: Some(json),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.fields.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> Vec<&String> {
        self.fields.keys().collect()
    }

    pub fn json(&self) -> Option<&JsonValue> {
        self.raw_json.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.raw_json.is_none()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_fields(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).map(|d| d.into_owned());
    decoded.unwrap_or(spaced)
}

/// Copies form parameters onto a target.
///
/// A parameter that cannot be converted is not an error of the call: it
/// becomes a `typeMismatch` field error with `binding_failure` set and the
/// raw text kept as the rejected value, and the field stays unset.
#[derive(Debug, Clone)]
pub struct DataBinder {
    object_name: String,
    disallowed_fields: Vec<String>,
    required_fields: Vec<String>,
    codes_resolver: MessageCodesResolver,
}

impl DataBinder {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            disallowed_fields: Vec::new(),
            required_fields: Vec::new(),
            codes_resolver: MessageCodesResolver::default(),
        }
    }

    /// Parameters for these fields are ignored.
    pub fn disallow(mut self, fields: &[&str]) -> Self {
        self.disallowed_fields
            .extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// These fields must be submitted with non-blank text.
    pub fn require(mut self, fields: &[&str]) -> Self {
        self.required_fields
            .extend(fields.iter().map(|f| f.to_string()));
        self
    }

    pub fn with_codes_resolver(mut self, codes_resolver: MessageCodesResolver) -> Self {
        self.codes_resolver = codes_resolver;
        self
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Bind onto a fresh default target.
    pub fn bind<T: Bindable + Default>(&self, form: &FormData) -> (T, BindingResult) {
        let mut target = T::default();
        let result = self.bind_into(&mut target, form);
        (target, result)
    }

    /// Bind onto an existing target. Fields are visited in declaration order.
    pub fn bind_into<T: Bindable>(&self, target: &mut T, form: &FormData) -> BindingResult {
        let mut failures = Vec::new();

        for key in form.keys() {
            if T::field_spec(key).is_none() {
                tracing::trace!("Ignoring unknown parameter '{}' for '{}'", key, self.object_name);
            }
        }

        for spec in T::FIELDS {
            let field = spec.name;
            if self.disallowed_fields.iter().any(|f| f == field) {
                if form.has(field) {
                    tracing::debug!("Field '{}' is not allowed for binding on '{}'", field, self.object_name);
                }
                continue;
            }

            let raw = form.get(field);
            if self.required_fields.iter().any(|f| f == field)
                && raw.map_or(true, |r| r.trim().is_empty())
            {
                failures.push(self.missing_field(field, spec.kind.type_name(), raw));
                continue;
            }
            let Some(raw) = raw else { continue };

            match target.bind_field(field, raw) {
                Ok(()) => {}
                Err(BindFailure::TypeMismatch) => {
                    tracing::debug!("Type mismatch binding '{}' = {:?}", field, raw);
                    failures.push(self.type_mismatch(field, spec.kind.type_name(), raw));
                }
                Err(BindFailure::UnknownField) => {
                    tracing::trace!("Target rejected field '{}'", field);
                }
            }
        }

        let mut result =
            BindingResult::for_target(self.object_name.clone(), &*target).with_codes_resolver(self.codes_resolver.clone());
        for failure in failures {
            result.push(failure.into());
        }
        result
    }

    fn type_mismatch(&self, field: &str, type_name: &str, raw: &str) -> FieldError {
        let codes = self
            .codes_resolver
            .resolve_field_codes("typeMismatch", &self.object_name, field, Some(type_name));
        FieldError::rejected(self.object_name.clone(), field, raw)
            .with_codes(codes)
            .with_arguments(vec![Value::Message(Resolvable::for_field(&self.object_name, field))])
            .with_default_message(format!(
                "Failed to convert value '{}' to required type '{}' for property '{}'",
                raw, type_name, field
            ))
            .with_binding_failure(true)
    }

    fn missing_field(&self, field: &str, type_name: &str, raw: Option<&String>) -> FieldError {
        let codes = self
            .codes_resolver
            .resolve_field_codes("required", &self.object_name, field, Some(type_name));
        let rejected = raw.map(|r| Value::Text(r.clone())).unwrap_or_else(|| Value::from(""));
        FieldError::rejected(self.object_name.clone(), field, rejected)
            .with_codes(codes)
            .with_arguments(vec![Value::Message(Resolvable::for_field(&self.object_name, field))])
            .with_default_message(format!("Field '{}' is required", field))
            .with_binding_failure(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{bind_text, parse_number, FieldSpec};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct Ticket {
        title: Option<String>,
        seats: Option<i32>,
    }

    impl Bindable for Ticket {
        const FIELDS: &'static [FieldSpec] = &[FieldSpec::text("title"), FieldSpec::integer("seats")];

        fn field_value(&self, field: &str) -> Option<Value> {
            match field {
                "title" => Some(self.title.clone().into()),
                "seats" => Some(self.seats.into()),
                _ => None,
            }
        }

        fn bind_field(&mut self, field: &str, raw: &str) -> Result<(), BindFailure> {
            match field {
                "title" => self.title = bind_text(raw),
                "seats" => self.seats = parse_number(raw)?,
                _ => return Err(BindFailure::UnknownField),
            }
            Ok(())
        }
    }

    #[test]
    fn test_urlencoded_parsing() {
        let form = FormData::from_urlencoded("title=Opening+night%21&seats=2&seats=9&flag");
        assert_eq!(form.get("title").map(String::as_str), Some("Opening night!"));
        assert_eq!(form.get("seats").map(String::as_str), Some("2"));
        assert_eq!(form.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn test_json_form_keeps_strings_verbatim() {
        let form = FormData::from_json(serde_json::json!({
            "title": "  spaced  ",
            "seats": 3,
            "note": null
        }));
        assert_eq!(form.get("title").map(String::as_str), Some("  spaced  "));
        assert_eq!(form.get("seats").map(String::as_str), Some("3"));
        assert!(!form.has("note"));
        assert!(form.json().is_some());
    }

    #[test]
    fn test_built_form_is_bound() {
        let mut form = FormData::new();
        assert!(form.is_empty());
        form.insert("seats", "7");
        form.insert("title", " Matinee ");
        assert!(!form.is_empty());

        let (ticket, result) = DataBinder::new("ticket").bind::<Ticket>(&form);
        assert_eq!(ticket.seats, Some(7));
        assert_eq!(ticket.title.as_deref(), Some(" Matinee "));
        assert!(!result.has_errors());
    }

    #[test]
    fn test_successful_bind() {
        let form: FormData = [("title", "Gala"), ("seats", "4")].into_iter().collect();
        let (ticket, result) = DataBinder::new("ticket").bind::<Ticket>(&form);
        assert_eq!(ticket.title.as_deref(), Some("Gala"));
        assert_eq!(ticket.seats, Some(4));
        assert!(!result.has_errors());
        assert_eq!(result.field_value("seats"), Some(Value::Int(4)));
    }

    #[test]
    fn test_type_mismatch_is_recorded() {
        let form: FormData = [("title", "Gala"), ("seats", "qqq")].into_iter().collect();
        let (ticket, result) = DataBinder::new("ticket").bind::<Ticket>(&form);

        assert_eq!(ticket.seats, None);
        let error = result.field_error("seats").unwrap();
        assert!(error.binding_failure);
        assert_eq!(error.rejected_value, Some(Value::from("qqq")));
        assert_eq!(
            error.codes,
            vec![
                "typeMismatch.ticket.seats",
                "typeMismatch.seats",
                "typeMismatch.Integer",
                "typeMismatch",
            ]
        );
        assert_eq!(result.field_value("seats"), Some(Value::from("qqq")));
    }

    #[test]
    fn test_blank_number_binds_to_null() {
        let form: FormData = [("seats", "")].into_iter().collect();
        let (ticket, result) = DataBinder::new("ticket").bind::<Ticket>(&form);
        assert_eq!(ticket.seats, None);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_disallowed_and_required_fields() {
        let form: FormData = [("title", "Gala"), ("seats", "4")].into_iter().collect();
        let binder = DataBinder::new("ticket").disallow(&["seats"]);
        let (ticket, _) = binder.bind::<Ticket>(&form);
        assert_eq!(ticket.seats, None);

        let form: FormData = [("title", " ")].into_iter().collect();
        let binder = DataBinder::new("ticket").require(&["title", "seats"]);
        let (_, result) = binder.bind::<Ticket>(&form);
        let fields: Vec<&str> = result.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "seats"]);
        assert_eq!(result.field_error("title").unwrap().code(), Some("required"));
        assert!(result.field_errors().iter().all(|e| e.binding_failure));
    }
}
