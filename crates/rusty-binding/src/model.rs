// File: src/model.rs
// Purpose: Field and object error values recorded during a validation pass

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::value::Value;

/// Anything that can be turned into a message: ordered candidate codes,
/// positional arguments and an optional fallback text.
pub trait MessageSourceResolvable {
    fn codes(&self) -> &[String];
    fn arguments(&self) -> &[Value];
    fn default_message(&self) -> Option<&str>;
}

/// Free-standing resolvable, mostly used as a message argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolvable {
    pub codes: Vec<String>,
    pub arguments: Vec<Value>,
    pub default_message: Option<String>,
}

impl Resolvable {
    pub fn new(codes: Vec<String>, arguments: Vec<Value>, default_message: Option<String>) -> Self {
        Self {
            codes,
            arguments,
            default_message,
        }
    }

    /// Label argument for a field: `item.price`, then `price`, falling back
    /// to the bare field name.
    pub fn for_field(object_name: &str, field: &str) -> Self {
        Self {
            codes: vec![format!("{}.{}", object_name, field), field.to_string()],
            arguments: Vec::new(),
            default_message: Some(field.to_string()),
        }
    }
}

impl MessageSourceResolvable for Resolvable {
    fn codes(&self) -> &[String] {
        &self.codes
    }

    fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    fn default_message(&self) -> Option<&str> {
        self.default_message.as_deref()
    }
}

/// A failure spanning the whole object, such as a cross-field rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectError {
    pub object_name: String,
    pub codes: Vec<String>,
    pub arguments: Vec<Value>,
    pub default_message: Option<String>,
}

impl ObjectError {
    /// Error carrying only literal text, no codes.
    pub fn new(object_name: impl Into<String>, default_message: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            codes: Vec::new(),
            arguments: Vec::new(),
            default_message: Some(default_message.into()),
        }
    }

    pub fn coded(
        object_name: impl Into<String>,
        codes: Vec<String>,
        arguments: Vec<Value>,
        default_message: Option<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            codes,
            arguments,
            default_message,
        }
    }

    /// Least specific code, if any.
    pub fn code(&self) -> Option<&str> {
        self.codes.last().map(String::as_str)
    }
}

/// A failure of one named field.
///
/// `rejected_value` is `None` only when the caller did not track the input;
/// a tracked null input is `Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub object_name: String,
    pub field: String,
    pub rejected_value: Option<Value>,
    pub binding_failure: bool,
    pub codes: Vec<String>,
    pub arguments: Vec<Value>,
    pub default_message: Option<String>,
}

impl FieldError {
    /// Error with literal text and no rejected value.
    pub fn new(
        object_name: impl Into<String>,
        field: impl Into<String>,
        default_message: impl Into<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            field: field.into(),
            rejected_value: None,
            binding_failure: false,
            codes: Vec::new(),
            arguments: Vec::new(),
            default_message: Some(default_message.into()),
        }
    }

    /// Error that keeps the submitted value for redisplay.
    pub fn rejected(
        object_name: impl Into<String>,
        field: impl Into<String>,
        rejected_value: impl Into<Value>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            field: field.into(),
            rejected_value: Some(rejected_value.into()),
            binding_failure: false,
            codes: Vec::new(),
            arguments: Vec::new(),
            default_message: None,
        }
    }

    pub fn with_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = Some(message.into());
        self
    }

    pub fn with_binding_failure(mut self, binding_failure: bool) -> Self {
        self.binding_failure = binding_failure;
        self
    }

    pub fn code(&self) -> Option<&str> {
        self.codes.last().map(String::as_str)
    }
}

impl MessageSourceResolvable for ObjectError {
    fn codes(&self) -> &[String] {
        &self.codes
    }

    fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    fn default_message(&self) -> Option<&str> {
        self.default_message.as_deref()
    }
}

impl MessageSourceResolvable for FieldError {
    fn codes(&self) -> &[String] {
        &self.codes
    }

    fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    fn default_message(&self) -> Option<&str> {
        self.default_message.as_deref()
    }
}

/// One recorded error, kept in insertion order by the binding result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorEntry {
    Field(FieldError),
    Object(ObjectError),
}

impl ErrorEntry {
    pub fn object_name(&self) -> &str {
        match self {
            ErrorEntry::Field(e) => &e.object_name,
            ErrorEntry::Object(e) => &e.object_name,
        }
    }

    pub fn as_field(&self) -> Option<&FieldError> {
        match self {
            ErrorEntry::Field(e) => Some(e),
            ErrorEntry::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectError> {
        match self {
            ErrorEntry::Object(e) => Some(e),
            ErrorEntry::Field(_) => None,
        }
    }
}

impl From<FieldError> for ErrorEntry {
    fn from(e: FieldError) -> Self {
        ErrorEntry::Field(e)
    }
}

impl From<ObjectError> for ErrorEntry {
    fn from(e: ObjectError) -> Self {
        ErrorEntry::Object(e)
    }
}

impl MessageSourceResolvable for ErrorEntry {
    fn codes(&self) -> &[String] {
        match self {
            ErrorEntry::Field(e) => e.codes(),
            ErrorEntry::Object(e) => e.codes(),
        }
    }

    fn arguments(&self) -> &[Value] {
        match self {
            ErrorEntry::Field(e) => e.arguments(),
            ErrorEntry::Object(e) => e.arguments(),
        }
    }

    fn default_message(&self) -> Option<&str> {
        match self {
            ErrorEntry::Field(e) => e.default_message(),
            ErrorEntry::Object(e) => e.default_message(),
        }
    }
}

// JSON shape of the API error list.

impl Serialize for ObjectError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ObjectError", 5)?;
        s.serialize_field("codes", &self.codes)?;
        s.serialize_field("arguments", &self.arguments)?;
        s.serialize_field("defaultMessage", &self.default_message)?;
        s.serialize_field("objectName", &self.object_name)?;
        s.serialize_field("code", &self.code())?;
        s.end()
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FieldError", 8)?;
        s.serialize_field("codes", &self.codes)?;
        s.serialize_field("arguments", &self.arguments)?;
        s.serialize_field("defaultMessage", &self.default_message)?;
        s.serialize_field("objectName", &self.object_name)?;
        s.serialize_field("field", &self.field)?;
        s.serialize_field("rejectedValue", &self.rejected_value)?;
        s.serialize_field("bindingFailure", &self.binding_failure)?;
        s.serialize_field("code", &self.code())?;
        s.end()
    }
}

// Log rendering: `codes [..]; arguments [..]; default message [..]`

struct Arguments<'a>(&'a [Value]);

impl fmt::Display for Arguments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match arg {
                Value::Null => f.write_str("null")?,
                Value::Message(r) => write!(f, "{}", ResolvableText(r))?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}

struct ResolvableText<'a, R: ?Sized>(&'a R);

impl<R: MessageSourceResolvable + ?Sized> fmt::Display for ResolvableText<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "codes [{}]; arguments [{}]; default message [{}]",
            self.0.codes().join(","),
            Arguments(self.0.arguments()),
            self.0.default_message().unwrap_or("null")
        )
    }
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in object '{}': {}", self.object_name, ResolvableText(self))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rejected = match &self.rejected_value {
            None | Some(Value::Null) => "null".to_string(),
            Some(v) => v.to_string(),
        };
        write!(
            f,
            "Field error in object '{}' on field '{}': rejected value [{}]; {}",
            self.object_name,
            self.field,
            rejected,
            ResolvableText(self)
        )
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorEntry::Field(e) => e.fmt(f),
            ErrorEntry::Object(e) => e.fmt(f),
        }
    }
}
