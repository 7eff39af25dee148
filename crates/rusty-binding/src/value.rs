// File: src/value.rs
// Purpose: Values carried by errors (rejected input and message arguments)

use serde::Serialize;
use std::fmt;

use crate::model::Resolvable;

/// A rejected value or message argument.
///
/// `Message` arguments are resolved against the message source at render
/// time, which is how field labels end up inside constraint messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Message(Resolvable),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Plain rendering used when a value is written back into a form input.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Message(resolvable) => match &resolvable.default_message {
                Some(message) => f.write_str(message),
                None => f.write_str(resolvable.codes.last().map(String::as_str).unwrap_or("")),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Resolvable> for Value {
    fn from(r: Resolvable) -> Self {
        Value::Message(r)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_for_redisplay() {
        assert_eq!(Value::Int(10000).to_string(), "10000");
        assert_eq!(Value::from("qqq").to_string(), "qqq");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(Some(500)), Value::Int(500));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a".to_string())), Value::Text("a".to_string()));
    }

    #[test]
    fn test_serializes_untagged() {
        assert_eq!(serde_json::to_value(Value::Int(3)).unwrap(), serde_json::json!(3));
        assert_eq!(serde_json::to_value(Value::Null).unwrap(), serde_json::Value::Null);
    }
}
