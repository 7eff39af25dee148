// File: src/error.rs
// Purpose: Programmer and configuration errors (validation failures are never errors)

/// Misuse of the engine. These surface at startup or at the offending call,
/// never as a recorded validation failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid target for validator [{validator}]: {target}")]
    UnsupportedTarget {
        validator: String,
        target: String,
    },

    #[error("Error object name '{error}' does not match binding result object name '{expected}'")]
    ObjectNameMismatch { expected: String, error: String },

    #[error("Invalid constraint on field '{field}': {reason}")]
    InvalidConstraint { field: String, reason: String },

    #[error("Unreadable payload: {0}")]
    Unreadable(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_constraint(field: &str, reason: impl Into<String>) -> Self {
        Error::InvalidConstraint {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
