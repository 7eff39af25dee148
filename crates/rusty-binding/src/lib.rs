// Rusty Binding - validation results and message resolution for server-side forms
// Collects field and object errors, keeps rejected input for redisplay and
// resolves messages through a code chain into a message catalog.

pub mod binder;
pub mod codes;
pub mod constraints;
pub mod error;
pub mod form_context;
pub mod messages;
pub mod model;
pub mod orchestrator;
pub mod result;
pub mod target;
pub mod validation;
pub mod value;

pub use binder::{DataBinder, FormData};
pub use codes::{CodeFormat, MessageCodesResolver, CODE_SEPARATOR};
pub use constraints::{Constraint, ConstraintKind, ConstraintSet, ConstraintSetBuilder, Group};
pub use error::Error;
pub use form_context::FormContext;
pub use messages::{group_thousands, MessageSource};
pub use model::{ErrorEntry, FieldError, MessageSourceResolvable, ObjectError, Resolvable};
pub use orchestrator::{ObjectCheck, Orchestrator, OrchestratorBuilder};
pub use result::BindingResult;
pub use target::{bind_text, parse_number, BindFailure, Bindable, FieldKind, FieldSpec};
pub use validation::validators::{has_text, is_valid_email, reject_if_empty, reject_if_empty_or_whitespace};
pub use validation::{invoke_validator, supports_type, Validator};
pub use value::Value;
