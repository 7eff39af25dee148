// Item Forms - add/edit item validation built on rusty-binding
// Inline rules, a reusable validator, grouped constraints and form objects.

pub mod api;
pub mod config;
pub mod constraints;
pub mod forms;
pub mod inline;
pub mod item;
pub mod item_validator;
pub mod service;
pub mod total_price;

pub use api::{add_item_json, ApiOutcome};
pub use config::{Config, ItemRules, MessagesConfig};
pub use constraints::{item_constraints, save_form_constraints, update_form_constraints, SAVE_CHECK, UPDATE_CHECK};
pub use forms::{ItemSaveForm, ItemUpdateForm};
pub use inline::{validate_inline, InlineStyle};
pub use item::{Item, Priced, OBJECT_NAME};
pub use item_validator::ItemValidator;
pub use service::{ItemValidations, Submission};
pub use total_price::{check_total_price, total_price, TOTAL_PRICE_CODE};
