// File: src/report.rs
// Purpose: Plain-text rendering of a validation pass

use rusty_binding::{BindingResult, FormContext};

pub fn print(errors: &BindingResult, context: &FormContext) {
    if !errors.has_errors() {
        println!("OK: no errors");
        return;
    }

    println!("{}", errors);
    println!();

    println!("Messages:");
    for message in &context.global_errors {
        println!("  * {}", message);
    }
    for field in errors.field_names() {
        for message in context.get_errors(field) {
            println!("  {}: {}", field, message);
        }
    }

    println!();
    println!("Redisplay:");
    for field in errors.field_names() {
        let class = context.field_class(field, "input", "field-error");
        println!("  {} [{}] = {}", field, class, context.get_value(field).unwrap_or(""));
    }
}
