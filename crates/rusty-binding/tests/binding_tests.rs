/// Integration tests for binding, constraint evaluation and message resolution
///
/// Each test drives a full pass the way a form handler would: bind raw
/// parameters, validate, then render messages for redisplay.

use pretty_assertions::assert_eq;
use rusty_binding::{
    bind_text, parse_number, BindFailure, Bindable, CodeFormat, Constraint, ConstraintSet, DataBinder,
    FieldSpec, FormContext, FormData, Group, MessageCodesResolver, MessageSource, Orchestrator, Value,
};

const REGISTER: Group = Group::new("register");

#[derive(Debug, Default)]
struct Member {
    nickname: Option<String>,
    age: Option<i32>,
    email: Option<String>,
}

impl Bindable for Member {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("nickname"),
        FieldSpec::integer("age"),
        FieldSpec::text("email"),
    ];

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "nickname" => Some(self.nickname.clone().into()),
            "age" => Some(self.age.into()),
            "email" => Some(self.email.clone().into()),
            _ => None,
        }
    }

    fn bind_field(&mut self, field: &str, raw: &str) -> Result<(), BindFailure> {
        match field {
            "nickname" => self.nickname = bind_text(raw),
            "age" => self.age = parse_number(raw)?,
            "email" => self.email = bind_text(raw),
            _ => return Err(BindFailure::UnknownField),
        }
        Ok(())
    }
}

fn orchestrator() -> Orchestrator<Member> {
    let constraints = ConstraintSet::builder()
        .field("nickname", [Constraint::not_blank()])
        .field("age", [Constraint::not_null().groups(&[REGISTER]), Constraint::range(14, 150)])
        .field("email", [Constraint::email()])
        .build()
        .unwrap();
    Orchestrator::builder("member")
        .constraints(constraints)
        .object_check(|member: &Member, errors| {
            if member.nickname.as_deref() == Some("admin") && member.age.unwrap_or(0) < 18 {
                errors.reject_with("reservedName", vec![Value::Int(18)], None);
            }
        })
        .build()
        .unwrap()
}

fn messages() -> MessageSource {
    MessageSource::from_properties(
        r#"
member.nickname=Nickname
member.age=Age
NotBlank={0} must not be blank
Range={0} must be between {2} and {1}
typeMismatch.Integer=Please enter a number
reservedName=Reserved names need age {0} or over
"#,
    )
}

// ============================================================================
// Binding then validating
// ============================================================================

#[test]
fn test_type_mismatch_survives_and_skips_constraints() {
    let form: FormData = [("nickname", "kim"), ("age", "twenty")].into_iter().collect();
    let binder = DataBinder::new("member");
    let (member, mut result) = binder.bind::<Member>(&form);

    orchestrator().run_into(&member, Some(REGISTER), &mut result);

    // NotNull on the unbound age is skipped: only the conversion failure remains
    let age_errors = result.field_errors_for("age");
    assert_eq!(age_errors.len(), 1);
    assert!(age_errors[0].binding_failure);

    let context = FormContext::from_result(&result, &messages());
    assert_eq!(context.get_error("age"), Some("Please enter a number"));
    assert_eq!(context.get_value("age"), Some("twenty"));
    assert_eq!(context.get_value("nickname"), Some("kim"));
}

#[test]
fn test_constraint_messages_use_field_labels() {
    let form: FormData = [("nickname", "  "), ("age", "7")].into_iter().collect();
    let (member, mut result) = DataBinder::new("member").bind::<Member>(&form);
    orchestrator().run_into(&member, None, &mut result);

    let context = FormContext::from_result(&result, &messages());
    assert_eq!(context.get_error("nickname"), Some("Nickname must not be blank"));
    assert_eq!(context.get_error("age"), Some("Age must be between 14 and 150"));
    assert_eq!(context.get_value("nickname"), Some("  "));
}

#[test]
fn test_object_error_after_field_errors() {
    let member = Member {
        nickname: Some("admin".to_string()),
        age: Some(15),
        email: Some("broken".to_string()),
    };
    let result = orchestrator().run(&member, Some(REGISTER));

    assert_eq!(result.field_errors().len(), 1);
    assert_eq!(result.field_error("email").unwrap().code(), Some("Email"));
    assert!(result.all_errors().last().unwrap().as_object().is_some());

    let context = FormContext::from_result(&result, &messages());
    assert_eq!(context.global_errors, vec!["Reserved names need age 18 or over"]);
    // no catalog entry: constraint default message
    assert_eq!(context.get_error("email"), Some("must be a well-formed email address"));
}

#[test]
fn test_group_only_constraint_needs_active_group() {
    let member = Member {
        nickname: Some("kim".to_string()),
        ..Member::default()
    };
    assert!(!orchestrator().run(&member, None).has_errors());
    assert!(orchestrator().run(&member, Some(REGISTER)).has_field_errors("age"));
}

// ============================================================================
// Codes resolver configuration
// ============================================================================

#[test]
fn test_postfix_codes_reach_recorded_errors() {
    let resolver = MessageCodesResolver::new().with_format(CodeFormat::PostfixErrorCode);
    let form: FormData = [("age", "x")].into_iter().collect();
    let (_, result) = DataBinder::new("member")
        .with_codes_resolver(resolver)
        .bind::<Member>(&form);

    assert_eq!(
        result.field_error("age").unwrap().codes,
        vec![
            "member.age.typeMismatch",
            "age.typeMismatch",
            "Integer.typeMismatch",
            "typeMismatch",
        ]
    );
}

#[test]
fn test_api_error_list_json() {
    let member = Member {
        nickname: Some(String::new()),
        ..Member::default()
    };
    let result = orchestrator().run(&member, None);
    let json = serde_json::to_value(result.all_errors()).unwrap();

    assert_eq!(json[0]["field"], "nickname");
    assert_eq!(json[0]["rejectedValue"], "");
    assert_eq!(json[0]["code"], "NotBlank");
    assert_eq!(json[0]["objectName"], "member");
    assert_eq!(json[0]["bindingFailure"], false);
    assert_eq!(json[0]["defaultMessage"], "must not be blank");
}
