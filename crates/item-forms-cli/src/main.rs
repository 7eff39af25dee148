mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use item_forms::{add_item_json, ApiOutcome, Config, InlineStyle, ItemValidations};
use rusty_binding::{CodeFormat, FormData, MessageCodesResolver};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "item-forms", about = "Validate item add/edit form submissions")]
struct Cli {
    /// Config file (default: ./item-forms.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind a submitted form and run one validation approach
    Validate {
        #[arg(long, value_enum, default_value = "create")]
        approach: Approach,
        /// Form parameter as name=value (repeatable)
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
        /// Url-encoded body, e.g. "itemName=pen&price=1000"
        #[arg(long, conflicts_with = "fields")]
        body: Option<String>,
        /// Print the error list as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Submit a JSON body to the add-item API
    Api {
        /// JSON body
        body: String,
    },
    /// Print the message codes generated for an error code
    Codes {
        code: String,
        #[arg(long, default_value = "item")]
        object: String,
        #[arg(long)]
        field: Option<String>,
        /// Field type, e.g. Integer or String
        #[arg(long = "type")]
        field_type: Option<String>,
        #[arg(long)]
        postfix: bool,
        #[arg(long, default_value = "")]
        prefix: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Approach {
    DefaultMessages,
    RejectedValues,
    MessageCodes,
    RejectValue,
    Validator,
    BoundValidator,
    Create,
    Update,
    SaveForm,
    UpdateForm,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            approach,
            fields,
            body,
            json,
        } => load(cli.config.as_ref()).and_then(|v| validate(&v, approach, &fields, body.as_deref(), json)),
        Commands::Api { body } => load(cli.config.as_ref()).and_then(|v| api(&v, &body)),
        Commands::Codes {
            code,
            object,
            field,
            field_type,
            postfix,
            prefix,
        } => {
            let format = if postfix {
                CodeFormat::PostfixErrorCode
            } else {
                CodeFormat::PrefixErrorCode
            };
            let resolver = MessageCodesResolver::new().with_format(format).with_prefix(prefix);
            for code in resolver.resolve(&code, &object, field.as_deref(), field_type.as_deref()) {
                println!("{}", code);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load(path: Option<&PathBuf>) -> Result<ItemValidations> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    ItemValidations::from_config(&config)
}

fn parse_fields(fields: &[String]) -> Result<FormData> {
    let mut form = FormData::new();
    for pair in fields {
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected NAME=VALUE, got '{}'", pair))?;
        form.insert(name, value);
    }
    Ok(form)
}

fn validate(
    validations: &ItemValidations,
    approach: Approach,
    fields: &[String],
    body: Option<&str>,
    json: bool,
) -> Result<()> {
    let form = match body {
        Some(body) => FormData::from_urlencoded(body),
        None => parse_fields(fields)?,
    };

    let errors = match approach {
        Approach::DefaultMessages => validations.validate_inline(&form, InlineStyle::DefaultMessages)?.errors,
        Approach::RejectedValues => validations.validate_inline(&form, InlineStyle::RejectedValues)?.errors,
        Approach::MessageCodes => validations.validate_inline(&form, InlineStyle::MessageCodes)?.errors,
        Approach::RejectValue => validations.validate_inline(&form, InlineStyle::RejectValue)?.errors,
        Approach::Validator => validations.validate_with_validator(&form)?.errors,
        Approach::BoundValidator => validations.validate_bound(&form).errors,
        Approach::Create => validations.create(&form).errors,
        Approach::Update => validations.update(&form).errors,
        Approach::SaveForm => validations.save_form(&form).errors,
        Approach::UpdateForm => validations.update_form(&form).errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(errors.all_errors())?);
    } else {
        report::print(&errors, &validations.form_context(&errors));
    }
    Ok(())
}

fn api(validations: &ItemValidations, body: &str) -> Result<()> {
    let outcome = add_item_json(validations, body)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    if let ApiOutcome::Rejected(errors) = &outcome {
        tracing::debug!("{} errors returned", errors.len());
    }
    Ok(())
}
