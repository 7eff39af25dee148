// File: src/config.rs
// Purpose: Configuration parsing from item-forms.toml

use anyhow::{Context, Result};
use rusty_binding::{CodeFormat, MessageCodesResolver, MessageSource};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Catalogs compiled into the crate, used when no file overrides them.
const EMBEDDED_CATALOGS: &[(&str, &str)] = &[
    ("messages", include_str!("../resources/messages.properties")),
    ("errors", include_str!("../resources/errors.properties")),
];

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub messages: MessagesConfig,

    #[serde(default)]
    pub rules: ItemRules,
}

/// Message catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Directory searched for `{basename}.properties` (default: "resources")
    #[serde(default = "default_messages_dir")]
    pub dir: String,

    /// Catalogs in lookup order; earlier ones win on duplicate keys
    #[serde(default = "default_basenames")]
    pub basenames: Vec<String>,

    #[serde(default)]
    pub code_format: CodeFormat,

    /// Prepended to every generated message code
    #[serde(default)]
    pub code_prefix: String,
}

/// Business limits for items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRules {
    #[serde(default = "default_price_min")]
    pub price_min: i64,

    #[serde(default = "default_price_max")]
    pub price_max: i64,

    #[serde(default = "default_quantity_max")]
    pub quantity_max: i64,

    /// Lower bound for price * quantity
    #[serde(default = "default_min_total_price")]
    pub min_total_price: i64,
}

// Default values
fn default_messages_dir() -> String {
    "resources".to_string()
}

fn default_basenames() -> Vec<String> {
    vec!["messages".to_string(), "errors".to_string()]
}

fn default_price_min() -> i64 {
    1000
}

fn default_price_max() -> i64 {
    1_000_000
}

fn default_quantity_max() -> i64 {
    9999
}

fn default_min_total_price() -> i64 {
    10_000
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            dir: default_messages_dir(),
            basenames: default_basenames(),
            code_format: CodeFormat::default(),
            code_prefix: String::new(),
        }
    }
}

impl Default for ItemRules {
    fn default() -> Self {
        Self {
            price_min: default_price_min(),
            price_max: default_price_max(),
            quantity_max: default_quantity_max(),
            min_total_price: default_min_total_price(),
        }
    }
}

impl MessagesConfig {
    pub fn codes_resolver(&self) -> MessageCodesResolver {
        MessageCodesResolver::new()
            .with_format(self.code_format)
            .with_prefix(self.code_prefix.clone())
    }

    /// Build the catalog: per basename, the file in `dir` if present,
    /// otherwise the embedded catalog of that name.
    pub fn message_source(&self) -> Result<MessageSource> {
        let mut source = MessageSource::new();
        for basename in &self.basenames {
            let path = PathBuf::from(&self.dir).join(format!("{}.properties", basename));
            let catalog = if path.exists() {
                tracing::debug!("Loading message catalog {:?}", path);
                MessageSource::load(&path)?
            } else if let Some((_, content)) = EMBEDDED_CATALOGS.iter().find(|(name, _)| *name == basename.as_str()) {
                MessageSource::from_properties(content)
            } else {
                anyhow::bail!("No message catalog named '{}' in {:?}", basename, self.dir);
            };
            source.merge(catalog);
        }
        tracing::debug!("Message source ready with {} entries", source.len());
        Ok(source)
    }
}

impl Config {
    /// Load configuration from item-forms.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./item-forms.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("item-forms.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.rules.price_min, 1000);
        assert_eq!(config.rules.price_max, 1_000_000);
        assert_eq!(config.rules.quantity_max, 9999);
        assert_eq!(config.rules.min_total_price, 10_000);
        assert_eq!(config.messages.basenames, vec!["messages", "errors"]);
        assert_eq!(config.messages.code_format, CodeFormat::PrefixErrorCode);
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.rules.quantity_max, 9999);
        assert_eq!(config.messages.dir, "resources");
    }

    #[test]
    fn test_custom_rules_and_codes() {
        let toml = r#"
            [messages]
            code_format = "postfix_error_code"
            code_prefix = "validation."

            [rules]
            quantity_max = 100
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.rules.quantity_max, 100);
        assert_eq!(config.rules.price_min, 1000);
        assert_eq!(
            config.messages.codes_resolver().resolve("max", "item", None, None),
            vec!["validation.item.max", "validation.max"]
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load("does/not/exist.toml").unwrap();
        assert_eq!(config.rules.min_total_price, 10_000);
    }

    #[test]
    fn test_embedded_catalogs() {
        let config = MessagesConfig {
            dir: "does/not/exist".to_string(),
            ..MessagesConfig::default()
        };
        let source = config.message_source().unwrap();
        assert!(source.contains("item.itemName"));
        assert!(source.contains("totalPrice"));

        let unknown = MessagesConfig {
            dir: "does/not/exist".to_string(),
            basenames: vec!["labels".to_string()],
            ..MessagesConfig::default()
        };
        assert!(unknown.message_source().is_err());
    }
}
