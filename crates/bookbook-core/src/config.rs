//! Configuration file support
//!
//! Loads settings from a `_bookbook.toml` file next to the notebooks.

use crate::combine::CombineOptions;
use crate::links::LinkPolicy;
use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_bookbook.toml";

/// File name the JSON schema is conventionally written to
pub const SCHEMA_FILE_NAME: &str = "bookbook.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Link rewriting configuration
    #[serde(skip_serializing_if = "LinksConfig::is_empty")]
    pub links: LinksConfig,
    /// Book assembly configuration
    #[serde(skip_serializing_if = "BookConfig::is_empty")]
    pub book: BookConfig,
}

/// Link rewriting configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct LinksConfig {
    /// "permissive" leaves malformed notebook links as they are,
    /// "strict" reports them as errors (default: "permissive")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<LinkPolicy>,
    /// Warn about links to notebooks that are not part of the book (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn_dangling: Option<bool>,
}

impl LinksConfig {
    fn is_empty(&self) -> bool {
        self.policy.is_none() && self.warn_dangling.is_none()
    }
}

/// Book assembly configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct BookConfig {
    /// Rewrite links between notebooks into LaTeX references (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite_links: Option<bool>,
    /// Copy the first non-empty notebook metadata into the book (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_metadata: Option<bool>,
}

impl BookConfig {
    fn is_empty(&self) -> bool {
        self.rewrite_links.is_none() && self.copy_metadata.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_bookbook.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Options for [`combine_notebooks`](crate::combine_notebooks), with
    /// defaults for everything left unset
    pub fn combine_options(&self) -> CombineOptions {
        let defaults = CombineOptions::default();
        CombineOptions {
            rewrite_links: self.book.rewrite_links.unwrap_or(defaults.rewrite_links),
            link_policy: self.links.policy.unwrap_or(defaults.link_policy),
            copy_metadata: self.book.copy_metadata.unwrap_or(defaults.copy_metadata),
            warn_dangling: self.links.warn_dangling.unwrap_or(defaults.warn_dangling),
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with a schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema ./{}\n\n{}", SCHEMA_FILE_NAME, toml_content))
    }

    /// A configuration with every option spelled out at its default
    pub fn sample() -> Self {
        let defaults = CombineOptions::default();
        Config {
            links: LinksConfig {
                policy: Some(defaults.link_policy),
                warn_dangling: Some(defaults.warn_dangling),
            },
            book: BookConfig {
                rewrite_links: Some(defaults.rewrite_links),
                copy_metadata: Some(defaults.copy_metadata),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.links.policy.is_none());
        assert!(config.book.rewrite_links.is_none());
    }

    #[test]
    fn test_parse_links_section() {
        let config: Config = toml::from_str(
            r#"
            [links]
            policy = "strict"
            warn_dangling = false
            "#,
        )
        .unwrap();

        assert_eq!(config.links.policy, Some(LinkPolicy::Strict));
        assert_eq!(config.links.warn_dangling, Some(false));
    }

    #[test]
    fn test_parse_book_section() {
        let config: Config = toml::from_str(
            r#"
            [book]
            rewrite_links = false
            copy_metadata = false
            "#,
        )
        .unwrap();

        assert_eq!(config.book.rewrite_links, Some(false));
        assert_eq!(config.book.copy_metadata, Some(false));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let res: std::result::Result<Config, _> = toml::from_str(
            r#"
            [links]
            policy = "lenient"
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_combine_options_defaults() {
        let options = Config::default().combine_options();
        assert!(options.rewrite_links);
        assert!(options.copy_metadata);
        assert!(options.warn_dangling);
        assert_eq!(options.link_policy, LinkPolicy::Permissive);
    }

    #[test]
    fn test_combine_options_partial() {
        let config: Config = toml::from_str(
            r#"
            [links]
            policy = "strict"
            "#,
        )
        .unwrap();
        let options = config.combine_options();
        assert_eq!(options.link_policy, LinkPolicy::Strict);
        assert!(options.rewrite_links);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[book]\nrewrite_links = false\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.book.rewrite_links, Some(false));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[links\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_serialize_empty_config() {
        let toml = Config::default().to_toml_with_schema().unwrap();
        assert!(toml.starts_with("#:schema ./bookbook.schema.json"));
        assert!(!toml.contains("[links]"));
    }

    #[test]
    fn test_serialize_sample_config() {
        let toml = Config::sample().to_toml_with_schema().unwrap();
        assert!(toml.contains("[links]"));
        assert!(toml.contains("policy = \"permissive\""));
        assert!(toml.contains("[book]"));
    }

    #[test]
    fn test_json_schema_generation() {
        let schema = Config::json_schema_string().unwrap();
        assert!(schema.contains("\"title\""));
        assert!(schema.contains("LinksConfig"));
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::sample();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.links.policy, parsed.links.policy);
        assert_eq!(config.book.copy_metadata, parsed.book.copy_metadata);
    }
}
