//! Configuration types for svgraph extraction.
//!
//! All types implement [`serde::Deserialize`] and default every field, so a
//! partial (or empty) configuration file is always valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining extraction and output settings.
//! - [`ExtractConfig`] - Controls the document loader and node identifiers.
//! - [`OutputConfig`] - Controls how front ends serialize the graph.
//!
//! # Example
//!
//! ```
//! # use svgraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.extract().root_tag(), "svg");
//! assert!(config.output().pretty());
//! ```

use serde::Deserialize;

use svgraph_core::identifier::FallbackIds;

/// Top-level configuration combining extraction and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Extraction configuration section.
    #[serde(default)]
    extract: ExtractConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(extract: ExtractConfig, output: OutputConfig) -> Self {
        Self { extract, output }
    }

    /// Returns the extraction configuration.
    pub fn extract(&self) -> &ExtractConfig {
        &self.extract
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Settings for the loader and the node extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// Local name the document root is expected to have.
    #[serde(default = "default_root_tag")]
    root_tag: String,

    /// How ids are generated for labels that normalize to nothing.
    #[serde(default)]
    fallback_ids: FallbackIds,
}

fn default_root_tag() -> String {
    "svg".to_string()
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            root_tag: default_root_tag(),
            fallback_ids: FallbackIds::default(),
        }
    }
}

impl ExtractConfig {
    /// Creates a new [`ExtractConfig`].
    ///
    /// # Arguments
    ///
    /// * `root_tag` - Expected local name of the root element.
    /// * `fallback_ids` - Strategy for ids of punctuation-only labels.
    pub fn new(root_tag: impl Into<String>, fallback_ids: FallbackIds) -> Self {
        Self {
            root_tag: root_tag.into(),
            fallback_ids,
        }
    }

    /// Returns the declared root tag.
    pub fn root_tag(&self) -> &str {
        &self.root_tag
    }

    /// Returns the fallback id strategy.
    pub fn fallback_ids(&self) -> FallbackIds {
        self.fallback_ids
    }
}

/// Serialization settings for front ends.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl OutputConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Returns whether JSON output is pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.extract().root_tag(), "svg");
        assert_eq!(config.extract().fallback_ids(), FallbackIds::Hashed);
        assert!(config.output().pretty());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.extract().root_tag(), "svg");
        assert!(config.output().pretty());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [extract]
            fallback_ids = "ordinal"
            "#,
        )
        .unwrap();
        assert_eq!(config.extract().root_tag(), "svg");
        assert_eq!(config.extract().fallback_ids(), FallbackIds::Ordinal);
        assert!(config.output().pretty());
    }

    #[test]
    fn test_full_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [extract]
            root_tag = "drawing"
            fallback_ids = "hashed"

            [output]
            pretty = false
            "#,
        )
        .unwrap();
        assert_eq!(config.extract().root_tag(), "drawing");
        assert!(!config.output().pretty());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            [extract]
            fallback_ids = "uuid"
            "#,
        );
        assert!(result.is_err());
    }
}
