//! Configuration loader for grove.
//!
//! `defaults/grove.default.toml` is embedded into the binary so the documented
//! defaults and runtime behavior stay in sync. Callers layer user files and
//! command-line overrides on top via [`Loader`] before deserializing into
//! [`GroveConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::prereq::parser::{CommaPolicy, ParseOptions};

const DEFAULT_TOML: &str = include_str!("../defaults/grove.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GroveConfig {
    pub parser: ParserConfig,
    pub levels: LevelConfig,
    pub completed: CompletedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub comma: CommaPolicy,
}

/// Inputs to academic level inference.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    pub graduate_threshold: u32,
    pub graduate_indicators: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletedConfig {
    pub comment_prefix: String,
}

impl GroveConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::with_comma(self.parser.comma)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            graduate_threshold: 5000,
            graduate_indicators: [
                "graduate standing",
                "grad standing",
                "admission to mat degree",
                "graduate student",
                "pr: graduate",
                "prerequisite: graduate",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for command-line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers and deserialize them into a [`GroveConfig`].
    pub fn build(self) -> Result<GroveConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GroveConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parser.comma, CommaPolicy::And);
        assert_eq!(config.levels.graduate_threshold, 5000);
        assert_eq!(
            config.levels.graduate_indicators,
            LevelConfig::default().graduate_indicators
        );
        assert_eq!(config.completed.comment_prefix, "#");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.comma", "or")
            .expect("override to apply")
            .set_override("levels.graduate_threshold", 6000_i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.comma, CommaPolicy::Or);
        assert_eq!(config.parse_options().comma, CommaPolicy::Or);
        assert_eq!(config.levels.graduate_threshold, 6000);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[completed]\ncomment_prefix = \"//\"").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.completed.comment_prefix, "//");
        assert_eq!(config.parser.comma, CommaPolicy::And);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/grove.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/grove.toml")
            .build()
            .unwrap();
        assert_eq!(config.levels.graduate_threshold, 5000);
    }
}
