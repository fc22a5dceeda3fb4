//! Propagator configuration
//!
//! The four options are required. They can be given programmatically via
//! [`PropagatorConfig::builder`] or read from TOML using the parameter names
//! `SourceType`, `TargetType`, `RespectWordBoundaries` and `CaseSensitive`.

use crate::error::{PropagationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for one propagator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct PropagatorConfig {
    /// Type whose annotations supply patterns; also the type of new annotations
    pub source_type: String,
    /// Type whose annotations are scanned for matches
    pub target_type: String,
    /// Require word boundaries around each match
    pub respect_word_boundaries: bool,
    /// Match letter case exactly
    pub case_sensitive: bool,
}

impl PropagatorConfig {
    /// Create a builder
    pub fn builder() -> PropagatorConfigBuilder {
        PropagatorConfigBuilder::default()
    }

    /// Parse configuration from TOML
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| PropagationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check that both type names are present
    pub fn validate(&self) -> Result<()> {
        if self.source_type.trim().is_empty() {
            return Err(PropagationError::Config(
                "SourceType must not be empty".to_string(),
            ));
        }
        if self.target_type.trim().is_empty() {
            return Err(PropagationError::Config(
                "TargetType must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`PropagatorConfig`]
#[derive(Debug, Default)]
pub struct PropagatorConfigBuilder {
    source_type: Option<String>,
    target_type: Option<String>,
    respect_word_boundaries: Option<bool>,
    case_sensitive: Option<bool>,
}

impl PropagatorConfigBuilder {
    /// Set the source type name
    pub fn source_type<S: Into<String>>(mut self, name: S) -> Self {
        self.source_type = Some(name.into());
        self
    }

    /// Set the target type name
    pub fn target_type<S: Into<String>>(mut self, name: S) -> Self {
        self.target_type = Some(name.into());
        self
    }

    /// Require word boundaries around matches
    pub fn respect_word_boundaries(mut self, enabled: bool) -> Self {
        self.respect_word_boundaries = Some(enabled);
        self
    }

    /// Match case exactly
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = Some(enabled);
        self
    }

    /// Build the configuration, failing on any missing option
    pub fn build(self) -> Result<PropagatorConfig> {
        let config = PropagatorConfig {
            source_type: self.source_type.ok_or_else(|| missing("SourceType"))?,
            target_type: self.target_type.ok_or_else(|| missing("TargetType"))?,
            respect_word_boundaries: self
                .respect_word_boundaries
                .ok_or_else(|| missing("RespectWordBoundaries"))?,
            case_sensitive: self.case_sensitive.ok_or_else(|| missing("CaseSensitive"))?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn missing(name: &str) -> PropagationError {
    PropagationError::Config(format!("missing required parameter {name}"))
}
