//! Configuration module
//!
//! Propagator options come from an optional TOML file and are overridden
//! by command-line flags. All four options must be set by one or the other.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use simspan_engine::PropagatorConfig;
use std::fs;
use std::path::Path;

/// Propagator options as they may appear in a configuration file
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct FileConfig {
    /// Source annotation type
    pub source_type: Option<String>,
    /// Target annotation type
    pub target_type: Option<String>,
    /// Require word boundaries around matches
    pub respect_word_boundaries: Option<bool>,
    /// Match letter case exactly
    pub case_sensitive: Option<bool>,
}

impl FileConfig {
    /// Read a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())).into())
    }

    /// Apply command-line overrides on top of file values
    pub fn merge(self, overrides: FileConfig) -> Self {
        Self {
            source_type: overrides.source_type.or(self.source_type),
            target_type: overrides.target_type.or(self.target_type),
            respect_word_boundaries: overrides
                .respect_word_boundaries
                .or(self.respect_word_boundaries),
            case_sensitive: overrides.case_sensitive.or(self.case_sensitive),
        }
    }

    /// Build the propagator configuration, failing on any missing option
    pub fn into_propagator_config(self) -> Result<PropagatorConfig> {
        let mut builder = PropagatorConfig::builder();
        if let Some(name) = self.source_type {
            builder = builder.source_type(name);
        }
        if let Some(name) = self.target_type {
            builder = builder.target_type(name);
        }
        if let Some(enabled) = self.respect_word_boundaries {
            builder = builder.respect_word_boundaries(enabled);
        }
        if let Some(enabled) = self.case_sensitive {
            builder = builder.case_sensitive(enabled);
        }
        builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}

/// Resolve the propagator configuration from an optional file and flags
pub fn resolve(path: Option<&Path>, overrides: FileConfig) -> Result<PropagatorConfig> {
    let base = match path {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    base.merge(overrides).into_propagator_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_flags_only() {
        let config = resolve(
            None,
            FileConfig {
                source_type: Some("Gene".to_string()),
                target_type: Some("Sentence".to_string()),
                respect_word_boundaries: Some(true),
                case_sensitive: Some(false),
            },
        )
        .unwrap();
        assert_eq!(config.source_type, "Gene");
        assert!(!config.case_sensitive);
    }

    #[test]
    fn test_flags_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("simspan.toml");
        fs::write(
            &path,
            "SourceType = \"Gene\"\nTargetType = \"Sentence\"\nRespectWordBoundaries = true\nCaseSensitive = true\n",
        )
        .unwrap();

        let config = resolve(
            Some(&path),
            FileConfig {
                case_sensitive: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.target_type, "Sentence");
        assert!(config.respect_word_boundaries);
        assert!(!config.case_sensitive);
    }

    #[test]
    fn test_missing_option_reported() {
        let err = resolve(
            None,
            FileConfig {
                source_type: Some("Gene".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("TargetType"), "{err}");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        fs::write(&path, "Language = \"en\"\n").unwrap();

        let err = resolve(Some(&path), FileConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_missing_file() {
        let err = resolve(Some(Path::new("/nonexistent/simspan.toml")), FileConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
