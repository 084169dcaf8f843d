//! Config loading and validation.

use super::model::Config;
use super::types::DEFAULT_SETTINGS_FILE;
use crate::error::{Result, SyncError};
use globset::Glob;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid header key regex"));

impl Config {
    /// Load settings for a run.
    ///
    /// An explicit path must exist. Without one, `.agentsync.yaml` in the
    /// working directory is used when present, and defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::ConfigError(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SyncError::ConfigError(format!("failed to parse settings YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate settings values.
    ///
    /// Validation rules:
    /// - path settings must be non-empty
    /// - `document_glob` must be a valid glob
    /// - `extra_known_keys` entries must follow the header key grammar
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("model_config", &self.model_config),
            ("catalog", &self.catalog),
            ("opencode_root", &self.opencode_root),
            ("source_agents", &self.source_agents),
        ];
        for (field, value) in paths {
            if value.trim().is_empty() {
                return Err(SyncError::ConfigError(format!(
                    "settings validation failed: {} must be non-empty",
                    field
                )));
            }
        }

        Glob::new(&self.document_glob).map_err(|e| {
            SyncError::ConfigError(format!(
                "settings validation failed: invalid document_glob '{}': {}",
                self.document_glob, e
            ))
        })?;

        for key in &self.extra_known_keys {
            if !KEY_REGEX.is_match(key) {
                return Err(SyncError::ConfigError(format!(
                    "settings validation failed: extra_known_keys entry '{}' is not a valid header key",
                    key
                )));
            }
        }

        Ok(())
    }
}
