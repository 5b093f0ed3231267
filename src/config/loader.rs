use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::PageConfig;
use crate::depends_on::chain::check_acyclic;

/// Errors that can occur when loading a page configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl PageConfig {
    /// Returns the path to the default page file.
    ///
    /// Uses `~/.config/dependson/page.toml` on Unix/macOS, or the equivalent
    /// from `dirs::config_dir()`. Falls back to the current directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("dependson").join("page.toml")
    }

    /// Loads the default page file.
    ///
    /// - If the file doesn't exist, returns an empty page.
    /// - Otherwise parses and validates it.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(PageConfig::default());
        }
        Self::load_from(&path)
    }

    /// Loads and validates the page file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: PageConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Dispatch depth is at least 1
    /// - Every facet has a non-empty, unique id
    /// - No facet depends on itself, directly or transitively
    ///
    /// A `depends_on` naming an unknown facet is accepted: at runtime the
    /// dependent just stays disabled. See [`PageConfig::validate_strict`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coordination.max_dispatch_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_dispatch_depth must be at least 1".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for facet in &self.facets {
            if facet.id.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "Facet id must not be empty".to_string(),
                });
            }
            if !seen.insert(facet.id.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("Duplicate facet id '{}'", facet.id),
                });
            }
        }

        let parents: HashMap<&str, &str> = self
            .facets
            .iter()
            .filter_map(|f| f.depends_on.as_deref().map(|parent| (f.id.as_str(), parent)))
            .collect();
        for facet in &self.facets {
            check_acyclic(&facet.id, |id| parents.get(id).map(|p| p.to_string())).map_err(
                |err| ConfigError::ValidationError {
                    message: err.to_string(),
                },
            )?;
        }

        Ok(())
    }

    /// [`PageConfig::validate`], plus every `depends_on` must name a
    /// configured facet.
    pub fn validate_strict(&self) -> Result<(), ConfigError> {
        self.validate()?;

        for facet in &self.facets {
            if let Some(parent) = &facet.depends_on {
                if !self.facets.iter().any(|f| &f.id == parent) {
                    return Err(ConfigError::ValidationError {
                        message: format!(
                            "Facet '{}' depends on unknown facet '{}'",
                            facet.id, parent
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
