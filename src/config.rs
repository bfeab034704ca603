//! Configuration loading and merging.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::argfile::{DEFAULT_MARKER, Expander, ReferenceSyntax};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid argfile marker '{marker}': {reason}")]
    InvalidMarker { marker: String, reason: &'static str },
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Markers introducing an argfile reference (`<marker>=<path>`).
    /// Unset means [`DEFAULT_MARKER`]; an empty list disables expansion.
    pub markers: Option<Vec<String>>,

    /// Drop empty tokens produced by consecutive delimiters.
    pub skip_empty_tokens: bool,

    /// Audit logging settings.
    pub audit: AuditConfig,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging.
    pub enabled: bool,
    /// Path to audit log file.
    pub path: Option<String>,
}

impl Config {
    /// Load configuration, merging user and project configs.
    pub fn load(cwd: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config()? {
            config = user_config;
        }

        if let Some(cwd) = cwd {
            if let Some(project_config) = Self::load_project_config(cwd)? {
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// Parse a config from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn load_user_config() -> Result<Option<Self>, ConfigError> {
        match Self::user_config_path() {
            Some(path) if path.exists() => Ok(Some(Self::parse(&fs::read_to_string(&path)?)?)),
            _ => Ok(None),
        }
    }

    /// Load project-level config from .argsplice.toml
    fn load_project_config(cwd: &Path) -> Result<Option<Self>, ConfigError> {
        let path = cwd.join(".argsplice.toml");
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            return Ok(Some(Self::parse(&content)?));
        }
        Ok(None)
    }

    /// Get user config path.
    /// Respects ARGSPLICE_CONFIG env var for testing.
    fn user_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("ARGSPLICE_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join("argsplice/config.toml"))
    }

    /// Merge another config into this one (other takes precedence for scalars).
    fn merge(&mut self, other: Config) {
        if let Some(other_markers) = other.markers {
            let markers = self.markers.get_or_insert_with(default_markers);
            for marker in other_markers {
                if !markers.contains(&marker) {
                    markers.push(marker);
                }
            }
        }

        if other.skip_empty_tokens {
            self.skip_empty_tokens = true;
        }
        if other.audit.enabled {
            self.audit.enabled = true;
            if other.audit.path.is_some() {
                self.audit.path = other.audit.path;
            }
        }
    }

    /// Markers in effect after defaulting.
    pub fn markers(&self) -> Vec<String> {
        self.markers.clone().unwrap_or_else(default_markers)
    }

    /// Validate markers and build the expander they describe.
    pub fn compile(&self) -> Result<Expander, ConfigError> {
        let syntaxes = self
            .markers()
            .iter()
            .map(|marker| {
                validate_marker(marker)?;
                Ok(ReferenceSyntax::new(marker.as_str()))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Expander::new(syntaxes).skip_empty_tokens(self.skip_empty_tokens))
    }
}

fn default_markers() -> Vec<String> {
    vec![DEFAULT_MARKER.to_string()]
}

fn validate_marker(marker: &str) -> Result<(), ConfigError> {
    let reason = if marker.is_empty() {
        "must not be empty"
    } else if marker.contains('=') {
        "must not contain '='"
    } else if marker.chars().any(char::is_whitespace) {
        "must not contain whitespace"
    } else {
        return Ok(());
    };
    Err(ConfigError::InvalidMarker {
        marker: marker.to_string(),
        reason,
    })
}
