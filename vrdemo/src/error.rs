use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failures while loading or validating a [`crate::config::LocomotionConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io { path: PathBuf, source: io::Error },

    /// The config file is not valid JSON for the expected shape
    Parse { source: serde_json::Error },

    /// A value parsed but is out of range
    Validation { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Unable to read config '{}': {}", path.display(), source)
            }
            ConfigError::Parse { source } => {
                write!(f, "Unable to parse config: {}", source)
            }
            ConfigError::Validation { field, reason } => {
                write!(f, "Invalid config value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source } => Some(source),
            ConfigError::Validation { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(source: serde_json::Error) -> Self {
        ConfigError::Parse { source }
    }
}
