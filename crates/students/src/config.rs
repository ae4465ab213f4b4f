//! Application settings loaded from `appsettings.json`.
//!
//! The file carries named connection strings:
//!
//! ```json
//! { "ConnectionStrings": { "Default": "sqlite://students.db" } }
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

/// Connection string used by the console program.
pub const DEFAULT_CONNECTION: &str = "Default";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read settings file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Invalid settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Connection string '{0}' not found in settings")]
    MissingConnectionString(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSettings {
    #[serde(default)]
    pub connection_strings: HashMap<String, String>,
}

impl AppSettings {
    /// Reads and parses the settings file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings holding a single connection string under `name`.
    pub fn with_connection_string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            connection_strings: HashMap::from([(name.into(), value.into())]),
        }
    }

    /// Looks up a named connection string. Blank values count as missing.
    pub fn connection_string(&self, name: &str) -> Result<&str, ConfigError> {
        self.connection_strings
            .get(name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingConnectionString(name.to_string()))
    }

    /// Builds the connection settings for the named connection string.
    pub fn database(&self, name: &str) -> Result<DatabaseSettings, ConfigError> {
        self.connection_string(name).map(DatabaseSettings::new)
    }
}

/// Everything needed to open a database handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
        }
    }
}
