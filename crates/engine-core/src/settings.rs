use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the mapper root directory.
pub const MAP_PATH_ENV: &str = "QUARRY_MAP_PATH";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Directory holding the `*.xml` mapper files.
    #[serde(default)]
    pub map_path: Option<PathBuf>,
}

impl EngineSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source, e.g. a loaded `.env`
    /// file.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let map_path = get(MAP_PATH_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Self { map_path }
    }

    /// Read settings from a JSON file such as `{ "map_path": "./maps" }`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded engine settings");
        Ok(settings)
    }

    pub fn with_map_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.map_path = Some(path.into());
        self
    }

    /// Fill unset values from `other`.
    pub fn or(self, other: EngineSettings) -> Self {
        Self {
            map_path: self.map_path.or(other.map_path),
        }
    }
}
