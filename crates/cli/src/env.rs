use crate::error::CliError;
use engine_core::EngineSettings;
use std::{collections::HashMap, fs, path::Path};
use tracing::debug;

/// Process environment overlaid with the entries of optional `.env` files.
#[derive(Debug, Clone, Default)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Load `KEY=VALUE` lines from a .env file; its entries win over the
    /// process environment.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        let loaded = self.parse_env_content(&content)?;
        debug!(path = %path.display(), vars = loaded, "Loaded env file");
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    pub fn settings(&self) -> EngineSettings {
        EngineSettings::from_lookup(|key| self.get(key))
    }

    fn parse_env_content(&mut self, content: &str) -> Result<usize, CliError> {
        let mut loaded = 0;

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);
            let Some((key, value)) = line.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid env file: malformed line {} (expected KEY=VALUE)",
                    index + 1
                )));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::Config(format!(
                    "Invalid env file: empty key at line {}",
                    index + 1
                )));
            }

            self.vars.insert(key.to_string(), unquote(value.trim()).to_string());
            loaded += 1;
        }

        Ok(loaded)
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
