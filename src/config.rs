//! Project configuration for splicegen.
//! An optional `splicegen.json`, `splicegen.yml` or `splicegen.yaml` in the
//! source directory sets the model paths, the generators to run and extra
//! exclude patterns. Command-line flags take precedence over it.

use crate::constants::{CONFIG_FILES, DEFAULT_CONFIG_MODEL, DEFAULT_STRUCTURE_MODEL};
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of the project configuration file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Structure model path, relative to the source directory
    pub structure: Option<PathBuf>,
    /// Config model path, relative to the source directory
    pub config: Option<PathBuf>,
    /// Generators to run, all of them when empty
    pub generators: Vec<String>,
    /// Extra glob patterns excluded from template discovery
    pub exclude: Vec<String>,
}

impl Config {
    /// Path of the structure model, `cli` wins over the configuration file.
    pub fn structure_path(&self, source_dir: &Path, cli: Option<&Path>) -> PathBuf {
        resolve(source_dir, cli, self.structure.as_deref(), DEFAULT_STRUCTURE_MODEL)
    }

    /// Path of the config model, `cli` wins over the configuration file.
    pub fn config_path(&self, source_dir: &Path, cli: Option<&Path>) -> PathBuf {
        resolve(source_dir, cli, self.config.as_deref(), DEFAULT_CONFIG_MODEL)
    }
}

fn resolve(source_dir: &Path, cli: Option<&Path>, file: Option<&Path>, default: &str) -> PathBuf {
    match (cli, file) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(path)) => source_dir.join(path),
        (None, None) => source_dir.join(default),
    }
}

/// Parses configuration content, JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
pub fn parse_config(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads the project configuration from the first configuration file found
/// in `source_dir`. A missing file yields the default configuration.
pub fn load_config<P: AsRef<Path>>(source_dir: P) -> Result<Config> {
    for file in CONFIG_FILES {
        let config_path = source_dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)?;
            return parse_config(&content);
        }
    }

    debug!("No configuration file found (tried: {})", CONFIG_FILES.join(", "));
    Ok(Config::default())
}
