use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use trellis_inflater::{HeadlessEnvironment, InflateOptions};

pub const DEFAULT_CONFIG_NAME: &str = "trellis.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Trellis configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Options for every inflation pass
    #[serde(default)]
    pub inflate: InflateOptions,

    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Named resources available to the headless host, mapped to the kind they load as
    #[serde(default)]
    pub resources: BTreeMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> Result<Self, ConfigError> {
        let path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Headless host with the standard kinds and the configured resources
    pub fn environment(&self) -> HeadlessEnvironment {
        let mut env = HeadlessEnvironment::with_standard_kinds();
        for (name, kind) in &self.resources {
            env.add_resource_kind(name.clone(), kind.clone());
        }
        env
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inflate: InflateOptions::default(),
            log_level: default_log_level(),
            pretty: default_pretty(),
            resources: BTreeMap::new(),
        }
    }
}
