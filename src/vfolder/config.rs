use crate::error::{Result, VfolderError};
use crate::model::DEFAULT_PRIORITY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Configuration for vfolder, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VfolderConfig {
    /// Priority given to new folders when none is specified
    #[serde(default = "default_priority")]
    pub default_priority: f64,

    /// tracing filter used when RUST_LOG is not set (e.g. "warn", "vfolder=debug")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_priority() -> f64 {
    DEFAULT_PRIORITY
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for VfolderConfig {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            log_filter: default_log_filter(),
        }
    }
}

impl VfolderConfig {
    pub const KEYS: &'static [&'static str] = &["default-priority", "log-filter"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(VfolderError::Io)?;
        let config: VfolderConfig =
            serde_json::from_str(&content).map_err(VfolderError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VfolderError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VfolderError::Serialization)?;
        fs::write(config_path, content).map_err(VfolderError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-priority" => Some(self.default_priority.to_string()),
            "log-filter" => Some(self.log_filter.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "default-priority" => {
                let priority: f64 = value
                    .parse()
                    .map_err(|_| format!("Invalid priority: {}", value))?;
                if !priority.is_finite() || priority < 0.0 {
                    return Err(format!("Priority must be a non-negative number: {}", value));
                }
                self.default_priority = priority;
                Ok(())
            }
            "log-filter" => {
                if value.trim().is_empty() {
                    return Err("Log filter cannot be empty".to_string());
                }
                self.log_filter = value.trim().to_string();
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}
