//! Configuration management for fractd.
//!
//! Loads settings from /etc/fractd/config.toml or uses defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/fractd/config.toml";

/// Scoring tunables for the analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Probability boost when the file name carries a fracture hint
    #[serde(default = "default_keyword_boost")]
    pub keyword_boost: f64,

    /// Probability boost for anatomical pattern keywords
    #[serde(default = "default_pattern_boost")]
    pub pattern_boost: f64,

    /// Adjusted probability above this is DETECTED
    #[serde(default = "default_detect_threshold")]
    pub detect_threshold: f64,

    /// Adjusted probability above this (but below detect) is UNCERTAIN
    #[serde(default = "default_uncertain_threshold")]
    pub uncertain_threshold: f64,

    /// Benchmark accuracy reported alongside results
    #[serde(default = "default_model_accuracy")]
    pub model_accuracy: f64,
}

fn default_keyword_boost() -> f64 {
    0.30
}

fn default_pattern_boost() -> f64 {
    0.15
}

fn default_detect_threshold() -> f64 {
    0.50
}

fn default_uncertain_threshold() -> f64 {
    0.30
}

fn default_model_accuracy() -> f64 {
    92.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keyword_boost: default_keyword_boost(),
            pattern_boost: default_pattern_boost(),
            detect_threshold: default_detect_threshold(),
            uncertain_threshold: default_uncertain_threshold(),
            model_accuracy: default_model_accuracy(),
        }
    }
}

/// Daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Bind address for the HTTP server
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// How many analysis records to keep in memory
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// How many records a bare history query returns
    #[serde(default = "default_history_page_size")]
    pub history_page_size: usize,

    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_history_capacity() -> usize {
    200
}

fn default_history_page_size() -> usize {
    20
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            history_capacity: default_history_capacity(),
            history_page_size: default_history_page_size(),
            engine: EngineConfig::default(),
        }
    }
}

impl DaemonConfig {
    /// Load from the default path, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Config not loaded ({}), using defaults", e);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}
