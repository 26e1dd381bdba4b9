//! Settings file handling.
//!
//! Connection details and generation limits live in a JSON settings file so
//! that credentials never end up baked into sink code. A missing file yields
//! the defaults, which point at a local stack.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "ElasticsearchSettings::default")]
    pub elasticsearch: ElasticsearchSettings,
    #[serde(default = "KibanaSettings::default")]
    pub kibana: KibanaSettings,
    #[serde(default = "GenerationSettings::default")]
    pub generation: GenerationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElasticsearchSettings {
    pub host: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KibanaSettings {
    pub host: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationSettings {
    pub default_entries: usize,
    pub max_entries: usize,
}

impl Default for ElasticsearchSettings {
    fn default() -> Self {
        Self {
            host: "http://localhost:9200".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl Default for KibanaSettings {
    fn default() -> Self {
        Self {
            host: "http://localhost:5601".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_entries: 1000,
            max_entries: 1_000_000,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            elasticsearch: ElasticsearchSettings::default(),
            kibana: KibanaSettings::default(),
            generation: GenerationSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the given path, falling back to defaults when the
    /// file does not exist. A malformed file is an error, not a fallback.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    /// Write settings to the given path as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
