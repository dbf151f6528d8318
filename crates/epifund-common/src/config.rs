//! Service configuration.
//!
//! An optional TOML file selects host/port and per-dataset file paths;
//! everything has compiled-in defaults so the server runs with no config
//! at all when the source files sit in `data/`.

use serde::{Deserialize, Serialize};

use crate::datasets::DatasetSource;

/// Complete service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP bind address
    #[serde(default)]
    pub server: ServerConfig,

    /// Source files to load at startup
    #[serde(default = "default_datasets")]
    pub datasets: Vec<DatasetEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            datasets: default_datasets(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// One source file to load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub source: DatasetSource,

    /// Path to the spreadsheet/CSV file
    pub path: String,

    /// A mandatory dataset that fails to load aborts startup; an optional
    /// one is served as "data unavailable".
    #[serde(default)]
    pub mandatory: bool,
}

fn default_datasets() -> Vec<DatasetEntry> {
    DatasetSource::ALL
        .iter()
        .map(|&source| DatasetEntry {
            source,
            path: format!("data/{}", source.default_file()),
            // The NIH export drives the default dashboard view
            mandatory: source == DatasetSource::DravetSyndrome,
        })
        .collect()
}

impl AppConfig {
    /// Load from a TOML file.
    pub fn from_toml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Config file path from `EPIFUND_CONFIG` if set, otherwise defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var("EPIFUND_CONFIG") {
            Ok(path) => Self::from_toml(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn entry(&self, source: DatasetSource) -> Option<&DatasetEntry> {
        self.datasets.iter().find(|e| e.source == source)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
