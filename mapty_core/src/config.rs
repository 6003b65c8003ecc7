//! Configuration file support for Mapty.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/mapty/config.toml`.

use crate::{Coords, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub map: MapConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Key of the storage slot holding the workout list
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

/// Map widget configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    #[serde(default = "default_attribution")]
    pub attribution: String,

    #[serde(default = "default_pan_duration_secs")]
    pub pan_duration_secs: f64,

    /// Fixed position reported instead of asking a geolocation service
    #[serde(default)]
    pub home: Option<Coords>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            pan_duration_secs: default_pan_duration_secs(),
            home: None,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(".local/share")
    });
    base.join("mapty")
}

fn default_storage_key() -> String {
    crate::storage::STORAGE_KEY.into()
}

fn default_zoom() -> u8 {
    13
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png".into()
}

fn default_attribution() -> String {
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
        .into()
}

fn default_pan_duration_secs() -> f64 {
    1.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
        base.join("mapty").join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.data.storage_key.trim().is_empty() {
            return Err(Error::Config("storage_key must not be empty".into()));
        }
        if !self.map.pan_duration_secs.is_finite() || self.map.pan_duration_secs < 0.0 {
            return Err(Error::Config(format!(
                "pan_duration_secs must be a non-negative number, got {}",
                self.map.pan_duration_secs
            )));
        }
        Ok(())
    }
}
