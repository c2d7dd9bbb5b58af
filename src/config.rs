//! Configuration primitives for the Samudra chatbot.
//!
//! Stored in a machine-readable TOML file located at:
//!   `$SAMUDRA_HOME/config/config.toml` when the variable is set, otherwise
//!   the OS data directory (`~/.local/share/Samudra` on Linux,
//!   `%APPDATA%/Samudra` on Windows, `~/Library/Application Support/Samudra`
//!   on macOS).
//!
//! The config tracks chat behaviour (confidence threshold, streaming pace)
//! and the locations of the intents file and the sea-level datasets that the
//! process bootstrap loads once.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Conversation knobs (classifier threshold, output pacing).
    #[serde(default)]
    pub chat: ChatSettings,
    /// Intents file and dataset locations.
    #[serde(default)]
    pub data: DataSettings,
}

/// Conversation behaviour shared by every session of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Predictions must be strictly above this value to be acted upon.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// Pause between streamed words, in milliseconds.
    #[serde(default = "default_stream_delay_ms")]
    pub stream_delay_ms: u64,
    /// Rows returned by ranking functions when the question names no count.
    #[serde(default = "default_ranking_top_n")]
    pub ranking_default_top_n: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            stream_delay_ms: default_stream_delay_ms(),
            ranking_default_top_n: default_ranking_top_n(),
        }
    }
}

const fn default_confidence_threshold() -> f32 {
    0.6
}

const fn default_stream_delay_ms() -> u64 {
    20
}

const fn default_ranking_top_n() -> usize {
    10
}

/// File locations. Relative paths are resolved against the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_intents_path")]
    pub intents: PathBuf,
    #[serde(default = "default_observation_series")]
    pub observation_series: PathBuf,
    #[serde(default = "default_projection_series")]
    pub projection_series: PathBuf,
    #[serde(default = "default_observation_grid")]
    pub observation_grid: PathBuf,
    #[serde(default = "default_projection_grid")]
    pub projection_grid: PathBuf,
    #[serde(default = "default_observation_trend_grid")]
    pub observation_trend_grid: PathBuf,
    #[serde(default = "default_projection_trend_grid")]
    pub projection_trend_grid: PathBuf,
    #[serde(default = "default_sea_regions")]
    pub sea_regions: PathBuf,
    #[serde(default = "default_provinces")]
    pub provinces: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            intents: default_intents_path(),
            observation_series: default_observation_series(),
            projection_series: default_projection_series(),
            observation_grid: default_observation_grid(),
            projection_grid: default_projection_grid(),
            observation_trend_grid: default_observation_trend_grid(),
            projection_trend_grid: default_projection_trend_grid(),
            sea_regions: default_sea_regions(),
            provinces: default_provinces(),
        }
    }
}

impl DataSettings {
    /// Resolves a configured path against the workspace root.
    pub fn resolve(&self, root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }
}

fn default_intents_path() -> PathBuf {
    PathBuf::from("samudra.json")
}

fn default_observation_series() -> PathBuf {
    PathBuf::from("data/tml_obs_by_wilayah.csv")
}

fn default_projection_series() -> PathBuf {
    PathBuf::from("data/tml_proj245_by_wilayah.csv")
}

fn default_observation_grid() -> PathBuf {
    PathBuf::from("data/grid_obs.json")
}

fn default_projection_grid() -> PathBuf {
    PathBuf::from("data/grid_proj245.json")
}

fn default_observation_trend_grid() -> PathBuf {
    PathBuf::from("data/trend_obs_1993_2024.json")
}

fn default_projection_trend_grid() -> PathBuf {
    PathBuf::from("data/trend_proj245_2025_2100.json")
}

fn default_sea_regions() -> PathBuf {
    PathBuf::from("shapes/iho_seas.json")
}

fn default_provinces() -> PathBuf {
    PathBuf::from("shapes/provinsi_laut.json")
}

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the root directory where Samudra stores data.
///
/// Order of precedence:
/// 1. `SAMUDRA_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("SAMUDRA_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("Samudra"))
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(workspace_root()?.join("config"))
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let path = config_file_path()?;
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}
