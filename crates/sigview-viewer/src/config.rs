//! Viewer configuration
//!
//! Configuration is stored as YAML in the user's config directory.
//! Default location: ~/.config/sigview/config.yaml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::playback::{MAX_SPEED, MIN_SPEED};
use crate::viewport::{
    ViewportConfig, AUDIOGRAM_MAX_ZOOM, DEFAULT_POINT_BUDGET, TIME_DOMAIN_MAX_ZOOM, ZOOM_STEP,
};

/// Which kind of data a viewer instance displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerMode {
    /// Amplitude over time
    TimeDomain,
    /// Magnitude over frequency
    FrequencyDomain,
    /// Magnitude over frequency with audiogram scaling
    Audiogram,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Display settings (point budget, zoom ceilings)
    pub display: DisplayConfig,
    /// Playback settings (speed)
    pub playback: PlaybackConfig,
}

/// Display configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum points handed to the renderer per visible window
    pub point_budget: usize,
    /// Multiplicative zoom step per zoom action
    pub zoom_step: f64,
    /// Zoom ceiling for time-domain viewers
    pub time_domain_max_zoom: f64,
    /// Zoom ceiling for frequency-domain viewers (None = uncapped)
    pub frequency_max_zoom: Option<f64>,
    /// Zoom ceiling for audiogram viewers
    pub audiogram_max_zoom: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            point_budget: DEFAULT_POINT_BUDGET,
            zoom_step: ZOOM_STEP,
            time_domain_max_zoom: TIME_DOMAIN_MAX_ZOOM,
            frequency_max_zoom: None,
            audiogram_max_zoom: AUDIOGRAM_MAX_ZOOM,
        }
    }
}

impl DisplayConfig {
    /// Build the viewport parameters for one viewer mode
    pub fn viewport_config(&self, mode: ViewerMode) -> ViewportConfig {
        let max_zoom = match mode {
            ViewerMode::TimeDomain => Some(self.time_domain_max_zoom),
            ViewerMode::FrequencyDomain => self.frequency_max_zoom,
            ViewerMode::Audiogram => Some(self.audiogram_max_zoom),
        };
        ViewportConfig {
            zoom_step: self.zoom_step,
            max_zoom,
            point_budget: self.point_budget,
        }
    }
}

/// Playback configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Speed multiplier applied when a signal first loads
    pub default_speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { default_speed: 1.0 }
    }
}

impl PlaybackConfig {
    /// Default speed clamped into the supported range
    pub fn clamped_default_speed(&self) -> f64 {
        self.default_speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

/// Get the default config file path
///
/// Returns: ~/.config/sigview/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("sigview")
        .join("config.yaml")
}

/// Load configuration from a YAML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> ViewerConfig {
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return ViewerConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<ViewerConfig>(&contents) {
            Ok(config) => {
                log::info!(
                    "load_config: Loaded config - point budget: {}, zoom step: {}",
                    config.display.point_budget,
                    config.display.zoom_step
                );
                config
            }
            Err(e) => {
                log::warn!("load_config: Failed to parse config: {}, using defaults", e);
                ViewerConfig::default()
            }
        },
        Err(e) => {
            log::warn!(
                "load_config: Failed to read config file: {}, using defaults",
                e
            );
            ViewerConfig::default()
        }
    }
}

/// Save configuration to a YAML file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &ViewerConfig, path: &Path) -> Result<()> {
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Config saved successfully");
    Ok(())
}
