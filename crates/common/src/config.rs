//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Playback/overlay tuning.
    pub player: PlayerTuning,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Tunable playback parameters.
///
/// The settle and grace delays paper over completion signals the host
/// environment does not provide (layout measurement, late-attaching
/// module exports); their values are not contractual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Render tick rate (Hz) for the time-sampling loop.
    pub tick_rate_hz: u32,

    /// Caption group span threshold in milliseconds.
    pub caption_group_ms: u64,

    /// Forward grace window for active-caption lookup (ms).
    pub caption_grace_ms: u64,

    /// Delay before re-measuring geometry after a layout-affecting event (ms).
    pub settle_delay_ms: u64,

    /// Poll interval while waiting on an in-flight module load (ms).
    pub module_poll_ms: u64,

    /// Grace delay before the second (and final) export lookup (ms).
    pub export_grace_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "soundstage=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            caption_group_ms: 4000,
            caption_grace_ms: 200,
            settle_delay_ms: 100,
            module_poll_ms: 200,
            export_grace_ms: 1000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("soundstage").join("config.json")
}
