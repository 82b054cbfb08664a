//! User settings, read from `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::visualizer::{smoothing::DEFAULT_RATE, Downmix, RenderStyle};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config value `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
    /// How fast the bars follow the signal, per second
    pub smoothing_rate: f32,
    pub downmix: Downmix,
    pub style: RenderStyle,
    pub rainbow: bool,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            smoothing_rate: DEFAULT_RATE,
            downmix: Downmix::default(),
            style: RenderStyle::default(),
            rainbow: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Initial volume, 0.0 to 1.0
    pub volume: f32,
    pub seek_step_secs: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: 0.5,
            seek_step_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub visualizer: VisualizerSettings,
    pub player: PlayerSettings,
}

/// `~/.config/tunescope/config.toml` on Linux.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tunescope").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Settings {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file at the default location yields defaults; a missing file
    /// that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    log::info!("no config file, using defaults");
                    Self::default()
                }
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.visualizer.smoothing_rate;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "visualizer.smoothing_rate",
                reason: format!("must be a positive number, got {}", rate),
            });
        }
        let volume = self.player.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(ConfigError::Invalid {
                key: "player.volume",
                reason: format!("must be between 0 and 1, got {}", volume),
            });
        }
        if self.player.seek_step_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "player.seek_step_secs",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
