//! Configuration module - user settings loaded from TOML.

pub mod settings;

pub use settings::{config_path, ConfigError, PlayerSettings, Settings, VisualizerSettings};
