//! Audio module - handles playback, metadata, and spectrum analysis.

pub mod metadata;
pub mod player;
pub mod sample_capture;
pub mod visualizer;

// Re-export commonly used types
pub use metadata::{load_metadata, TrackMetadata};
pub use player::MusicPlayer;
pub use sample_capture::SampleCapture;
pub use visualizer::{AudioRing, Visualizer};
