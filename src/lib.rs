//! Tunescope - a terminal music player with a live spectrum visualizer.
//!
//! The spectrum pipeline lives in [`audio::visualizer`]: a lock-free sample
//! ring filled from the playback thread, a radix-2 FFT, logarithmic buckets
//! and temporal smoothing.

pub mod app;
pub mod audio;
pub mod config;
pub mod fs;
pub mod logging;
pub mod ui;
