//! Application state: browser, player and visualizer wired together.

pub mod state;

pub use state::App;
