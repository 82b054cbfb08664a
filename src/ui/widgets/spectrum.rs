//! Spectrum visualizer widget wrapper.

use ratatui::{layout::Rect, Frame};

use crate::audio::Visualizer;

/// Render the spectrum visualizer.
pub fn render_spectrum(f: &mut Frame<'_>, area: Rect, visualizer: &Visualizer, paused: bool) {
    visualizer.render(f, area, paused);
}
