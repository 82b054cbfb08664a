//! Real-time audio spectrum visualizer.
//!
//! The audio thread writes into a [`SampleRing`]; once per rendered frame the
//! [`SpectrumPipeline`] turns the ring's contents into a short row of smoothed,
//! logarithmically spaced buckets, which the renderer draws.

pub mod buckets;
pub mod fft;
pub mod pipeline;
pub mod renderer;
pub mod ring;
pub mod smoothing;
pub mod window;

use ratatui::{layout::Rect, Frame};

pub use buckets::{bucket_count, log_power, BucketEdges, SpectrumBucketizer, GROWTH_RATIO};
pub use fft::FftEngine;
pub use pipeline::SpectrumPipeline;
pub use renderer::{RenderStyle, SpectrumRenderer};
pub use ring::{Downmix, SampleRing};
pub use smoothing::TemporalSmoother;
pub use window::HannWindow;

/// Ring and transform size. Must stay a power of two.
pub const FFT_SIZE: usize = 1 << 13;

/// Ring shared between the player and the visualizer.
pub type AudioRing = SampleRing<FFT_SIZE>;

/// Spectrum visualizer: analysis pipeline plus its on-screen presentation.
pub struct Visualizer {
    pipeline: SpectrumPipeline<FFT_SIZE>,
    renderer: SpectrumRenderer,
    /// Bucket shown as the peak, with the ring's rate at the time
    peak: Option<(usize, u32)>,
}

impl Visualizer {
    pub fn new(smoothing_rate: f32, style: RenderStyle, rainbow: bool) -> Self {
        Self {
            pipeline: SpectrumPipeline::new(TemporalSmoother::new(smoothing_rate)),
            renderer: SpectrumRenderer::new(style, rainbow),
            peak: None,
        }
    }

    /// Advance one frame. While `active` is false the bars sink back to zero.
    pub fn update(&mut self, ring: &AudioRing, dt: f32, active: bool) {
        if active {
            self.pipeline.process(ring, dt);
        } else {
            self.pipeline.decay(dt);
        }
        self.peak = self.pipeline.peak_bucket().map(|b| (b, ring.sample_rate()));
    }

    pub fn bins(&self) -> &[f32] {
        self.pipeline.bins()
    }

    pub fn style(&self) -> RenderStyle {
        self.renderer.style
    }

    pub fn cycle_style(&mut self) {
        self.renderer.style = self.renderer.style.next();
    }

    /// Lowest frequency of the loudest bucket, if known.
    pub fn peak_frequency(&self) -> Option<f32> {
        self.peak
            .filter(|(_, rate)| *rate > 0)
            .map(|(bucket, rate)| self.pipeline.bucket_frequency(bucket, rate))
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, paused: bool) {
        let mut title = String::from("3: Spectrum");
        if let Some(hz) = self.peak_frequency() {
            title.push_str(&format!(" · peak ~{:.0} Hz", hz));
        }
        if paused {
            title.push_str(" · PAUSED");
        }
        self.renderer.render(f, area, &title, self.pipeline.bins());
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(smoothing::DEFAULT_RATE, RenderStyle::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_style() {
        let mut visualizer = Visualizer::default();
        assert_eq!(visualizer.style(), RenderStyle::Bars);
        visualizer.cycle_style();
        assert_eq!(visualizer.style(), RenderStyle::Lines);
        visualizer.cycle_style();
        assert_eq!(visualizer.style(), RenderStyle::Bars);
    }

    #[test]
    fn test_idle_has_no_peak() {
        let ring = AudioRing::default();
        let mut visualizer = Visualizer::default();
        visualizer.update(&ring, 1.0 / 60.0, false);
        assert_eq!(visualizer.peak_frequency(), None);
        assert!(visualizer.bins().iter().all(|&v| v == 0.0));
    }
}
