//! Per-frame driver: ring snapshot → window → FFT → buckets → smoothing.

use rustfft::num_complex::Complex;

use super::buckets::SpectrumBucketizer;
use super::fft::FftEngine;
use super::ring::SampleRing;
use super::smoothing::TemporalSmoother;
use super::window::HannWindow;

/// Runs the whole analysis once per rendered frame.
///
/// Every buffer is sized at construction; `process` and `decay` neither
/// allocate nor fail.
pub struct SpectrumPipeline<const N: usize> {
    window: HannWindow,
    fft: FftEngine<N>,
    bucketizer: SpectrumBucketizer,
    smoother: TemporalSmoother,

    snapshot: Vec<f32>,
    windowed: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    /// Unsmoothed buckets of the latest frame
    targets: Vec<f32>,
    /// Smoothed buckets handed to the renderer
    bins: Vec<f32>,
}

impl<const N: usize> SpectrumPipeline<N> {
    pub fn new(smoother: TemporalSmoother) -> Self {
        let fft = FftEngine::new();
        let bucketizer = SpectrumBucketizer::new(N / 2);
        let buckets = bucketizer.len();

        log::debug!(
            "SpectrumPipeline: size {} -> {} display buckets, smoothing rate {}",
            N,
            buckets,
            smoother.rate()
        );

        Self {
            window: HannWindow::new(N),
            fft,
            bucketizer,
            smoother,

            snapshot: vec![0.0; N],
            windowed: vec![0.0; N],
            spectrum: vec![Complex::new(0.0, 0.0); N],
            targets: vec![0.0; buckets],
            bins: vec![0.0; buckets],
        }
    }

    /// Number of display buckets. Fixed for a given `N`.
    pub fn bucket_count(&self) -> usize {
        self.bins.len()
    }

    pub fn bucketizer(&self) -> &SpectrumBucketizer {
        &self.bucketizer
    }

    /// Analyze the ring's current contents and smooth toward the result.
    pub fn process(&mut self, ring: &SampleRing<N>, dt: f32) -> &[f32] {
        ring.snapshot(&mut self.snapshot);
        self.analyze_snapshot();
        self.smoother.advance(&mut self.bins, &self.targets, dt);
        &self.bins
    }

    /// Bucketize `samples` (newest first, `N` long) without smoothing.
    pub fn analyze(&mut self, samples: &[f32]) -> &[f32] {
        self.snapshot.copy_from_slice(samples);
        self.analyze_snapshot();
        &self.targets
    }

    /// Let the display fall back toward silence.
    pub fn decay(&mut self, dt: f32) -> &[f32] {
        self.targets.fill(0.0);
        self.smoother.advance(&mut self.bins, &self.targets, dt);
        &self.bins
    }

    fn analyze_snapshot(&mut self) {
        self.window.apply(&self.snapshot, &mut self.windowed);
        self.fft.transform(&self.windowed, &mut self.spectrum);
        self.bucketizer.bucketize(&self.spectrum, &mut self.targets);
    }

    /// Smoothed buckets as of the last frame.
    pub fn bins(&self) -> &[f32] {
        &self.bins
    }

    /// Unsmoothed buckets of the last analyzed frame.
    pub fn targets(&self) -> &[f32] {
        &self.targets
    }

    /// Display bucket that shows `hz` for audio sampled at `sample_rate`.
    pub fn bucket_for_frequency(&self, hz: f32, sample_rate: u32) -> Option<usize> {
        if sample_rate == 0 {
            return None;
        }
        let bin = (hz * N as f32 / sample_rate as f32).round() as usize;
        self.bucketizer.bucket_of(bin)
    }

    /// Lowest frequency shown by bucket `index`.
    pub fn bucket_frequency(&self, index: usize, sample_rate: u32) -> f32 {
        self.bucketizer.edges()[index].start as f32 * sample_rate as f32 / N as f32
    }

    /// Strongest smoothed bucket, if anything is showing.
    pub fn peak_bucket(&self) -> Option<usize> {
        self.bins
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.0)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }
}
