//! Hann windowing of the analysis frame.

/// Precomputed Hann window.
///
/// Tapers both ends of the frame to zero so the transform does not see a
/// discontinuity where the frame wraps around.
#[derive(Debug, Clone)]
pub struct HannWindow {
    coefficients: Vec<f32>,
}

impl HannWindow {
    /// Coefficients are `0.5 - 0.5 * cos(2π * i / (len - 1))`.
    pub fn new(len: usize) -> Self {
        let coefficients = apodize::hanning_iter(len).map(|w| w as f32).collect();
        Self { coefficients }
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    /// Multiply `samples` by the window into `out`.
    pub fn apply(&self, samples: &[f32], out: &mut [f32]) {
        debug_assert_eq!(samples.len(), self.len());
        debug_assert_eq!(out.len(), self.len());

        for ((o, &s), &w) in out.iter_mut().zip(samples).zip(&self.coefficients) {
            *o = s * w;
        }
    }
}
