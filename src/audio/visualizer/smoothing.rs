//! Frame-to-frame exponential smoothing of the display buckets.

/// Default responsiveness, per second.
pub const DEFAULT_RATE: f32 = 8.0;

#[derive(Debug, Clone, Copy)]
pub struct TemporalSmoother {
    rate: f32,
}

impl TemporalSmoother {
    pub fn new(rate: f32) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Move each `current` value toward its `target` by `rate * dt` of the gap.
    ///
    /// The step is capped at the full gap, so a long stall lands on the target
    /// instead of overshooting it.
    pub fn advance(&self, current: &mut [f32], target: &[f32], dt: f32) {
        debug_assert_eq!(current.len(), target.len());

        let factor = (self.rate * dt).clamp(0.0, 1.0);
        for (c, &t) in current.iter_mut().zip(target) {
            *c += (t - *c) * factor;
        }
    }
}

impl Default for TemporalSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}
