//! Logarithmic grouping of FFT bins into display buckets.

use std::ops::Range;

use rustfft::num_complex::Complex;

/// Each bucket starts where the previous one ended times this ratio.
pub const GROWTH_RATIO: f32 = 1.06;

/// `ln(|z|²)`
#[inline]
pub fn log_power(z: Complex<f32>) -> f32 {
    z.norm_sqr().ln()
}

/// Nominal FFT index ranges of the display buckets, lowest first.
///
/// Starting at `f = 1`, every bucket spans `[f, ceil(f * 1.06))` until `f`
/// reaches `half`. The last range may reach past `half`.
#[derive(Debug, Clone)]
pub struct BucketEdges {
    f: f32,
    half: usize,
}

impl BucketEdges {
    pub fn new(half: usize) -> Self {
        Self { f: 1.0, half }
    }
}

impl Iterator for BucketEdges {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.f as usize >= self.half {
            return None;
        }
        let start = self.f;
        self.f = (start * GROWTH_RATIO).ceil();
        Some(start as usize..self.f as usize)
    }
}

/// Number of display buckets for a half spectrum of `half` bins.
pub fn bucket_count(half: usize) -> usize {
    BucketEdges::new(half).count()
}

/// Turns the lower half of a spectrum into normalized display buckets.
#[derive(Debug, Clone)]
pub struct SpectrumBucketizer {
    half: usize,
    edges: Vec<Range<usize>>,
}

impl SpectrumBucketizer {
    pub fn new(half: usize) -> Self {
        let edges: Vec<_> = BucketEdges::new(half).collect();
        log::debug!("SpectrumBucketizer: {} bins -> {} buckets", half, edges.len());
        Self { half, edges }
    }

    /// Number of buckets produced per frame.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Nominal FFT index ranges, one per bucket.
    pub fn edges(&self) -> &[Range<usize>] {
        &self.edges
    }

    /// Bucket holding FFT index `bin`, if any.
    pub fn bucket_of(&self, bin: usize) -> Option<usize> {
        self.edges.iter().position(|r| r.contains(&bin))
    }

    /// Fill `out` with the strongest log-power of each bucket, divided by the
    /// strongest log-power shown (never by less than `1.0`).
    ///
    /// Values land in `[0, 1]`: bins quieter than `|z| = 1` read as zero.
    pub fn bucketize(&self, spectrum: &[Complex<f32>], out: &mut [f32]) {
        debug_assert!(spectrum.len() >= self.half);
        debug_assert_eq!(out.len(), self.edges.len());

        let shown = &spectrum[1.min(self.half)..self.half];
        let max_power = shown
            .iter()
            .map(|&z| log_power(z))
            .fold(1.0f32, f32::max);

        for (bucket, range) in out.iter_mut().zip(&self.edges) {
            let end = range.end.min(self.half);
            let power = spectrum[range.start..end]
                .iter()
                .map(|&z| log_power(z))
                .fold(0.0f32, f32::max);
            *bucket = power / max_power;
        }
    }
}
