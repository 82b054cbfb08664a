//! Radix-2 Cooley-Tukey transform.

use rustfft::num_complex::Complex;

/// Fixed-size forward FFT of a real signal.
///
/// `N` must be a power of two; any other size fails to compile as soon as an
/// engine of that size is constructed.
#[derive(Debug, Clone)]
pub struct FftEngine<const N: usize> {
    /// `exp(-2πi·k/N)` for `k` in `[0, N/2)`
    twiddles: Vec<Complex<f32>>,
}

impl<const N: usize> FftEngine<N> {
    const POWER_OF_TWO: () = assert!(N.is_power_of_two(), "FFT size must be a power of two");

    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::POWER_OF_TWO;

        let twiddles = (0..N / 2)
            .map(|k| {
                let angle = -std::f64::consts::TAU * k as f64 / N as f64;
                Complex::new(angle.cos() as f32, angle.sin() as f32)
            })
            .collect();

        Self { twiddles }
    }

    /// Transform `input` into `output`.
    ///
    /// # Panics
    /// If either slice is not exactly `N` long.
    pub fn transform(&self, input: &[f32], output: &mut [Complex<f32>]) {
        assert_eq!(input.len(), N, "input length must equal the FFT size");
        assert_eq!(output.len(), N, "output length must equal the FFT size");

        self.transform_strided(input, 1, output);
    }

    /// Decimation in time. `input[0], input[stride], input[2 * stride], ...`
    /// form the sub-signal transformed into `output`.
    fn transform_strided(&self, input: &[f32], stride: usize, output: &mut [Complex<f32>]) {
        let n = output.len();
        if n == 1 {
            output[0] = Complex::new(input[0], 0.0);
            return;
        }

        let half = n / 2;
        let (even, odd) = output.split_at_mut(half);
        self.transform_strided(input, stride * 2, even);
        self.transform_strided(&input[stride..], stride * 2, odd);

        // twiddle for a sub-transform of size n is every (N / n)-th entry
        let step = N / n;
        for k in 0..half {
            let t = self.twiddles[k * step] * odd[k];
            let e = even[k];
            even[k] = e + t;
            odd[k] = e - t;
        }
    }
}

impl<const N: usize> Default for FftEngine<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 256;

    fn sine(k0: usize) -> Vec<f32> {
        (0..N)
            .map(|i| (std::f32::consts::TAU * ((k0 * i) % N) as f32 / N as f32).sin())
            .collect()
    }

    fn transform(input: &[f32]) -> Vec<Complex<f32>> {
        let mut out = vec![Complex::new(0.0, 0.0); N];
        FftEngine::<N>::new().transform(input, &mut out);
        out
    }

    #[test]
    fn test_single_point() {
        let mut out = [Complex::new(0.0, 0.0); 1];
        FftEngine::<1>::new().transform(&[3.5], &mut out);
        assert_eq!(out[0], Complex::new(3.5, 0.0));
    }

    #[test]
    fn test_impulse_is_flat() {
        let mut input = vec![0.0; N];
        input[0] = 1.0;
        for z in transform(&input) {
            assert!((z - Complex::new(1.0, 0.0)).norm() < 1e-6);
        }
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        for k0 in [1, 7, 32, 100, 127] {
            let out = transform(&sine(k0));
            for (k, z) in out.iter().enumerate() {
                let mag = z.norm();
                if k == k0 || k == N - k0 {
                    assert!((mag - N as f32 / 2.0).abs() < 1e-2, "k0={} k={} mag={}", k0, k, mag);
                } else {
                    assert!(mag < 1e-2, "k0={} leaked into k={} mag={}", k0, k, mag);
                }
            }
        }
    }

    #[test]
    fn test_linear() {
        let x = sine(5);
        let y: Vec<f32> = (0..N).map(|i| ((i * 37 % 11) as f32 - 5.0) / 5.0).collect();
        let (a, b) = (0.75, -2.0);
        let mixed: Vec<f32> = x.iter().zip(&y).map(|(x, y)| a * x + b * y).collect();

        let (fx, fy, fm) = (transform(&x), transform(&y), transform(&mixed));
        for k in 0..N {
            let expected = fx[k] * a + fy[k] * b;
            assert!((fm[k] - expected).norm() < 1e-3, "k={}", k);
        }
    }

    #[test]
    fn test_matches_rustfft() {
        let input: Vec<f32> = (0..N)
            .map(|i| (i as f32 * 0.37).sin() + 0.25 * (i as f32 * 1.9).cos())
            .collect();

        let mut reference: Vec<Complex<f32>> = input.iter().map(|&s| Complex::new(s, 0.0)).collect();
        rustfft::FftPlanner::new()
            .plan_fft_forward(N)
            .process(&mut reference);

        for (ours, theirs) in transform(&input).iter().zip(&reference) {
            assert!((ours - theirs).norm() < 1e-3);
        }
    }
}
