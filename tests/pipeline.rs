use std::f64::consts::TAU;
use std::sync::Arc;

use rodio::buffer::SamplesBuffer;
use rustfft::{num_complex::Complex, FftPlanner};

use tunescope::audio::visualizer::{
    AudioRing, Downmix, FftEngine, SampleRing, SpectrumPipeline, TemporalSmoother, FFT_SIZE,
};
use tunescope::audio::SampleCapture;

const RATE: u32 = 44_100;

fn sine(freq: f64, frames: usize) -> Vec<f32> {
    (0..frames)
        .map(|i| (TAU * freq * i as f64 / RATE as f64).sin() as f32)
        .collect()
}

/// A second of stereo 440 Hz played through the capture source ends up as a
/// single bright bucket.
#[test]
fn test_sine_through_capture_lights_its_bucket() {
    let mono = sine(440.0, RATE as usize);
    let stereo: Vec<f32> = mono.iter().flat_map(|&s| [s, s]).collect();

    let ring = Arc::new(AudioRing::new(Downmix::Mean));
    let capture = SampleCapture::new(SamplesBuffer::new(2, RATE, stereo.clone()), ring.clone());
    let played: Vec<f32> = capture.collect();
    assert_eq!(played, stereo);
    assert_eq!(ring.sample_rate(), RATE);
    assert_eq!(ring.written(), RATE as usize);

    let mut pipeline = SpectrumPipeline::<FFT_SIZE>::new(TemporalSmoother::default());
    for _ in 0..180 {
        pipeline.process(&ring, 1.0 / 60.0);
    }

    let target = pipeline
        .bucket_for_frequency(440.0, RATE)
        .expect("440 Hz is below Nyquist");
    let bins = pipeline.bins();
    assert!(bins[target] > 0.8, "bucket {} = {}", target, bins[target]);

    for (i, range) in pipeline.bucketizer().edges().iter().enumerate() {
        if range.start > 300 || range.end < 20 {
            assert!(bins[i] < 0.2, "bucket {} ({:?}) = {}", i, range, bins[i]);
        }
    }
}

#[test]
fn test_bars_fall_after_playback_stops() {
    let ring = SampleRing::<FFT_SIZE>::new(Downmix::Mean);
    let frames: Vec<[f32; 2]> = sine(1000.0, FFT_SIZE).iter().map(|&s| [s, s]).collect();
    for chunk in frames.chunks(512) {
        ring.write(chunk);
    }

    let mut pipeline = SpectrumPipeline::<FFT_SIZE>::new(TemporalSmoother::default());
    for _ in 0..60 {
        pipeline.process(&ring, 1.0 / 60.0);
    }
    let lit = pipeline.bins().iter().cloned().fold(0.0f32, f32::max);
    assert!(lit > 0.9);

    for _ in 0..120 {
        pipeline.decay(1.0 / 60.0);
    }
    assert!(pipeline.bins().iter().all(|&b| b < 1e-3));
}

#[test]
fn test_ring_keeps_newest_samples_across_wraps() {
    const N: usize = 64;
    let ring = SampleRing::<N>::new(Downmix::Mean);
    let mut next = 0.0f32;
    for batch in [5usize, 40, 17, 33, 2] {
        let frames: Vec<[f32; 2]> = (0..batch)
            .map(|_| {
                next += 1.0;
                [next, next]
            })
            .collect();
        ring.write(&frames);
    }

    let mut snap = [0.0f32; N];
    ring.snapshot(&mut snap);
    let expected: Vec<f32> = (0..N).map(|i| next - i as f32).collect();
    assert_eq!(snap.to_vec(), expected);
}

#[test]
fn test_fft_matches_reference_on_noise() {
    const N: usize = 512;
    // small LCG keeps the input deterministic
    let mut state = 0x2545_f491u32;
    let input: Vec<f32> = (0..N)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / (1u32 << 24) as f32 - 0.5
        })
        .collect();

    let mut ours = vec![Complex::new(0.0, 0.0); N];
    FftEngine::<N>::new().transform(&input, &mut ours);

    let mut reference: Vec<Complex<f32>> = input.iter().map(|&x| Complex::new(x, 0.0)).collect();
    FftPlanner::new().plan_fft_forward(N).process(&mut reference);

    for (k, (a, b)) in ours.iter().zip(&reference).enumerate() {
        assert!((a - b).norm() < 1e-3, "bin {}: {} vs {}", k, a, b);
    }
}
