//! Lock-free sample ring shared between the audio thread and the render loop.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use atomic_float::AtomicF32;
use serde::{Deserialize, Serialize};

/// How a stereo frame is folded into one mono sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Downmix {
    /// `(left + right) / 2`
    #[default]
    Mean,
    /// Algebraic `max(left, right)`. Biased toward positive excursions.
    Max,
}

impl Downmix {
    #[inline]
    pub fn apply(self, [left, right]: [f32; 2]) -> f32 {
        match self {
            Downmix::Mean => (left + right) * 0.5,
            Downmix::Max => left.max(right),
        }
    }
}

/// Fixed-capacity circular buffer holding the most recent `N` mono samples.
///
/// There must be at most one writer (the capture source of the track that is
/// currently playing). Any number of threads may take snapshots. Neither side
/// ever blocks; a snapshot taken while a write is in flight can mix old and
/// new samples, which only shows up as one slightly-off frame.
pub struct SampleRing<const N: usize> {
    slots: Box<[AtomicF32]>,
    /// Total number of samples ever written. Slot index is `cursor & (N - 1)`.
    cursor: AtomicUsize,
    sample_rate: AtomicU32,
    downmix: Downmix,
}

impl<const N: usize> SampleRing<N> {
    const POWER_OF_TWO: () = assert!(N.is_power_of_two(), "ring size must be a power of two");
    const MASK: usize = N - 1;

    pub fn new(downmix: Downmix) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::POWER_OF_TWO;

        let slots = (0..N).map(|_| AtomicF32::new(0.0)).collect();
        Self {
            slots,
            cursor: AtomicUsize::new(0),
            sample_rate: AtomicU32::new(0),
            downmix,
        }
    }

    /// Number of samples held by the ring.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn downmix(&self) -> Downmix {
        self.downmix
    }

    /// Downmix and append a batch of stereo frames.
    ///
    /// At most `N - 1` frames are taken per call (the newest ones), so a single
    /// call never laps the whole ring.
    pub fn write(&self, frames: &[[f32; 2]]) {
        let frames = &frames[frames.len().saturating_sub(N - 1)..];
        let mut cursor = self.cursor.load(Ordering::Relaxed);
        for &frame in frames {
            self.slots[cursor & Self::MASK].store(self.downmix.apply(frame), Ordering::Relaxed);
            cursor = cursor.wrapping_add(1);
        }
        self.cursor.store(cursor, Ordering::Release);
    }

    /// Driver-callback entry point: `buffer` holds `frame_count` interleaved
    /// stereo frames.
    pub fn write_interleaved(&self, buffer: &[f32], frame_count: usize) {
        let frame_count = frame_count.min(buffer.len() / 2);
        let frames = &buffer[..frame_count * 2];
        let skip = frame_count.saturating_sub(N - 1);

        let mut cursor = self.cursor.load(Ordering::Relaxed);
        for pair in frames.chunks_exact(2).skip(skip) {
            let sample = self.downmix.apply([pair[0], pair[1]]);
            self.slots[cursor & Self::MASK].store(sample, Ordering::Relaxed);
            cursor = cursor.wrapping_add(1);
        }
        self.cursor.store(cursor, Ordering::Release);
    }

    /// Copy the ring into `out`, newest sample first.
    ///
    /// # Panics
    /// If `out.len() != N`.
    pub fn snapshot(&self, out: &mut [f32]) {
        assert_eq!(out.len(), N, "snapshot buffer must match ring size");

        let head = self.cursor.load(Ordering::Acquire);
        for (i, sample) in out.iter_mut().enumerate() {
            let slot = head.wrapping_sub(1).wrapping_sub(i) & Self::MASK;
            *sample = self.slots[slot].load(Ordering::Relaxed);
        }
    }

    /// Total number of samples written since the ring was created.
    pub fn written(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    pub fn set_sample_rate(&self, rate: u32) {
        self.sample_rate.store(rate, Ordering::Relaxed);
    }

    /// Rate of the stream last attached to the ring, `0` if none yet.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for SampleRing<N> {
    fn default() -> Self {
        Self::new(Downmix::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(range: std::ops::Range<u32>) -> Vec<[f32; 2]> {
        range.map(|i| [i as f32, i as f32]).collect()
    }

    #[test]
    fn test_starts_silent() {
        let ring = SampleRing::<16>::default();
        let mut out = [1.0; 16];
        ring.snapshot(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_snapshot_newest_first() {
        let ring = SampleRing::<16>::default();
        ring.write(&mono(0..5));

        let mut out = [0.0; 16];
        ring.snapshot(&mut out);
        assert_eq!(&out[..5], &[4.0, 3.0, 2.0, 1.0, 0.0]);
        assert!(out[5..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_wrap_keeps_most_recent() {
        let ring = SampleRing::<16>::default();
        ring.write(&mono(0..10));
        ring.write(&mono(10..20));
        ring.write(&mono(20..30));

        let mut out = [0.0; 16];
        ring.snapshot(&mut out);
        let expected: Vec<f32> = (14..30).rev().map(|i| i as f32).collect();
        assert_eq!(out.to_vec(), expected);
        assert_eq!(ring.written(), 30);
    }

    #[test]
    fn test_oversized_batch_is_truncated() {
        let ring = SampleRing::<16>::default();
        ring.write(&mono(0..40));

        // only the newest 15 frames of the batch land in the ring
        assert_eq!(ring.written(), 15);
        let mut out = [0.0; 16];
        ring.snapshot(&mut out);
        assert_eq!(out[0], 39.0);
        assert_eq!(out[14], 25.0);
        assert_eq!(out[15], 0.0);
    }

    #[test]
    fn test_interleaved_matches_frames() {
        let a = SampleRing::<32>::new(Downmix::Max);
        let b = SampleRing::<32>::new(Downmix::Max);

        let frames: Vec<[f32; 2]> = (0..20).map(|i| [i as f32, -(i as f32)]).collect();
        let interleaved: Vec<f32> = frames.iter().flatten().copied().collect();

        a.write(&frames);
        b.write_interleaved(&interleaved, frames.len());

        let (mut x, mut y) = ([0.0; 32], [0.0; 32]);
        a.snapshot(&mut x);
        b.snapshot(&mut y);
        assert_eq!(x, y);
    }

    #[test]
    fn test_interleaved_frame_count_bounded_by_buffer() {
        let ring = SampleRing::<16>::default();
        ring.write_interleaved(&[1.0, 1.0, 2.0, 2.0, 3.0], 10);
        assert_eq!(ring.written(), 2);
    }

    #[test]
    fn test_downmix() {
        assert_eq!(Downmix::Mean.apply([1.0, -0.5]), 0.25);
        assert_eq!(Downmix::Max.apply([-1.0, -0.5]), -0.5);
    }

    #[test]
    fn test_concurrent_writer() {
        use std::sync::Arc;

        let ring = Arc::new(SampleRing::<1024>::default());
        let writer = {
            let ring = Arc::clone(&ring);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    ring.write(&[[0.5, 0.5]; 256]);
                }
            })
        };

        let mut out = vec![0.0; 1024];
        for _ in 0..50 {
            ring.snapshot(&mut out);
            assert!(out.iter().all(|&s| s == 0.0 || s == 0.5));
        }
        writer.join().unwrap();

        ring.snapshot(&mut out);
        assert!(out.iter().all(|&s| s == 0.5));
    }
}
