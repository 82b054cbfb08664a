//! A wrapper source that feeds played samples into the visualizer's ring.

use std::sync::Arc;
use std::time::Duration;

use rodio::source::SeekError;
use rodio::Source;

use super::visualizer::AudioRing;

/// Frames collected before handing them to the ring in one write.
const BATCH_FRAMES: usize = 512;

/// Passes samples through unchanged while copying them, as stereo frames,
/// into the shared [`AudioRing`].
///
/// Mono sources are duplicated to both sides; channels past the second are
/// ignored.
pub struct SampleCapture<S> {
    source: S,
    ring: Arc<AudioRing>,
    batch: Vec<[f32; 2]>,
    frame: [f32; 2],
    /// Position of the next sample inside the current interleaved frame
    channel: u16,
}

impl<S> SampleCapture<S>
where
    S: Source<Item = f32>,
{
    pub fn new(source: S, ring: Arc<AudioRing>) -> Self {
        ring.set_sample_rate(source.sample_rate());
        Self {
            source,
            ring,
            batch: Vec::with_capacity(BATCH_FRAMES),
            frame: [0.0; 2],
            channel: 0,
        }
    }

    fn capture(&mut self, sample: f32) {
        let channels = self.source.channels().max(1);
        match self.channel {
            0 => self.frame = [sample, sample],
            1 => self.frame[1] = sample,
            _ => {}
        }
        self.channel += 1;

        if self.channel >= channels {
            self.channel = 0;
            self.batch.push(self.frame);
            if self.batch.len() >= BATCH_FRAMES {
                self.flush();
            }
        }
    }

    fn flush(&mut self) {
        if !self.batch.is_empty() {
            self.ring.write(&self.batch);
            self.batch.clear();
        }
    }
}

impl<S> Iterator for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        match self.source.next() {
            Some(sample) => {
                self.capture(sample);
                Some(sample)
            }
            None => {
                self.flush();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<S> Source for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.source.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.source.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        self.batch.clear();
        self.channel = 0;
        self.source.try_seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::visualizer::FFT_SIZE;
    use rodio::buffer::SamplesBuffer;

    fn snapshot(ring: &AudioRing) -> Vec<f32> {
        let mut out = vec![0.0; FFT_SIZE];
        ring.snapshot(&mut out);
        out
    }

    #[test]
    fn test_passes_samples_through() {
        let ring = Arc::new(AudioRing::default());
        let data = vec![0.1, 0.2, 0.3, 0.4];
        let capture = SampleCapture::new(SamplesBuffer::new(2, 44_100, data.clone()), ring.clone());

        assert_eq!(capture.collect::<Vec<_>>(), data);
        assert_eq!(ring.sample_rate(), 44_100);
    }

    #[test]
    fn test_stereo_frames_reach_ring() {
        let ring = Arc::new(AudioRing::default());
        let data = vec![1.0, 0.0, 0.5, 0.5, 0.0, -1.0];
        SampleCapture::new(SamplesBuffer::new(2, 48_000, data), ring.clone()).for_each(drop);

        assert_eq!(ring.written(), 3);
        assert_eq!(&snapshot(&ring)[..3], &[-0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_mono_duplicated() {
        let ring = Arc::new(AudioRing::default());
        SampleCapture::new(SamplesBuffer::new(1, 22_050, vec![0.25, -0.75]), ring.clone())
            .for_each(drop);

        assert_eq!(ring.written(), 2);
        assert_eq!(&snapshot(&ring)[..2], &[-0.75, 0.25]);
    }

    #[test]
    fn test_flushes_in_batches() {
        let ring = Arc::new(AudioRing::default());
        let data = vec![0.5; (BATCH_FRAMES + 10) * 2];
        let mut capture = SampleCapture::new(SamplesBuffer::new(2, 44_100, data), ring.clone());

        for _ in 0..BATCH_FRAMES * 2 {
            capture.next();
        }
        assert_eq!(ring.written(), BATCH_FRAMES);

        capture.for_each(drop);
        assert_eq!(ring.written(), BATCH_FRAMES + 10);
    }
}
