//! Music playback engine using rodio with sample capture for visualization.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::sample_capture::SampleCapture;
use super::visualizer::AudioRing;

/// How often the audio thread refreshes the shared position while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Commands sent to the audio playback thread.
#[derive(Debug)]
enum PlayerCommand {
    Play(PathBuf),
    Pause,
    Resume,
    Stop,
    Seek(Duration),
    SetVolume(f32),
}

/// Flags and position the audio thread mirrors for the UI.
#[derive(Debug, Default)]
struct PlaybackStatus {
    playing: AtomicBool,
    paused: AtomicBool,
    position_ms: AtomicU64,
}

impl PlaybackStatus {
    fn set(&self, playing: bool, paused: bool) {
        self.playing.store(playing, Ordering::SeqCst);
        self.paused.store(paused, Ordering::SeqCst);
    }
}

/// Player that can play, pause, resume, seek or stop one file at a time.
///
/// Every track is wrapped in a [`SampleCapture`] so whatever is audible is
/// also written into the shared ring.
pub struct MusicPlayer {
    cmd_tx: Sender<PlayerCommand>,
    status: Arc<PlaybackStatus>,
    volume: f32,
}

impl MusicPlayer {
    /// Spawn the audio thread. Playback writes into `ring`.
    pub fn new(ring: Arc<AudioRing>, volume: f32) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<PlayerCommand>();
        let status = Arc::new(PlaybackStatus::default());
        let volume = volume.clamp(0.0, 1.0);

        let thread_status = status.clone();
        thread::Builder::new()
            .name("audio".into())
            .spawn(move || audio_thread(cmd_rx, thread_status, ring, volume))
            .context("spawning audio thread")?;

        Ok(Self {
            cmd_tx,
            status,
            volume,
        })
    }

    fn send(&self, cmd: PlayerCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            log::warn!("audio thread is gone, command dropped");
        }
    }

    /// Stop any existing playback and start playing `path`.
    pub fn play(&mut self, path: &Path) {
        log::info!("play {}", path.display());
        self.send(PlayerCommand::Play(path.to_path_buf()));
    }

    pub fn pause(&mut self) {
        self.send(PlayerCommand::Pause);
    }

    pub fn resume(&mut self) {
        self.send(PlayerCommand::Resume);
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Immediately halt playback (if any).
    pub fn stop(&mut self) {
        self.send(PlayerCommand::Stop);
    }

    /// Jump to an absolute position in the current track.
    pub fn seek(&mut self, position: Duration) {
        self.send(PlayerCommand::Seek(position));
    }

    /// Seek relative to the current position, clamped at the start.
    pub fn seek_by(&mut self, offset_secs: i64) {
        let current = self.position().as_millis() as i64;
        let target = (current + offset_secs * 1000).max(0) as u64;
        self.seek(Duration::from_millis(target));
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.send(PlayerCommand::SetVolume(self.volume));
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(self.volume + delta);
    }

    /// True while a track is loaded, paused or not.
    pub fn is_playing(&self) -> bool {
        self.status.playing.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.status.paused.load(Ordering::SeqCst)
    }

    /// Position in the current track.
    pub fn position(&self) -> Duration {
        Duration::from_millis(self.status.position_ms.load(Ordering::Relaxed))
    }
}

/// Owns the output stream and the current sink; exits when the player is dropped.
fn audio_thread(
    rx: Receiver<PlayerCommand>,
    status: Arc<PlaybackStatus>,
    ring: Arc<AudioRing>,
    mut volume: f32,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(output) => output,
        Err(e) => {
            log::error!("no audio output available: {}", e);
            // keep draining so senders never see a closed channel
            while rx.recv().is_ok() {}
            return;
        }
    };

    let mut sink: Option<Sink> = None;
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(cmd) => {
                log::debug!("audio command: {:?}", cmd);
                match cmd {
                    PlayerCommand::Play(path) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        match start_track(&handle, &path, &ring, volume) {
                            Ok(new_sink) => {
                                status.position_ms.store(0, Ordering::Relaxed);
                                status.set(true, false);
                                sink = Some(new_sink);
                            }
                            Err(e) => {
                                log::error!("{:#}", e);
                                status.set(false, false);
                            }
                        }
                    }
                    PlayerCommand::Pause => {
                        if let Some(s) = &sink {
                            s.pause();
                            status.paused.store(true, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Resume => {
                        if let Some(s) = &sink {
                            s.play();
                            status.paused.store(false, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Stop => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        status.position_ms.store(0, Ordering::Relaxed);
                        status.set(false, false);
                    }
                    PlayerCommand::Seek(pos) => {
                        if let Some(s) = &sink {
                            if let Err(e) = s.try_seek(pos) {
                                log::warn!("seek to {:?} failed: {}", pos, e);
                            }
                        }
                    }
                    PlayerCommand::SetVolume(v) => {
                        volume = v;
                        if let Some(s) = &sink {
                            s.set_volume(v);
                        }
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if let Some(s) = &sink {
            status
                .position_ms
                .store(s.get_pos().as_millis() as u64, Ordering::Relaxed);
            if s.empty() {
                log::info!("track finished");
                sink = None;
                status.set(false, false);
            }
        }
    }

    if let Some(s) = sink.take() {
        s.stop();
    }
}

fn start_track(
    handle: &OutputStreamHandle,
    path: &Path,
    ring: &Arc<AudioRing>,
    volume: f32,
) -> Result<Sink> {
    let sink = Sink::try_new(handle).context("creating audio sink")?;
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let source = Decoder::new(BufReader::new(file))
        .with_context(|| format!("decoding {}", path.display()))?;

    let capturing = SampleCapture::new(source.convert_samples::<f32>(), ring.clone());
    sink.set_volume(volume);
    sink.append(capturing);
    sink.play();
    Ok(sink)
}
