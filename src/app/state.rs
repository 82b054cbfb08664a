//! Application state management.

use std::{
    path::{Path, PathBuf},
    sync::{
        mpsc::{Receiver, Sender},
        Arc,
    },
    thread,
    time::Duration,
};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{widgets::ListState, Frame};

use crate::{
    audio::{load_metadata, AudioRing, MusicPlayer, TrackMetadata, Visualizer},
    config::Settings,
    fs::{load_entries, tail_path, DirEntry},
    ui::{
        keybindings::{key_to_action, NavigationAction},
        layout::{compute_layout, Section, SectionVisibility},
        widgets::{render_file_list, render_player_panel, render_spectrum, PlayerView},
    },
};

const VOLUME_STEP: f32 = 0.05;

/// Main application state.
pub struct App {
    /// Current directory being browsed
    pub current_dir: PathBuf,
    pub entries: Vec<DirEntry>,
    /// List widget state
    pub state: ListState,
    pub selected: usize,

    pub player: MusicPlayer,
    /// Metadata of the track that is playing
    pub track: Option<TrackMetadata>,
    /// Index of currently playing track in entries (if any)
    pub current_track_index: Option<usize>,

    /// Metadata channel sender (background loader -> UI)
    meta_tx: Sender<(PathBuf, TrackMetadata)>,
    meta_rx: Receiver<(PathBuf, TrackMetadata)>,
    /// Path the metadata channel should deliver for
    track_path: Option<PathBuf>,

    /// Samples written by the player, read by the visualizer
    pub ring: Arc<AudioRing>,
    pub visualizer: Visualizer,

    pub visibility: SectionVisibility,
    seek_step_secs: i64,
}

impl App {
    /// Create a new application browsing `start_dir`.
    pub fn new(settings: &Settings, start_dir: PathBuf) -> Result<Self> {
        let mut state = ListState::default();
        state.select(Some(0));

        let ring = Arc::new(AudioRing::new(settings.visualizer.downmix));
        let player = MusicPlayer::new(ring.clone(), settings.player.volume)?;
        let visualizer = Visualizer::new(
            settings.visualizer.smoothing_rate,
            settings.visualizer.style,
            settings.visualizer.rainbow,
        );

        let (meta_tx, meta_rx) = std::sync::mpsc::channel();

        let mut app = Self {
            current_dir: start_dir,
            entries: Vec::new(),
            state,
            selected: 0,

            player,
            track: None,
            current_track_index: None,

            meta_tx,
            meta_rx,
            track_path: None,

            ring,
            visualizer,

            visibility: SectionVisibility::default(),
            seek_step_secs: settings.player.seek_step_secs as i64,
        };
        app.reload_entries();
        Ok(app)
    }

    fn reload_entries(&mut self) {
        self.entries = match load_entries(&self.current_dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("{:#}", e);
                Vec::new()
            }
        };
        self.selected = 0;
        self.current_track_index = self
            .track_path
            .as_ref()
            .and_then(|p| self.index_of(p));
    }

    fn index_of(&self, path: &Path) -> Option<usize> {
        if path.parent() != Some(self.current_dir.as_path()) {
            return None;
        }
        let name = path.file_name()?.to_string_lossy();
        self.entries.iter().position(|e| e.name == name)
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            NavigationAction::ToggleSection(d) => self.visibility.toggle(d),
            NavigationAction::ToggleFullscreen => self.visibility.toggle_fullscreen(),
            NavigationAction::Down => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            NavigationAction::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            NavigationAction::Enter => self.open_selected(),
            NavigationAction::Back => {
                if self.current_dir.pop() {
                    self.reload_entries();
                }
            }
            NavigationAction::TogglePause => {
                if self.player.is_playing() {
                    self.player.toggle_pause();
                }
            }
            NavigationAction::Stop => {
                self.player.stop();
                self.current_track_index = None;
                self.track_path = None;
                self.track = None;
            }
            NavigationAction::NextTrack => self.play_adjacent_track(1),
            NavigationAction::PreviousTrack => self.play_adjacent_track(-1),
            NavigationAction::SeekForward => self.player.seek_by(self.seek_step_secs),
            NavigationAction::SeekBackward => self.player.seek_by(-self.seek_step_secs),
            NavigationAction::VolumeUp => self.player.adjust_volume(VOLUME_STEP),
            NavigationAction::VolumeDown => self.player.adjust_volume(-VOLUME_STEP),
            NavigationAction::CycleStyle => self.visualizer.cycle_style(),
            NavigationAction::Quit => {
                self.player.stop();
                return true;
            }
            NavigationAction::None => {}
        }

        self.state.select(Some(self.selected));
        false
    }

    fn open_selected(&mut self) {
        let Some(entry) = self.entries.get(self.selected) else {
            return;
        };
        if entry.is_dir() {
            self.current_dir.push(&entry.name);
            self.reload_entries();
        } else if entry.category.is_playable() {
            self.play_index(self.selected);
        } else {
            log::info!("not playing {}: {} ({})", entry.name, entry.category, entry.mime);
        }
    }

    /// Start the entry at `index` and load its metadata in the background.
    fn play_index(&mut self, index: usize) {
        let path = self.current_dir.join(&self.entries[index].name);
        self.player.play(&path);

        self.track = Some(TrackMetadata::untagged(&path));
        self.track_path = Some(path.clone());
        self.current_track_index = Some(index);

        let tx = self.meta_tx.clone();
        thread::spawn(move || match load_metadata(&path) {
            Ok(meta) => {
                let _ = tx.send((path, meta));
            }
            Err(e) => log::warn!("{:#}", e),
        });
    }

    /// Play the next or previous audio file relative to the current one,
    /// wrapping around. `direction`: 1 for next, -1 for previous.
    fn play_adjacent_track(&mut self, direction: isize) {
        let audio: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.category.is_playable())
            .map(|(i, _)| i)
            .collect();

        let Some(pos) = adjacent_position(&audio, self.current_track_index, direction) else {
            return;
        };
        let index = audio[pos];
        self.selected = index;
        self.state.select(Some(index));
        self.play_index(index);
    }

    /// Accept metadata from the background loader if it is for the current track.
    pub fn process_metadata(&mut self) {
        while let Ok((path, meta)) = self.meta_rx.try_recv() {
            if self.track_path.as_ref() == Some(&path) {
                self.track = Some(meta);
            }
        }
    }

    /// Advance the visualizer by one frame of `dt`.
    pub fn update_visualizer(&mut self, dt: Duration) {
        let active = self.player.is_playing() && !self.player.is_paused();
        self.visualizer.update(&self.ring, dt.as_secs_f32(), active);
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area(), &self.visibility);

        for (section, area) in layout.columns {
            match section {
                Section::Files => {
                    let title = format!("1: {}", tail_path(&self.current_dir, 3));
                    render_file_list(
                        f,
                        area,
                        &title,
                        &self.entries,
                        self.current_track_index,
                        &mut self.state,
                    );
                }
                Section::Player => {
                    let view = PlayerView {
                        metadata: self.track.as_ref(),
                        elapsed_secs: self.player.position().as_secs(),
                        duration_secs: self.track.as_ref().map_or(0, |m| m.duration_secs),
                        is_playing: self.player.is_playing(),
                        is_paused: self.player.is_paused(),
                        volume: self.player.volume(),
                    };
                    render_player_panel(f, area, view);
                }
            }
        }

        if let Some(area) = layout.visualizer_area {
            let paused = self.player.is_playing() && self.player.is_paused();
            render_spectrum(f, area, &self.visualizer, paused);
        }
    }
}

/// Position in `tracks` after moving `direction` from `current`, wrapping at
/// both ends. With no current track, next starts at the first and previous
/// at the last.
fn adjacent_position(tracks: &[usize], current: Option<usize>, direction: isize) -> Option<usize> {
    if tracks.is_empty() {
        return None;
    }
    let len = tracks.len() as isize;
    let pos = match current.and_then(|idx| tracks.iter().position(|&i| i == idx)) {
        Some(pos) => (pos as isize + direction).rem_euclid(len),
        None if direction > 0 => 0,
        None => len - 1,
    };
    Some(pos as usize)
}
