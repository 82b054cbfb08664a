//! Track metadata extraction using Lofty.

use std::path::Path;

use anyhow::{Context, Result};
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;

/// What the player panel shows about the current track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    /// Tag title, falling back to the file name.
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Audio properties as label/value pairs (bitrate, sample rate, channels).
    pub properties: Vec<(String, String)>,
    /// Total track length in seconds.
    pub duration_secs: u64,
}

impl TrackMetadata {
    /// Minimal metadata for a file that could not be probed.
    pub fn untagged(path: &Path) -> Self {
        Self {
            title: file_title(path),
            ..Default::default()
        }
    }
}

fn file_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Probe `path` for tags and audio properties.
///
/// Safe to call from a background thread.
pub fn load_metadata(path: &Path) -> Result<TrackMetadata> {
    let tagged_file = Probe::open(path)
        .and_then(|p| p.read())
        .with_context(|| format!("reading tags of {}", path.display()))?;

    let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());
    let title = tag
        .and_then(|t| t.title().map(|s| s.into_owned()))
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| file_title(path));
    let artist = tag.and_then(|t| t.artist().map(|s| s.into_owned()));
    let album = tag.and_then(|t| t.album().map(|s| s.into_owned()));

    let props = tagged_file.properties();
    let mut properties = Vec::new();
    if let Some(b) = props.audio_bitrate() {
        properties.push(("Bitrate".into(), format!("{} kbps", b)));
    }
    if let Some(sr) = props.sample_rate() {
        properties.push(("Sample rate".into(), format!("{} Hz", sr)));
    }
    if let Some(ch) = props.channels() {
        properties.push(("Channels".into(), ch.to_string()));
    }

    Ok(TrackMetadata {
        title,
        artist,
        album,
        properties,
        duration_secs: props.duration().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_uses_file_stem() {
        let meta = TrackMetadata::untagged(Path::new("/music/Some Song.flac"));
        assert_eq!(meta.title, "Some Song");
        assert_eq!(meta.duration_secs, 0);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_metadata(Path::new("/definitely/not/here.mp3")).is_err());
    }
}
