//! File type detection using magic numbers and extension-based fallback.

use std::{fmt, path::Path};

use anyhow::Result;
use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

/// High-level file categories.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileCategory {
    Directory,
    Audio,
    Image,
    Video,
    Document,
    Binary,
}

impl FileCategory {
    /// Category for a MIME string such as `audio/flac`.
    pub fn from_mime(mime: &str) -> Self {
        match mime.split('/').next().unwrap_or_default() {
            "audio" => FileCategory::Audio,
            "image" => FileCategory::Image,
            "video" => FileCategory::Video,
            "text" | "application" => FileCategory::Document,
            _ => FileCategory::Binary,
        }
    }

    pub fn is_playable(self) -> bool {
        self == FileCategory::Audio
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Directory => "Directory",
            FileCategory::Audio => "Audio",
            FileCategory::Image => "Image",
            FileCategory::Video => "Video",
            FileCategory::Document => "Document",
            FileCategory::Binary => "Binary",
        };
        f.write_str(s)
    }
}

/// Holds a detected MIME type + category.
#[derive(Debug, Clone, PartialEq)]
pub struct FileType {
    pub mime: String,
    pub category: FileCategory,
}

/// Detect MIME type & category for a given file path.
///
/// Content sniffing wins; the extension is only consulted when the magic
/// bytes are not recognised.
pub fn detect_file_type(path: &Path) -> Result<FileType> {
    if let Some(kind) = Infer::new().get_from_path(path)? {
        let category = match kind.matcher_type() {
            MatcherType::Audio => FileCategory::Audio,
            MatcherType::Image => FileCategory::Image,
            MatcherType::Video => FileCategory::Video,
            MatcherType::Doc | MatcherType::Text => FileCategory::Document,
            _ => FileCategory::Binary,
        };
        return Ok(FileType {
            mime: kind.mime_type().to_string(),
            category,
        });
    }

    let mime = MimeGuess::from_path(path).first_or_octet_stream().to_string();
    let category = FileCategory::from_mime(&mime);
    Ok(FileType { mime, category })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_from_mime() {
        assert_eq!(FileCategory::from_mime("audio/mpeg"), FileCategory::Audio);
        assert_eq!(FileCategory::from_mime("image/png"), FileCategory::Image);
        assert_eq!(FileCategory::from_mime("application/pdf"), FileCategory::Document);
        assert_eq!(FileCategory::from_mime("chemical/x-pdb"), FileCategory::Binary);
        assert!(FileCategory::Audio.is_playable());
        assert!(!FileCategory::Video.is_playable());
    }

    #[test]
    fn test_detect_by_content_and_extension() {
        let dir = std::env::temp_dir().join(format!("tunescope-detect-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        // RIFF/WAVE header under a misleading name
        let wav = dir.join("not-a-text.txt");
        let mut header = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();
        header.resize(44, 0);
        fs::write(&wav, &header).unwrap();
        assert_eq!(detect_file_type(&wav).unwrap().category, FileCategory::Audio);

        // unknown bytes fall back to the extension
        let mp3 = dir.join("song.mp3");
        fs::write(&mp3, b"nothing recognisable here").unwrap();
        let detected = detect_file_type(&mp3).unwrap();
        assert_eq!(detected.mime, "audio/mpeg");
        assert_eq!(detected.category, FileCategory::Audio);

        fs::remove_dir_all(&dir).unwrap();
    }
}
