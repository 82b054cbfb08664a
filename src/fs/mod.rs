//! Filesystem module - handles directory browsing and file type detection.

pub mod browser;
pub mod detection;

// Re-export commonly used types
pub use browser::{load_entries, tail_path, DirEntry};
pub use detection::{detect_file_type, FileCategory, FileType};
