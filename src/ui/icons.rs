//! Icon mappings for file types in the browser.

use crate::fs::FileCategory;

/// Nerd-font glyph shown in front of an entry.
pub fn icon_for(category: FileCategory) -> &'static str {
    match category {
        FileCategory::Directory => "\u{f07b}",
        FileCategory::Audio => "\u{f1c7}",
        FileCategory::Image => "\u{f1c5}",
        FileCategory::Video => "\u{f1c8}",
        FileCategory::Document => "\u{f15c}",
        FileCategory::Binary => "\u{f1c6}",
    }
}
