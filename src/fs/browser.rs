//! Directory listing for the file browser.

use std::fs;
use std::path::{Component, Path};

use anyhow::{Context, Result};

use super::detection::{detect_file_type, FileCategory};

/// One row of the file browser.
#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    pub name: String,
    pub category: FileCategory,
    pub mime: String,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.category == FileCategory::Directory
    }
}

/// List `dir`: directories first, then files, each group sorted by name
/// (case-insensitive). Hidden entries are skipped.
pub fn load_entries(dir: &Path) -> Result<Vec<DirEntry>> {
    let mut entries: Vec<DirEntry> = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                return None;
            }

            let path = e.path();
            if path.is_dir() {
                return Some(DirEntry {
                    name,
                    category: FileCategory::Directory,
                    mime: String::new(),
                });
            }

            match detect_file_type(&path) {
                Ok(ft) => Some(DirEntry {
                    name,
                    category: ft.category,
                    mime: ft.mime,
                }),
                Err(err) => {
                    log::debug!("cannot sniff {}: {}", path.display(), err);
                    Some(DirEntry {
                        name,
                        category: FileCategory::Binary,
                        mime: String::new(),
                    })
                }
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

/// Last `n` components of `path`, prefixed with `…/` when shortened.
pub fn tail_path(path: &Path, n: usize) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.len() <= n {
        return path.display().to_string();
    }
    format!("…/{}", parts[parts.len() - n..].join("/"))
}
