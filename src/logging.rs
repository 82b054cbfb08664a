//! Logger setup. The terminal belongs to the UI, so log lines go to a file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// `~/.cache/tunescope/tunescope.log` on Linux.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tunescope").map(|dirs| dirs.cache_dir().join("tunescope.log"))
}

/// Initialize `env_logger` writing to `path` (or the default location).
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Without any
/// usable location logging stays off.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_log_path) else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;

    log::info!("logging to {}", path.display());
    Ok(())
}
