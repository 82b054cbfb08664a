use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tunescope::{config::Settings, logging, ui};

/// Terminal music player with a spectrum visualizer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory to start browsing in (defaults to the current directory)
    dir: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs here instead of the cache directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(args.log_file.as_deref())?;

    let settings = Settings::load(args.config.as_deref())?;
    log::debug!("settings: {:?}", settings);

    let start_dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("reading current directory")?,
    };
    let start_dir = start_dir
        .canonicalize()
        .with_context(|| format!("opening {}", start_dir.display()))?;

    ui::run(&settings, start_dir)
}
