use super::config::config_dir;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "cmdpal=info";

/// `CMDPAL_LOG` wins over `RUST_LOG`; with neither set only info and above
/// from this crate is kept.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("CMDPAL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

pub fn log_path(dir: &Path) -> PathBuf {
    dir.join("cmdpal.log")
}

/// Installs the global subscriber. The terminal belongs to the UI, so output
/// goes to a file next to the config. Without a home directory logging is
/// skipped and `None` is returned.
pub fn init() -> Result<Option<PathBuf>> {
    let Some(dir) = config_dir() else {
        return Ok(None);
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let path = log_path(&dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;

    tracing::info!("cmdpal v{} starting", env!("CARGO_PKG_VERSION"));
    Ok(Some(path))
}
