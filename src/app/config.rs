use super::keymap::KeyConfig;
use crate::theme::PaletteType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteSettings {
    pub focus_delay_ms: u64,
    /// Opens the palette together with Ctrl.
    pub open_key: char,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            focus_delay_ms: 50,
            open_key: 'k',
        }
    }
}

impl PaletteSettings {
    #[must_use]
    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    /// Key hint shown in the footer and on the home view, e.g. `Ctrl-K`.
    #[must_use]
    pub fn open_hint(&self) -> String {
        format!("Ctrl-{}", self.open_key.to_ascii_uppercase())
    }
}

/// A `[[commands]]` entry. Every field is optional on disk; entries without
/// an id or title are handed to the palette as-is and it leaves them out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserCommand {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub shortcut: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub theme: Option<PaletteType>,
    pub keys: KeyConfig,
    pub palette: PaletteSettings,
    pub commands: Vec<UserCommand>,
}

pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("cmdpal");
        path
    })
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Reads `path`. A missing file is not an error and yields the defaults.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load() -> AppConfig {
    let Some(path) = config_path() else {
        tracing::debug!("no home directory, using default config");
        return AppConfig::default();
    };

    match load_from(&path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to default config");
            AppConfig::default()
        }
    }
}
