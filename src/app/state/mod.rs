use super::config::AppConfig;
use super::keymap::KeyMap;
use crate::palette::{CommandId, Listeners, PaletteController, Registry};
use chrono::{DateTime, Local};
use std::sync::Arc;

pub mod dashboard;
pub mod status;

// Re-exports
pub use dashboard::{DashboardState, View};
pub use status::{StatusMessage, StatusSeverity, STATUS_TTL_SECS};

#[derive(Debug)]
pub struct AppState {
    // --- Connectivity & Status ---
    pub should_quit: bool,
    pub status: Option<StatusMessage>,
    pub last_invoked: Option<(CommandId, DateTime<Local>)>,

    // --- Dashboard ---
    pub dashboard: DashboardState,

    // --- Command Palette ---
    pub palette: PaletteController,
    pub listeners: Listeners,
    pub registry: Registry, // Snapshot handed to the next session

    // --- Config ---
    pub config: AppConfig,
    pub keymap: Arc<KeyMap>,
    pub palette_type: crate::theme::PaletteType,
    pub theme: crate::theme::Theme,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let palette_type = config.theme.unwrap_or(crate::theme::PaletteType::CatppuccinMocha);
        Self {
            palette_type,
            theme: crate::theme::Theme::from_palette_type(palette_type),
            keymap: Arc::new(KeyMap::from_config(&config.keys, config.palette.open_key)),
            palette: PaletteController::new(config.palette.focus_delay()),
            config,
            ..Default::default()
        }
    }

    /// Swaps in a freshly loaded config. An open session keeps its snapshot.
    pub fn apply_config(&mut self, config: AppConfig) {
        if let Some(palette_type) = config.theme {
            self.palette_type = palette_type;
            self.theme = crate::theme::Theme::from_palette_type(palette_type);
        }
        self.keymap = Arc::new(KeyMap::from_config(&config.keys, config.palette.open_key));
        self.palette.set_focus_delay(config.palette.focus_delay());
        self.config = config;
    }

    /// Replaces the snapshot for the next session and warns about entries the
    /// palette will leave out.
    pub fn install_registry(&mut self, registry: Registry) {
        let skipped = registry.iter().filter(|c| !c.is_valid()).count();
        if skipped > 0 {
            self.status = Some(StatusMessage::warning(format!(
                "{skipped} config command(s) skipped: missing id or title"
            )));
        }
        self.registry = registry;
    }

    #[must_use]
    pub fn is_palette_open(&self) -> bool {
        self.palette.is_open()
    }
}

impl Default for AppState {
    fn default() -> Self {
        let config = AppConfig::default();
        Self {
            should_quit: false,
            status: None,
            last_invoked: None,
            dashboard: DashboardState::default(),
            palette: PaletteController::new(config.palette.focus_delay()),
            listeners: Listeners::new(),
            registry: Registry::default(),
            keymap: Arc::new(KeyMap::default()),
            config,
            palette_type: crate::theme::PaletteType::CatppuccinMocha,
            theme: crate::theme::Theme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keymap::KeyConfig;
    use crate::app::action::Action;
    use crate::palette::Command;
    use crate::theme::PaletteType;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_new_applies_config() {
        let mut config = AppConfig::default();
        config.theme = Some(PaletteType::Nord);
        config.palette.open_key = 'p';
        let state = AppState::new(config);

        assert_eq!(state.palette_type, PaletteType::Nord);
        let ctrl_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(state.keymap.get_action(ctrl_p), Some(Action::OpenPalette));
    }

    #[test]
    fn test_install_registry_warns_about_skipped_entries() {
        let mut state = AppState::default();
        state.install_registry(Registry::new(vec![
            Command::new("a", "Go Home", || Ok(())),
            Command::new("", "No id", || Ok(())),
            Command::new("b", "  ", || Ok(())),
        ]));

        assert_eq!(state.registry.len(), 3);
        let status = state.status.as_ref().unwrap();
        assert_eq!(status.severity, StatusSeverity::Warning);
        assert!(status.text.starts_with("2 config command"));

        state.status = None;
        state.install_registry(Registry::new(vec![Command::new("a", "Go Home", || Ok(()))]));
        assert!(state.status.is_none());
    }

    #[test]
    fn test_apply_config_keeps_open_session() {
        let mut state = AppState::default();
        state.registry = Registry::new(vec![Command::new("a", "Go Home", || Ok(()))]);
        state
            .palette
            .open(state.registry.clone(), &mut state.listeners);

        let mut config = AppConfig::default();
        config.keys = KeyConfig {
            profile: "emacs".to_string(),
            custom: None,
        };
        state.apply_config(config);

        assert!(state.is_palette_open());
        assert_eq!(state.config.keys.profile, "emacs");
        assert_eq!(state.palette_type, PaletteType::CatppuccinMocha);
    }
}
