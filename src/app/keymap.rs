use super::action::Action;
use super::state::View;
use crate::palette::PaletteInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    pub profile: String,
    /// Extra palette bindings, e.g. `move_down = "ctrl-j"`.
    pub custom: Option<HashMap<String, String>>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            custom: None,
        }
    }
}

#[derive(Debug)]
pub struct KeyMap {
    pub global: HashMap<KeyEvent, Action>,
    pub palette: HashMap<KeyEvent, PaletteInput>,
}

impl KeyMap {
    pub fn from_config(config: &KeyConfig, open_key: char) -> Self {
        let mut global = HashMap::new();
        let mut palette = HashMap::new();

        // --- Dashboard ---
        global.insert(key(KeyCode::Char('q')), Action::Quit);
        global.insert(ctrl(open_key), Action::OpenPalette);
        global.insert(key(KeyCode::Char(':')), Action::OpenPalette);
        global.insert(key(KeyCode::Char('1')), Action::ShowView(View::Home));
        global.insert(key(KeyCode::Char('2')), Action::ShowView(View::Tickets));
        global.insert(key(KeyCode::Char('3')), Action::ShowView(View::Reports));
        global.insert(key(KeyCode::Char('4')), Action::ShowView(View::Settings));
        global.insert(key(KeyCode::Char('n')), Action::NewTicket);
        global.insert(key(KeyCode::Char('r')), Action::RefreshMetrics);
        global.insert(key(KeyCode::Char('t')), Action::ToggleTheme);

        // --- Palette ---
        palette.insert(key(KeyCode::Down), PaletteInput::MoveDown);
        palette.insert(key(KeyCode::Up), PaletteInput::MoveUp);
        palette.insert(key(KeyCode::Enter), PaletteInput::Commit);
        palette.insert(key(KeyCode::Esc), PaletteInput::Cancel);

        if config.profile == "emacs" {
            palette.insert(ctrl('n'), PaletteInput::MoveDown);
            palette.insert(ctrl('p'), PaletteInput::MoveUp);
            palette.insert(ctrl('g'), PaletteInput::Cancel);
        }

        if let Some(custom) = &config.custom {
            for (name, spec) in custom {
                match (parse_palette_input(name), parse_key(spec)) {
                    (Some(input), Some(event)) => {
                        palette.insert(event, input);
                    }
                    _ => tracing::warn!(binding = %name, key = %spec, "ignoring unknown key binding"),
                }
            }
        }

        Self { global, palette }
    }

    pub fn get_action(&self, event: KeyEvent) -> Option<Action> {
        self.global.get(&normalize(event)).cloned()
    }

    /// Resolves one of the palette's intercepted keys. `None` means the key
    /// belongs to the query editor.
    pub fn palette_input(&self, event: KeyEvent) -> Option<PaletteInput> {
        self.palette.get(&normalize(event)).copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_config(&KeyConfig::default(), 'k')
    }
}

// Terminals disagree on whether shifted characters carry SHIFT.
fn normalize(event: KeyEvent) -> KeyEvent {
    let modifiers = match event.code {
        KeyCode::Char(_) => event.modifiers - KeyModifiers::SHIFT,
        _ => event.modifiers,
    };
    KeyEvent::new(event.code, modifiers)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn parse_palette_input(name: &str) -> Option<PaletteInput> {
    match name {
        "move_down" => Some(PaletteInput::MoveDown),
        "move_up" => Some(PaletteInput::MoveUp),
        "commit" => Some(PaletteInput::Commit),
        "cancel" => Some(PaletteInput::Cancel),
        _ => None,
    }
}

pub fn parse_key(spec: &str) -> Option<KeyEvent> {
    let spec = spec.trim().to_lowercase();
    if let Some(rest) = spec.strip_prefix("ctrl-") {
        let mut chars = rest.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(ctrl(c)),
            _ => None,
        };
    }

    let code = match spec.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => return None,
    };
    Some(key(code))
}
