use super::state::View;
use crate::palette::{PaletteInput, PointerTarget};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,
    ConfigChanged, // Debounced notification from the config watcher

    // --- Command Palette ---
    OpenPalette,
    PaletteInput(PaletteInput),
    PalettePointer(PointerTarget),
    PaletteQueryInput(KeyEvent), // Keys the palette does not intercept
    FocusPaletteQuery,

    // --- Dashboard ---
    ShowView(View),
    NewTicket,
    RefreshMetrics,
    ToggleTheme,
    ShowMessage(String),
}
