use super::command_palette::CommandPaletteModal;
use super::helpers::dim_area;
use crate::app::state::AppState;
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

pub struct ModalManager<'a> {
    pub theme: &'a Theme,
    pub app_state: &'a AppState,
}

impl Widget for ModalManager<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // --- Command Palette ---
        if let Some(session) = self.app_state.palette.session() {
            dim_area(buf, area);
            CommandPaletteModal {
                theme: self.theme,
                session,
                focused: self.app_state.palette.is_focused(),
            }
            .render(area, buf);
        }
    }
}
