use crate::app::state::View;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Top bar: logo followed by one tab per dashboard view.
pub struct Header<'a> {
    pub active: View,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" CMDPAL ", self.theme.header_logo),
            Span::styled(" ", self.theme.header),
        ];

        for (i, view) in View::all().iter().enumerate() {
            let style = if *view == self.active {
                self.theme.header_active
            } else {
                self.theme.header_item
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, view.label()), style));
        }

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}
