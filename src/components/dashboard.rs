use crate::app::state::{AppState, View};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub struct Dashboard<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
}

impl Dashboard<'_> {
    fn body(&self) -> Vec<Line<'static>> {
        let theme = self.theme;
        let dash = &self.state.dashboard;
        let stat = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!(" {label:<16}"), theme.footer_segment_key),
                Span::styled(format!(" {value} "), theme.list_item),
            ])
        };

        match dash.view {
            View::Home => vec![
                Line::from(""),
                stat("Open tickets", dash.open_tickets.to_string()),
                stat("Refreshes", dash.refresh_count.to_string()),
                stat(
                    "Last refresh",
                    dash.last_refresh
                        .map_or_else(|| "never".to_string(), |t| t.format("%H:%M:%S").to_string()),
                ),
                Line::from(""),
                Line::from(Span::styled(
                    format!(
                        " Press {} or : to open the command palette",
                        self.state.config.palette.open_hint()
                    ),
                    theme.dimmed,
                )),
            ],
            View::Tickets => {
                let mut lines = vec![Line::from("")];
                if dash.open_tickets == 0 {
                    lines.push(Line::from(Span::styled(" No open tickets.", theme.dimmed)));
                }
                for n in 1..=dash.open_tickets {
                    lines.push(Line::from(vec![
                        Span::styled(format!(" #{n:<4}"), theme.ticket_number),
                        Span::styled("Untitled ticket", theme.list_item),
                    ]));
                }
                lines
            }
            View::Reports => vec![
                Line::from(""),
                stat("Tickets filed", dash.open_tickets.to_string()),
                stat("Metric reloads", dash.refresh_count.to_string()),
            ],
            View::Settings => vec![
                Line::from(""),
                stat("Theme", self.state.palette_type.label().to_string()),
                stat("Key profile", self.state.config.keys.profile.clone()),
                stat(
                    "Focus delay",
                    format!("{}ms", self.state.config.palette.focus_delay_ms),
                ),
                stat("Commands", self.state.registry.len().to_string()),
            ],
        }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title = self.state.dashboard.view.label().to_uppercase();
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title, self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border);

        Paragraph::new(self.body())
            .alignment(Alignment::Left)
            .block(block)
            .render(area, buf);
    }
}
