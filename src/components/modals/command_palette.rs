use crate::palette::{CommandId, PaletteSession, PointerTarget};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

/// One line of the results area.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteLine {
    Header(String),
    Row { position: usize, id: CommandId },
}

pub struct PaletteGeometry {
    pub surface: Rect,
    pub query: Rect,
    pub results: Rect,
}

pub fn geometry(area: Rect) -> PaletteGeometry {
    let surface = centered_rect(60, 50, area);
    let inner = Block::default().borders(Borders::ALL).inner(surface);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Query input
            Constraint::Length(1), // Separator
            Constraint::Min(0),    // Results
        ])
        .split(inner);

    PaletteGeometry {
        surface,
        query: layout[0],
        results: layout[2],
    }
}

/// Results grouped by category. Rows keep their position in the filtered
/// list so highlighting follows the session's selection.
pub fn build_lines(session: &PaletteSession) -> Vec<PaletteLine> {
    let matches = session.matches();
    let registry = session.registry();
    let mut lines = Vec::new();

    for (category, indices) in session.groups() {
        lines.push(PaletteLine::Header(category));
        for idx in indices {
            let (Ok(position), Some(cmd)) = (matches.binary_search(&idx), registry.get(idx)) else {
                continue;
            };
            lines.push(PaletteLine::Row {
                position,
                id: cmd.id.clone(),
            });
        }
    }
    lines
}

/// First line to draw so the active row stays inside `height` lines.
pub fn scroll_offset(lines: &[PaletteLine], selected: Option<usize>, height: usize) -> usize {
    let Some(selected) = selected else {
        return 0;
    };
    let active_line = lines
        .iter()
        .position(|l| matches!(l, PaletteLine::Row { position, .. } if *position == selected))
        .unwrap_or(0);

    if height == 0 || active_line < height {
        0
    } else {
        active_line + 1 - height
    }
}

/// Classifies a click at (`column`, `row`) for the pointer listener.
pub fn hit_test(area: Rect, session: &PaletteSession, column: u16, row: u16) -> PointerTarget {
    let geo = geometry(area);
    let point = Position::new(column, row);
    if !geo.surface.contains(point) {
        return PointerTarget::Backdrop;
    }
    if !geo.results.contains(point) {
        return PointerTarget::Surface;
    }

    let lines = build_lines(session);
    let offset = scroll_offset(&lines, session.selected(), geo.results.height as usize);
    let line_idx = offset + (row - geo.results.y) as usize;
    match lines.get(line_idx) {
        Some(PaletteLine::Row { id, .. }) => PointerTarget::Row(id.clone()),
        _ => PointerTarget::Surface,
    }
}

pub struct CommandPaletteModal<'a> {
    pub theme: &'a Theme,
    pub session: &'a PaletteSession,
    pub focused: bool,
}

impl Widget for CommandPaletteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geo = geometry(area);
        let modal_area = geo.surface;
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" COMMAND PALETTE ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(vec![
                Span::raw(" "),
                Span::styled("↑/↓", self.theme.footer_segment_key),
                Span::raw(": move "),
                Span::styled("Enter", self.theme.footer_segment_key),
                Span::raw(": run "),
                Span::styled("Esc", self.theme.footer_segment_key),
                Span::raw(": close "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);
        block.render(modal_area, buf);

        // Render Query
        let mut query_spans = vec![
            Span::styled(" > ", self.theme.footer_segment_key),
            Span::styled(self.session.query(), self.theme.footer_segment_val),
        ];
        if self.focused {
            query_spans.push(Span::styled(
                "_",
                self.theme
                    .footer_segment_val
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        buf.set_line(
            geo.query.x,
            geo.query.y,
            &Line::from(query_spans),
            geo.query.width,
        );

        // Render Separator
        if geo.query.y + 1 < modal_area.bottom().saturating_sub(1) {
            let separator = "─".repeat(geo.query.width as usize);
            buf.set_string(geo.query.x, geo.query.y + 1, separator, self.theme.border_focus);
        }

        // Render Results
        let results = geo.results;
        if results.height == 0 {
            return;
        }

        if self.session.is_empty() {
            let no_results = Line::from(Span::styled(
                "  No commands found.",
                self.theme.list_item.add_modifier(Modifier::DIM),
            ));
            buf.set_line(results.x, results.y, &no_results, results.width);
            return;
        }

        let lines = build_lines(self.session);
        let selected = self.session.selected();
        let offset = scroll_offset(&lines, selected, results.height as usize);
        let registry = self.session.registry();
        let matches = self.session.matches();

        for (i, line) in lines
            .iter()
            .skip(offset)
            .take(results.height as usize)
            .enumerate()
        {
            let y = results.y + i as u16;
            let rendered = match line {
                PaletteLine::Header(name) => {
                    Line::from(Span::styled(format!(" {name} "), self.theme.header_item))
                }
                PaletteLine::Row { position, .. } => {
                    let Some(cmd) = matches.get(*position).and_then(|&idx| registry.get(idx))
                    else {
                        continue;
                    };
                    let is_active = selected == Some(*position);
                    let style = if is_active {
                        self.theme.list_selected
                    } else {
                        self.theme.list_item
                    };
                    let prefix = if is_active { "> " } else { "  " };

                    let mut spans = vec![
                        Span::styled(prefix, style),
                        Span::styled(format!("{:<18}", cmd.title), style),
                    ];
                    if let Some(desc) = &cmd.description {
                        spans.push(Span::styled(
                            format!(" - {desc}"),
                            self.theme.list_item.add_modifier(Modifier::DIM),
                        ));
                    }
                    if let Some(shortcut) = &cmd.shortcut {
                        spans.push(Span::raw("  "));
                        spans.push(Span::styled(
                            format!(" {shortcut} "),
                            self.theme.footer_segment_key,
                        ));
                    }
                    Line::from(spans)
                }
            };
            buf.set_line(results.x, y, &rendered, results.width);
        }
    }
}
