use crate::app::state::AppState;
use crate::components::dashboard::Dashboard;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modals::manager::ModalManager;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    AppLayout {
        header: main[0],
        body: main[1],
        footer: main[2],
    }
}

pub fn draw(f: &mut Frame, app_state: &AppState) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let theme = &app_state.theme;
    let layout = get_layout(area);

    // --- Header ---
    if layout.header.height > 0 {
        f.render_widget(
            Header {
                active: app_state.dashboard.view,
                theme,
            },
            layout.header,
        );
    }

    // --- Body ---
    f.render_widget(
        Dashboard {
            state: app_state,
            theme,
        },
        layout.body,
    );

    // --- Footer ---
    if layout.footer.height > 0 {
        f.render_widget(
            Footer {
                state: app_state,
                theme,
            },
            layout.footer,
        );
    }

    // --- Modals ---
    f.render_widget(
        ModalManager {
            theme,
            app_state,
        },
        area,
    );
}
