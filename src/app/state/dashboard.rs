use chrono::{DateTime, Local};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Tickets,
    Reports,
    Settings,
}

impl View {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Tickets => "Tickets",
            View::Reports => "Reports",
            View::Settings => "Settings",
        }
    }

    #[must_use]
    pub fn all() -> &'static [View] {
        &[View::Home, View::Tickets, View::Reports, View::Settings]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub view: View,
    pub open_tickets: u32,
    pub refresh_count: u32,
    pub last_refresh: Option<DateTime<Local>>,
}
