use super::{
    action::Action,
    effect::Effect,
    state::{AppState, StatusMessage},
};
use crate::palette::CloseReason;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn update(state: &mut AppState, action: Action) -> Option<Effect> {
    match action {
        // --- Command Palette ---
        Action::OpenPalette => {
            let request = state
                .palette
                .open(state.registry.clone(), &mut state.listeners);
            return Some(Effect::ScheduleFocus(request.after));
        }
        Action::PaletteInput(input) => {
            let reason = state.palette.handle_input(input, &mut state.listeners);
            apply_close(state, reason);
        }
        Action::PalettePointer(target) => {
            let reason = state.palette.handle_pointer(target, &mut state.listeners);
            apply_close(state, reason);
        }
        Action::PaletteQueryInput(key) => edit_query(state, key),
        Action::FocusPaletteQuery => state.palette.focus_query(),

        // --- Dashboard ---
        Action::ShowView(view) => {
            state.dashboard.view = view;
        }
        Action::NewTicket => {
            state.dashboard.open_tickets += 1;
            state.status = Some(StatusMessage::info(format!(
                "Ticket #{} created",
                state.dashboard.open_tickets
            )));
        }
        Action::RefreshMetrics => {
            state.dashboard.refresh_count += 1;
            state.dashboard.last_refresh = Some(chrono::Local::now());
            state.status = Some(StatusMessage::info("Metrics refreshed"));
        }
        Action::ToggleTheme => {
            state.palette_type = Theme::next_palette(state.palette_type);
            state.theme = Theme::from_palette_type(state.palette_type);
        }
        Action::ShowMessage(text) => {
            state.status = Some(StatusMessage::info(text));
        }

        // --- System ---
        Action::ConfigChanged => return Some(Effect::ReloadConfig),
        Action::Tick => {
            let now = chrono::Local::now();
            if state.status.as_ref().is_some_and(|s| s.is_expired(now)) {
                state.status = None;
            }
        }
        Action::Resize(_, _) => {}
        Action::Quit => {
            state.palette.teardown(&mut state.listeners);
            state.should_quit = true;
        }
    }
    None
}

fn apply_close(state: &mut AppState, reason: Option<CloseReason>) {
    match reason {
        Some(CloseReason::Committed { id, outcome }) => {
            if let Err(err) = outcome {
                tracing::warn!(command = %id, error = %err, "command failed");
                state.status = Some(StatusMessage::error(format!("{id}: {err}")));
            }
            state.last_invoked = Some((id, chrono::Local::now()));
        }
        Some(CloseReason::Cancelled) => {
            tracing::debug!("palette dismissed");
        }
        None => {}
    }
}

fn edit_query(state: &mut AppState, key: KeyEvent) {
    let Some(session) = state.palette.session_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            session.set_query("");
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            session.push_char(c);
        }
        KeyCode::Backspace => session.pop_char(),
        _ => {}
    }
}
