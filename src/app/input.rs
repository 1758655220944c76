use crate::app::{action::Action, state::AppState};
use crate::components::modals::command_palette::hit_test;
use crate::palette::ListenerKind;
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::{Rect, Size};

/// Translates a raw terminal event. While the palette holds its listeners,
/// keys and clicks are routed to it first; the dashboard only sees what the
/// palette does not claim.
pub fn map_event_to_action(
    event: Event,
    app_state: &AppState,
    terminal_size: Size,
) -> Option<Action> {
    if let Event::Key(key) = &event {
        if key.kind == KeyEventKind::Release {
            return None;
        }
    }

    match event {
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        Event::Key(key) => {
            if app_state.listeners.is_subscribed(ListenerKind::Keyboard) {
                return Some(match app_state.keymap.palette_input(key) {
                    Some(input) => Action::PaletteInput(input),
                    None => Action::PaletteQueryInput(key),
                });
            }
            app_state.keymap.get_action(key)
        }
        Event::Mouse(mouse) => {
            if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                return None;
            }
            if !app_state.listeners.is_subscribed(ListenerKind::OutsidePointer) {
                return None;
            }
            let session = app_state.palette.session()?;
            let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
            Some(Action::PalettePointer(hit_test(
                area,
                session,
                mouse.column,
                mouse.row,
            )))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Command, PaletteInput, PointerTarget, Registry};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

    fn size() -> Size {
        Size::new(100, 40)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    fn open_state() -> AppState {
        let mut state = AppState::default();
        state.registry = Registry::new(vec![Command::new("a", "Go Home", || Ok(()))]);
        state
            .palette
            .open(state.registry.clone(), &mut state.listeners);
        state
    }

    #[test]
    fn test_dashboard_keys_when_closed() {
        let state = AppState::default();
        assert_eq!(
            map_event_to_action(press(KeyCode::Char('q')), &state, size()),
            Some(Action::Quit)
        );
        assert_eq!(map_event_to_action(press(KeyCode::Down), &state, size()), None);
        assert_eq!(map_event_to_action(click(0, 0), &state, size()), None);
    }

    #[test]
    fn test_palette_intercepts_four_keys() {
        let state = open_state();
        assert_eq!(
            map_event_to_action(press(KeyCode::Down), &state, size()),
            Some(Action::PaletteInput(PaletteInput::MoveDown))
        );
        assert_eq!(
            map_event_to_action(press(KeyCode::Esc), &state, size()),
            Some(Action::PaletteInput(PaletteInput::Cancel))
        );
    }

    #[test]
    fn test_other_keys_reach_the_query() {
        let state = open_state();
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        assert_eq!(
            map_event_to_action(Event::Key(q), &state, size()),
            Some(Action::PaletteQueryInput(q))
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let state = open_state();
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());
        key.kind = KeyEventKind::Release;
        assert_eq!(map_event_to_action(Event::Key(key), &state, size()), None);
    }

    #[test]
    fn test_click_outside_cancels() {
        let state = open_state();
        assert_eq!(
            map_event_to_action(click(0, 0), &state, size()),
            Some(Action::PalettePointer(PointerTarget::Backdrop))
        );
    }
}
