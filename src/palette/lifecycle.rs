use super::command::{CommandId, Registry};
use super::selection::Direction;
use super::session::{CloseReason, PaletteSession, Signal};
use indexmap::IndexMap;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Keyboard,
    OutsidePointer,
}

/// Registration point for transient input listeners.
#[cfg_attr(test, mockall::automock)]
pub trait ListenerHost {
    fn subscribe(&mut self, kind: ListenerKind) -> ListenerId;
    fn unsubscribe(&mut self, id: ListenerId) -> bool;
}

/// In-process listener table consulted by the event router.
#[derive(Debug, Default)]
pub struct Listeners {
    next_id: u64,
    active: IndexMap<ListenerId, ListenerKind>,
}

impl Listeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_subscribed(&self, kind: ListenerKind) -> bool {
        self.active.values().any(|k| *k == kind)
    }

    #[must_use]
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.active.values().filter(|k| **k == kind).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl ListenerHost for Listeners {
    fn subscribe(&mut self, kind: ListenerKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.active.insert(id, kind);
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.active.shift_remove(&id).is_some()
    }
}

/// The four inputs the palette intercepts. Everything else belongs to the
/// query editor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PaletteInput {
    MoveDown,
    MoveUp,
    Commit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// Anywhere outside the palette surface.
    Backdrop,
    /// The palette surface itself, excluding rows.
    Surface,
    Row(CommandId),
}

/// Advisory request to focus the query input once the palette has painted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FocusRequest {
    pub after: Duration,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Subscriptions {
    keyboard: ListenerId,
    pointer: ListenerId,
}

/// Owns the session for one palette instance together with the listeners it
/// holds. While a session exists exactly one keyboard and one outside-pointer
/// subscription are held; every path out of the open state releases both.
#[derive(Debug)]
pub struct PaletteController {
    session: Option<PaletteSession>,
    subscriptions: Option<Subscriptions>,
    focus_delay: Duration,
    focused: bool,
}

impl PaletteController {
    #[must_use]
    pub fn new(focus_delay: Duration) -> Self {
        Self {
            session: None,
            subscriptions: None,
            focus_delay,
            focused: false,
        }
    }

    pub fn open(&mut self, registry: Registry, host: &mut dyn ListenerHost) -> FocusRequest {
        if self.is_open() {
            debug!("palette reopened while open, releasing previous session");
            self.close(host);
        }

        self.session = Some(PaletteSession::open(registry));
        self.subscriptions = Some(Subscriptions {
            keyboard: host.subscribe(ListenerKind::Keyboard),
            pointer: host.subscribe(ListenerKind::OutsidePointer),
        });
        self.focused = false;
        info!("palette opened");

        FocusRequest {
            after: self.focus_delay,
        }
    }

    pub fn close(&mut self, host: &mut dyn ListenerHost) {
        if let Some(subs) = self.subscriptions.take() {
            for id in [subs.keyboard, subs.pointer] {
                if !host.unsubscribe(id) {
                    warn!(listener = id.0, "listener already released");
                }
            }
        }
        if self.session.take().is_some() {
            info!("palette closed");
        }
        self.focused = false;
    }

    /// Exit path for when the hosting surface goes away.
    pub fn teardown(&mut self, host: &mut dyn ListenerHost) {
        self.close(host);
    }

    /// Applies `input` to the live session. Returns the close reason when the
    /// session asked to close; by then the controller is already closed.
    pub fn handle_input(
        &mut self,
        input: PaletteInput,
        host: &mut dyn ListenerHost,
    ) -> Option<CloseReason> {
        let session = self.session.as_mut()?;
        let signal = match input {
            PaletteInput::MoveDown => {
                session.move_selection(Direction::Down);
                Signal::Stay
            }
            PaletteInput::MoveUp => {
                session.move_selection(Direction::Up);
                Signal::Stay
            }
            PaletteInput::Commit => session.commit(),
            PaletteInput::Cancel => session.cancel(),
        };
        self.settle(signal, host)
    }

    pub fn handle_pointer(
        &mut self,
        target: PointerTarget,
        host: &mut dyn ListenerHost,
    ) -> Option<CloseReason> {
        let session = self.session.as_mut()?;
        let signal = match target {
            PointerTarget::Backdrop => session.cancel(),
            PointerTarget::Surface => Signal::Stay,
            PointerTarget::Row(id) => session.commit_at(&id),
        };
        self.settle(signal, host)
    }

    fn settle(&mut self, signal: Signal, host: &mut dyn ListenerHost) -> Option<CloseReason> {
        match signal {
            Signal::Stay => None,
            Signal::Close(reason) => {
                self.close(host);
                Some(reason)
            }
        }
    }

    /// Applies to the next `open`.
    pub fn set_focus_delay(&mut self, delay: Duration) {
        self.focus_delay = delay;
    }

    pub fn focus_query(&mut self) {
        if self.session.is_some() {
            self.focused = true;
        }
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&PaletteSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut PaletteSession> {
        self.session.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::command::Command;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn registry(hits: &Arc<AtomicUsize>) -> Registry {
        let make = |id: &str, title: &str| {
            let hits = hits.clone();
            Command::new(id, title, move || {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        };
        Registry::new(vec![make("a", "Go Home"), make("b", "Open Settings")])
    }

    fn controller() -> PaletteController {
        PaletteController::new(Duration::from_millis(50))
    }

    #[test]
    fn test_open_subscribes_once_per_kind() {
        let mut mock = MockListenerHost::new();
        let mut seq = Sequence::new();
        mock.expect_subscribe()
            .with(eq(ListenerKind::Keyboard))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(ListenerId(1));
        mock.expect_subscribe()
            .with(eq(ListenerKind::OutsidePointer))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(ListenerId(2));
        mock.expect_unsubscribe()
            .with(eq(ListenerId(1)))
            .times(1)
            .return_const(true);
        mock.expect_unsubscribe()
            .with(eq(ListenerId(2)))
            .times(1)
            .return_const(true);

        let hits = Arc::new(AtomicUsize::new(0));
        let mut palette = controller();
        let focus = palette.open(registry(&hits), &mut mock);
        assert_eq!(focus.after, Duration::from_millis(50));
        palette.close(&mut mock);
        // Second close has nothing left to release.
        palette.close(&mut mock);
    }

    #[test]
    fn test_every_exit_path_releases_listeners() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut host = Listeners::new();
        let mut palette = controller();

        let exits: [fn(&mut PaletteController, &mut Listeners); 6] = [
            |p, h| {
                p.handle_input(PaletteInput::Commit, h);
            },
            |p, h| {
                p.handle_input(PaletteInput::Cancel, h);
            },
            |p, h| {
                p.handle_pointer(PointerTarget::Backdrop, h);
            },
            |p, h| {
                p.handle_pointer(PointerTarget::Row(CommandId::from("b")), h);
            },
            |p, h| p.close(h),
            |p, h| p.teardown(h),
        ];

        for exit in exits {
            palette.open(registry(&hits), &mut host);
            assert_eq!(host.count(ListenerKind::Keyboard), 1);
            assert_eq!(host.count(ListenerKind::OutsidePointer), 1);
            exit(&mut palette, &mut host);
            assert!(!palette.is_open());
            assert!(host.is_empty());
        }
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reopen_does_not_duplicate_listeners() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut host = Listeners::new();
        let mut palette = controller();

        palette.open(registry(&hits), &mut host);
        if let Some(session) = palette.session_mut() {
            session.set_query("settings");
        }
        palette.open(registry(&hits), &mut host);

        assert_eq!(host.len(), 2);
        let session = palette.session().unwrap();
        assert_eq!(session.query(), "");
        assert_eq!(session.selected(), Some(0));
    }

    #[test]
    fn test_surface_click_is_swallowed() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut host = Listeners::new();
        let mut palette = controller();
        palette.open(registry(&hits), &mut host);

        assert!(palette.handle_pointer(PointerTarget::Surface, &mut host).is_none());
        assert!(palette.is_open());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_inputs_without_session_are_ignored() {
        let mut host = Listeners::new();
        let mut palette = controller();
        assert!(palette.handle_input(PaletteInput::Commit, &mut host).is_none());
        assert!(palette.handle_pointer(PointerTarget::Backdrop, &mut host).is_none());
        palette.focus_query();
        assert!(!palette.is_focused());
    }

    #[test]
    fn test_commit_on_empty_keeps_palette_open() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut host = Listeners::new();
        let mut palette = controller();
        palette.open(registry(&hits), &mut host);
        palette.session_mut().unwrap().set_query("zzz");

        assert!(palette.handle_input(PaletteInput::Commit, &mut host).is_none());
        assert!(palette.is_open());
        assert_eq!(host.len(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_focus_is_reset_per_session() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut host = Listeners::new();
        let mut palette = controller();
        palette.open(registry(&hits), &mut host);
        palette.focus_query();
        assert!(palette.is_focused());
        palette.handle_input(PaletteInput::Cancel, &mut host);
        palette.open(registry(&hits), &mut host);
        assert!(!palette.is_focused());
    }
}
