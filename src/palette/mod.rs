//! Command palette engine: registry types, substring filtering, clamped
//! selection, and the listener lifecycle of an open palette. Nothing in here
//! knows about terminals or rendering.

pub mod command;
pub mod filter;
pub mod lifecycle;
pub mod selection;
pub mod session;

pub use command::{Command, CommandId, Invoke, Registry};
pub use filter::{category_of, filter_commands, group_by_category, GENERAL_CATEGORY};
pub use lifecycle::{
    FocusRequest, ListenerHost, ListenerId, ListenerKind, Listeners, PaletteController,
    PaletteInput, PointerTarget,
};
pub use selection::{Direction, Selection};
pub use session::{CloseReason, PaletteSession, Signal, VisibleCommand};
