use super::command::{Command, CommandId, Registry};
use super::filter::{filter_commands, group_by_category};
use super::selection::{Direction, Selection};
use indexmap::IndexMap;
use tracing::{debug, info};

/// Why a session asked its owner to close it.
#[derive(Debug)]
pub enum CloseReason {
    /// A command was invoked. `outcome` is whatever its action returned; the
    /// session does not inspect it.
    Committed {
        id: CommandId,
        outcome: anyhow::Result<()>,
    },
    Cancelled,
}

#[derive(Debug)]
pub enum Signal {
    Stay,
    Close(CloseReason),
}

impl Signal {
    #[must_use]
    pub fn is_close(&self) -> bool {
        matches!(self, Signal::Close(_))
    }
}

/// One row of the filtered list, as handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct VisibleCommand<'a> {
    pub position: usize,
    pub command: &'a Command,
    pub is_active: bool,
}

/// State of one open-to-close lifetime of the palette.
#[derive(Debug)]
pub struct PaletteSession {
    registry: Registry,
    query: String,
    matches: Vec<usize>, // Indices into the registry
    selection: Selection,
    closed: bool,
}

impl PaletteSession {
    #[must_use]
    pub fn open(registry: Registry) -> Self {
        let matches = filter_commands(&registry, "");
        let selection = Selection::for_len(matches.len());
        debug!(
            commands = registry.len(),
            visible = matches.len(),
            "palette session opened"
        );
        Self {
            registry,
            query: String::new(),
            matches,
            selection,
            closed: false,
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.refilter();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        self.matches = filter_commands(&self.registry, &self.query);
        self.selection = Selection::for_len(self.matches.len());
        debug!(query = %self.query, visible = self.matches.len(), "palette refiltered");
    }

    pub fn move_selection(&mut self, direction: Direction) {
        self.selection = self.selection.step(direction, self.matches.len());
    }

    /// Invokes the active command, if any, and asks the owner to close.
    pub fn commit(&mut self) -> Signal {
        if self.closed {
            return Signal::Stay;
        }
        let Some(command) = self.active_command() else {
            return Signal::Stay;
        };

        let id = command.id.clone();
        info!(command = %id, "invoking palette command");
        let outcome = command.run();
        self.closed = true;
        Signal::Close(CloseReason::Committed { id, outcome })
    }

    /// Selects `id` in the current filtered list and commits it. Ids that are
    /// not currently visible are ignored.
    pub fn commit_at(&mut self, id: &CommandId) -> Signal {
        let position = self
            .matches
            .iter()
            .position(|&idx| self.registry.get(idx).is_some_and(|cmd| cmd.id == *id));

        match position {
            Some(position) => {
                self.selection = Selection::Active(position);
                self.commit()
            }
            None => {
                debug!(command = %id, "commit_at ignored, command not visible");
                Signal::Stay
            }
        }
    }

    pub fn cancel(&mut self) -> Signal {
        self.closed = true;
        Signal::Close(CloseReason::Cancelled)
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Active position within the filtered list.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selection.resolve(self.matches.len())
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn active_command(&self) -> Option<&Command> {
        let position = self.selected()?;
        let idx = *self.matches.get(position)?;
        self.registry.get(idx)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn groups(&self) -> IndexMap<String, Vec<usize>> {
        group_by_category(&self.registry, &self.matches)
    }

    pub fn visible(&self) -> impl Iterator<Item = VisibleCommand<'_>> {
        let selected = self.selected();
        self.matches
            .iter()
            .enumerate()
            .filter_map(move |(position, &idx)| {
                self.registry.get(idx).map(|command| VisibleCommand {
                    position,
                    command,
                    is_active: selected == Some(position),
                })
            })
    }
}
