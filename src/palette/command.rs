use std::fmt;
use std::sync::Arc;

/// Side effect run when a command is committed.
pub type Invoke = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CommandId(pub String);

impl CommandId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for CommandId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CommandId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone)]
pub struct Command {
    pub id: CommandId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub shortcut: Option<String>, // Display only, never matched
    pub invoke: Invoke,
}

impl Command {
    pub fn new(
        id: impl Into<CommandId>,
        title: impl Into<String>,
        invoke: impl Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category: None,
            shortcut: None,
            invoke: Arc::new(invoke),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Entries without an id or a title come from unvalidated sources and are
    /// never matched, rendered, or invoked.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.title.trim().is_empty()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        (self.invoke)()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("shortcut", &self.shortcut)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable snapshot of the commands offered to one session.
#[derive(Debug, Clone)]
pub struct Registry {
    commands: Arc<[Command]>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Registry {
    #[must_use]
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands: commands.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }
}

impl From<Vec<Command>> for Registry {
    fn from(commands: Vec<Command>) -> Self {
        Self::new(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(Command::new("a", "Go Home", || Ok(())).is_valid());
        assert!(!Command::new("", "Go Home", || Ok(())).is_valid());
        assert!(!Command::new("a", "   ", || Ok(())).is_valid());
    }

    #[test]
    fn test_registry_clone_shares_snapshot() {
        let registry = Registry::new(vec![
            Command::new("a", "Go Home", || Ok(())).category("Nav"),
            Command::new("b", "Open Settings", || Ok(())),
        ]);
        let copy = registry.clone();
        assert_eq!(copy.len(), 2);
        assert!(std::ptr::eq(registry.as_slice(), copy.as_slice()));
        assert_eq!(copy.get(0).and_then(|c| c.category.as_deref()), Some("Nav"));
        assert!(copy.get(2).is_none());
    }
}
