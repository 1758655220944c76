use super::action::Action;
use super::config::{AppConfig, UserCommand};
use super::state::View;
use crate::palette::{Command, Registry};
use tokio::sync::mpsc;

struct CommandDefinition {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: Option<&'static str>,
    shortcut: Option<&'static str>,
    action: Action,
}

fn builtin_commands() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition {
            id: "nav.home",
            title: "Go Home",
            description: "Show the overview dashboard",
            category: Some("Nav"),
            shortcut: Some("1"),
            action: Action::ShowView(View::Home),
        },
        CommandDefinition {
            id: "nav.tickets",
            title: "Open Tickets",
            description: "List open support tickets",
            category: Some("Nav"),
            shortcut: Some("2"),
            action: Action::ShowView(View::Tickets),
        },
        CommandDefinition {
            id: "nav.reports",
            title: "Open Reports",
            description: "Weekly metrics and charts",
            category: Some("Nav"),
            shortcut: Some("3"),
            action: Action::ShowView(View::Reports),
        },
        CommandDefinition {
            id: "nav.settings",
            title: "Open Settings",
            description: "Preferences and account",
            category: Some("Nav"),
            shortcut: Some("4"),
            action: Action::ShowView(View::Settings),
        },
        CommandDefinition {
            id: "tickets.new",
            title: "New Ticket",
            description: "Create a support ticket",
            category: Some("Actions"),
            shortcut: Some("n"),
            action: Action::NewTicket,
        },
        CommandDefinition {
            id: "metrics.refresh",
            title: "Refresh Metrics",
            description: "Reload dashboard numbers",
            category: Some("Actions"),
            shortcut: Some("r"),
            action: Action::RefreshMetrics,
        },
        CommandDefinition {
            id: "theme.toggle",
            title: "Toggle Theme",
            description: "Switch between color palettes",
            category: None,
            shortcut: Some("t"),
            action: Action::ToggleTheme,
        },
        CommandDefinition {
            id: "app.quit",
            title: "Quit",
            description: "Exit the dashboard",
            category: Some("System"),
            shortcut: Some("q"),
            action: Action::Quit,
        },
    ]
}

/// Invocation posts `action` to the run loop and returns at once; the
/// palette never waits on what the action does.
fn dispatch(tx: &mpsc::Sender<Action>, action: Action) -> impl Fn() -> anyhow::Result<()> {
    let tx = tx.clone();
    move || {
        tx.try_send(action.clone())
            .map_err(|e| anyhow::anyhow!("could not queue {action:?}: {e}"))
    }
}

fn user_command(entry: &UserCommand, tx: &mpsc::Sender<Action>) -> Command {
    let id = entry.id.clone().unwrap_or_default();
    let title = entry.title.clone().unwrap_or_default();
    let message = entry
        .message
        .clone()
        .unwrap_or_else(|| format!("Ran {title}"));

    let mut command = Command::new(id, title, dispatch(tx, Action::ShowMessage(message)));
    command.description = entry.description.clone();
    command.category = entry.category.clone();
    command.shortcut = entry.shortcut.clone();
    command
}

/// Built-in commands followed by the user's `[[commands]]`, in file order.
pub fn build(config: &AppConfig, tx: &mpsc::Sender<Action>) -> Registry {
    let mut commands: Vec<Command> = builtin_commands()
        .into_iter()
        .map(|def| {
            let mut command = Command::new(def.id, def.title, dispatch(tx, def.action))
                .description(def.description);
            command.category = def.category.map(str::to_string);
            command.shortcut = def.shortcut.map(str::to_string);
            command
        })
        .collect();

    for entry in &config.commands {
        let command = user_command(entry, tx);
        if !command.is_valid() {
            tracing::warn!(?entry, "config command is missing an id or title");
        }
        commands.push(command);
    }

    tracing::debug!(commands = commands.len(), "registry built");
    Registry::new(commands)
}
