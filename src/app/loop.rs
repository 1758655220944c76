use crate::app::{
    action::Action, config, effect::Effect, input::map_event_to_action, reducer, registry,
    state::AppState, state::StatusMessage, ui,
};

use anyhow::Result;
use crossterm::event::{self, Event};
use notify::{RecursiveMode, Watcher};
use ratatui::{backend::Backend, Terminal};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);
const CONFIG_DEBOUNCE: Duration = Duration::from_millis(500);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState,
    config_path: Option<PathBuf>,
) -> Result<AppState> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, event_rx, config_path).await
}

/// Drives the app until it quits and hands back the final state.
pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
    config_path: Option<PathBuf>,
) -> Result<AppState> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    let initial = registry::build(&app_state.config, &action_tx);
    app_state.install_registry(initial);

    // Config Watcher
    let _watcher = match &config_path {
        Some(path) => watch_config(path, action_tx.clone())?,
        None => None,
    };

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &app_state);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = match res {
                    Ok(e) => e,
                    Err(e) => {
                        app_state.palette.teardown(&mut app_state.listeners);
                        return Err(e.into());
                    }
                };
                map_event_to_action(event, &app_state, terminal.size()?)
            },

            // Palette invocations and timers
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            let effect = reducer::update(&mut app_state, action);

            if app_state.should_quit {
                break;
            }

            if let Some(effect) = effect {
                handle_effect(effect, &mut app_state, &action_tx, config_path.as_deref());
            }
        }
    }

    app_state.palette.teardown(&mut app_state.listeners);
    Ok(app_state)
}

pub(crate) fn handle_effect(
    effect: Effect,
    app_state: &mut AppState,
    tx: &mpsc::Sender<Action>,
    config_path: Option<&Path>,
) {
    match effect {
        Effect::ScheduleFocus(delay) => {
            let tx = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                // The palette may be gone by now; the reducer ignores a late focus.
                let _ = tx.send(Action::FocusPaletteQuery).await;
            });
        }
        Effect::ReloadConfig => {
            let Some(path) = config_path else {
                return;
            };
            match config::load_from(path) {
                Ok(new_config) => {
                    app_state.apply_config(new_config);
                    tracing::info!(path = %path.display(), "config reloaded");
                    app_state.status = Some(StatusMessage::info("Config reloaded"));
                    let rebuilt = registry::build(&app_state.config, tx);
                    app_state.install_registry(rebuilt);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "keeping previous config");
                    app_state.status = Some(StatusMessage::error(err.to_string()));
                }
            }
        }
    }
}

/// Watches the directory holding `path` and posts a debounced
/// `ConfigChanged` whenever the file itself is touched.
fn watch_config(
    path: &Path,
    action_tx: mpsc::Sender<Action>,
) -> Result<Option<notify::RecommendedWatcher>> {
    let Some(dir) = path.parent().filter(|d| d.exists()) else {
        return Ok(None);
    };

    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let target = path.to_path_buf();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            if event.paths.iter().any(|p| p == &target) {
                let _ = notify_tx.try_send(());
            }
        }
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;

    tokio::spawn(async move {
        let mut pending = false;

        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(CONFIG_DEBOUNCE) => {
                        let _ = action_tx.send(Action::ConfigChanged).await;
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    Ok(Some(watcher))
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
