use cmdpal::palette::{
    Command, CommandId, Direction, PaletteSession, Registry, Selection, Signal,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Fixture {
    registry: Registry,
    hits: [Arc<AtomicUsize>; 3],
}

fn counted(id: &str, title: &str, category: &str, hits: &Arc<AtomicUsize>) -> Command {
    let hits = hits.clone();
    Command::new(id, title, move || {
        hits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
    .category(category)
}

fn fixture() -> Fixture {
    let hits = [
        Arc::new(AtomicUsize::new(0)),
        Arc::new(AtomicUsize::new(0)),
        Arc::new(AtomicUsize::new(0)),
    ];
    let registry = Registry::new(vec![
        counted("a", "Go Home", "Nav", &hits[0]),
        counted("b", "Open Settings", "Nav", &hits[1]),
        counted("c", "New Ticket", "Actions", &hits[2]),
    ]);
    Fixture { registry, hits }
}

fn ids(session: &PaletteSession) -> Vec<String> {
    session
        .visible()
        .map(|v| v.command.id.as_str().to_string())
        .collect()
}

#[test]
fn empty_query_lists_everything_grouped_with_first_active() {
    let f = fixture();
    let session = PaletteSession::open(f.registry.clone());

    assert_eq!(session.matches().len(), 3);
    assert_eq!(session.selected(), Some(0));

    let groups = session.groups();
    let names: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Nav", "Actions"]);
    assert_eq!(groups["Nav"], vec![0, 1]);
    assert_eq!(groups["Actions"], vec![2]);
}

#[test]
fn narrowing_query_resets_selection_and_commit_runs_once() {
    let f = fixture();
    let mut session = PaletteSession::open(f.registry.clone());
    session.move_selection(Direction::Down);
    session.move_selection(Direction::Down);

    session.set_query("set");
    assert_eq!(ids(&session), vec!["b"]);
    assert_eq!(session.selected(), Some(0));

    let signal = session.commit();
    assert!(signal.is_close());
    assert_eq!(f.hits[1].load(Ordering::SeqCst), 1);
    assert_eq!(f.hits[0].load(Ordering::SeqCst), 0);
    assert_eq!(f.hits[2].load(Ordering::SeqCst), 0);

    // A closed session ignores further commits.
    assert!(matches!(session.commit(), Signal::Stay));
    assert_eq!(f.hits[1].load(Ordering::SeqCst), 1);
}

#[test]
fn query_without_matches_is_empty_and_commit_is_a_no_op() {
    let f = fixture();
    let mut session = PaletteSession::open(f.registry.clone());
    session.set_query("zzz");

    assert!(session.matches().is_empty());
    assert_eq!(session.selection(), Selection::Empty);
    assert!(matches!(session.commit(), Signal::Stay));
    assert!(f.hits.iter().all(|h| h.load(Ordering::SeqCst) == 0));
}

#[test]
fn move_down_at_the_end_stays_put() {
    let f = fixture();
    let mut session = PaletteSession::open(f.registry.clone());
    session.move_selection(Direction::Down);
    session.move_selection(Direction::Down);
    assert_eq!(session.selected(), Some(2));

    session.move_selection(Direction::Down);
    assert_eq!(session.selected(), Some(2));
}

#[test]
fn move_up_at_the_start_stays_put() {
    let f = fixture();
    let mut session = PaletteSession::open(f.registry.clone());
    session.move_selection(Direction::Up);
    assert_eq!(session.selected(), Some(0));
}

#[test]
fn empty_registry_opens_empty_and_ignores_movement() {
    let mut session = PaletteSession::open(Registry::default());
    assert_eq!(session.selection(), Selection::Empty);

    session.move_selection(Direction::Up);
    session.move_selection(Direction::Down);
    assert_eq!(session.selection(), Selection::Empty);
    assert!(matches!(session.commit(), Signal::Stay));
}

#[test]
fn matching_is_case_insensitive_across_title_description_and_category() {
    let registry = Registry::new(vec![
        Command::new("a", "Go Home", || Ok(())).description("Overview DASHBOARD"),
        Command::new("b", "Open Settings", || Ok(())).category("Prefs"),
        Command::new("c", "New Ticket", || Ok(())),
    ]);
    let mut session = PaletteSession::open(registry);

    session.set_query("dashboard");
    assert_eq!(ids(&session), vec!["a"]);

    session.set_query("PREFS");
    assert_eq!(ids(&session), vec!["b"]);
}

#[test]
fn matches_keep_registry_order() {
    let registry = Registry::new(vec![
        Command::new("x", "Zeta Report", || Ok(())),
        Command::new("y", "Alpha Report", || Ok(())),
        Command::new("z", "Report Builder", || Ok(())),
    ]);
    let mut session = PaletteSession::open(registry);
    session.set_query("report");
    assert_eq!(ids(&session), vec!["x", "y", "z"]);
}

#[test]
fn uncategorized_commands_fall_under_general() {
    let registry = Registry::new(vec![
        Command::new("a", "Toggle Theme", || Ok(())),
        Command::new("b", "Quit", || Ok(())).category("System"),
    ]);
    let session = PaletteSession::open(registry);
    let groups = session.groups();
    assert_eq!(groups["General"], vec![0]);
    assert_eq!(groups["System"], vec![1]);
}

#[test]
fn clicking_a_row_matches_keyboard_commit() {
    let f = fixture();
    let mut session = PaletteSession::open(f.registry.clone());

    let signal = session.commit_at(&CommandId::from("c"));
    assert!(signal.is_close());
    assert_eq!(f.hits[2].load(Ordering::SeqCst), 1);
}

#[test]
fn clicking_a_filtered_out_row_does_nothing() {
    let f = fixture();
    let mut session = PaletteSession::open(f.registry.clone());
    session.set_query("home");

    assert!(matches!(session.commit_at(&CommandId::from("c")), Signal::Stay));
    assert!(!session.is_closed());
    assert_eq!(f.hits[2].load(Ordering::SeqCst), 0);
}
