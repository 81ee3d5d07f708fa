use std::sync::{Arc, Mutex};

use palette_core::config::Config;
use palette_core::dispatch::Executed;
use palette_core::model::CommandCategory;
use palette_core::runtime::{demo_action_registry, demo_query_registry, RegistryNavigator};
use palette_core::selector::SearchMode;
use palette_core::session::{PaletteSession, SessionPorts};
use palette_core::store::MemoryStore;

fn session() -> PaletteSession {
    let actions = Arc::new(demo_action_registry());
    let ports = SessionPorts {
        actions: actions.clone(),
        queries: Arc::new(demo_query_registry()),
        navigator: Arc::new(RegistryNavigator { actions }),
        store: Arc::new(MemoryStore::new()),
    };
    PaletteSession::new(&Config::default(), ports, None)
}

#[test]
fn empty_input_resolves_to_the_featured_set() {
    let session = session();
    let resolution = session.resolve();

    assert!(resolution.matches.is_none());
    assert!(!resolution.commands.is_empty());
    assert!(resolution.commands.iter().all(|command| matches!(
        command.category,
        Some(CommandCategory::Quick)
            | Some(CommandCategory::Provider)
            | Some(CommandCategory::Agent)
    )));
}

#[test]
fn free_text_query_returns_aligned_matches() {
    let mut session = session();
    session.set_input("new tab");

    let resolution = session.resolve();
    let matches = resolution.matches.expect("query should produce matches");
    assert_eq!(matches.len(), resolution.commands.len());
    assert_eq!(resolution.commands[0].title, "New Tab");
}

#[test]
fn full_keyword_with_empty_query_shows_the_whole_catalog() {
    let mut session = session();
    session.set_input("t>");

    let resolution = session.resolve();
    assert!(resolution.matches.is_none());
    let titles: Vec<&str> = resolution.commands.iter().map(|c| c.title.as_str()).collect();
    assert!(titles.contains(&"Rust Documentation"));
    assert!(titles.contains(&"New Tab"));
}

#[test]
fn keyword_query_searches_the_swapped_in_commands() {
    let mut session = session();
    session.set_input("t>rust");

    let resolution = session.resolve();
    assert!(resolution.matches.is_some());
    assert_eq!(resolution.commands[0].title, "Rust Documentation");
}

#[test]
fn view_command_enters_a_mode_and_clears_the_input() {
    let mut session = session();
    session.set_input("search tabs");

    let results = session.results();
    let search_tabs = results
        .iter()
        .find(|command| command.title == "Search Tabs")
        .cloned()
        .expect("Search Tabs should be searchable");

    let outcome = session.execute(&search_tabs).unwrap();
    assert_eq!(outcome, Executed::View);
    assert_eq!(session.mode(), Some(SearchMode::Tabs));
    assert_eq!(session.input(), "");

    // With no query the mode shows its browse list.
    let resolution = session.resolve();
    assert_eq!(resolution.commands.len(), 2);
    assert_eq!(resolution.commands[0].title, "Rust Documentation");
}

#[test]
fn entering_a_mode_resets_the_selection() {
    let mut session = session();
    session.set_input("search tabs");
    session.move_selection_down();
    let search_tabs = session
        .results()
        .iter()
        .find(|command| command.title == "Search Tabs")
        .cloned()
        .unwrap();

    session.execute(&search_tabs).unwrap();
    assert_eq!(session.mode(), Some(SearchMode::Tabs));

    // The browse list opens with a fresh selection, not the cursor left
    // over from the previous query.
    let count = session.results().len();
    assert_eq!(count, 2);
    assert_eq!(session.selected_index(count), Some(0));
}

#[test]
fn typing_free_text_leaves_the_mode() {
    let mut session = session();
    session.set_input("search tabs");
    let search_tabs = session
        .results()
        .iter()
        .find(|command| command.title == "Search Tabs")
        .cloned()
        .unwrap();
    session.execute(&search_tabs).unwrap();
    assert_eq!(session.mode(), Some(SearchMode::Tabs));

    session.set_input("weather");
    assert_eq!(session.mode(), None);
}

#[test]
fn executing_a_selected_action_notifies_the_listener() {
    let mut session = session();
    let log: Arc<Mutex<Vec<(String, Executed)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    session.on_executed(Box::new(move |command, outcome| {
        sink.lock().unwrap().push((command.title.clone(), outcome));
    }));

    session.set_input("t>rust");
    let outcome = session.execute_selected().unwrap();
    assert_eq!(outcome, Some(Executed::Action));

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].0, "Rust Documentation");
    assert_eq!(log[0].1, Executed::Action);
}

#[test]
fn selection_wraps_backwards_from_the_top() {
    let mut session = session();
    session.set_input("new");
    let count = session.results().len();
    assert!(count >= 2);

    assert_eq!(session.selected_index(count), Some(0));
    session.move_selection_up();
    assert_eq!(session.selected_index(count), Some(count - 1));
    session.move_selection_down();
    assert_eq!(session.selected_index(count), Some(0));
}

#[test]
fn changing_the_input_resets_the_selection() {
    let mut session = session();
    session.set_input("new");
    session.move_selection_down();
    assert_eq!(session.selected_index(5), Some(1));

    session.set_input("new t");
    assert_eq!(session.selected_index(5), Some(0));
}

#[test]
fn executing_with_no_results_is_a_clean_no_op() {
    let mut session = session();
    session.set_input("zzzzqqqqxxxx");
    assert!(session.results().is_empty());
    assert_eq!(session.execute_selected().unwrap(), None);
}

#[test]
fn usage_recording_reorders_later_resolutions() {
    let mut session = session();
    session.set_input("new window");
    let command = session.results()[0].clone();
    assert_eq!(command.title, "New Window");
    session.execute(&command).unwrap();

    session.set_input("t>");
    let resolution = session.resolve();
    assert_eq!(resolution.commands[0].title, "New Window");
}
