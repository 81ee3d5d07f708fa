use std::sync::Arc;

use serde_json::json;

use palette_core::catalog::Catalog;
use palette_core::input::parse;
use palette_core::model::{dedupe_by_title, Command, CommandCategory};
use palette_core::runtime::demo_query_registry;
use palette_core::selector::SearchMode;
use palette_core::store::{KeyValueStore, MemoryStore, AGENTS_KEY};
use palette_core::transport::QueryRegistry;

fn catalog() -> (Catalog, QueryRegistry) {
    let store = Arc::new(MemoryStore::new());
    (Catalog::new(store, 5000, 4, None), demo_query_registry())
}

#[test]
fn dedupe_keeps_the_first_occurrence() {
    let commands = vec![
        Command::new("New Tab").subtitle("first"),
        Command::new("Close Tab"),
        Command::new("New Tab").subtitle("second"),
    ];
    let deduped = dedupe_by_title(commands);
    assert_eq!(deduped.len(), 2);
    assert_eq!(deduped[0].subtitle.as_deref(), Some("first"));
}

#[test]
fn plain_input_lists_static_commands() {
    let (catalog, port) = catalog();
    let commands = catalog.all_commands(&parse(""), &port);
    let titles: Vec<&str> = commands.iter().map(|c| c.title.as_str()).collect();

    assert!(titles.contains(&"New Tab"));
    assert!(titles.contains(&"Search Tabs"));
    assert!(titles.contains(&"Search Bookmarks"));
    assert!(titles.contains(&"ChatGPT"));
    // Quick actions come before everything else.
    assert_eq!(titles[0], "New Tab");
}

#[test]
fn exact_tab_keyword_swaps_static_commands_for_open_tabs() {
    let (catalog, port) = catalog();
    let commands = catalog.all_commands(&parse("t>"), &port);
    let titles: Vec<&str> = commands.iter().map(|c| c.title.as_str()).collect();

    assert!(titles.contains(&"Rust Documentation"));
    assert!(!titles.contains(&"Search Tabs"));
    // Other keyworded producers are suppressed while a prefix is active.
    assert!(!titles.contains(&"Search Bookmarks"));
}

#[test]
fn typing_an_unknown_keyword_suppresses_keyworded_producers() {
    let (catalog, port) = catalog();
    let commands = catalog.all_commands(&parse("ta>"), &port);
    let titles: Vec<&str> = commands.iter().map(|c| c.title.as_str()).collect();

    assert!(!titles.contains(&"Search Tabs"));
    assert!(!titles.contains(&"Rust Documentation"));
    // Non-keyworded producers stay.
    assert!(titles.contains(&"New Tab"));
    assert!(titles.contains(&"ChatGPT"));
}

#[test]
fn featured_set_is_quick_providers_and_agents_only() {
    let (catalog, port) = catalog();
    let featured = catalog.featured(&parse(""), &port);

    assert!(!featured.is_empty());
    assert!(featured.iter().all(|command| matches!(
        command.category,
        Some(CommandCategory::Quick)
            | Some(CommandCategory::Provider)
            | Some(CommandCategory::Agent)
    )));

    let titles: Vec<&str> = featured.iter().map(|c| c.title.as_str()).collect();
    assert!(titles.contains(&"New Tab"));
    assert!(titles.contains(&"Claude"));
    assert!(!titles.contains(&"Close Tab"));
}

#[test]
fn featured_lists_each_agent_once() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            AGENTS_KEY,
            json!([
                { "id": "a1", "name": "Summarize", "goal": "Summarize the page", "isPinned": true },
                { "id": "a2", "name": "Translate", "goal": "Translate the page" },
            ]),
        )
        .unwrap();
    let catalog = Catalog::new(store, 5000, 4, None);
    let port = demo_query_registry();

    let featured = catalog.featured(&parse(""), &port);
    let summarize = featured.iter().filter(|c| c.title == "Summarize").count();
    let translate = featured.iter().filter(|c| c.title == "Translate").count();
    assert_eq!(summarize, 1);
    assert_eq!(translate, 1);
}

#[test]
fn mode_commands_return_the_backing_adapter_list() {
    let (catalog, port) = catalog();

    let tabs = catalog.mode_commands(SearchMode::Tabs, &port);
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs[0].title, "Rust Documentation");

    let history = catalog.mode_commands(SearchMode::History, &port);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].title, "Weather");
}

#[test]
fn bookmark_keyword_lists_bookmarks_newest_first() {
    let (catalog, port) = catalog();
    let commands = catalog.all_commands(&parse("b>"), &port);
    let titles: Vec<&str> = commands
        .iter()
        .filter(|c| c.title.contains('>'))
        .map(|c| c.title.as_str())
        .collect();

    assert_eq!(titles, vec!["Issue Tracker > Work", "Wiki > Work"]);
}
