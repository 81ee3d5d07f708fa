use std::sync::Arc;

use serde_json::json;

use crate::contract::{command_ids, ScreenBounds};
use crate::model::{Command, CommandAction, CommandCategory, ViewCommand};
use crate::selector::SearchMode;

pub const TAB_KEYWORD: &str = "t";
pub const BOOKMARK_KEYWORD: &str = "b";
pub const HISTORY_KEYWORD: &str = "h";
pub const EXTENSIONS_KEYWORD: &str = "e";
pub const BOOKMARK_THIS_KEYWORD: &str = "bt";

/// Quick actions pinned into the featured set.
pub fn quick_commands() -> Vec<Command> {
    vec![
        Command::new("New Tab")
            .subtitle("Open a new tab")
            .shortcut("Ctrl+T")
            .category(CommandCategory::Quick)
            .action(CommandAction::new(command_ids::TABS_NEW)),
        Command::new("New Window")
            .subtitle("Open a new browser window")
            .shortcut("Ctrl+N")
            .category(CommandCategory::Quick)
            .action(CommandAction::new(command_ids::WINDOWS_NEW)),
        Command::new("New Incognito Window")
            .subtitle("Browse without saving history")
            .shortcut("Ctrl+Shift+N")
            .category(CommandCategory::Quick)
            .action(CommandAction::new(command_ids::WINDOWS_NEW_INCOGNITO)),
    ]
}

pub fn static_tab_commands() -> Vec<Command> {
    vec![
        Command::new("Search Tabs")
            .subtitle("Switch between open tabs")
            .keyword(TAB_KEYWORD)
            .category(CommandCategory::Core)
            .view(ViewCommand::EnterMode(SearchMode::Tabs)),
        Command::new("Close Tab")
            .subtitle("Close the current tab")
            .category(CommandCategory::Core)
            .action(CommandAction::new(command_ids::TABS_CLOSE_ACTIVE)),
        Command::new("Reopen Closed Tab")
            .subtitle("Restore the last closed tab")
            .category(CommandCategory::Core)
            .action(CommandAction::new(command_ids::SESSIONS_RESTORE_LAST)),
        Command::new("Duplicate Tab")
            .subtitle("Create a duplicate of the current tab")
            .category(CommandCategory::Core)
            .action(CommandAction::new(command_ids::TABS_DUPLICATE_ACTIVE)),
        Command::new("Pin/Unpin Tab")
            .subtitle("Toggle pinning for the current tab")
            .category(CommandCategory::Core)
            .action(CommandAction::new(command_ids::TABS_TOGGLE_PIN)),
        Command::new("Mute/Unmute Tab")
            .subtitle("Toggle audio for the current tab")
            .category(CommandCategory::Core)
            .action(CommandAction::new(command_ids::TABS_TOGGLE_MUTE)),
        Command::new("Reload Tab")
            .subtitle("Reload the current tab")
            .category(CommandCategory::Core)
            .action(CommandAction::new(command_ids::TABS_RELOAD_ACTIVE)),
    ]
}

/// Split-screen payloads capture the screen bounds the hosting surface
/// reported at session start; the coordinator validates their presence.
pub fn static_window_commands(bounds: Option<ScreenBounds>) -> Vec<Command> {
    let split = |id: &str, bounds: Option<ScreenBounds>| {
        CommandAction::deferred(
            id,
            Arc::new(move |_query| json!({ "bounds": bounds })),
        )
    };

    vec![
        Command::new("Toggle Fullscreen")
            .subtitle("Toggle fullscreen for the current window")
            .category(CommandCategory::Core)
            .action(CommandAction::new(command_ids::WINDOWS_TOGGLE_FULLSCREEN)),
        Command::new("Split Screen Vertically")
            .subtitle("Tile the current and previous window side by side")
            .category(CommandCategory::Core)
            .action(split(command_ids::WINDOWS_SPLIT_VERTICAL, bounds)),
        Command::new("Split Screen Horizontally")
            .subtitle("Tile the current and previous window stacked")
            .category(CommandCategory::Core)
            .action(split(command_ids::WINDOWS_SPLIT_HORIZONTAL, bounds)),
    ]
}

pub fn static_settings_commands() -> Vec<Command> {
    vec![
        Command::new("Provider Settings")
            .subtitle("Configure search and AI providers")
            .category(CommandCategory::Core)
            .url("chrome://settings/search"),
        Command::new("Clear Command History")
            .subtitle("Forget which commands were used recently")
            .category(CommandCategory::Core)
            .view(ViewCommand::ClearUsageHistory),
    ]
}

pub fn static_bookmark_commands() -> Vec<Command> {
    vec![Command::new("Search Bookmarks")
        .subtitle("Find and open bookmarks")
        .keyword(BOOKMARK_KEYWORD)
        .category(CommandCategory::Navigation)
        .view(ViewCommand::EnterMode(SearchMode::Bookmarks))]
}

pub fn static_history_commands() -> Vec<Command> {
    vec![Command::new("Search History")
        .subtitle("Browse recent browsing history")
        .keyword(HISTORY_KEYWORD)
        .category(CommandCategory::Navigation)
        .view(ViewCommand::EnterMode(SearchMode::History))]
}

pub fn static_extensions_commands() -> Vec<Command> {
    vec![Command::new("Search Extensions")
        .subtitle("Find and manage installed extensions")
        .keyword(EXTENSIONS_KEYWORD)
        .category(CommandCategory::Navigation)
        .view(ViewCommand::EnterMode(SearchMode::Extensions))]
}

pub fn static_bookmark_this_commands() -> Vec<Command> {
    vec![Command::new("Bookmark This Tab")
        .subtitle("Save the current tab (bt> picks a folder)")
        .keyword(BOOKMARK_THIS_KEYWORD)
        .category(CommandCategory::Navigation)
        .action(CommandAction::new(command_ids::BOOKMARKS_SAVE_TO_FOLDER))]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub keyword: &'static str,
    pub url_pattern: &'static str,
}

pub const PROVIDERS: &[ProviderDefinition] = &[
    ProviderDefinition {
        id: "chatgpt",
        name: "ChatGPT",
        description: "Open ChatGPT in a new tab",
        keyword: "llm",
        url_pattern: "https://chatgpt.com/?q=%s",
    },
    ProviderDefinition {
        id: "claude",
        name: "Claude",
        description: "Launch Claude and start chatting",
        keyword: "llm",
        url_pattern: "https://claude.ai/new",
    },
    ProviderDefinition {
        id: "google",
        name: "Google",
        description: "Search Google in a new tab",
        keyword: "search",
        url_pattern: "https://www.google.com/search?q=%s",
    },
    ProviderDefinition {
        id: "duckduckgo-ai",
        name: "DuckDuckGo AI",
        description: "Open DuckDuckGo AI chat",
        keyword: "llm",
        url_pattern: "https://duck.ai",
    },
    ProviderDefinition {
        id: "perplexity",
        name: "Perplexity",
        description: "Research with Perplexity AI",
        keyword: "llm",
        url_pattern: "https://www.perplexity.ai/search/?q=%s",
    },
    ProviderDefinition {
        id: "deepseek",
        name: "Deepseek",
        description: "Open Deepseek chat",
        keyword: "llm",
        url_pattern: "https://chat.deepseek.com/",
    },
    ProviderDefinition {
        id: "gemini",
        name: "Gemini",
        description: "Chat with Google Gemini",
        keyword: "llm",
        url_pattern: "https://gemini.google.com/app",
    },
];

const FEATURED_PROVIDER_IDS: &[&str] = &["chatgpt", "claude", "google"];

fn provider_command(provider: &ProviderDefinition) -> Command {
    let provider_id = provider.id.to_string();
    Command::new(provider.name)
        .subtitle(provider.description)
        .keyword(provider.keyword)
        .category(CommandCategory::Provider)
        .action(CommandAction::deferred(
            command_ids::PROVIDERS_EXECUTE,
            Arc::new(move |query| {
                json!({ "providerId": provider_id, "query": query.trim() })
            }),
        ))
}

pub fn featured_provider_commands() -> Vec<Command> {
    FEATURED_PROVIDER_IDS
        .iter()
        .filter_map(|id| PROVIDERS.iter().find(|provider| provider.id == *id))
        .map(provider_command)
        .collect()
}

/// Non-featured providers, searchable but not pinned.
pub fn provider_search_commands() -> Vec<Command> {
    PROVIDERS
        .iter()
        .filter(|provider| !FEATURED_PROVIDER_IDS.contains(&provider.id))
        .map(provider_command)
        .collect()
}
