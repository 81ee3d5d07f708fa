use std::sync::Arc;

use crate::adapters::{AgentSource, SourceAdapters};
use crate::builtins::{
    self, BOOKMARK_KEYWORD, BOOKMARK_THIS_KEYWORD, EXTENSIONS_KEYWORD, HISTORY_KEYWORD,
    TAB_KEYWORD,
};
use crate::contract::ScreenBounds;
use crate::input::{match_keyword, InputState};
use crate::model::{dedupe_by_title, Command, CommandCategory};
use crate::ports::QueryPort;
use crate::selector::SearchMode;
use crate::store::KeyValueStore;

pub const DEFAULT_FEATURED_AGENT_LIMIT: usize = 4;

/// Assembles the unified command catalog from every producer, in one
/// explicit registration order. Dynamic producers swap between their
/// static entries, their full adapter list (exact keyword) and nothing
/// at all (keyword still being typed).
pub struct Catalog {
    adapters: SourceAdapters,
    agents: AgentSource,
    screen_bounds: Option<ScreenBounds>,
    featured_agent_limit: usize,
}

impl Catalog {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        history_max_results: u32,
        featured_agent_limit: usize,
        screen_bounds: Option<ScreenBounds>,
    ) -> Self {
        Self {
            adapters: SourceAdapters::new(history_max_results),
            agents: AgentSource::new(store),
            screen_bounds,
            featured_agent_limit,
        }
    }

    /// Every command, producer order preserved, duplicates included.
    pub fn all_commands(&self, input: &InputState, port: &dyn QueryPort) -> Vec<Command> {
        let mut commands = Vec::new();
        commands.extend(builtins::quick_commands());
        commands.extend(self.dynamic(TAB_KEYWORD, &self.adapters.tabs, builtins::static_tab_commands(), input, port));
        commands.extend(builtins::static_window_commands(self.screen_bounds));
        commands.extend(builtins::static_settings_commands());
        commands.extend(self.dynamic(
            BOOKMARK_KEYWORD,
            &self.adapters.bookmarks,
            builtins::static_bookmark_commands(),
            input,
            port,
        ));
        commands.extend(self.dynamic(
            HISTORY_KEYWORD,
            &self.adapters.history,
            builtins::static_history_commands(),
            input,
            port,
        ));
        commands.extend(self.dynamic(
            BOOKMARK_THIS_KEYWORD,
            &self.adapters.bookmark_folders,
            builtins::static_bookmark_this_commands(),
            input,
            port,
        ));
        commands.extend(self.dynamic(
            EXTENSIONS_KEYWORD,
            &self.adapters.extensions,
            builtins::static_extensions_commands(),
            input,
            port,
        ));
        commands.extend(builtins::featured_provider_commands());
        commands.extend(self.agents.featured(self.featured_agent_limit));
        commands.extend(builtins::provider_search_commands());
        commands.extend(self.agents.commands());
        commands
    }

    /// Search corpus: first occurrence of each title wins.
    pub fn searchable(&self, input: &InputState, port: &dyn QueryPort) -> Vec<Command> {
        dedupe_by_title(self.all_commands(input, port))
    }

    /// Default set shown with no query and no mode active. Deduped:
    /// featured agents would otherwise show up a second time from the
    /// full agent producer.
    pub fn featured(&self, input: &InputState, port: &dyn QueryPort) -> Vec<Command> {
        let featured = self
            .all_commands(input, port)
            .into_iter()
            .filter(|command| {
                matches!(
                    command.category,
                    Some(CommandCategory::Quick)
                        | Some(CommandCategory::Provider)
                        | Some(CommandCategory::Agent)
                )
            })
            .collect();
        dedupe_by_title(featured)
    }

    /// The browse list backing an active search mode.
    pub fn mode_commands(&self, mode: SearchMode, port: &dyn QueryPort) -> Vec<Command> {
        match mode {
            SearchMode::Tabs => self.adapters.tabs.get(port),
            SearchMode::Bookmarks => self.adapters.bookmarks.get(port),
            SearchMode::History => self.adapters.history.get(port),
            SearchMode::Extensions => self.adapters.extensions.get(port),
        }
    }

    fn dynamic(
        &self,
        keyword: &str,
        source: &crate::adapters::LazySource,
        static_commands: Vec<Command>,
        input: &InputState,
        port: &dyn QueryPort,
    ) -> Vec<Command> {
        let matched = match_keyword(keyword, input);
        if matched.is_match {
            source.get(port)
        } else if matched.is_typing {
            Vec::new()
        } else {
            static_commands
        }
    }
}
