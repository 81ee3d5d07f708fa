use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::contract::ScreenBounds;
use crate::dispatch::{self, DispatchContext, ExecuteError, Executed};
use crate::input::{parse, InputState};
use crate::model::Command;
use crate::ports::{ActionPort, NavigatorPort, QueryPort};
use crate::search::{search, RankedMatch};
use crate::selector::{ResultWindow, SearchMode, SelectionCursor};
use crate::store::KeyValueStore;
use crate::usage::UsageRanker;

pub struct SessionPorts {
    pub actions: Arc<dyn ActionPort>,
    pub queries: Arc<dyn QueryPort>,
    pub navigator: Arc<dyn NavigatorPort>,
    pub store: Arc<dyn KeyValueStore>,
}

/// The resolved result list plus, for free-text queries, the ranked
/// matches aligned with `commands` for highlighting.
pub struct Resolution {
    pub commands: Vec<Command>,
    pub matches: Option<Vec<RankedMatch>>,
}

pub type ExecutedListener = Box<dyn FnMut(&Command, Executed) + Send>;

/// One palette opening: owns the input text, search mode, result window,
/// selection cursor and the catalog with its session-cached adapters.
pub struct PaletteSession {
    catalog: Catalog,
    usage: UsageRanker,
    actions: Arc<dyn ActionPort>,
    queries: Arc<dyn QueryPort>,
    navigator: Arc<dyn NavigatorPort>,
    input: String,
    mode: Option<SearchMode>,
    window: ResultWindow,
    cursor: SelectionCursor,
    executed_listener: Option<ExecutedListener>,
}

impl PaletteSession {
    pub fn new(config: &Config, ports: SessionPorts, screen_bounds: Option<ScreenBounds>) -> Self {
        let catalog = Catalog::new(
            Arc::clone(&ports.store),
            config.history_max_results,
            config.featured_agent_limit,
            screen_bounds,
        );
        let usage = UsageRanker::new(Arc::clone(&ports.store));
        Self {
            catalog,
            usage,
            actions: ports.actions,
            queries: ports.queries,
            navigator: ports.navigator,
            input: String::new(),
            mode: None,
            window: ResultWindow::new(config.result_window_base),
            cursor: SelectionCursor::default(),
            executed_listener: None,
        }
    }

    pub fn on_executed(&mut self, listener: ExecutedListener) {
        self.executed_listener = Some(listener);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mode(&self) -> Option<SearchMode> {
        self.mode
    }

    /// Replaces the input text. Resets the result window and the
    /// selection cursor; typing free text while a mode is active leaves
    /// the mode.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.window.reset();
        self.cursor.reset();
        if self.mode.is_some() && parse(&self.input).has_query() {
            self.mode = None;
        }
    }

    /// Doubles the result window (infinite-scroll growth).
    pub fn request_more(&mut self) {
        self.window.grow();
    }

    pub fn move_selection_up(&mut self) {
        self.cursor.move_up();
    }

    pub fn move_selection_down(&mut self) {
        self.cursor.move_down();
    }

    pub fn selected_index(&self, result_count: usize) -> Option<usize> {
        self.cursor.index(result_count)
    }

    pub fn results(&self) -> Vec<Command> {
        self.resolve().commands
    }

    /// Result selection, in strict priority order: full keyword with an
    /// empty trailing query shows the whole catalog; an active mode with
    /// no query shows that mode's browse list; a non-empty query runs
    /// the search engine; otherwise the featured set.
    pub fn resolve(&self) -> Resolution {
        let input = parse(&self.input);

        if input.is_command && !input.has_query() {
            return Resolution {
                commands: self.ranked_catalog(&input),
                matches: None,
            };
        }

        if let Some(mode) = self.mode {
            if !input.has_query() {
                return Resolution {
                    commands: self.catalog.mode_commands(mode, self.queries.as_ref()),
                    matches: None,
                };
            }
        }

        if input.has_query() {
            let corpus = self.ranked_catalog(&input);
            let matches = search(input.free_text(), &corpus, self.window.limit());
            let commands = matches
                .iter()
                .map(|ranked| corpus[ranked.index].clone())
                .collect();
            return Resolution {
                commands,
                matches: Some(matches),
            };
        }

        Resolution {
            commands: self.catalog.featured(&input, self.queries.as_ref()),
            matches: None,
        }
    }

    pub fn execute_selected(&mut self) -> Result<Option<Executed>, ExecuteError> {
        let results = self.results();
        let Some(index) = self.cursor.index(results.len()) else {
            return Ok(None);
        };
        let command = results[index].clone();
        self.execute(&command).map(Some)
    }

    pub fn execute(&mut self, command: &Command) -> Result<Executed, ExecuteError> {
        let query = parse(&self.input).free_text().to_string();
        let input_before = self.input.clone();
        let outcome = dispatch::execute(
            command,
            DispatchContext {
                query,
                input: &mut self.input,
                mode: &mut self.mode,
                usage: &self.usage,
                actions: self.actions.as_ref(),
                navigator: self.navigator.as_ref(),
            },
        )?;
        // Entering a mode clears the input; any input change resets the
        // window and the selection, same as typing.
        if self.input != input_before {
            self.window.reset();
            self.cursor.reset();
        }
        if let Some(listener) = self.executed_listener.as_mut() {
            listener(command, outcome);
        }
        Ok(outcome)
    }

    fn ranked_catalog(&self, input: &InputState) -> Vec<Command> {
        let mut commands = self.catalog.searchable(input, self.queries.as_ref());
        self.usage.sort_by_usage(&mut commands);
        commands
    }
}
