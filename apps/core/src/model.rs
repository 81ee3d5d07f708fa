use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::selector::SearchMode;

/// Command categories used for featured filtering and display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandCategory {
    Quick,
    Core,
    Navigation,
    Provider,
    Agent,
}

/// Effects a command may apply to the palette view itself, without any
/// round-trip to the host browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    EnterMode(SearchMode),
    ClearUsageHistory,
}

pub type DeferredPayload = Arc<dyn Fn(&str) -> Value + Send + Sync>;

/// Action payload, resolved at dispatch time. The deferred form receives
/// the free-text query current at the moment of execution.
#[derive(Clone)]
pub enum Payload {
    None,
    Static(Value),
    Deferred(DeferredPayload),
}

impl Payload {
    pub fn resolve(&self, query: &str) -> Option<Value> {
        match self {
            Self::None => None,
            Self::Static(value) => Some(value.clone()),
            Self::Deferred(build) => Some(build(query)),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Static(value) => write!(f, "Static({value})"),
            Self::Deferred(_) => write!(f, "Deferred(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandAction {
    pub id: String,
    pub payload: Payload,
}

impl CommandAction {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            payload: Payload::None,
        }
    }

    pub fn with_payload(id: &str, payload: Value) -> Self {
        Self {
            id: id.to_string(),
            payload: Payload::Static(payload),
        }
    }

    pub fn deferred(id: &str, build: DeferredPayload) -> Self {
        Self {
            id: id.to_string(),
            payload: Payload::Deferred(build),
        }
    }
}

/// Exactly one execution path per command. `None` falls back to the
/// command's `url` when present, otherwise the command is a no-op.
#[derive(Debug, Clone)]
pub enum Invocation {
    Action(CommandAction),
    View(ViewCommand),
    None,
}

#[derive(Debug, Clone)]
pub struct Command {
    pub title: String,
    pub subtitle: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub shortcut: Option<String>,
    pub keyword: Option<String>,
    pub category: Option<CommandCategory>,
    pub last_visit_time: Option<i64>,
    pub invocation: Invocation,
}

impl Command {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: None,
            url: None,
            icon: None,
            shortcut: None,
            keyword: None,
            category: None,
            last_visit_time: None,
            invocation: Invocation::None,
        }
    }

    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn shortcut(mut self, shortcut: &str) -> Self {
        self.shortcut = Some(shortcut.to_string());
        self
    }

    pub fn keyword(mut self, keyword: &str) -> Self {
        self.keyword = Some(keyword.to_string());
        self
    }

    pub fn category(mut self, category: CommandCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn last_visit_time(mut self, epoch_ms: i64) -> Self {
        self.last_visit_time = Some(epoch_ms);
        self
    }

    pub fn action(mut self, action: CommandAction) -> Self {
        self.invocation = Invocation::Action(action);
        self
    }

    pub fn view(mut self, view: ViewCommand) -> Self {
        self.invocation = Invocation::View(view);
        self
    }

    /// True when executing this command stays entirely inside the view.
    pub fn is_view_command(&self) -> bool {
        matches!(self.invocation, Invocation::View(_))
    }
}

/// Removes duplicate titles, keeping the first occurrence and preserving
/// the order of everything else.
pub fn dedupe_by_title(commands: Vec<Command>) -> Vec<Command> {
    let mut seen: HashSet<String> = HashSet::with_capacity(commands.len());
    commands
        .into_iter()
        .filter(|command| seen.insert(command.title.clone()))
        .collect()
}

/// Shortens a URL for subtitle display: scheme, `www.` and a trailing
/// slash are dropped.
pub fn nice_url(url: &str) -> String {
    let trimmed = url
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let trimmed = trimmed.strip_prefix("www.").unwrap_or(trimmed);
    trimmed.trim_end_matches('/').to_string()
}
