use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::contract::{
    command_ids, query_ids, BookmarkNode, ExtensionInfo, HistoryEntry, StoredAgent, TabInfo,
};
use crate::model::{nice_url, Command, CommandAction, CommandCategory};
use crate::ports::QueryPort;
use crate::store::{KeyValueStore, AGENTS_KEY};

pub const DEFAULT_HISTORY_MAX_RESULTS: u32 = 5000;

/// Lazily fetched, session-cached command source. The first `get` issues
/// exactly one query; concurrent or re-entrant calls while the fetch is
/// outstanding see an empty list. A failed fetch caches empty and is not
/// retried.
pub struct LazySource {
    query_id: &'static str,
    payload: Option<Value>,
    decode: fn(Value) -> Vec<Command>,
    cached: Mutex<Option<Vec<Command>>>,
    fetching: AtomicBool,
}

impl LazySource {
    fn new(
        query_id: &'static str,
        payload: Option<Value>,
        decode: fn(Value) -> Vec<Command>,
    ) -> Self {
        Self {
            query_id,
            payload,
            decode,
            cached: Mutex::new(None),
            fetching: AtomicBool::new(false),
        }
    }

    pub fn get(&self, port: &dyn QueryPort) -> Vec<Command> {
        {
            let cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(commands) = cached.as_ref() {
                return commands.clone();
            }
        }

        if self.fetching.swap(true, Ordering::SeqCst) {
            return Vec::new();
        }

        let commands = match port.run_query(crate::contract::QueryRequest {
            id: self.query_id.to_string(),
            payload: self.payload.clone(),
        }) {
            Ok(result) => (self.decode)(result),
            Err(error) => {
                crate::logging::warn(&format!("query {} failed: {error}", self.query_id));
                Vec::new()
            }
        };

        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        *cached = Some(commands.clone());
        commands
    }
}

/// All dynamic browser-state sources for one palette session.
pub struct SourceAdapters {
    pub tabs: LazySource,
    pub audible_tabs: LazySource,
    pub bookmarks: LazySource,
    pub bookmark_folders: LazySource,
    pub history: LazySource,
    pub extensions: LazySource,
}

impl SourceAdapters {
    pub fn new(history_max_results: u32) -> Self {
        Self {
            tabs: LazySource::new(query_ids::TABS_ALL, None, decode_tabs),
            audible_tabs: LazySource::new(query_ids::TABS_AUDIBLE, None, decode_tabs),
            bookmarks: LazySource::new(query_ids::BOOKMARKS_TREE, None, decode_bookmarks),
            bookmark_folders: LazySource::new(
                query_ids::BOOKMARKS_TREE,
                None,
                decode_bookmark_folders,
            ),
            history: LazySource::new(
                query_ids::HISTORY_RECENT,
                Some(json!({ "maxResults": history_max_results })),
                decode_history,
            ),
            extensions: LazySource::new(query_ids::EXTENSIONS_ALL, None, decode_extensions),
        }
    }
}

// Entries that fail to decode are dropped one by one, never the whole
// list.
fn decode_each<T: serde::de::DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn decode_tabs(value: Value) -> Vec<Command> {
    decode_each::<TabInfo>(value)
        .into_iter()
        .map(|tab| {
            let url = tab.url.unwrap_or_default();
            let title = match tab.title {
                Some(title) if !title.is_empty() => title,
                _ => "Untitled".to_string(),
            };
            Command::new(&title)
                .subtitle(&nice_url(&url))
                .category(CommandCategory::Core)
                .action(CommandAction::with_payload(
                    command_ids::TABS_FOCUS,
                    json!({ "tabId": tab.id, "windowId": tab.window_id }),
                ))
        })
        .collect()
}

fn decode_bookmarks(value: Value) -> Vec<Command> {
    let roots = decode_each::<BookmarkNode>(value);
    let mut commands = Vec::new();
    flatten_bookmark_leaves(&roots, "", &mut commands);
    commands
}

fn flatten_bookmark_leaves(nodes: &[BookmarkNode], breadcrumb: &str, out: &mut Vec<Command>) {
    let mut ordered: Vec<&BookmarkNode> = nodes.iter().collect();
    ordered.sort_by_key(|node| std::cmp::Reverse(node.date_added.unwrap_or(0)));

    for node in ordered {
        let path = if breadcrumb.is_empty() {
            node.title.clone()
        } else {
            format!("{breadcrumb}/{}", node.title)
        };

        if let Some(children) = &node.children {
            flatten_bookmark_leaves(children, &path, out);
            continue;
        }

        let url = node.url.clone().unwrap_or_default();
        let mut command = Command::new(&format!("{} > {breadcrumb}", node.title))
            .url(&url)
            .category(CommandCategory::Navigation)
            .action(CommandAction::with_payload(
                command_ids::OPEN_URL,
                json!({ "url": url }),
            ));
        if let Some(date_added) = node.date_added {
            command = command.last_visit_time(date_added);
        }
        out.push(command);
    }
}

fn decode_bookmark_folders(value: Value) -> Vec<Command> {
    let roots = decode_each::<BookmarkNode>(value);
    let mut commands = Vec::new();
    flatten_bookmark_folders(&roots, "", &mut commands);
    commands
}

fn flatten_bookmark_folders(nodes: &[BookmarkNode], breadcrumb: &str, out: &mut Vec<Command>) {
    for node in nodes {
        let path = if breadcrumb.is_empty() {
            node.title.clone()
        } else {
            format!("{breadcrumb} / {}", node.title)
        };

        if node.url.is_none() && !path.is_empty() {
            let mut command = Command::new(&path)
                .subtitle("Save bookmark to this folder")
                .category(CommandCategory::Navigation)
                .action(CommandAction::with_payload(
                    command_ids::BOOKMARKS_SAVE_TO_FOLDER,
                    json!({ "parentId": node.id }),
                ));
            if let Some(date_added) = node.date_added {
                command = command.last_visit_time(date_added);
            }
            out.push(command);
        }

        if let Some(children) = &node.children {
            flatten_bookmark_folders(children, &path, out);
        }
    }
}

fn decode_history(value: Value) -> Vec<Command> {
    decode_each::<HistoryEntry>(value)
        .into_iter()
        .filter_map(|entry| {
            let url = entry.url.filter(|url| !url.is_empty())?;
            let title = match entry.title {
                Some(title) if !title.is_empty() => title,
                _ => "Untitled".to_string(),
            };
            let mut command = Command::new(&title)
                .url(&url)
                .category(CommandCategory::Navigation)
                .action(CommandAction::with_payload(
                    command_ids::OPEN_URL,
                    json!({ "url": url }),
                ));
            if let Some(last_visit_time) = entry.last_visit_time {
                command = command.last_visit_time(last_visit_time);
            }
            Some(command)
        })
        .collect()
}

fn decode_extensions(value: Value) -> Vec<Command> {
    decode_each::<ExtensionInfo>(value)
        .into_iter()
        .map(|extension| {
            let manage_url = format!("chrome://extensions/?id={}", extension.id);
            let subtitle = match extension.description {
                Some(description) if !description.is_empty() => description,
                _ => "Browser extension".to_string(),
            };
            let mut command = Command::new(&format!(
                "{} ({})",
                extension.name, extension.version
            ))
            .subtitle(&subtitle)
            .url(&manage_url)
            .category(CommandCategory::Navigation)
            .action(CommandAction::with_payload(
                command_ids::OPEN_URL,
                json!({ "url": manage_url }),
            ));
            if let Some(icon) = extension.icons.iter().max_by_key(|icon| icon.size) {
                command = command.icon(&icon.url);
            }
            command
        })
        .collect()
}

/// User-defined agents read from the key-value store, revalidated on
/// every store-change notification.
pub struct AgentSource {
    store: Arc<dyn KeyValueStore>,
    cached: Mutex<Option<Vec<StoredAgent>>>,
    dirty: Arc<AtomicBool>,
}

impl AgentSource {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let dirty = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&dirty);
        store.on_change(
            AGENTS_KEY,
            Arc::new(move |_key| {
                flag.store(true, Ordering::SeqCst);
            }),
        );
        Self {
            store,
            cached: Mutex::new(None),
            dirty,
        }
    }

    pub fn agents(&self) -> Vec<StoredAgent> {
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if cached.is_none() || self.dirty.swap(false, Ordering::SeqCst) {
            *cached = Some(self.load());
        }
        cached.clone().unwrap_or_default()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.agents().iter().map(agent_command).collect()
    }

    pub fn featured(&self, limit: usize) -> Vec<Command> {
        self.agents().iter().take(limit).map(agent_command).collect()
    }

    fn load(&self) -> Vec<StoredAgent> {
        let value = match self.store.get(AGENTS_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return Vec::new(),
            Err(error) => {
                crate::logging::warn(&format!("agents read failed: {error}"));
                return Vec::new();
            }
        };

        // Corrupt entries are filtered, never surfaced.
        let mut agents = decode_each::<StoredAgent>(value);
        agents.retain(|agent| {
            !agent.id.is_empty() && !agent.name.is_empty() && !agent.goal.is_empty()
        });
        agents.sort_by(|a, b| {
            b.is_pinned.cmp(&a.is_pinned).then_with(|| {
                let a_time = a.last_used.or(a.updated_at).unwrap_or(0);
                let b_time = b.last_used.or(b.updated_at).unwrap_or(0);
                b_time.cmp(&a_time)
            })
        });
        agents
    }
}

fn agent_command(agent: &StoredAgent) -> Command {
    let subtitle = agent
        .description
        .clone()
        .filter(|description| !description.is_empty())
        .unwrap_or_else(|| agent.goal.clone());
    let captured = agent.clone();
    Command::new(&agent.name)
        .subtitle(&subtitle)
        .keyword("agent")
        .category(CommandCategory::Agent)
        .action(CommandAction::deferred(
            command_ids::AGENTS_EXECUTE,
            Arc::new(move |query| {
                json!({
                    "agent": {
                        "id": captured.id,
                        "name": captured.name,
                        "goal": captured.goal,
                        "steps": captured.steps,
                    },
                    "query": query.trim(),
                })
            }),
        ))
}
