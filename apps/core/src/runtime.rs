use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;

use crate::config::{self, ConfigError};
use crate::contract::{command_ids, query_ids, ActionRequest};
use crate::dispatch::ExecuteError;
use crate::ports::{ActionPort, NavigatorPort, PortError};
use crate::session::{PaletteSession, SessionPorts};
use crate::store::MemoryStore;
use crate::transport::{ActionRegistry, QueryRegistry};

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Execute(ExecuteError),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Execute(error) => write!(f, "execute error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Options {
    pub config_path: Option<PathBuf>,
    pub limit: usize,
    pub run: bool,
    pub query: String,
}

pub fn parse_cli_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        limit: 10,
        ..Options::default()
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--limit" => {
                let value = iter.next().ok_or("--limit requires a number")?;
                options.limit = value
                    .parse()
                    .map_err(|_| format!("invalid --limit value: {value}"))?;
            }
            "--run" => options.run = true,
            other if other.starts_with("--") => {
                return Err(format!("unknown flag: {other}"));
            }
            other => {
                if !options.query.is_empty() {
                    options.query.push(' ');
                }
                options.query.push_str(other);
            }
        }
    }

    Ok(options)
}

/// Demo entry point: a palette session over deterministic fixture
/// collaborators, answering one query from the command line.
pub fn run_with_options(options: Options) -> Result<(), RuntimeError> {
    if let Err(error) = crate::logging::init() {
        eprintln!("[palette-core] logging unavailable: {error}");
    }

    let cfg = config::load(options.config_path.as_deref())?;
    if !cfg.config_path.exists() {
        config::save(&cfg)?;
        println!(
            "[palette-core] wrote default config to {}",
            cfg.config_path.display()
        );
    }
    let startup = format!(
        "startup window_base={} history_max={} config_path={}",
        cfg.result_window_base,
        cfg.history_max_results,
        cfg.config_path.display(),
    );
    crate::logging::info(&startup);
    println!("[palette-core] {startup}");

    let actions = Arc::new(demo_action_registry());
    let ports = SessionPorts {
        actions: actions.clone(),
        queries: Arc::new(demo_query_registry()),
        navigator: Arc::new(RegistryNavigator { actions }),
        store: Arc::new(MemoryStore::new()),
    };

    let mut session = PaletteSession::new(&cfg, ports, None);
    session.set_input(&options.query);

    let results = session.results();
    println!(
        "[palette-core] query={:?} results={}",
        options.query,
        results.len()
    );
    for (index, command) in results.iter().take(options.limit).enumerate() {
        let marker = if session.selected_index(results.len()) == Some(index) {
            ">"
        } else {
            " "
        };
        match &command.subtitle {
            Some(subtitle) => println!("{marker} {} — {subtitle}", command.title),
            None => println!("{marker} {}", command.title),
        }
    }

    if options.run {
        match session.execute_selected().map_err(RuntimeError::Execute)? {
            Some(outcome) => println!("[palette-core] executed selected command: {outcome:?}"),
            None => println!("[palette-core] nothing to execute"),
        }
    }

    Ok(())
}

/// Opens URLs through the same action channel the coordinator exposes.
pub struct RegistryNavigator {
    pub actions: Arc<ActionRegistry>,
}

impl NavigatorPort for RegistryNavigator {
    fn open_url(&self, url: &str) -> Result<(), PortError> {
        self.actions.run_action(ActionRequest {
            id: command_ids::OPEN_URL.to_string(),
            payload: Some(json!({ "url": url })),
        })
    }
}

/// Stand-in coordinator used by the CLI demo; real deployments register
/// handlers backed by the host browser.
pub fn demo_action_registry() -> ActionRegistry {
    let registry = ActionRegistry::new();

    registry.register(
        command_ids::OPEN_URL,
        Box::new(|payload| {
            let url = payload
                .as_ref()
                .and_then(|value| value.get("url"))
                .and_then(|value| value.as_str())
                .unwrap_or_default();
            if url.is_empty() {
                return Err("Cannot open url. A valid url must be provided.".to_string());
            }
            println!("[palette-core] open url: {url}");
            Ok(())
        }),
    );

    for id in [
        command_ids::TABS_NEW,
        command_ids::TABS_CLOSE_ACTIVE,
        command_ids::TABS_DUPLICATE_ACTIVE,
        command_ids::TABS_TOGGLE_PIN,
        command_ids::TABS_TOGGLE_MUTE,
        command_ids::TABS_RELOAD_ACTIVE,
        command_ids::SESSIONS_RESTORE_LAST,
        command_ids::WINDOWS_NEW,
        command_ids::WINDOWS_NEW_INCOGNITO,
        command_ids::WINDOWS_TOGGLE_FULLSCREEN,
    ] {
        registry.register(
            id,
            Box::new(move |_payload| {
                println!("[palette-core] run action: {id}");
                Ok(())
            }),
        );
    }

    registry.register(
        command_ids::TABS_FOCUS,
        Box::new(|payload| {
            let tab_id = payload
                .as_ref()
                .and_then(|value| value.get("tabId"))
                .and_then(|value| value.as_i64());
            match tab_id {
                Some(tab_id) => {
                    println!("[palette-core] focus tab {tab_id}");
                    Ok(())
                }
                None => Err("Cannot focus tab. Missing tabId.".to_string()),
            }
        }),
    );

    registry
}

pub fn demo_query_registry() -> QueryRegistry {
    let registry = QueryRegistry::new();

    registry.register(
        query_ids::TABS_ALL,
        Box::new(|_payload| {
            Ok(json!([
                { "id": 1, "windowId": 1, "title": "Rust Documentation", "url": "https://doc.rust-lang.org/" },
                { "id": 2, "windowId": 1, "title": "Release Dashboard", "url": "https://ci.example.com/releases" },
            ]))
        }),
    );

    registry.register(
        query_ids::TABS_AUDIBLE,
        Box::new(|_payload| {
            Ok(json!([
                { "id": 3, "windowId": 1, "title": "Lo-fi Radio", "url": "https://radio.example.com/", "audible": true },
            ]))
        }),
    );

    registry.register(
        query_ids::BOOKMARKS_TREE,
        Box::new(|_payload| {
            Ok(json!([
                {
                    "id": "root",
                    "title": "",
                    "children": [
                        {
                            "id": "work",
                            "title": "Work",
                            "dateAdded": 1_700_000_000_000_i64,
                            "children": [
                                { "id": "b1", "title": "Issue Tracker", "url": "https://issues.example.com/", "dateAdded": 1_700_000_300_000_i64 },
                                { "id": "b2", "title": "Wiki", "url": "https://wiki.example.com/", "dateAdded": 1_700_000_200_000_i64 },
                            ]
                        }
                    ]
                }
            ]))
        }),
    );

    registry.register(
        query_ids::HISTORY_RECENT,
        Box::new(|_payload| {
            Ok(json!([
                { "title": "Weather", "url": "https://weather.example.com/", "lastVisitTime": 1_700_000_400_000_i64 },
                { "title": "News", "url": "https://news.example.com/", "lastVisitTime": 1_700_000_100_000_i64 },
            ]))
        }),
    );

    registry.register(
        query_ids::EXTENSIONS_ALL,
        Box::new(|_payload| {
            Ok(json!([
                {
                    "id": "ext-1",
                    "name": "Ad Blocker",
                    "version": "2.4.1",
                    "description": "Blocks intrusive ads",
                    "enabled": true,
                    "icons": [ { "size": 16, "url": "icons/16.png" }, { "size": 128, "url": "icons/128.png" } ]
                }
            ]))
        }),
    );

    registry
}
