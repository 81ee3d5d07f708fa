use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action identifiers understood by the background coordinator. Opaque to
/// the core; listed here so producers and fixtures agree on spelling.
pub mod command_ids {
    pub const OPEN_URL: &str = "url:open";
    pub const TABS_NEW: &str = "tabs:new";
    pub const TABS_FOCUS: &str = "tabs:focus";
    pub const TABS_CLOSE_ACTIVE: &str = "tabs:close-active";
    pub const TABS_DUPLICATE_ACTIVE: &str = "tabs:duplicate-active";
    pub const TABS_TOGGLE_PIN: &str = "tabs:toggle-pin";
    pub const TABS_TOGGLE_MUTE: &str = "tabs:toggle-mute";
    pub const TABS_RELOAD_ACTIVE: &str = "tabs:reload-active";
    pub const SESSIONS_RESTORE_LAST: &str = "sessions:restore-last";
    pub const WINDOWS_NEW: &str = "windows:new";
    pub const WINDOWS_NEW_INCOGNITO: &str = "windows:new-incognito";
    pub const WINDOWS_TOGGLE_FULLSCREEN: &str = "windows:toggle-fullscreen";
    pub const WINDOWS_SPLIT_VERTICAL: &str = "windows:split-vertical";
    pub const WINDOWS_SPLIT_HORIZONTAL: &str = "windows:split-horizontal";
    pub const BOOKMARKS_SAVE_TO_FOLDER: &str = "bookmarks:save-to-folder";
    pub const PROVIDERS_EXECUTE: &str = "providers:execute";
    pub const AGENTS_EXECUTE: &str = "agents:execute";
}

/// Query identifiers answered by the background coordinator.
pub mod query_ids {
    pub const TABS_ALL: &str = "tabs:all";
    pub const TABS_AUDIBLE: &str = "tabs:audible";
    pub const BOOKMARKS_TREE: &str = "bookmarks:tree";
    pub const EXTENSIONS_ALL: &str = "extensions:all";
    pub const HISTORY_RECENT: &str = "history:recent";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn ok(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, rename = "windowId")]
    pub window_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub audible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BookmarkNode {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "dateAdded")]
    pub date_added: Option<i64>,
    #[serde(default)]
    pub children: Option<Vec<BookmarkNode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HistoryEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "lastVisitTime")]
    pub last_visit_time: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExtensionIcon {
    pub size: u32,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExtensionInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub icons: Vec<ExtensionIcon>,
}

/// Available screen area reported by the hosting surface, consumed by
/// the split-screen window commands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScreenBounds {
    #[serde(rename = "availLeft")]
    pub avail_left: i32,
    #[serde(rename = "availTop")]
    pub avail_top: i32,
    #[serde(rename = "availWidth")]
    pub avail_width: i32,
    #[serde(rename = "availHeight")]
    pub avail_height: i32,
}

/// A user-defined agent persisted by the host surface. Entries missing
/// any of id/name/goal are dropped at the adapter boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredAgent {
    pub id: String,
    pub name: String,
    pub goal: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, rename = "isPinned")]
    pub is_pinned: bool,
    #[serde(default, rename = "lastUsed")]
    pub last_used: Option<i64>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<i64>,
}
