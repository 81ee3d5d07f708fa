use std::fmt::{Display, Formatter};

use serde_json::Value;

use crate::contract::{ActionRequest, QueryRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    NotRegistered(String),
    Failed(String),
}

impl Display for PortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRegistered(id) => write!(f, "\"{id}\" is not registered"),
            Self::Failed(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for PortError {}

impl PortError {
    /// Collaborator errors come back as bare strings; an absent message
    /// maps to the generic failure text.
    pub fn from_message(message: Option<String>) -> Self {
        match message {
            Some(message) if !message.is_empty() => Self::Failed(message),
            _ => Self::Failed("command failed to execute".to_string()),
        }
    }
}

/// Request/response channel to the background action runner.
pub trait ActionPort: Send + Sync {
    fn run_action(&self, request: ActionRequest) -> Result<(), PortError>;
}

/// Request/response channel for browser-state queries.
pub trait QueryPort: Send + Sync {
    fn run_query(&self, request: QueryRequest) -> Result<Value, PortError>;
}

/// Direct navigation target for commands that only carry a URL.
pub trait NavigatorPort: Send + Sync {
    fn open_url(&self, url: &str) -> Result<(), PortError>;
}
