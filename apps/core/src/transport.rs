use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::contract::{ActionRequest, ActionResponse, QueryRequest, QueryResponse};
use crate::ports::{ActionPort, PortError, QueryPort};

pub type ActionHandler = Box<dyn Fn(Option<Value>) -> Result<(), String> + Send + Sync>;
pub type QueryHandler = Box<dyn Fn(Option<Value>) -> Result<Value, String> + Send + Sync>;

/// Background-side action runner: a registry keyed by command id.
/// Unknown ids reject with "not registered".
#[derive(Default)]
pub struct ActionRegistry {
    handlers: Mutex<HashMap<String, ActionHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: &str, handler: ActionHandler) {
        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        if handlers.insert(id.to_string(), handler).is_some() {
            crate::logging::warn(&format!("action \"{id}\" was already registered, overwriting"));
        }
    }
}

impl ActionPort for ActionRegistry {
    fn run_action(&self, request: ActionRequest) -> Result<(), PortError> {
        let handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        let handler = handlers
            .get(&request.id)
            .ok_or_else(|| PortError::NotRegistered(request.id.clone()))?;
        handler(request.payload).map_err(|message| PortError::from_message(Some(message)))
    }
}

#[derive(Default)]
pub struct QueryRegistry {
    handlers: Mutex<HashMap<String, QueryHandler>>,
}

impl QueryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: &str, handler: QueryHandler) {
        let mut handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        if handlers.insert(id.to_string(), handler).is_some() {
            crate::logging::warn(&format!("query \"{id}\" was already registered, overwriting"));
        }
    }
}

impl QueryPort for QueryRegistry {
    fn run_query(&self, request: QueryRequest) -> Result<Value, PortError> {
        let handlers = self.handlers.lock().unwrap_or_else(|e| e.into_inner());
        let handler = handlers
            .get(&request.id)
            .ok_or_else(|| PortError::NotRegistered(request.id.clone()))?;
        handler(request.payload).map_err(|message| PortError::from_message(Some(message)))
    }
}

/// Wire-level entry point for action requests arriving as JSON.
pub fn handle_action_json(registry: &ActionRegistry, payload: &str) -> String {
    let response = match serde_json::from_str::<ActionRequest>(payload) {
        Ok(request) => match registry.run_action(request) {
            Ok(()) => ActionResponse::ok(),
            Err(error) => ActionResponse::err(error.to_string()),
        },
        Err(error) => ActionResponse::err(error.to_string()),
    };

    serde_json::to_string(&response).expect("action response should serialize")
}

pub fn handle_query_json(registry: &QueryRegistry, payload: &str) -> String {
    let response = match serde_json::from_str::<QueryRequest>(payload) {
        Ok(request) => match registry.run_query(request) {
            Ok(result) => QueryResponse::ok(result),
            Err(error) => QueryResponse::err(error.to_string()),
        },
        Err(error) => QueryResponse::err(error.to_string()),
    };

    serde_json::to_string(&response).expect("query response should serialize")
}
