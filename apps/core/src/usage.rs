use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::model::Command;
use crate::store::{KeyValueStore, StoreError, USAGE_KEY};

/// Tracks invocation recency per command title and biases the catalog
/// toward recently used commands. Weights live in the key-value store as
/// a JSON object `{ title: epoch_ms }`.
pub struct UsageRanker {
    store: Arc<dyn KeyValueStore>,
}

impl UsageRanker {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn record(&self, key: &str) -> Result<(), StoreError> {
        let mut weights = self.load();
        let ceiling = weights.values().copied().max().unwrap_or(0);
        // Repeated records inside one millisecond still order
        // deterministically.
        let weight = now_ms().max(ceiling + 1);
        weights.insert(key.to_string(), weight);
        self.save(&weights)
    }

    pub fn reset(&self) -> Result<(), StoreError> {
        self.save(&HashMap::new())
    }

    /// Stable: commands without a recorded weight keep catalog order.
    pub fn sort_by_usage(&self, commands: &mut [Command]) {
        let weights = self.load();
        commands.sort_by_key(|command| {
            std::cmp::Reverse(weights.get(&command.title).copied().unwrap_or(0))
        });
    }

    fn load(&self) -> HashMap<String, i64> {
        let value = match self.store.get(USAGE_KEY) {
            Ok(value) => value,
            Err(error) => {
                crate::logging::warn(&format!("usage read failed: {error}"));
                return HashMap::new();
            }
        };

        match value {
            Some(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(key, value)| value.as_i64().map(|weight| (key, weight)))
                .collect(),
            _ => HashMap::new(),
        }
    }

    fn save(&self, weights: &HashMap<String, i64>) -> Result<(), StoreError> {
        let map: serde_json::Map<String, Value> = weights
            .iter()
            .map(|(key, weight)| (key.clone(), Value::from(*weight)))
            .collect();
        self.store.set(USAGE_KEY, Value::Object(map))
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
