pub mod adapters;
pub mod builtins;
pub mod catalog;
pub mod config;
pub mod contract;
pub mod dispatch;
pub mod input;
pub mod logging;
pub mod model;
pub mod ports;
pub mod runtime;
pub mod search;
pub mod selector;
pub mod session;
pub mod store;
pub mod transport;
pub mod usage;

#[cfg(test)]
mod tests {
    mod query_latency_test {
        include!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../tests/perf/query_latency_test.rs"
        ));
    }
}
