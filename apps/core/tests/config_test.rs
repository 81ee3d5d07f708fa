use std::path::PathBuf;

use palette_core::config::{self, Config, ConfigError};

fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "palette-config-test-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn defaults_are_valid() {
    let cfg = Config::default();
    assert_eq!(cfg.result_window_base, 75);
    assert_eq!(cfg.history_max_results, 5000);
    assert_eq!(cfg.featured_agent_limit, 4);
    config::validate(&cfg).unwrap();
}

#[test]
fn missing_file_loads_defaults_with_the_requested_path() {
    let path = scratch_dir("missing").join("config.toml");
    let cfg = config::load(Some(&path)).unwrap();
    assert_eq!(cfg.config_path, path);
    assert_eq!(cfg.result_window_base, Config::default().result_window_base);
}

#[test]
fn save_then_load_round_trips() {
    let dir = scratch_dir("roundtrip");
    let mut cfg = Config::default();
    cfg.result_window_base = 150;
    cfg.history_max_results = 1000;
    cfg.config_path = dir.join("config.toml");
    cfg.store_db_path = dir.join("palette.sqlite3");

    config::save(&cfg).unwrap();
    let loaded = config::load(Some(&cfg.config_path)).unwrap();
    assert_eq!(loaded, cfg);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn out_of_range_window_base_is_rejected() {
    let mut cfg = Config::default();
    cfg.result_window_base = 5;
    assert!(matches!(
        config::validate(&cfg),
        Err(ConfigError::Invalid(_))
    ));

    cfg.result_window_base = 2000;
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn zero_history_limit_is_rejected() {
    let mut cfg = Config::default();
    cfg.history_max_results = 0;
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn oversized_agent_limit_is_rejected() {
    let mut cfg = Config::default();
    cfg.featured_agent_limit = 21;
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn save_refuses_an_invalid_config() {
    let dir = scratch_dir("invalid");
    let mut cfg = Config::default();
    cfg.result_window_base = 1;
    cfg.config_path = dir.join("config.toml");

    assert!(config::save(&cfg).is_err());
    assert!(!cfg.config_path.exists());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = scratch_dir("partial");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "result_window_base = 200\n").unwrap();

    let cfg = config::load(Some(&path)).unwrap();
    assert_eq!(cfg.result_window_base, 200);
    assert_eq!(cfg.history_max_results, 5000);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unparsable_file_is_a_parse_error() {
    let dir = scratch_dir("garbage");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "result_window_base = [broken").unwrap();

    assert!(matches!(
        config::load(Some(&path)),
        Err(ConfigError::Parse(_))
    ));

    std::fs::remove_dir_all(&dir).ok();
}
