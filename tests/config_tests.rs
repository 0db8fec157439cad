use std::{collections::HashMap, path::PathBuf, time::Duration};

use buswatch::config::Config;

fn config_from(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_test() {
    let config = config_from(&[]);
    assert_eq!(config.port, 5000);
    assert_eq!(config.registry_path, PathBuf::from("active_buses.json"));
    assert_eq!(config.routes_dir, PathBuf::from("routes"));
    assert_eq!(config.freshness_window, Duration::from_secs(120));
    assert_eq!(config.eta_timeout, Duration::from_secs(10));
    assert_eq!(config.compact_after, None);
    assert!(config.ors_api_key.is_empty());
    assert!(config.ors_directions_url.ends_with("/v2/directions/driving-car"));
}

#[test]
fn overrides_test() {
    let config = config_from(&[
        ("BUSWATCH_PORT", "8080"),
        ("BUSWATCH_REGISTRY_PATH", "/var/lib/buswatch/buses.json"),
        ("BUSWATCH_FRESHNESS_SECS", "45"),
        ("BUSWATCH_COMPACT_AFTER_SECS", "3600"),
        ("ORS_API_KEY", " secret "),
    ]);
    assert_eq!(config.port, 8080);
    assert_eq!(
        config.registry_path,
        PathBuf::from("/var/lib/buswatch/buses.json")
    );
    assert_eq!(config.freshness_window, Duration::from_secs(45));
    assert_eq!(config.compact_after, Some(Duration::from_secs(3600)));
    assert_eq!(config.ors_api_key, "secret");
}

#[test]
fn invalid_values_fall_back_to_defaults_test() {
    let config = config_from(&[
        ("BUSWATCH_PORT", "eighty"),
        ("BUSWATCH_FRESHNESS_SECS", "-1"),
        ("BUSWATCH_COMPACT_AFTER_SECS", "0"),
        ("BUSWATCH_ROUTES_DIR", "   "),
    ]);
    assert_eq!(config.port, 5000);
    assert_eq!(config.freshness_window, Duration::from_secs(120));
    assert_eq!(config.compact_after, None);
    assert_eq!(config.routes_dir, PathBuf::from("routes"));
}
