use std::{path::PathBuf, str::FromStr, time::Duration};

use tracing::{trace, warn};

use crate::{eta::DEFAULT_ETA_TIMEOUT, registry::DEFAULT_FRESHNESS_WINDOW};

pub struct Config {
    pub port: u16,
    pub registry_path: PathBuf,
    pub routes_dir: PathBuf,
    pub freshness_window: Duration,
    pub eta_timeout: Duration,
    /// Age after which stale vehicles are removed. No compaction when unset.
    pub compact_after: Option<Duration>,
    pub ors_api_key: String,
    pub ors_directions_url: String,
    pub locationiq_api_key: String,
    pub locationiq_search_url: String,
    pub locationiq_autocomplete_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            registry_path: "active_buses.json".into(),
            routes_dir: "routes".into(),
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
            eta_timeout: DEFAULT_ETA_TIMEOUT,
            compact_after: None,
            ors_api_key: String::new(),
            ors_directions_url: "https://api.openrouteservice.org/v2/directions/driving-car".into(),
            locationiq_api_key: String::new(),
            locationiq_search_url: "https://us1.locationiq.com/v1/search.php".into(),
            locationiq_autocomplete_url: "https://api.locationiq.com/v1/autocomplete.php".into(),
        }
    }
}

impl Config {
    /// Defaults overridden by whatever is set in the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            parsed::<u64, _>(&lookup, key)
                .map(Duration::from_secs)
                .unwrap_or(default)
        };
        Self {
            port: parsed(&lookup, "BUSWATCH_PORT").unwrap_or(defaults.port),
            registry_path: string(&lookup, "BUSWATCH_REGISTRY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.registry_path),
            routes_dir: string(&lookup, "BUSWATCH_ROUTES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.routes_dir),
            freshness_window: secs("BUSWATCH_FRESHNESS_SECS", defaults.freshness_window),
            eta_timeout: secs("BUSWATCH_ETA_TIMEOUT_SECS", defaults.eta_timeout),
            compact_after: parsed::<u64, _>(&lookup, "BUSWATCH_COMPACT_AFTER_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            ors_api_key: string(&lookup, "ORS_API_KEY").unwrap_or(defaults.ors_api_key),
            ors_directions_url: string(&lookup, "ORS_DIRECTIONS_URL")
                .unwrap_or(defaults.ors_directions_url),
            locationiq_api_key: string(&lookup, "LOCATIONIQ_API_KEY")
                .unwrap_or(defaults.locationiq_api_key),
            locationiq_search_url: string(&lookup, "LOCATIONIQ_SEARCH_URL")
                .unwrap_or(defaults.locationiq_search_url),
            locationiq_autocomplete_url: string(&lookup, "LOCATIONIQ_AUTOCOMPLETE_URL")
                .unwrap_or(defaults.locationiq_autocomplete_url),
        }
    }
}

fn string<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|value| value.trim().to_string()) {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            trace!("{key} not set, using default");
            None
        }
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let value = string(lookup, key)?;
    match value.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{key}={value:?} is not valid, using default");
            None
        }
    }
}
