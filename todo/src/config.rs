//! Configuration for the `todo` binary.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Values that fail to parse fall back to the default.

use crate::filter::Filter;
use serde::{Deserialize, Serialize};
use std::env;
use tasklist_runtime::StoreConfig;

/// Default tracing filter directive
pub const DEFAULT_LOG_FILTER: &str = "todo=info,tasklist_runtime=info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tracing filter directive (`TODO_LOG_FILTER`); `RUST_LOG` wins when set
    pub log_filter: String,
    /// Capacity of the re-render broadcast channel (`TODO_BROADCAST_CAPACITY`)
    pub broadcast_capacity: usize,
    /// Print todo ids next to each row (`TODO_SHOW_IDS`)
    pub show_ids: bool,
    /// Filter selected at start (`TODO_INITIAL_FILTER`)
    pub initial_filter: Filter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            broadcast_capacity: StoreConfig::default().broadcast_capacity,
            show_ids: true,
            initial_filter: Filter::All,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_filter: lookup("TODO_LOG_FILTER")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.log_filter),
            broadcast_capacity: lookup("TODO_BROADCAST_CAPACITY")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&capacity| capacity > 0)
                .unwrap_or(defaults.broadcast_capacity),
            show_ids: lookup("TODO_SHOW_IDS")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.show_ids),
            initial_filter: lookup("TODO_INITIAL_FILTER")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.initial_filter),
        }
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default().with_broadcast_capacity(self.broadcast_capacity)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("TODO_LOG_FILTER", "todo=debug"),
            ("TODO_BROADCAST_CAPACITY", "8"),
            ("TODO_SHOW_IDS", "off"),
            ("TODO_INITIAL_FILTER", "pending"),
        ]));

        assert_eq!(
            config,
            Config {
                log_filter: "todo=debug".to_string(),
                broadcast_capacity: 8,
                show_ids: false,
                initial_filter: Filter::Pending,
            }
        );
        assert_eq!(config.store_config().broadcast_capacity, 8);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("TODO_LOG_FILTER", "  "),
            ("TODO_BROADCAST_CAPACITY", "0"),
            ("TODO_SHOW_IDS", "maybe"),
            ("TODO_INITIAL_FILTER", "done"),
        ]));

        assert_eq!(config, Config::default());
    }
}
