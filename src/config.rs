// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup; a `.env` file is honored for local runs.

use chrono_tz::Tz;
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

/// Feed sources tried in order when `FEED_SOURCES` is not set.
pub const DEFAULT_FEED_SOURCES: [&str; 2] = [
    "storage/events.json",
    "https://raw.githubusercontent.com/shohoku11wrj/haoqiyou/main/storage/events.json",
];

/// Group ids whose events are shown as "extra" (hideable) events by default.
pub const DEFAULT_EXTRA_GROUP_IDS: [i64; 3] = [265, 908336, 1047313];

/// Zone every event time is rendered in unless overridden.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Los_Angeles;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ordered feed sources: `http(s)://` URLs or local file paths
    pub feed_sources: Vec<String>,
    /// Directory the rendered artifacts are written to
    pub output_dir: PathBuf,
    /// Display time zone for event times
    pub time_zone: Tz,
    /// Source group ids rendered as extra events
    pub extra_group_ids: HashSet<i64>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            feed_sources: DEFAULT_FEED_SOURCES.iter().map(|s| s.to_string()).collect(),
            output_dir: PathBuf::from("dist"),
            time_zone: DEFAULT_TIME_ZONE,
            extra_group_ids: DEFAULT_EXTRA_GROUP_IDS.into_iter().collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let feed_sources = match env::var("FEED_SOURCES") {
            Ok(raw) => {
                let sources = split_list(&raw);
                if sources.is_empty() {
                    return Err(ConfigError::Missing("FEED_SOURCES"));
                }
                sources
            }
            Err(_) => DEFAULT_FEED_SOURCES.iter().map(|s| s.to_string()).collect(),
        };

        let time_zone = match env::var("DISPLAY_TIME_ZONE") {
            Ok(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::Invalid("DISPLAY_TIME_ZONE", name))?,
            Err(_) => DEFAULT_TIME_ZONE,
        };

        let extra_group_ids = match env::var("EXTRA_GROUP_IDS") {
            Ok(raw) => parse_group_ids(&raw)?,
            Err(_) => DEFAULT_EXTRA_GROUP_IDS.into_iter().collect(),
        };

        Ok(Self {
            feed_sources,
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("dist")),
            time_zone,
            extra_group_ids,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_group_ids(raw: &str) -> Result<HashSet<i64>, ConfigError> {
    split_list(raw)
        .into_iter()
        .map(|id| {
            id.parse::<i64>()
                .map_err(|_| ConfigError::Invalid("EXTRA_GROUP_IDS", id))
        })
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Required environment variable is empty: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.feed_sources.len(), 2);
        assert_eq!(config.feed_sources[0], "storage/events.json");
        assert_eq!(config.time_zone, chrono_tz::America::Los_Angeles);
        assert!(config.extra_group_ids.contains(&908336));
        assert!(!config.extra_group_ids.contains(&1));
    }

    #[test]
    fn test_split_list_skips_blanks() {
        assert_eq!(split_list(" a.json, ,https://x/b.json,"), vec!["a.json", "https://x/b.json"]);
    }

    #[test]
    fn test_parse_group_ids() {
        let ids = parse_group_ids("1, 2,3").expect("ids should parse");
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&2));

        let err = parse_group_ids("1,abc").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("EXTRA_GROUP_IDS", ref v) if v == "abc"));
    }

    #[test]
    fn test_config_from_env() {
        // Set env vars for test
        env::set_var("FEED_SOURCES", "local.json, https://example.com/events.json");
        env::set_var("DISPLAY_TIME_ZONE", "America/New_York");
        env::set_var("EXTRA_GROUP_IDS", "42");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(
            config.feed_sources,
            vec!["local.json", "https://example.com/events.json"]
        );
        assert_eq!(config.time_zone, chrono_tz::America::New_York);
        assert!(config.extra_group_ids.contains(&42));
        assert!(!config.extra_group_ids.contains(&265));

        env::remove_var("FEED_SOURCES");
        env::remove_var("DISPLAY_TIME_ZONE");
        env::remove_var("EXTRA_GROUP_IDS");
    }
}
