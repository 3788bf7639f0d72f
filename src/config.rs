use std::{env, fmt::Display, str::FromStr};

/// Runtime settings. Every value has a default, so the program runs with no
/// environment at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub redis_url: String,
    pub users_file: String,
    pub scores_file: String,
    pub search_index: String,
    pub search_enabled: bool,
    pub scan_start_cursor: u64,
    pub lookup_user_id: String,
    pub leaderboard: String,
    pub leaderboard_top: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379/0".to_string(),
            users_file: "users.txt".to_string(),
            scores_file: "userscores.csv".to_string(),
            search_index: "user_index".to_string(),
            search_enabled: true,
            scan_start_cursor: 1280,
            lookup_user_id: "1".to_string(),
            leaderboard: "2".to_string(),
            leaderboard_top: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup (the process environment in
    /// production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            redis_url: lookup("REDIS_URL").unwrap_or(defaults.redis_url),
            users_file: lookup("USERS_FILE").unwrap_or(defaults.users_file),
            scores_file: lookup("SCORES_FILE").unwrap_or(defaults.scores_file),
            search_index: lookup("SEARCH_INDEX").unwrap_or(defaults.search_index),
            search_enabled: parse_or(&lookup, "REDISEARCH_ENABLED", defaults.search_enabled),
            scan_start_cursor: parse_or(&lookup, "SCAN_START_CURSOR", defaults.scan_start_cursor),
            lookup_user_id: lookup("LOOKUP_USER_ID").unwrap_or(defaults.lookup_user_id),
            leaderboard: lookup("LEADERBOARD").unwrap_or(defaults.leaderboard),
            leaderboard_top: parse_or(&lookup, "LEADERBOARD_TOP", defaults.leaderboard_top),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("⚠️  Invalid {} value '{}': {} (using default: {})", key, raw, e, default);
            default
        }),
        None => default,
    }
}
