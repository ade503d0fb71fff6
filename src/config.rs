//! Runtime configuration read from the environment.

use std::env;

use log::LevelFilter;

use crate::core::GameConfig;
use crate::types::START_LEVEL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Fixed seed for a reproducible game; entropy when unset.
    pub seed: Option<u64>,
    /// Log file; logging stays off when unset.
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub start_level: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            log_level: LevelFilter::Info,
            start_level: START_LEVEL,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("PUYO_SEED").and_then(|s| s.parse().ok());
        let log_path = get("PUYO_LOG_PATH");
        let log_level = get("PUYO_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.log_level);
        let start_level = get("PUYO_START_LEVEL")
            .and_then(|s| s.parse().ok())
            .filter(|&level| level >= 1)
            .unwrap_or(defaults.start_level);

        Self {
            seed,
            log_path,
            log_level,
            start_level,
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            start_level: self.start_level,
            ..GameConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.game_config(), GameConfig::default());
    }

    #[test]
    fn test_reads_every_key() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PUYO_SEED", "42"),
            ("PUYO_LOG_PATH", " /tmp/puyo.log "),
            ("PUYO_LOG_LEVEL", "debug"),
            ("PUYO_START_LEVEL", "3"),
        ]));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_path.as_deref(), Some("/tmp/puyo.log"));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.game_config().start_level, 3);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PUYO_SEED", "not-a-number"),
            ("PUYO_LOG_PATH", "   "),
            ("PUYO_LOG_LEVEL", "loud"),
            ("PUYO_START_LEVEL", "0"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = AppConfig::from_env();
    }
}
