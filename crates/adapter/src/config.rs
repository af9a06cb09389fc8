//! Driver configuration read from the environment.

use crate::core::Progress;
use crate::types::MAX_LEVEL;

/// Adapter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub seed: u32,
    pub max_pending_commands: usize,
    pub log_level: String,
    /// Progress restored by whoever launched the driver.
    pub progress: Progress,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            max_pending_commands: 16,
            log_level: "info".to_string(),
            progress: Progress::default(),
        }
    }
}

impl AdapterConfig {
    /// Create from `BLOCKFIT_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("BLOCKFIT_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let max_pending_commands = get("BLOCKFIT_MAX_PENDING")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(16)
            .max(1);

        let log_level = get("BLOCKFIT_LOG")
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| "info".to_string());

        let max_unlocked_level = get("BLOCKFIT_MAX_LEVEL")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_LEVEL);

        let high_score = get("BLOCKFIT_HIGH_SCORE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        Self {
            seed,
            max_pending_commands,
            log_level,
            progress: Progress {
                max_unlocked_level,
                high_score,
                ..Progress::default()
            },
        }
    }
}

fn clock_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AdapterConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AdapterConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.max_pending_commands, 16);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.progress, Progress::default());
    }

    #[test]
    fn test_reads_all_variables() {
        let cfg = config(&[
            ("BLOCKFIT_SEED", "42"),
            ("BLOCKFIT_MAX_PENDING", "4"),
            ("BLOCKFIT_LOG", "DEBUG"),
            ("BLOCKFIT_MAX_LEVEL", "17"),
            ("BLOCKFIT_HIGH_SCORE", "9000"),
        ]);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.max_pending_commands, 4);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.progress.max_unlocked_level, 17);
        assert_eq!(cfg.progress.high_score, 9000);
    }

    #[test]
    fn test_clamps_and_ignores_garbage() {
        let cfg = config(&[
            ("BLOCKFIT_SEED", "not-a-number"),
            ("BLOCKFIT_MAX_PENDING", "0"),
            ("BLOCKFIT_MAX_LEVEL", "9999"),
            ("BLOCKFIT_LOG", "  "),
        ]);
        assert_eq!(cfg.max_pending_commands, 1);
        assert_eq!(cfg.progress.max_unlocked_level, MAX_LEVEL);
        assert_eq!(cfg.log_level, "info");
    }
}
