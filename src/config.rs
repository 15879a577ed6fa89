//! Caller-supplied configuration (spec §6) and tracing setup.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// All tunables exposed to callers. Defaults match spec §6 exactly.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PathfinderConfig {
    pub cluster_size: u32,
    pub heuristic_weight: u32,
    pub max_iterations: u32,
    pub rail_water_penalty: u32,
    pub rail_direction_change_penalty: u32,
    pub smoothing_window_base: u32,
    pub short_distance_bypass_threshold: u32,
    pub cache_refined_edges: bool,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        let cluster_size = 32;
        Self {
            cluster_size,
            heuristic_weight: 15,
            max_iterations: 500_000,
            rail_water_penalty: 3,
            rail_direction_change_penalty: 0,
            smoothing_window_base: 100,
            short_distance_bypass_threshold: cluster_size,
            cache_refined_edges: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config io error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl PathfinderConfig {
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        ron::from_str(&text).map_err(ConfigError::Parse)
    }
}

/// Installs a `tracing-subscriber` registry writing to a rolling
/// non-blocking appender under `log_dir`, honouring `RUST_LOG`. Returns the
/// guard that must be held for the lifetime of the process to flush
/// buffered log lines.
pub fn init_tracing(log_dir: impl AsRef<Path>) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir, "cormorant.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(non_blocking)
        .init();
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_enumerated_values() {
        let cfg = PathfinderConfig::default();
        assert_eq!(cfg.heuristic_weight, 15);
        assert_eq!(cfg.max_iterations, 500_000);
        assert_eq!(cfg.rail_water_penalty, 3);
        assert_eq!(cfg.rail_direction_change_penalty, 0);
        assert_eq!(cfg.smoothing_window_base, 100);
        assert_eq!(cfg.short_distance_bypass_threshold, cfg.cluster_size);
    }

    #[test]
    fn round_trips_through_ron() {
        let cfg = PathfinderConfig::default();
        let text = ron::to_string(&cfg).unwrap();
        let parsed: PathfinderConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed.cluster_size, cfg.cluster_size);
        assert_eq!(parsed.cache_refined_edges, cfg.cache_refined_edges);
    }
}
