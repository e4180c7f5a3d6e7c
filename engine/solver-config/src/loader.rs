//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for solver.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "solver.toml",      // Current directory
    "../solver.toml",   // Parent directory (when running from subdirectory)
    "/app/solver.toml", // Docker container
];

/// Load the central configuration from solver.toml.
///
/// Searches for solver.toml in the following order:
/// 1. Path specified by SOLVER_CONFIG environment variable
/// 2. Current directory (solver.toml)
/// 3. Parent directory (../solver.toml)
/// 4. Docker container path (/app/solver.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("SOLVER_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from SOLVER_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "SOLVER_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No solver.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &PathBuf) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: SOLVER_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "SOLVER_COMMON_LOG_LEVEL");

    // Probability
    env_override!(
        config,
        probability.decimal_places,
        "SOLVER_PROBABILITY_DECIMAL_PLACES",
        parse
    );
    env_override!(
        config,
        probability.tolerance,
        "SOLVER_PROBABILITY_TOLERANCE",
        parse
    );

    // Brute force
    env_override!(
        config,
        brute_force.max_solutions,
        "SOLVER_BRUTE_FORCE_MAX_SOLUTIONS",
        parse
    );
    env_override!(
        config,
        brute_force.max_nodes,
        "SOLVER_BRUTE_FORCE_MAX_NODES",
        parse
    );
    env_override!(
        config,
        brute_force.tie_break,
        "SOLVER_BRUTE_FORCE_TIE_BREAK",
        parse
    );
    env_override!(config, brute_force.prune, "SOLVER_BRUTE_FORCE_PRUNE", parse);
    env_override!(
        config,
        brute_force.use_cache,
        "SOLVER_BRUTE_FORCE_USE_CACHE",
        parse
    );
    env_override!(
        config,
        brute_force.cache_threshold,
        "SOLVER_BRUTE_FORCE_CACHE_THRESHOLD",
        parse
    );

    config
}
