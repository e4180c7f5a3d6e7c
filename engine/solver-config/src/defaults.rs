//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so every component agrees on the built-in values.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    probability: ProbabilityDefaults,
    brute_force: BruteForceDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct ProbabilityDefaults {
    decimal_places: u32,
    tolerance: f64,
}

#[derive(Debug, Deserialize)]
struct BruteForceDefaults {
    max_solutions: usize,
    max_nodes: u64,
    tie_break: bool,
    prune: bool,
    use_cache: bool,
    cache_threshold: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Probability
pub fn decimal_places() -> u32 {
    DEFAULTS.probability.decimal_places
}
pub fn tolerance() -> f64 {
    DEFAULTS.probability.tolerance
}

// Brute force
pub fn max_solutions() -> usize {
    DEFAULTS.brute_force.max_solutions
}
pub fn max_nodes() -> u64 {
    DEFAULTS.brute_force.max_nodes
}
pub fn tie_break() -> bool {
    DEFAULTS.brute_force.tie_break
}
pub fn prune() -> bool {
    DEFAULTS.brute_force.prune
}
pub fn use_cache() -> bool {
    DEFAULTS.brute_force.use_cache
}
pub fn cache_threshold() -> u32 {
    DEFAULTS.brute_force.cache_threshold
}
