//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_decimal_places() -> u32 {
    defaults::decimal_places()
}
fn d_tolerance() -> f64 {
    defaults::tolerance()
}
fn d_max_solutions() -> usize {
    defaults::max_solutions()
}
fn d_max_nodes() -> u64 {
    defaults::max_nodes()
}
fn d_tie_break() -> bool {
    defaults::tie_break()
}
fn d_prune() -> bool {
    defaults::prune()
}
fn d_use_cache() -> bool {
    defaults::use_cache()
}
fn d_cache_threshold() -> u32 {
    defaults::cache_threshold()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching solver.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub probability: ProbabilityConfig,
    #[serde(default)]
    pub brute_force: BruteForceConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Settings for the probability engine
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProbabilityConfig {
    /// Decimal places used when probabilities are exposed as text
    #[serde(default = "d_decimal_places")]
    pub decimal_places: u32,
    /// Candidates within `best * tolerance` are considered equally good
    #[serde(default = "d_tolerance")]
    pub tolerance: f64,
}

impl Default for ProbabilityConfig {
    fn default() -> Self {
        Self {
            decimal_places: defaults::decimal_places(),
            tolerance: defaults::tolerance(),
        }
    }
}

/// Settings for the brute-force deep analysis engine
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BruteForceConfig {
    /// Cap on collected global solutions before analysis is abandoned
    #[serde(default = "d_max_solutions")]
    pub max_solutions: usize,
    /// Cap on explored tree nodes per analysis run
    #[serde(default = "d_max_nodes")]
    pub max_nodes: u64,
    /// Prefer candidates with fewer mines when winning lines tie
    #[serde(default = "d_tie_break")]
    pub tie_break: bool,
    /// Abandon dominated candidates early
    #[serde(default = "d_prune")]
    pub prune: bool,
    /// Reuse identical positions reached via different move orders
    #[serde(default = "d_use_cache")]
    pub use_cache: bool,
    /// Minimum winning lines for a subtree to be worth caching
    #[serde(default = "d_cache_threshold")]
    pub cache_threshold: u32,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            max_solutions: defaults::max_solutions(),
            max_nodes: defaults::max_nodes(),
            tie_break: defaults::tie_break(),
            prune: defaults::prune(),
            use_cache: defaults::use_cache(),
            cache_threshold: defaults::cache_threshold(),
        }
    }
}
