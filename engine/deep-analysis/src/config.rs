//! Deep analysis configuration parameters.

/// Configuration for one brute-force deep analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Maximum number of enumerated solutions to collect before the
    /// position is declared too large for exact analysis.
    pub max_solutions: usize,

    /// Budget of explored tree nodes. When exhausted the search stops
    /// where it is and the result is flagged incomplete.
    pub max_nodes: u64,

    /// Prefer the candidate with fewer mines when winning-line totals tie.
    pub tie_break: bool,

    /// Abandon a candidate as soon as it provably cannot beat the best
    /// score found so far at its level. Never changes the selected best
    /// value, only skips dominated candidates sooner.
    pub prune: bool,

    /// Reuse positions reached via different move orders.
    pub use_cache: bool,

    /// Minimum winning lines for a subtree to be worth caching.
    pub cache_threshold: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_solutions: solver_config::max_solutions(),
            max_nodes: solver_config::max_nodes(),
            tie_break: solver_config::tie_break(),
            prune: solver_config::prune(),
            use_cache: solver_config::use_cache(),
            cache_threshold: solver_config::cache_threshold(),
        }
    }
}

impl AnalysisConfig {
    /// Build from the central solver.toml configuration.
    pub fn from_central(config: &solver_config::CentralConfig) -> Self {
        Self {
            max_solutions: config.brute_force.max_solutions,
            max_nodes: config.brute_force.max_nodes,
            tie_break: config.brute_force.tie_break,
            prune: config.brute_force.prune,
            use_cache: config.brute_force.use_cache,
            cache_threshold: config.brute_force.cache_threshold,
        }
    }

    /// Create a small config for testing: every subtree is cacheable and
    /// nothing is pruned, so results are easy to compare.
    pub fn for_testing() -> Self {
        Self {
            max_solutions: 50,
            max_nodes: 10_000,
            tie_break: true,
            prune: false,
            use_cache: true,
            cache_threshold: 0,
        }
    }

    /// Builder pattern: set the explored-node budget.
    pub fn with_max_nodes(mut self, n: u64) -> Self {
        self.max_nodes = n;
        self
    }

    /// Builder pattern: enable or disable pruning.
    pub fn with_prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Builder pattern: enable or disable the position cache.
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Builder pattern: set the caching threshold.
    pub fn with_cache_threshold(mut self, threshold: u32) -> Self {
        self.cache_threshold = threshold;
        self
    }
}
