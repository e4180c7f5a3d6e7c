//! Centralized configuration loading from solver.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the solver engines.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`SOLVER_<SECTION>_<KEY>`)
//! 2. solver.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! SOLVER_<SECTION>_<KEY>=value
//!
//! Examples:
//!     SOLVER_COMMON_LOG_LEVEL=debug
//!     SOLVER_PROBABILITY_TOLERANCE=0.9
//!     SOLVER_BRUTE_FORCE_MAX_SOLUTIONS=800
//!     SOLVER_BRUTE_FORCE_MAX_NODES=100000
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
