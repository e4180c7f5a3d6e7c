//! Exact deep analysis of small minesweeper boundaries.
//!
//! Given every mine arrangement consistent with the visible board, this
//! crate searches the full game tree to find the move order that resolves
//! the most arrangements without ever guessing.
//!
//! # Overview
//!
//! The search runs in four phases:
//!
//! 1. **Collection**: enumerated solutions are gathered into a
//!    [`SolutionTable`], capped so hopeless positions fail fast
//! 2. **Living detection**: squares whose value still varies across the
//!    remaining solutions are the only candidate moves
//! 3. **Expansion**: playing a square partitions the solutions by its
//!    revealed value; each partition becomes a child node
//! 4. **Minimax**: each node keeps the move maximizing its winning lines,
//!    memoized by position and pruned against the best sibling so far
//!
//! # Usage
//!
//! ```rust,ignore
//! use deep_analysis::{AnalysisConfig, BruteForceAnalysis, SolutionTable, MINE};
//! use solver_core::Location;
//!
//! let table = SolutionTable::new(2, 400);
//! table.add_solution(vec![1, MINE])?;
//! table.add_solution(vec![0, 1])?;
//!
//! let locations = vec![Location::new(4, 2), Location::new(5, 2)];
//! let mut analysis =
//!     BruteForceAnalysis::new(table, locations, AnalysisConfig::default())?;
//! analysis.process();
//!
//! println!("solve chance: {}", analysis.solve_probability());
//! if let Some(rec) = analysis.next_move(|_| None) {
//!     println!("play {} (survival {})", rec.loc, rec.survival);
//! }
//! ```
//!
//! # Configuration
//!
//! [`AnalysisConfig`] controls the search: the node budget, whether sibling
//! pruning and the position cache are enabled, and the cache entry
//! threshold. Defaults come from the central configuration layer.

mod config;
mod node;
mod position;
mod replay;
mod search;
mod solutions;
mod tree;

pub use config::AnalysisConfig;
pub use replay::Recommendation;
pub use search::{AnalysisError, BruteForceAnalysis};
pub use solutions::{SolutionTable, MINE};
pub use tree::CacheStats;
