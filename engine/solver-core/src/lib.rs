//! Core types for the Minesweeper solver engines.
//!
//! This crate provides the constraint-graph model shared by the probability
//! and deep-analysis engines:
//!
//! - `Location`: a board coordinate with Chebyshev adjacency
//! - `Square` / `Witness` / `BoxGroup`: the constraint-graph vertices,
//!   cross-referenced by arena-index ids
//! - `WitnessWeb`: the full constraint graph for one region of the board,
//!   with sub-web decomposition and the independent witness subset
//! - exact combinatorics (`combination`, the small Pascal table) and
//!   fixed-precision decimal rounding helpers

pub mod combinatorics;
pub mod decimal;
pub mod location;
pub mod model;
pub mod web;

// Re-export main types for convenience
pub use combinatorics::{combination, small_combination, MAX_NEIGHBOURS};
pub use location::Location;
pub use model::{BoxGroup, BoxId, Square, SquareId, Witness, WitnessId, WitnessObservation};
pub use web::WitnessWeb;
