//! Exact probability analysis for a witness web.
//!
//! Given the constraint graph built by `solver-core`, this crate computes
//! the exact probability of every box being a mine, the off-edge
//! probability, and the pairs of boxes whose mine states always agree or
//! always oppose.
//!
//! # Example
//!
//! ```no_run
//! use prob_engine::{EngineParams, ProbabilityEngine};
//! use rand::SeedableRng;
//! use solver_core::{Location, WitnessObservation, WitnessWeb};
//!
//! let observations = [WitnessObservation {
//!     loc: Location::new(0, 0),
//!     mines: 1,
//! }];
//! let unrevealed = [Location::new(0, 1), Location::new(1, 1)];
//! let web = WitnessWeb::new(&observations, &unrevealed, 1);
//!
//! let mut engine = ProbabilityEngine::new(&web, 2, 1, &[], EngineParams::default());
//! let mut rng = rand::rngs::StdRng::from_entropy();
//! engine.process(&mut rng);
//!
//! assert!(!engine.is_contradiction());
//! println!("{}", engine.probability_text(&unrevealed[0]));
//! ```

mod candidate;
mod engine;
mod line;

pub use candidate::{CandidateLocation, LinkedLocation};
pub use engine::{EngineParams, ProbabilityEngine};
