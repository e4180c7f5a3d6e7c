//! Probability line accumulator.

use num_bigint::{BigInt, BigUint};
use rand::Rng;

/// Width of the random tag assigned to each line. Tags drive the linked-box
/// detection in the engine; at this width a collision across the lines of
/// one analysis is astronomically unlikely, but it is a statistical
/// invariant, not a guarantee.
pub(crate) const HASH_BITS: u32 = 20;

/// One admissible way of distributing mines over the boxes processed so
/// far. Lines are transient state inside a single engine run and are never
/// shared across runs.
#[derive(Debug, Clone)]
pub(crate) struct ProbabilityLine {
    /// Total mines placed by this line.
    pub mine_count: u32,
    /// Weighted count of concrete solutions this line stands for.
    pub solution_count: BigUint,
    /// Per-box mine tally; raw counts before crunching, solution-weighted
    /// afterwards.
    pub mine_box_count: Vec<BigUint>,
    /// Per-box signed tag tally used for linked-box detection.
    pub hash_count: Vec<BigInt>,
    /// Random tag for this line.
    pub hash: u64,
}

impl ProbabilityLine {
    pub fn new<R: Rng>(box_count: usize, rng: &mut R) -> Self {
        Self {
            mine_count: 0,
            solution_count: BigUint::default(),
            mine_box_count: vec![BigUint::default(); box_count],
            hash_count: vec![BigInt::default(); box_count],
            hash: rng.gen_range(1..(1u64 << HASH_BITS)),
        }
    }
}
