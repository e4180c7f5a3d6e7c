//! Result types exposed to the move-selection layer.

use num_rational::BigRational;
use solver_core::Location;
use std::cmp::Ordering;

/// A square worth considering for the next move, ranked by its probability
/// of being safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLocation {
    pub loc: Location,
    /// Probability the square is NOT a mine.
    pub probability: BigRational,
}

impl CandidateLocation {
    pub fn new(loc: Location, probability: BigRational) -> Self {
        Self { loc, probability }
    }
}

impl Ord for CandidateLocation {
    // safest first, then board order
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .probability
            .cmp(&self.probability)
            .then_with(|| self.loc.cmp(&other.loc))
    }
}

impl PartialOrd for CandidateLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A square whose mine state always matches (or always opposes) the mine
/// state of a set of other squares, across every valid solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedLocation {
    pub loc: Location,
    links: Vec<Location>,
}

impl LinkedLocation {
    pub(crate) fn new(loc: Location, links: &[Location]) -> Self {
        Self {
            loc,
            links: links.to_vec(),
        }
    }

    pub(crate) fn add_links(&mut self, links: &[Location]) {
        for &l in links {
            if !self.links.contains(&l) {
                self.links.push(l);
            }
        }
    }

    pub fn links(&self) -> &[Location] {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn ratio(num: i32, den: i32) -> BigRational {
        BigRational::new(num.into(), den.into())
    }

    #[test]
    fn test_candidate_sort_order() {
        let mut candidates = vec![
            CandidateLocation::new(Location::new(3, 0), ratio(1, 2)),
            CandidateLocation::new(Location::new(0, 0), BigRational::one()),
            CandidateLocation::new(Location::new(1, 0), ratio(1, 2)),
        ];
        candidates.sort();
        assert_eq!(candidates[0].loc, Location::new(0, 0));
        assert_eq!(candidates[1].loc, Location::new(1, 0));
        assert_eq!(candidates[2].loc, Location::new(3, 0));
    }

    #[test]
    fn test_linked_location_dedups_links() {
        let mut ll = LinkedLocation::new(Location::new(0, 0), &[Location::new(1, 1)]);
        ll.add_links(&[Location::new(1, 1), Location::new(2, 2)]);
        assert_eq!(ll.links().len(), 2);
    }
}
