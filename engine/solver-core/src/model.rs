//! Constraint-graph vertices.
//!
//! Squares, witnesses and boxes reference each other by arena-index ids
//! owned by the [`WitnessWeb`](crate::web::WitnessWeb); the ids are newtypes
//! so the three index spaces cannot be mixed up.

use crate::combinatorics::small_combination;
use crate::location::Location;

/// Index of a square within its witness web.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquareId(pub u32);

/// Index of a witness within its witness web.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WitnessId(pub u32);

/// Index of a box within its witness web.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub u32);

/// One witness observation from the board: a revealed numbered cell next to
/// at least one unrevealed square. `mines` is the displayed number minus the
/// flags already confirmed around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitnessObservation {
    pub loc: Location,
    pub mines: u32,
}

/// One hidden, unrevealed cell.
#[derive(Debug, Clone)]
pub struct Square {
    pub loc: Location,
    /// Witnesses adjacent to this square.
    pub witnesses: Vec<WitnessId>,
    /// Connected-component id; 0 until assigned.
    pub web: u32,
    /// Assigned once boxing is complete.
    pub box_id: Option<BoxId>,
}

impl Square {
    pub(crate) fn new(loc: Location) -> Self {
        Self {
            loc,
            witnesses: Vec::new(),
            web: 0,
            box_id: None,
        }
    }
}

/// One revealed numbered cell constraining its unrevealed neighbours.
#[derive(Debug, Clone)]
pub struct Witness {
    pub loc: Location,
    /// Mines still to be found among `squares`.
    pub mines: u32,
    /// Adjacent unrevealed squares, sorted by id.
    pub squares: Vec<SquareId>,
    /// Boxes this witness touches; filled once boxing is complete.
    pub boxes: Vec<BoxId>,
    /// Connected-component id; 0 until assigned.
    pub web: u32,
}

impl Witness {
    pub(crate) fn new(loc: Location, mines: u32, squares: Vec<SquareId>) -> Self {
        Self {
            loc,
            mines,
            squares,
            boxes: Vec::new(),
            web: 0,
        }
    }

    /// Two witnesses are equivalent when they demand the same number of
    /// mines from exactly the same squares.
    pub fn equivalent(&self, mines: u32, squares: &[SquareId]) -> bool {
        self.mines == mines && self.squares == squares
    }

    /// True if the two witnesses share any square.
    pub fn overlaps(&self, other: &Witness) -> bool {
        self.squares.iter().any(|s| other.squares.contains(s))
    }

    /// Number of admissible mine arrangements around this witness.
    /// Used as a cheap sort key so the most constraining witnesses are
    /// processed first.
    pub fn arrangements(&self) -> u32 {
        small_combination(self.squares.len(), self.mines as usize)
    }
}

/// An equivalence class of squares appearing in exactly the same witnesses.
/// Boxes, not squares, are the unit of combinatorial enumeration.
#[derive(Debug, Clone)]
pub struct BoxGroup {
    pub id: BoxId,
    /// Member squares; all share the witness set below.
    pub squares: Vec<SquareId>,
    /// Witnesses referencing this box, sorted by id.
    pub witnesses: Vec<WitnessId>,
    /// Fewest mines any valid solution can place in this box.
    pub min_mines: u32,
    /// Most mines any valid solution can place in this box.
    pub max_mines: u32,
}

impl BoxGroup {
    pub(crate) fn new(id: BoxId, square: SquareId, witnesses: Vec<WitnessId>) -> Self {
        Self {
            id,
            squares: vec![square],
            witnesses,
            min_mines: 0,
            max_mines: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.squares.len()
    }

    /// A square fits this box when it is referenced by exactly the same
    /// witnesses.
    pub fn fits(&self, witnesses: &[WitnessId]) -> bool {
        self.witnesses == witnesses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn witness(mines: u32, squares: &[u32]) -> Witness {
        Witness::new(
            Location::new(0, 0),
            mines,
            squares.iter().map(|&s| SquareId(s)).collect(),
        )
    }

    #[test]
    fn test_witness_equivalence() {
        let w = witness(2, &[1, 2, 3]);
        assert!(w.equivalent(2, &[SquareId(1), SquareId(2), SquareId(3)]));
        assert!(!w.equivalent(1, &[SquareId(1), SquareId(2), SquareId(3)]));
        assert!(!w.equivalent(2, &[SquareId(1), SquareId(2)]));
    }

    #[test]
    fn test_witness_overlap() {
        let a = witness(1, &[1, 2]);
        let b = witness(1, &[2, 3]);
        let c = witness(1, &[4, 5]);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_witness_arrangements() {
        // C(3, 1) = 3 ways to place one mine among three squares
        assert_eq!(witness(1, &[1, 2, 3]).arrangements(), 3);
        // an over-constrained witness has no arrangements
        assert_eq!(witness(3, &[1, 2]).arrangements(), 0);
    }

    #[test]
    fn test_box_fits() {
        let b = BoxGroup::new(BoxId(0), SquareId(0), vec![WitnessId(0), WitnessId(2)]);
        assert!(b.fits(&[WitnessId(0), WitnessId(2)]));
        assert!(!b.fits(&[WitnessId(0)]));
        assert!(!b.fits(&[WitnessId(0), WitnessId(1)]));
    }
}
