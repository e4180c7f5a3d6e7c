//! Board coordinates.

use std::fmt;

/// A coordinate on the board.
///
/// Ordering is row-major (by `y`, then `x`) so that sorted collections of
/// locations are deterministic regardless of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub x: u16,
    pub y: u16,
}

impl Location {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// True if `other` is one of the up-to-8 neighbouring cells.
    pub fn is_adjacent(&self, other: &Location) -> bool {
        if self == other {
            return false;
        }
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx <= 1 && dy <= 1
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let a = Location::new(3, 3);

        assert!(a.is_adjacent(&Location::new(2, 2)));
        assert!(a.is_adjacent(&Location::new(4, 3)));
        assert!(a.is_adjacent(&Location::new(3, 4)));

        // not adjacent to itself
        assert!(!a.is_adjacent(&a));
        // two cells away
        assert!(!a.is_adjacent(&Location::new(5, 3)));
        assert!(!a.is_adjacent(&Location::new(1, 4)));
    }

    #[test]
    fn test_row_major_order() {
        let mut locs = vec![
            Location::new(0, 1),
            Location::new(5, 0),
            Location::new(1, 1),
            Location::new(0, 0),
        ];
        locs.sort();
        assert_eq!(
            locs,
            vec![
                Location::new(0, 0),
                Location::new(5, 0),
                Location::new(0, 1),
                Location::new(1, 1),
            ]
        );
    }
}
