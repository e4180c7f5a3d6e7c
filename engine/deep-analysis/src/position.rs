//! Compact value-type key for a partially revealed position.

/// Marker for a square not yet revealed on the path to a node.
const UNPLAYED: u8 = 0xFE;

/// The ordered per-square values revealed on the path to a node. Two nodes
/// reached via different move orders but with identical revealed values
/// compare equal, which is what makes position caching work.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position(Box<[u8]>);

impl Position {
    pub(crate) fn new(len: usize) -> Self {
        Self(vec![UNPLAYED; len].into_boxed_slice())
    }

    /// Copy of this position with one more square revealed.
    pub(crate) fn child(&self, index: usize, value: u8) -> Self {
        let mut values = self.0.clone();
        values[index] = value;
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_move_order_does_not_matter() {
        let root = Position::new(3);
        let ab = root.child(0, 1).child(1, 2);
        let ba = root.child(1, 2).child(0, 1);
        assert_eq!(ab, ba);

        let mut map = HashMap::new();
        map.insert(ab, "cached");
        assert_eq!(map.get(&ba), Some(&"cached"));
    }

    #[test]
    fn test_distinct_values_differ() {
        let root = Position::new(2);
        assert_ne!(root.child(0, 1), root.child(0, 2));
        assert_ne!(root.child(0, 1), root.child(1, 1));
    }
}
