//! Decision-tree node representation.

use crate::position::Position;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A square that can still reveal information: it has more than one
/// distinguishable non-mine value across the remaining solutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Living {
    /// Column into the solution rows.
    pub index: u16,
    /// Remaining solutions with a mine here.
    pub mines: u32,
    /// Number of distinct non-mine values here.
    pub count: u8,
    pub min_value: u8,
    pub max_value: u8,
    /// Largest solution run any single value leaves behind.
    pub max_solutions: u32,
    /// Set when the search abandoned this candidate as dominated.
    pub pruned: bool,
    /// Child node per revealed value, filled during expansion.
    pub children: [Option<NodeId>; 9],
}

impl Living {
    pub fn new(index: u16) -> Self {
        Self {
            index,
            mines: 0,
            count: 0,
            min_value: 0,
            max_value: 0,
            max_solutions: 0,
            pruned: false,
            children: [None; 9],
        }
    }

    /// Search order: most likely to be clear first, then the most possible
    /// values, then the smallest worst-case solution run.
    pub fn search_order(&self, other: &Living) -> std::cmp::Ordering {
        self.mines
            .cmp(&other.mines)
            .then(other.count.cmp(&self.count))
            .then(self.max_solutions.cmp(&other.max_solutions))
    }
}

/// One point in the decision tree: a fixed assignment of revealed values
/// and the contiguous slice of the solution table consistent with it.
#[derive(Debug, Clone)]
pub struct Node {
    pub position: Position,
    /// Solution-table slice `start..end` consistent with this position.
    pub start: usize,
    pub end: usize,
    /// Solutions that remain uniquely resolvable from here with best play.
    pub winning_lines: u32,
    /// Whether this node was served from the position cache.
    pub from_cache: bool,
    /// The best next square to probe, kept for replay and tree dumps.
    pub best: Option<Living>,
}

impl Node {
    pub fn new(position: Position, start: usize, end: usize) -> Self {
        Self {
            position,
            start,
            end,
            winning_lines: 0,
            from_cache: false,
            best: None,
        }
    }

    pub fn solution_size(&self) -> usize {
        self.end - self.start
    }
}
