//! Arena-based decision tree with a position cache.

use std::collections::HashMap;

use crate::node::{Node, NodeId};
use crate::position::Position;

/// Cache diagnostics for one analysis run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Positions served from the cache instead of being re-searched.
    pub hits: u64,
    /// Nodes stored in the cache.
    pub stored: u64,
    /// Winning lines that did not have to be recomputed.
    pub winning_lines_saved: u64,
}

/// Owns every node of one analysis run. Nodes are kept after the search so
/// the best-move pointers stay navigable for replay; only the cache map is
/// cleared.
#[derive(Debug, Default)]
pub struct AnalysisTree {
    nodes: Vec<Node>,
    cache: HashMap<Position, NodeId>,
    pub stats: CacheStats,
}

impl AnalysisTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn cache_get(&self, position: &Position) -> Option<NodeId> {
        self.cache.get(position).copied()
    }

    pub fn cache_insert(&mut self, position: Position, id: NodeId) {
        self.stats.stored += 1;
        self.cache.insert(position, id);
    }

    /// Dropped at the end of every run; cached results never outlive the
    /// board state they were computed for.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_lookup() {
        let mut tree = AnalysisTree::new();
        let pos = Position::new(2);
        let id = tree.allocate(Node::new(pos.clone(), 0, 4));
        assert_eq!(tree.get(id).solution_size(), 4);

        tree.cache_insert(pos.clone(), id);
        assert_eq!(tree.cache_get(&pos), Some(id));
        assert_eq!(tree.stats.stored, 1);

        tree.clear_cache();
        assert_eq!(tree.cache_get(&pos), None);
        // nodes survive a cache clear
        assert_eq!(tree.len(), 1);
    }
}
