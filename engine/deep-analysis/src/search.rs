//! Minimax winning-lines search.
//!
//! Implements the core deep analysis:
//! 1. Determine which squares are living (still carry information)
//! 2. Partition the solution slice by each living square's revealed value
//! 3. Recurse into each partition, maximizing winning lines
//! 4. Memoize subtrees by position and prune dominated candidates

use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use solver_core::Location;

use crate::config::AnalysisConfig;
use crate::node::{Living, Node, NodeId};
use crate::position::Position;
use crate::solutions::{SolutionTable, MINE};
use crate::tree::{AnalysisTree, CacheStats};

/// Errors that can occur setting up a deep analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("solution has {got} values, expected {expected}")]
    SolutionLength { expected: usize, got: usize },

    #[error("no solutions to analyse")]
    NoSolutions,

    #[error("too many solutions collected, exact analysis unavailable")]
    TooManySolutions,
}

/// Exhaustive minimax search over every enumerated solution, maximizing
/// the number of solutions that remain uniquely resolvable without ever
/// guessing.
///
/// Build from a filled [`SolutionTable`], call [`process`](Self::process)
/// once, then read the best move through the replay interface. A run that
/// exhausts its node budget is flagged incomplete and must be treated as
/// informational only.
pub struct BruteForceAnalysis {
    pub(crate) locations: Vec<Location>,
    pub(crate) rows: Vec<Box<[u8]>>,
    config: AnalysisConfig,
    pub(crate) tree: AnalysisTree,
    pub(crate) top: NodeId,
    pub(crate) current: NodeId,
    pub(crate) expected_move: Option<Location>,
    node_count: u64,
    completed: bool,
}

impl BruteForceAnalysis {
    /// Takes ownership of the collected solutions. Fails when the table is
    /// empty, overflowed its cap, or was built for a different number of
    /// locations.
    pub fn new(
        table: SolutionTable,
        locations: Vec<Location>,
        config: AnalysisConfig,
    ) -> Result<Self, AnalysisError> {
        if table.width() != locations.len() {
            return Err(AnalysisError::SolutionLength {
                expected: locations.len(),
                got: table.width(),
            });
        }
        let (rows, too_many) = table.into_rows();
        if too_many {
            return Err(AnalysisError::TooManySolutions);
        }
        if rows.is_empty() {
            return Err(AnalysisError::NoSolutions);
        }

        let mut tree = AnalysisTree::new();
        let top = tree.allocate(Node::new(Position::new(locations.len()), 0, rows.len()));
        Ok(Self {
            locations,
            rows,
            config,
            tree,
            top,
            current: top,
            expected_move: None,
            node_count: 0,
            completed: false,
        })
    }

    /// Runs the search. Call once per analysis instance.
    pub fn process(&mut self) {
        let start = Instant::now();
        debug!(solutions = self.rows.len(), "deep analysis starting");

        let mut top_living = self.determine_top_living();
        let mut best = 0u32;

        for i in 0..top_living.len() {
            let winning_lines = self.process_living(1, self.top, &mut top_living, i, best);
            let alive = &top_living[i];

            let better = best < winning_lines
                || (self.config.tie_break
                    && best == winning_lines
                    && self
                        .tree
                        .get(self.top)
                        .best
                        .as_ref()
                        .is_some_and(|b| b.mines > alive.mines));
            if better {
                best = winning_lines;
                self.tree.get_mut(self.top).best = Some(alive.clone());
            }

            debug!(
                location = %self.locations[alive.index as usize],
                values = alive.count,
                mines = alive.mines,
                winning_lines,
                pruned = alive.pruned,
                "top-level candidate"
            );
        }

        self.tree.get_mut(self.top).winning_lines = best;
        self.current = self.top;

        if self.node_count <= self.config.max_nodes {
            self.completed = true;
        }

        // cached results never outlive this run
        self.tree.clear_cache();

        debug!(
            nodes = self.node_count,
            completed = self.completed,
            cache_hits = self.tree.stats.hits,
            cache_stored = self.tree.stats.stored,
            winning_lines_saved = self.tree.stats.winning_lines_saved,
            elapsed = ?start.elapsed(),
            "deep analysis finished"
        );
    }

    /// Evaluates playing `living[idx]` at the node `parent`. Returns the
    /// sum of the children's best winning-line counts; `cutoff` is the best
    /// total already found at the parent's level.
    fn process_living(
        &mut self,
        depth: u32,
        parent: NodeId,
        living: &mut [Living],
        idx: usize,
        cutoff: u32,
    ) -> u32 {
        let mut result = 0u32;

        self.node_count += 1;
        if self.node_count > self.config.max_nodes {
            return result;
        }

        // the squares still in play for any child of this move
        let survivors: Vec<(u16, u8, u8)> = living
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != idx)
            .map(|(_, l)| (l.index, l.min_value, l.max_value))
            .collect();

        let mut not_mines = self.tree.get(parent).solution_size() as u32 - living[idx].mines;

        self.expand(parent, &mut living[idx]);
        let children = living[idx].children;

        for child in children.into_iter().flatten() {
            // best theoretically achievable total from here
            let max_winning_lines = result + not_mines;
            if self.config.prune && max_winning_lines <= cutoff {
                living[idx].pruned = true;
                return result;
            }

            if !self.tree.get(child).from_cache {
                let mut child_living = self.determine_living(child, &survivors);

                if child_living.is_empty() {
                    // no further information: all remaining solutions are
                    // indistinguishable, one winning line
                    self.tree.get_mut(child).winning_lines = 1;
                } else {
                    for j in 0..child_living.len() {
                        let node = self.tree.get(child);
                        // can't beat the winning lines already found here
                        if node.solution_size() as u32 - child_living[j].mines
                            <= node.winning_lines
                        {
                            break;
                        }
                        let best_so_far = node.winning_lines;
                        let winning_lines =
                            self.process_living(depth + 1, child, &mut child_living, j, best_so_far);

                        let alive = &child_living[j];
                        let node = self.tree.get_mut(child);
                        let better = node.winning_lines < winning_lines
                            || (self.config.tie_break
                                && node.winning_lines == winning_lines
                                && node.best.as_ref().is_some_and(|b| b.mines > alive.mines));
                        if better {
                            node.winning_lines = winning_lines;
                            node.best = Some(alive.clone());
                        }

                        // a mine-free candidate is 100% safe, nothing beats it
                        if alive.mines == 0 {
                            break;
                        }
                    }

                    let node = self.tree.get(child);
                    if self.config.use_cache && node.winning_lines > self.config.cache_threshold {
                        let position = node.position.clone();
                        self.tree.cache_insert(position, child);
                    }
                }
            }

            result += self.tree.get(child).winning_lines;
            not_mines -= self.tree.get(child).solution_size() as u32;
        }

        result
    }

    /// Sorts the parent's solution slice by the square's value and carves
    /// it into one child node per revealed value. Mines sort to the tail
    /// and get no child.
    fn expand(&mut self, parent: NodeId, alive: &mut Living) {
        let (start, end) = {
            let node = self.tree.get(parent);
            (node.start, node.end)
        };
        let column = alive.index as usize;

        self.rows[start..end].sort_by(|a, b| a[column].cmp(&b[column]));

        let mut index = start;
        for value in alive.min_value..=alive.max_value {
            let position = self.tree.get(parent).position.child(column, value);

            let cached = if self.config.use_cache {
                self.tree.cache_get(&position)
            } else {
                None
            };

            if let Some(id) = cached {
                let node = self.tree.get_mut(id);
                node.from_cache = true;
                let saved = node.winning_lines;
                self.tree.stats.hits += 1;
                self.tree.stats.winning_lines_saved += u64::from(saved);
                alive.children[value as usize] = Some(id);
                // skip past this value's rows; MINE never matches
                while index < end && self.rows[index][column] <= value {
                    index += 1;
                }
            } else {
                let child_start = index;
                while index < end && self.rows[index][column] == value {
                    index += 1;
                }
                if index > child_start {
                    let id = self.tree.allocate(Node::new(position, child_start, index));
                    alive.children[value as usize] = Some(id);
                }
            }
        }

        // whatever is left at the tail must be exactly the mines
        if (end - index) as u32 != alive.mines {
            panic!(
                "unread solutions after expanding column {}: {} rows left, {} mines expected",
                column,
                end - index,
                alive.mines
            );
        }
    }

    /// Living squares over the whole solution table, for the top node.
    fn determine_top_living(&self) -> Vec<Living> {
        let survivors: Vec<(u16, u8, u8)> = (0..self.locations.len())
            .map(|i| (i as u16, 0, 8))
            .collect();
        self.determine_living(self.top, &survivors)
    }

    /// Restricts `survivors` to the node's solution slice. A square stays
    /// living while more than one non-mine value is possible; its value
    /// range can only narrow, never widen.
    fn determine_living(&self, node: NodeId, survivors: &[(u16, u8, u8)]) -> Vec<Living> {
        let (start, end) = {
            let n = self.tree.get(node);
            (n.start, n.end)
        };

        let mut living = Vec::with_capacity(survivors.len());
        for &(index, old_min, old_max) in survivors {
            let mut value_count = [0u32; 9];
            let mut mines = 0u32;
            for row in &self.rows[start..end] {
                let value = row[index as usize];
                if value == MINE {
                    mines += 1;
                } else {
                    value_count[value as usize] += 1;
                }
            }

            let mut alive = Living::new(index);
            alive.mines = mines;
            for value in old_min..=old_max {
                let count = value_count[value as usize];
                if count == 0 {
                    continue;
                }
                if alive.count == 0 {
                    alive.min_value = value;
                }
                alive.max_value = value;
                alive.count += 1;
                alive.max_solutions = alive.max_solutions.max(count);
            }
            if alive.count > 1 {
                living.push(alive);
            }
        }

        living.sort_by(|a, b| a.search_order(b));
        living
    }

    /// Solutions that remain uniquely resolvable from the top with best
    /// play.
    pub fn winning_lines(&self) -> u32 {
        self.tree.get(self.top).winning_lines
    }

    pub fn solution_count(&self) -> usize {
        self.rows.len()
    }

    /// Explored-node count for this run.
    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    /// False when the node budget ran out; the result is then best-effort,
    /// not proven optimal.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.tree.stats
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }
}
