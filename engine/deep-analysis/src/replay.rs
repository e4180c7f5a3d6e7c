//! Guided replay of a finished analysis and a human-readable tree dump.

use std::fmt::Write as _;

use num_bigint::BigInt;
use num_rational::BigRational;
use tracing::debug;

use solver_core::decimal::to_decimal_string;
use solver_core::Location;

use crate::node::NodeId;
use crate::search::BruteForceAnalysis;

/// A move recommended by the analysis tree, together with its chances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub loc: Location,
    /// Chance the recommended square is not a mine.
    pub survival: BigRational,
    /// Chance the whole game resolves without guessing from here.
    pub solve: BigRational,
}

impl BruteForceAnalysis {
    /// Advances through the tree as the game is played and returns the next
    /// recommended move, or `None` once no living squares remain.
    ///
    /// `revealed` reports the value a square turned out to have, if it has
    /// been played since the last call. An incomplete analysis never gives
    /// recommendations.
    pub fn next_move<F>(&mut self, revealed: F) -> Option<Recommendation>
    where
        F: Fn(&Location) -> Option<u8>,
    {
        if !self.is_completed() {
            return None;
        }

        if let Some(expected) = self.expected_move.take() {
            let value = revealed(&expected)
                .expect("previously recommended move has not been played");
            let best = self
                .tree
                .get(self.current)
                .best
                .as_ref()
                .expect("replay position has no analysed move");
            assert_eq!(
                self.locations[best.index as usize], expected,
                "replay position does not match the recommended move"
            );
            self.current = best.children[value as usize]
                .expect("revealed value never occurs in the remaining solutions");
            debug!(
                location = %expected,
                value,
                solutions = self.tree.get(self.current).solution_size(),
                "replay advanced"
            );
        }

        let node = self.tree.get(self.current);
        let best = node.best.as_ref()?;
        let size = BigInt::from(node.solution_size());

        let loc = self.locations[best.index as usize];
        let survival = BigRational::new(
            BigInt::from(node.solution_size() as u64 - u64::from(best.mines)),
            size.clone(),
        );
        let solve = BigRational::new(BigInt::from(node.winning_lines), size);

        self.expected_move = Some(loc);
        Some(Recommendation { loc, survival, solve })
    }

    /// The move the analysis is waiting to see played, if any.
    pub fn expected_move(&self) -> Option<Location> {
        self.expected_move
    }

    /// Chance of clearing the board without guessing, with best play from
    /// the start.
    pub fn solve_probability(&self) -> BigRational {
        let node = self.tree.get(self.top);
        BigRational::new(
            BigInt::from(node.winning_lines),
            BigInt::from(node.solution_size()),
        )
    }

    /// Renders the move tree as indented text, one node per line.
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        let node = self.tree.get(self.top);
        let _ = writeln!(out, "{} solutions remain", node.solution_size());
        self.dump_node(self.top, 1, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.tree.get(id);
        let best = match &node.best {
            Some(best) => best,
            None => return,
        };
        let indent = ".".repeat(depth * 3);
        let size = BigInt::from(node.solution_size());
        let survival = BigRational::new(
            BigInt::from(node.solution_size() as u64 - u64::from(best.mines)),
            size.clone(),
        );
        let solve = BigRational::new(BigInt::from(node.winning_lines), size);
        let _ = writeln!(
            out,
            "{}play {} survival chance {}% solve chance {}%",
            indent,
            self.locations[best.index as usize],
            percent(&survival),
            percent(&solve)
        );

        for (value, child) in best.children.iter().enumerate() {
            let child = match child {
                Some(child) => *child,
                None => continue,
            };
            let _ = writeln!(
                out,
                "{}when '{}' => {} solutions remain",
                indent,
                value,
                self.tree.get(child).solution_size()
            );
            self.dump_node(child, depth + 1, out);
        }
    }
}

fn percent(probability: &BigRational) -> String {
    to_decimal_string(&(probability * BigRational::from_integer(BigInt::from(100))), 2)
}
