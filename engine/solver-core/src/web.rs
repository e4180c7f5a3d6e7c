//! Witness web construction.
//!
//! Builds the full constraint graph for a board position: deduplicates
//! witnesses, flood-fills connected sub-webs, selects a greedy independent
//! witness subset, and partitions the squares into boxes.

use num_bigint::BigUint;
use num_traits::One;
use tracing::debug;

use crate::combinatorics::combination;
use crate::location::Location;
use crate::model::{BoxGroup, BoxId, Square, SquareId, Witness, WitnessId, WitnessObservation};

/// The constraint graph for one board position. A board may decompose into
/// multiple disjoint sub-webs; [`WitnessWeb::sub_webs`] splits them out so
/// each can be analysed independently.
#[derive(Debug, Clone)]
pub struct WitnessWeb {
    squares: Vec<Square>,
    witnesses: Vec<Witness>,
    boxes: Vec<BoxGroup>,
    independent: Vec<WitnessId>,
    independent_mines: u32,
    independent_iterations: BigUint,
    /// Squares not covered by any independent witness.
    shared_squares: usize,
    web_count: u32,
    pruned: u32,
    mines_left: u32,
}

impl WitnessWeb {
    /// Builds the web from raw board data. `unrevealed` should list the
    /// squares adjacent to at least one witness; squares nobody witnesses
    /// are accounted for separately as off-web squares. `mines_left` is the
    /// number of unconfirmed mines left in the whole game and bounds every
    /// box's admissible mine range.
    ///
    /// Panics if the flood fill finds a square claimed by two different
    /// sub-webs; that indicates a construction bug, not bad input.
    pub fn new(
        observations: &[WitnessObservation],
        unrevealed: &[Location],
        mines_left: u32,
    ) -> Self {
        let mut squares: Vec<Square> = unrevealed.iter().map(|&loc| Square::new(loc)).collect();

        // dedup equivalent witnesses as they arrive
        let mut witnesses: Vec<Witness> = Vec::with_capacity(observations.len());
        let mut pruned = 0u32;
        for obs in observations {
            let adjacent: Vec<SquareId> = squares
                .iter()
                .enumerate()
                .filter(|(_, s)| s.loc.is_adjacent(&obs.loc))
                .map(|(i, _)| SquareId(i as u32))
                .collect();
            if witnesses.iter().any(|w| w.equivalent(obs.mines, &adjacent)) {
                pruned += 1;
                continue;
            }
            witnesses.push(Witness::new(obs.loc, obs.mines, adjacent));
        }

        // most constraining witnesses first
        witnesses.sort_by(|a, b| b.arrangements().cmp(&a.arrangements()));

        for (idx, wit) in witnesses.iter().enumerate() {
            for &sid in &wit.squares {
                squares[sid.0 as usize].witnesses.push(WitnessId(idx as u32));
            }
        }

        // greedy maximal set of pairwise non-overlapping witnesses
        let mut independent: Vec<WitnessId> = Vec::new();
        let mut independent_mines = 0u32;
        let mut independent_iterations = BigUint::one();
        let mut shared_squares = squares.len();
        for (idx, wit) in witnesses.iter().enumerate() {
            let overlaps = independent
                .iter()
                .any(|&iw| wit.overlaps(&witnesses[iw.0 as usize]));
            if !overlaps {
                shared_squares -= wit.squares.len();
                independent_iterations *= combination(wit.mines, wit.squares.len() as u32);
                independent_mines += wit.mines;
                independent.push(WitnessId(idx as u32));
            }
        }

        let web_count = flood_fill(&mut squares, &mut witnesses);

        debug!(
            witnesses = witnesses.len(),
            pruned,
            squares = squares.len(),
            sub_webs = web_count,
            "witness web built"
        );

        let boxes = build_boxes(&mut squares, &mut witnesses, mines_left);

        Self {
            squares,
            witnesses,
            boxes,
            independent,
            independent_mines,
            independent_iterations,
            shared_squares,
            web_count,
            pruned,
            mines_left,
        }
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    pub fn witness(&self, id: WitnessId) -> &Witness {
        &self.witnesses[id.0 as usize]
    }

    pub fn boxes(&self) -> &[BoxGroup] {
        &self.boxes
    }

    pub fn box_group(&self, id: BoxId) -> &BoxGroup {
        &self.boxes[id.0 as usize]
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn independent_witnesses(&self) -> &[WitnessId] {
        &self.independent
    }

    /// Mines forced by the independent witnesses. No solution can place
    /// fewer mines on the web than this.
    pub fn independent_mines(&self) -> u32 {
        self.independent_mines
    }

    pub fn independent_iterations(&self) -> &BigUint {
        &self.independent_iterations
    }

    /// Squares not covered by any independent witness.
    pub fn shared_squares(&self) -> usize {
        self.shared_squares
    }

    /// Equivalent witnesses dropped during construction.
    pub fn pruned(&self) -> u32 {
        self.pruned
    }

    pub fn web_count(&self) -> u32 {
        self.web_count
    }

    pub fn mines_left(&self) -> u32 {
        self.mines_left
    }

    /// How many candidate arrangements a full enumeration of this web with
    /// `mines` mines would have to consider.
    pub fn iterations(&self, mines: u32) -> BigUint {
        if !self.mines_in_range(mines) {
            return BigUint::default();
        }
        &self.independent_iterations
            * combination(mines - self.independent_mines, self.shared_squares as u32)
    }

    /// Arrangements of the non-independent squares alone.
    pub fn non_independent_iterations(&self, mines: u32) -> BigUint {
        if !self.mines_in_range(mines) {
            return BigUint::default();
        }
        combination(mines - self.independent_mines, self.shared_squares as u32)
    }

    fn mines_in_range(&self, mines: u32) -> bool {
        mines >= self.independent_mines
            && mines <= self.independent_mines + self.shared_squares as u32
    }

    /// Splits the web into its connected components, rebuilt as standalone
    /// webs. A single-component web is returned as-is.
    pub fn sub_webs(&self) -> Vec<WitnessWeb> {
        if self.web_count <= 1 {
            return vec![self.clone()];
        }
        (1..=self.web_count)
            .map(|n| {
                let observations: Vec<WitnessObservation> = self
                    .witnesses
                    .iter()
                    .filter(|w| w.web == n)
                    .map(|w| WitnessObservation {
                        loc: w.loc,
                        mines: w.mines,
                    })
                    .collect();
                let unrevealed: Vec<Location> = self
                    .squares
                    .iter()
                    .filter(|s| s.web == n)
                    .map(|s| s.loc)
                    .collect();
                WitnessWeb::new(&observations, &unrevealed, self.mines_left)
            })
            .collect()
    }

    pub fn is_on_web(&self, loc: &Location) -> bool {
        self.squares.iter().any(|s| s.loc == *loc)
    }

    /// The box containing the square at `loc`, if the location is on the web.
    pub fn square_box(&self, loc: &Location) -> Option<BoxId> {
        self.squares
            .iter()
            .find(|s| s.loc == *loc)
            .and_then(|s| s.box_id)
    }
}

/// Assigns a web id to every square and witness, one id per connected
/// component of the witness-square bipartite graph.
fn flood_fill(squares: &mut [Square], witnesses: &mut [Witness]) -> u32 {
    let mut web_count = 0u32;
    let mut stack: Vec<SquareId> = Vec::new();
    for start in 0..squares.len() {
        if squares[start].web != 0 {
            continue;
        }
        web_count += 1;
        stack.push(SquareId(start as u32));
        while let Some(sid) = stack.pop() {
            let square = &mut squares[sid.0 as usize];
            if square.web == web_count {
                continue;
            }
            if square.web != 0 {
                panic!(
                    "square {} claimed by web {} while filling web {}",
                    square.loc, square.web, web_count
                );
            }
            square.web = web_count;
            for wid in squares[sid.0 as usize].witnesses.clone() {
                let wit = &mut witnesses[wid.0 as usize];
                wit.web = web_count;
                stack.extend(wit.squares.iter().copied());
            }
        }
    }
    web_count
}

/// Groups squares with identical witness sets into boxes and derives each
/// box's admissible mine range.
fn build_boxes(
    squares: &mut [Square],
    witnesses: &mut [Witness],
    mines_left: u32,
) -> Vec<BoxGroup> {
    let mut boxes: Vec<BoxGroup> = Vec::new();
    for (idx, square) in squares.iter_mut().enumerate() {
        let sid = SquareId(idx as u32);
        match boxes.iter_mut().find(|b| b.fits(&square.witnesses)) {
            Some(existing) => {
                existing.squares.push(sid);
                square.box_id = Some(existing.id);
            }
            None => {
                let id = BoxId(boxes.len() as u32);
                boxes.push(BoxGroup::new(id, sid, square.witnesses.clone()));
                square.box_id = Some(id);
            }
        }
    }

    for b in &boxes {
        for &wid in &b.witnesses {
            witnesses[wid.0 as usize].boxes.push(b.id);
        }
    }

    // max first, min needs every neighbour's max
    for i in 0..boxes.len() {
        let size = boxes[i].size() as u32;
        let witness_cap = boxes[i]
            .witnesses
            .iter()
            .map(|&wid| witnesses[wid.0 as usize].mines)
            .min()
            .unwrap_or(u32::MAX);
        boxes[i].max_mines = size.min(mines_left).min(witness_cap);
    }
    for i in 0..boxes.len() {
        let mut min_mines = 0u32;
        for &wid in &boxes[i].witnesses.clone() {
            let wit = &witnesses[wid.0 as usize];
            let other_capacity: u32 = wit
                .boxes
                .iter()
                .filter(|&&b| b != boxes[i].id)
                .map(|&b| boxes[b.0 as usize].max_mines)
                .sum();
            min_mines = min_mines.max(wit.mines.saturating_sub(other_capacity));
        }
        boxes[i].min_mines = min_mines.min(boxes[i].max_mines);
    }

    boxes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(x: u16, y: u16, mines: u32) -> WitnessObservation {
        WitnessObservation {
            loc: Location::new(x, y),
            mines,
        }
    }

    fn locs(points: &[(u16, u16)]) -> Vec<Location> {
        points.iter().map(|&(x, y)| Location::new(x, y)).collect()
    }

    #[test]
    fn test_duplicate_witnesses_pruned() {
        // both witnesses see exactly {(0,1)} with one mine to find
        let web = WitnessWeb::new(&[obs(0, 0, 1), obs(1, 0, 1)], &locs(&[(0, 1)]), 1);
        assert_eq!(web.witnesses().len(), 1);
        assert_eq!(web.pruned(), 1);
    }

    #[test]
    fn test_box_partition_two_overlapping_witnesses() {
        // w1 sees {(0,1),(1,1),(2,1)}, w2 sees {(2,1),(3,1),(4,1)}
        let web = WitnessWeb::new(
            &[obs(1, 0, 1), obs(3, 0, 1)],
            &locs(&[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)]),
            2,
        );
        assert_eq!(web.witnesses().len(), 2);
        assert_eq!(web.box_count(), 3);
        assert_eq!(web.web_count(), 1);

        // every square lands in exactly one box with matching adjacency
        for square in web.squares() {
            let b = web.box_group(square.box_id.unwrap());
            assert!(b.squares.iter().any(|&sid| web.squares()[sid.0 as usize].loc == square.loc));
            assert_eq!(b.witnesses, square.witnesses);
        }

        // the shared square forms its own box
        let shared = web.square_box(&Location::new(2, 1)).unwrap();
        assert_eq!(web.box_group(shared).size(), 1);
        assert_eq!(web.box_group(shared).witnesses.len(), 2);
    }

    #[test]
    fn test_independent_witness_selection() {
        let web = WitnessWeb::new(
            &[obs(1, 0, 1), obs(3, 0, 1)],
            &locs(&[(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)]),
            2,
        );
        // the two witnesses overlap so only one can be independent
        assert_eq!(web.independent_witnesses().len(), 1);
        assert_eq!(web.independent_mines(), 1);
        assert_eq!(web.shared_squares(), 2);
        assert_eq!(*web.independent_iterations(), BigUint::from(3u32));
        // 3 arrangements around the independent witness, C(2,1) for the rest
        assert_eq!(web.iterations(2), BigUint::from(6u32));
        assert_eq!(web.non_independent_iterations(2), BigUint::from(2u32));
        // too few or too many mines means nothing to enumerate
        assert_eq!(web.iterations(0), BigUint::default());
        assert_eq!(web.iterations(4), BigUint::default());
    }

    #[test]
    fn test_disjoint_sub_webs() {
        let web = WitnessWeb::new(
            &[obs(0, 0, 1), obs(10, 10, 1)],
            &locs(&[(0, 1), (10, 11)]),
            2,
        );
        assert_eq!(web.web_count(), 2);
        let subs = web.sub_webs();
        assert_eq!(subs.len(), 2);
        for sub in &subs {
            assert_eq!(sub.witnesses().len(), 1);
            assert_eq!(sub.squares().len(), 1);
            assert_eq!(sub.web_count(), 1);
        }
    }

    #[test]
    fn test_single_component_sub_web_is_self() {
        let web = WitnessWeb::new(&[obs(0, 0, 1)], &locs(&[(0, 1), (1, 1)]), 1);
        let subs = web.sub_webs();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].squares().len(), 2);
    }

    #[test]
    fn test_box_mine_ranges() {
        // one witness "1" over two squares, one mine left: the single box
        // must hold exactly one mine
        let web = WitnessWeb::new(&[obs(0, 0, 1)], &locs(&[(0, 1), (1, 1)]), 1);
        assert_eq!(web.box_count(), 1);
        let b = &web.boxes()[0];
        assert_eq!(b.min_mines, 1);
        assert_eq!(b.max_mines, 1);
    }

    #[test]
    fn test_zero_witness_box_range() {
        let web = WitnessWeb::new(&[obs(1, 0, 0)], &locs(&[(0, 1), (1, 1), (2, 1)]), 5);
        let b = &web.boxes()[0];
        assert_eq!(b.min_mines, 0);
        assert_eq!(b.max_mines, 0);
    }

    #[test]
    fn test_is_on_web() {
        let web = WitnessWeb::new(&[obs(0, 0, 1)], &locs(&[(0, 1)]), 1);
        assert!(web.is_on_web(&Location::new(0, 1)));
        assert!(!web.is_on_web(&Location::new(5, 5)));
    }
}
