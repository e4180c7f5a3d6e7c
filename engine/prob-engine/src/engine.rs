//! The exact probability engine.
//!
//! Enumerates every admissible distribution of mines over the boxes of a
//! [`WitnessWeb`] using exact big-integer arithmetic, merging independent
//! witness groups incrementally instead of iterating raw square
//! assignments.

use std::collections::HashMap;
use std::time::Instant;

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;
use tracing::{debug, warn};

use solver_core::combinatorics::SMALL_COMBINATIONS;
use solver_core::decimal;
use solver_core::{combination, BoxId, Location, WitnessId, WitnessWeb};

use crate::candidate::{CandidateLocation, LinkedLocation};
use crate::line::ProbabilityLine;

/// Tunables for one engine run.
#[derive(Debug, Clone)]
pub struct EngineParams {
    /// Decimal places used when probabilities are exposed as text.
    pub decimal_places: u32,
    /// Candidates within `best * tolerance` are treated as equally good.
    pub tolerance: f64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            decimal_places: solver_config::decimal_places(),
            tolerance: solver_config::tolerance(),
        }
    }
}

impl EngineParams {
    pub fn from_central(config: &solver_config::CentralConfig) -> Self {
        Self {
            decimal_places: config.probability.decimal_places,
            tolerance: config.probability.tolerance,
        }
    }
}

/// The witness the merge loop should expand next, split into boxes it has
/// already seen and boxes it introduces.
struct NextWitness {
    witness: WitnessId,
    new_boxes: Vec<BoxId>,
    old_boxes: Vec<BoxId>,
}

/// Exact per-box mine probabilities for one witness web.
///
/// Probabilities are safe-probabilities: 1 means certainly not a mine.
/// Build, call [`process`](Self::process) once, then read the results
/// through the accessors. A zero [`solution_count`](Self::solution_count)
/// means the position is contradictory and every probability is reported
/// as zero; callers must check that before trusting any value.
pub struct ProbabilityEngine<'a> {
    web: &'a WitnessWeb,
    dead: &'a [Location],
    box_count: usize,
    mines_left: u32,
    /// Unrevealed squares off the web.
    squares_left: u32,
    /// Fewest mines the web can use while still filling the rest of the
    /// board; may be negative when the board has spare capacity.
    min_total_mines: i64,
    max_total_mines: u32,
    decimal_places: u32,
    tolerance: BigRational,

    working: Vec<ProbabilityLine>,
    held: Vec<ProbabilityLine>,
    mask: Vec<bool>,
    witness_processed: Vec<bool>,
    box_processed: Vec<bool>,

    box_prob: Vec<BigRational>,
    hash_tally: Vec<BigInt>,
    off_edge_probability: BigRational,
    best_probability: BigRational,
    cutoff_probability: BigRational,
    off_edge_best: bool,
    linked: Vec<LinkedLocation>,
    contra_linked: Vec<LinkedLocation>,
    solution_count: BigUint,
    mine_counts: HashMap<u32, BigUint>,
    independent_groups: u32,
    recursions: u64,
}

impl<'a> ProbabilityEngine<'a> {
    /// `unrevealed_count` and `mines_left` cover the whole game, not just
    /// the web. `dead` lists squares flagged as strategically inert by the
    /// caller; they are excluded from best-guess selection unless certain.
    pub fn new(
        web: &'a WitnessWeb,
        unrevealed_count: u32,
        mines_left: u32,
        dead: &'a [Location],
        params: EngineParams,
    ) -> Self {
        let box_count = web.box_count();
        let squares_left = unrevealed_count.saturating_sub(web.squares().len() as u32);
        let tolerance =
            BigRational::from_float(params.tolerance).unwrap_or_else(BigRational::one);
        Self {
            web,
            dead,
            box_count,
            mines_left,
            squares_left,
            min_total_mines: mines_left as i64 - squares_left as i64,
            max_total_mines: mines_left,
            decimal_places: params.decimal_places,
            tolerance,
            working: Vec::new(),
            held: Vec::new(),
            mask: Vec::new(),
            witness_processed: vec![false; web.witnesses().len()],
            box_processed: vec![false; box_count],
            box_prob: vec![BigRational::zero(); box_count],
            hash_tally: vec![BigInt::default(); box_count],
            off_edge_probability: BigRational::zero(),
            best_probability: BigRational::zero(),
            cutoff_probability: BigRational::zero(),
            off_edge_best: true,
            linked: Vec::new(),
            contra_linked: Vec::new(),
            solution_count: BigUint::default(),
            mine_counts: HashMap::new(),
            independent_groups: 0,
            recursions: 0,
        }
    }

    /// Runs the full enumeration. Call once per engine instance.
    ///
    /// The rng only tags probability lines for linked-box detection; the
    /// computed probabilities are identical for every seed.
    pub fn process<R: Rng>(&mut self, rng: &mut R) {
        let start = Instant::now();

        // an initial solution of no mines anywhere
        let mut held = ProbabilityLine::new(self.box_count, rng);
        held.solution_count = BigUint::one();
        self.held.push(held);

        self.working.push(ProbabilityLine::new(self.box_count, rng));
        self.mask = vec![false; self.box_count];

        let mut witness = self.find_first_witness();
        while let Some(nw) = witness {
            // the new boxes are about to be merged in
            for &b in &nw.new_boxes {
                self.mask[b.0 as usize] = true;
            }
            self.working = self.merge_witness(&nw, rng);
            witness = self.find_next_witness(&nw, rng);
        }

        self.calculate_box_probabilities();

        debug!(
            solutions = %self.solution_count,
            groups = self.independent_groups,
            recursions = self.recursions,
            elapsed = ?start.elapsed(),
            "probability engine finished"
        );
    }

    /// Expands every working line over the witness's new boxes.
    fn merge_witness<R: Rng>(&mut self, nw: &NextWitness, rng: &mut R) -> Vec<ProbabilityLine> {
        let working = std::mem::take(&mut self.working);
        let mines = self.web.witness(nw.witness).mines;
        let mut new_probs = Vec::new();
        for pl in working {
            let placed = self.count_placed_mines(&pl, nw);
            if placed > mines {
                // too many mines already around this witness, invalid line
                continue;
            }
            let missing = mines - placed;
            if missing == 0 {
                new_probs.push(pl); // witness already exactly satisfied
            } else if !nw.new_boxes.is_empty() {
                new_probs.extend(self.distribute_missing_mines(pl, nw, missing, 0, rng));
            }
            // missing mines with nowhere to put them: invalid line
        }
        new_probs
    }

    /// Recursively places `missing` mines into the witness's new boxes,
    /// producing the Cartesian expansion of admissible lines.
    fn distribute_missing_mines<R: Rng>(
        &mut self,
        mut pl: ProbabilityLine,
        nw: &NextWitness,
        missing: u32,
        index: usize,
        rng: &mut R,
    ) -> Vec<ProbabilityLine> {
        self.recursions += 1;
        if self.recursions % 10_000 == 0 {
            debug!(recursions = self.recursions, "distributing mines");
        }

        let mut result = Vec::new();

        // last box: everything left must fit here
        if nw.new_boxes.len() - index == 1 {
            let b = self.web.box_group(nw.new_boxes[index]);
            if b.max_mines < missing
                || b.min_mines > missing
                || pl.mine_count + missing > self.max_total_mines
            {
                return result;
            }
            pl.mine_box_count[b.id.0 as usize] = BigUint::from(missing);
            pl.mine_count += missing;
            result.push(pl);
            return result;
        }

        let box_id = nw.new_boxes[index];
        let (min_mines, max_to_place) = {
            let b = self.web.box_group(box_id);
            (b.min_mines, b.max_mines.min(missing))
        };
        for i in min_mines..=max_to_place {
            let npl = self.extend_line(&pl, box_id, i, rng);
            result.extend(self.distribute_missing_mines(npl, nw, missing - i, index + 1, rng));
        }
        result
    }

    /// A copy of `pl` with `mines` placed in `box_id` and a fresh tag.
    fn extend_line<R: Rng>(
        &self,
        pl: &ProbabilityLine,
        box_id: BoxId,
        mines: u32,
        rng: &mut R,
    ) -> ProbabilityLine {
        let mut result = ProbabilityLine::new(self.box_count, rng);
        result.mine_count = pl.mine_count + mines;
        result.mine_box_count = pl.mine_box_count.clone();
        result.mine_box_count[box_id.0 as usize] = BigUint::from(mines);
        result
    }

    fn count_placed_mines(&self, pl: &ProbabilityLine, nw: &NextWitness) -> u32 {
        nw.old_boxes
            .iter()
            .map(|&b| box_mines(&pl.mine_box_count[b.0 as usize]))
            .sum()
    }

    fn make_next(&self, witness: WitnessId) -> NextWitness {
        let mut new_boxes = Vec::new();
        let mut old_boxes = Vec::new();
        for &b in &self.web.witness(witness).boxes {
            if self.box_processed[b.0 as usize] {
                old_boxes.push(b);
            } else {
                new_boxes.push(b);
            }
        }
        NextWitness {
            witness,
            new_boxes,
            old_boxes,
        }
    }

    fn find_first_witness(&self) -> Option<NextWitness> {
        (0..self.web.witnesses().len())
            .find(|&i| !self.witness_processed[i])
            .map(|i| self.make_next(WitnessId(i as u32)))
    }

    /// Picks the next witness on the boundary of the processed boxes,
    /// preferring witnesses introducing the fewest new boxes. When the
    /// boundary is exhausted the current independent group is closed and
    /// folded into the held lines.
    fn find_next_witness<R: Rng>(
        &mut self,
        prev: &NextWitness,
        rng: &mut R,
    ) -> Option<NextWitness> {
        self.witness_processed[prev.witness.0 as usize] = true;
        for &b in &prev.new_boxes {
            self.box_processed[b.0 as usize] = true;
        }

        let mut best_todo = usize::MAX;
        let mut best_witness = None;
        for (bi, b) in self.web.boxes().iter().enumerate() {
            if !self.box_processed[bi] {
                continue;
            }
            for &wid in &b.witnesses {
                if self.witness_processed[wid.0 as usize] {
                    continue;
                }
                let todo = self
                    .web
                    .witness(wid)
                    .boxes
                    .iter()
                    .filter(|b1| !self.box_processed[b1.0 as usize])
                    .count();
                if todo == 0 {
                    return Some(self.make_next(wid));
                }
                if todo < best_todo {
                    best_todo = todo;
                    best_witness = Some(wid);
                }
            }
        }
        if let Some(wid) = best_witness {
            return Some(self.make_next(wid));
        }

        // no boundary witness left: a complete independent group is done
        self.independent_groups += 1;

        let next = self.find_first_witness();

        // only fold trivial single-line groups in when nothing is left;
        // otherwise let them accumulate with the next group
        if self.working.len() > 1 || next.is_none() {
            self.store_probabilities(rng);
            self.working.clear();
            self.working.push(ProbabilityLine::new(self.box_count, rng));
            self.mask = vec![false; self.box_count];
        }

        next
    }

    /// Compresses `target` down to one line per distinct total mine count,
    /// weighting each line by its concrete solution count.
    fn crunch_by_mine_count<R: Rng>(
        &self,
        mut target: Vec<ProbabilityLine>,
        rng: &mut R,
    ) -> Vec<ProbabilityLine> {
        if target.is_empty() {
            return target;
        }
        target.sort_by_key(|pl| pl.mine_count);

        let mut result = Vec::new();
        let mut npl = ProbabilityLine::new(self.box_count, rng);
        npl.mine_count = target[0].mine_count;
        for pl in &target {
            if pl.mine_count != npl.mine_count {
                let mine_count = pl.mine_count;
                let finished =
                    std::mem::replace(&mut npl, ProbabilityLine::new(self.box_count, rng));
                npl.mine_count = mine_count;
                result.push(finished);
            }
            self.merge_line(&mut npl, pl);
        }
        result.push(npl);
        result
    }

    /// Folds one raw line into a crunched line, weighting it by the number
    /// of concrete solutions it stands for.
    fn merge_line(&self, npl: &mut ProbabilityLine, pl: &ProbabilityLine) {
        let boxes = self.web.boxes();

        let mut solutions = BigUint::one();
        for (i, count) in pl.mine_box_count.iter().enumerate() {
            solutions *= SMALL_COMBINATIONS[boxes[i].size()][box_mines(count) as usize];
        }
        npl.solution_count += &solutions;

        for i in 0..self.box_count {
            // only boxes touched by this group; untouched zero counts
            // would corrupt the tag tallies
            if !self.mask[i] {
                continue;
            }
            npl.mine_box_count[i] += &pl.mine_box_count[i] * &solutions;
            if pl.mine_box_count[i].is_zero() {
                // no mines counts as -1 rather than zero
                npl.hash_count[i] -= BigInt::from(pl.hash) * BigInt::from(boxes[i].size());
            } else {
                npl.hash_count[i] +=
                    BigInt::from(pl.mine_box_count[i].clone()) * BigInt::from(pl.hash);
            }
        }
    }

    /// Cross-merges the closed group's crunched lines with the held lines
    /// from every earlier group.
    fn store_probabilities<R: Rng>(&mut self, rng: &mut R) {
        let working = std::mem::take(&mut self.working);
        let crunched = self.crunch_by_mine_count(working, rng);

        let mut result = Vec::new();
        for pl in &crunched {
            for epl in &self.held {
                let mine_count = pl.mine_count + epl.mine_count;
                if mine_count > self.max_total_mines {
                    continue;
                }
                let mut npl = ProbabilityLine::new(self.box_count, rng);
                npl.mine_count = mine_count;
                npl.solution_count = &pl.solution_count * &epl.solution_count;
                for i in 0..self.box_count {
                    let w1 = &pl.mine_box_count[i] * &epl.solution_count;
                    let w2 = &epl.mine_box_count[i] * &pl.solution_count;
                    npl.mine_box_count[i] = w1 + w2;
                    npl.hash_count[i] = &epl.hash_count[i] + &pl.hash_count[i];
                }
                result.push(npl);
            }
        }

        result.sort_by_key(|pl| pl.mine_count);
        self.held.clear();

        // an empty result means an impossible position
        if result.is_empty() {
            return;
        }

        // combine into a single line per mine count
        let mut npl = ProbabilityLine::new(self.box_count, rng);
        npl.mine_count = result[0].mine_count;
        for pl in &result {
            if pl.mine_count != npl.mine_count {
                let mine_count = pl.mine_count;
                let finished =
                    std::mem::replace(&mut npl, ProbabilityLine::new(self.box_count, rng));
                npl.mine_count = mine_count;
                self.held.push(finished);
            }
            npl.solution_count += &pl.solution_count;
            for i in 0..self.box_count {
                npl.mine_box_count[i] += &pl.mine_box_count[i];
                npl.hash_count[i] += &pl.hash_count[i];
            }
        }
        self.held.push(npl);
    }

    /// Expands every held line across the off-web squares and derives the
    /// final per-box probabilities, the off-edge probability and the
    /// linked-box relations.
    fn calculate_box_probabilities(&mut self) {
        let boxes = self.web.boxes();

        let mut tally = vec![BigUint::default(); self.box_count];
        let mut total_tally = BigUint::default();
        let mut outside_tally = BigUint::default();

        for pl in &self.held {
            // lines using too few mines can't fill the rest of the board
            if (pl.mine_count as i64) < self.min_total_mines {
                continue;
            }
            if self
                .mine_counts
                .insert(pl.mine_count, pl.solution_count.clone())
                .is_some()
            {
                warn!(mines = pl.mine_count, "duplicate mine count in held lines");
            }

            // ways the rest of the board can be formed
            let mult = combination(self.mines_left - pl.mine_count, self.squares_left);
            outside_tally +=
                &mult * (self.mines_left - pl.mine_count) * &pl.solution_count;
            total_tally += &mult * &pl.solution_count;
            for i in 0..self.box_count {
                tally[i] += &mult * &pl.mine_box_count[i] / boxes[i].size() as u32;
                self.hash_tally[i] += &pl.hash_count[i];
            }
        }

        let total = BigInt::from(total_tally.clone());
        for i in 0..self.box_count {
            self.box_prob[i] = if total_tally.is_zero() {
                BigRational::zero()
            } else {
                BigRational::one()
                    - BigRational::new(BigInt::from(tally[i].clone()), total.clone())
            };
        }

        for i in 0..self.box_count {
            for j in (i + 1)..self.box_count {
                let h1 = &self.hash_tally[i] / BigInt::from(boxes[i].size());
                let h2 = &self.hash_tally[j] / BigInt::from(boxes[j].size());
                if h1 == h2 {
                    add_linked(&mut self.linked, self.web, boxes[i].id, boxes[j].id);
                    add_linked(&mut self.linked, self.web, boxes[j].id, boxes[i].id);
                }
                // one tally the negative of the other: i mine <=> j clear
                if h1 == -h2 {
                    add_linked(&mut self.contra_linked, self.web, boxes[i].id, boxes[j].id);
                    add_linked(&mut self.contra_linked, self.web, boxes[j].id, boxes[i].id);
                }
            }
        }
        // most-linked locations first
        self.linked
            .sort_by(|a, b| b.links().len().cmp(&a.links().len()));

        self.off_edge_probability = if self.squares_left != 0 && !total_tally.is_zero() {
            BigRational::one()
                - BigRational::new(BigInt::from(outside_tally), total)
                    / BigInt::from(self.squares_left)
        } else {
            BigRational::zero()
        };

        self.solution_count = total_tally;

        // look for an on-edge guess at least as good as off-edge
        let mut hwm = self.off_edge_probability.clone();
        self.off_edge_best = true;
        for (i, b) in boxes.iter().enumerate() {
            let living = b.squares.iter().any(|&sid| {
                !self.dead.contains(&self.web.squares()[sid.0 as usize].loc)
            });
            let prob = &self.box_prob[i];
            if (living || prob.is_one()) && *prob >= hwm {
                self.off_edge_best = false;
                hwm = prob.clone();
            }
        }
        self.best_probability = hwm;

        self.cutoff_probability = if self.best_probability.is_one() {
            BigRational::one()
        } else {
            &self.best_probability * &self.tolerance
        };
    }

    /// Safe-probability of the square at `loc`; off-edge probability when
    /// the location is not on the web.
    pub fn probability(&self, loc: &Location) -> BigRational {
        match self.web.square_box(loc) {
            Some(b) => self.box_prob[b.0 as usize].clone(),
            None => self.off_edge_probability.clone(),
        }
    }

    /// The probability at `loc` as fixed-precision text.
    pub fn probability_text(&self, loc: &Location) -> String {
        decimal::to_decimal_string(&self.probability(loc), self.decimal_places)
    }

    /// Probability of any single off-web square being safe.
    pub fn off_edge_probability(&self) -> &BigRational {
        &self.off_edge_probability
    }

    pub fn best_on_edge_probability(&self) -> &BigRational {
        &self.best_probability
    }

    pub fn cutoff_probability(&self) -> &BigRational {
        &self.cutoff_probability
    }

    pub fn is_best_guess_off_edge(&self) -> bool {
        self.off_edge_best
    }

    /// True if a 100% safe move has been found.
    pub fn found_certainty(&self) -> bool {
        self.best_probability.is_one()
    }

    /// True when no mine placement satisfies the web; every probability is
    /// reported as zero in that case.
    pub fn is_contradiction(&self) -> bool {
        self.solution_count.is_zero()
    }

    /// The number of ways the mines can be placed across the whole game.
    pub fn solution_count(&self) -> &BigUint {
        &self.solution_count
    }

    /// Solution counts keyed by total mines used on the web.
    pub fn valid_mine_counts(&self) -> &HashMap<u32, BigUint> {
        &self.mine_counts
    }

    pub fn independent_groups(&self) -> u32 {
        self.independent_groups
    }

    pub fn linked_locations(&self) -> &[LinkedLocation] {
        &self.linked
    }

    pub fn linked_location(&self, loc: &Location) -> Option<&LinkedLocation> {
        self.linked.iter().find(|ll| ll.loc == *loc)
    }

    pub fn contra_linked_locations(&self) -> &[LinkedLocation] {
        &self.contra_linked
    }

    /// Squares within tolerance of the best probability, safest first.
    /// Dead squares are excluded unless they are certainly safe.
    pub fn best_candidates(&self) -> Vec<CandidateLocation> {
        let mut best = Vec::new();
        for (i, prob) in self.box_prob.iter().enumerate() {
            if *prob < self.cutoff_probability {
                continue;
            }
            for &sid in &self.web.boxes()[i].squares {
                let loc = self.web.squares()[sid.0 as usize].loc;
                if !self.dead.contains(&loc) || prob.is_one() {
                    best.push(CandidateLocation::new(loc, prob.clone()));
                } else {
                    debug!(%loc, "candidate ignored because it is dead");
                }
            }
        }
        best.sort();
        best
    }
}

/// Raw per-box counts fit comfortably in a u32; a failure here means a
/// crunched line leaked into the expansion stage.
fn box_mines(count: &BigUint) -> u32 {
    count.to_u32().expect("raw box mine count within u32")
}

fn add_linked(list: &mut Vec<LinkedLocation>, web: &WitnessWeb, from: BoxId, to: BoxId) {
    let link_locs: Vec<Location> = web
        .box_group(to)
        .squares
        .iter()
        .map(|&sid| web.squares()[sid.0 as usize].loc)
        .collect();
    for &sid in &web.box_group(from).squares {
        let loc = web.squares()[sid.0 as usize].loc;
        match list.iter_mut().find(|ll| ll.loc == loc) {
            Some(ll) => ll.add_links(&link_locs),
            None => list.push(LinkedLocation::new(loc, &link_locs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use solver_core::WitnessObservation;

    fn obs(x: u16, y: u16, mines: u32) -> WitnessObservation {
        WitnessObservation {
            loc: Location::new(x, y),
            mines,
        }
    }

    fn locs(points: &[(u16, u16)]) -> Vec<Location> {
        points.iter().map(|&(x, y)| Location::new(x, y)).collect()
    }

    fn ratio(num: i32, den: i32) -> BigRational {
        BigRational::new(num.into(), den.into())
    }

    fn run(web: &WitnessWeb, unrevealed: u32, mines: u32, seed: u64) -> ProbabilityEngine<'_> {
        let mut engine = ProbabilityEngine::new(web, unrevealed, mines, &[], EngineParams::default());
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        engine.process(&mut rng);
        engine
    }

    #[test]
    fn test_single_witness_half_probability() {
        // one "1" witness over two squares, one mine, nothing off the web
        let web = WitnessWeb::new(&[obs(0, 0, 1)], &locs(&[(0, 1), (1, 1)]), 1);
        let engine = run(&web, 2, 1, 42);

        assert_eq!(*engine.solution_count(), BigUint::from(2u32));
        assert_eq!(engine.probability(&Location::new(0, 1)), ratio(1, 2));
        assert_eq!(engine.probability(&Location::new(1, 1)), ratio(1, 2));
        assert!(!engine.found_certainty());
        assert!(!engine.is_best_guess_off_edge());
        assert_eq!(
            engine.valid_mine_counts().get(&1),
            Some(&BigUint::from(2u32))
        );
        assert_eq!(engine.probability_text(&Location::new(0, 1)), "0.500000");
    }

    #[test]
    fn test_zero_witness_certainty() {
        // a "0" witness makes all three neighbours certainly safe
        let web = WitnessWeb::new(&[obs(1, 0, 0)], &locs(&[(0, 1), (1, 1), (2, 1)]), 0);
        let engine = run(&web, 3, 0, 42);

        assert!(engine.found_certainty());
        assert_eq!(*engine.solution_count(), BigUint::one());
        for loc in locs(&[(0, 1), (1, 1), (2, 1)]) {
            assert!(engine.probability(&loc).is_one());
        }
        let candidates = engine.best_candidates();
        assert_eq!(candidates.len(), 3);
        assert!(candidates.iter().all(|c| c.probability.is_one()));
    }

    #[test]
    fn test_contradiction_reports_zero() {
        // a "3" witness with only two squares has no valid arrangement
        let web = WitnessWeb::new(&[obs(0, 0, 3)], &locs(&[(0, 1), (1, 1)]), 3);
        let engine = run(&web, 2, 3, 42);

        assert!(engine.is_contradiction());
        assert!(engine.solution_count().is_zero());
        assert!(engine.probability(&Location::new(0, 1)).is_zero());
        assert!(!engine.found_certainty());
    }

    #[test]
    fn test_off_edge_probability() {
        // "1" over two squares, two mines and three squares off the web:
        // off-edge squares are safer than the edge
        let web = WitnessWeb::new(&[obs(0, 0, 1)], &locs(&[(0, 1), (1, 1)]), 2);
        let engine = run(&web, 5, 2, 42);

        assert_eq!(*engine.solution_count(), BigUint::from(6u32));
        assert_eq!(engine.probability(&Location::new(0, 1)), ratio(1, 2));
        assert_eq!(*engine.off_edge_probability(), ratio(2, 3));
        assert_eq!(*engine.best_on_edge_probability(), ratio(2, 3));
        assert!(engine.is_best_guess_off_edge());
        // a location off the web reports the off-edge probability
        assert_eq!(engine.probability(&Location::new(9, 9)), ratio(2, 3));
    }

    #[test]
    fn test_linked_and_contra_linked() {
        // w1 "1" over {a,b}, w2 "1" over {b,c}, one mine: b is certainly a
        // mine, a and c are certainly clear and always agree
        let a = Location::new(0, 1);
        let b = Location::new(1, 1);
        let c = Location::new(2, 1);
        let web = WitnessWeb::new(
            &[obs(0, 0, 1), obs(2, 0, 1)],
            &locs(&[(0, 1), (1, 1), (2, 1)]),
            1,
        );
        let engine = run(&web, 3, 1, 42);

        assert!(engine.probability(&a).is_one());
        assert!(engine.probability(&b).is_zero());
        assert!(engine.probability(&c).is_one());
        assert!(engine.found_certainty());

        // a and c always share the same state
        let linked = engine.linked_location(&a).expect("a should be linked");
        assert_eq!(linked.links(), &[c]);
        // symmetry
        let back = engine.linked_location(&c).expect("c should be linked");
        assert_eq!(back.links(), &[a]);

        // b always opposes both a and c
        let contra: Vec<_> = engine
            .contra_linked_locations()
            .iter()
            .filter(|ll| ll.loc == b)
            .collect();
        assert_eq!(contra.len(), 1);
        let mut opposed = contra[0].links().to_vec();
        opposed.sort();
        assert_eq!(opposed, vec![a, c]);
    }

    #[test]
    fn test_two_independent_groups_merge() {
        // two disjoint "1 over 2" webs give 2 x 2 = 4 global solutions
        let web = WitnessWeb::new(
            &[obs(0, 0, 1), obs(10, 10, 1)],
            &locs(&[(0, 1), (1, 1), (10, 11), (11, 11)]),
            2,
        );
        let engine = run(&web, 4, 2, 42);

        assert_eq!(*engine.solution_count(), BigUint::from(4u32));
        assert_eq!(engine.independent_groups(), 2);
        for loc in locs(&[(0, 1), (1, 1), (10, 11), (11, 11)]) {
            assert_eq!(engine.probability(&loc), ratio(1, 2));
        }
        assert_eq!(
            engine.valid_mine_counts().get(&2),
            Some(&BigUint::from(4u32))
        );
    }

    #[test]
    fn test_dead_squares_excluded_from_candidates() {
        let web = WitnessWeb::new(&[obs(0, 0, 1)], &locs(&[(0, 1), (1, 1)]), 1);
        let dead = [Location::new(0, 1)];
        let mut engine = ProbabilityEngine::new(&web, 2, 1, &dead, EngineParams::default());
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        engine.process(&mut rng);

        let candidates = engine.best_candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].loc, Location::new(1, 1));
    }

    #[test]
    fn test_results_independent_of_rng_seed() {
        let observations = [obs(0, 0, 1), obs(2, 0, 1)];
        let squares = locs(&[(0, 1), (1, 1), (2, 1)]);
        let web = WitnessWeb::new(&observations, &squares, 1);

        let first = run(&web, 3, 1, 1);
        let second = run(&web, 3, 1, 99);

        assert_eq!(first.solution_count(), second.solution_count());
        for loc in &squares {
            assert_eq!(first.probability(loc), second.probability(loc));
        }
        assert_eq!(first.linked_locations(), second.linked_locations());
        assert_eq!(
            first.contra_linked_locations(),
            second.contra_linked_locations()
        );
    }
}
