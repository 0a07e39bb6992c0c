//! Two-phase iterative-deepening A* search.
//!
//! Phase 1 brings the cube into the domino subgroup (orientations solved,
//! slice edges home), phase 2 finishes it with subgroup moves only. Each
//! phase-1 solution found at the current bound is extended by a phase-2
//! search over coordinates threaded through the move tables along the
//! phase-1 path; the first total that survives the boundary check is the
//! answer, unless a time budget asks the search to keep improving on it.

use crate::cache::Tables;
use crate::tables::{PARITY_MOVE, PHASE2_MOVE_INDICES};
use crate::{start, success, working};
use cube_core::{CubeError, CubieCube, Move, validate};
use itertools::Itertools;
use log::{debug, info};
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Caps phase 2 per transition; completeness comes from phase 1 visiting
/// ever more subgroup entry points as its bound grows.
const PHASE2_MAX_DEPTH: u8 = 12;

/// Tuning knobs of a single solve call.
#[derive(Clone, Debug)]
pub struct SolveOptions {
    /// Give up beyond this total move count.
    pub max_depth: u8,
    /// With a budget the search returns the shortest total it can find
    /// before the deadline instead of the first one.
    pub time_budget: Option<Duration>,
    /// Abort after visiting this many search nodes.
    pub node_budget: Option<u64>,
}

impl Default for SolveOptions {
    fn default() -> SolveOptions {
        SolveOptions {
            max_depth: 21,
            time_budget: None,
            node_budget: None,
        }
    }
}

/// The search phase an error came out of.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    One,
    Two,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::One => write!(f, "phase 1"),
            Phase::Two => write!(f, "phase 2"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SolveError {
    #[error(transparent)]
    InvalidCube(#[from] CubeError),
    /// Exhausting the depth limit on a validated cube signals a table or
    /// search bug, not bad input.
    #[error("no solution within {max_depth} moves ({phase} exhausted at bound {bound})")]
    SearchExhausted {
        phase: Phase,
        bound: u8,
        max_depth: u8,
    },
    #[error("budget expired in {phase} before any solution was found")]
    TimeLimitExceeded { phase: Phase },
}

/// A solving move sequence. Displays as space-separated standard notation,
/// empty for an already-solved cube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    moves: Vec<Move>,
}

impl Solution {
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moves.iter().join(" "))
    }
}

/// Validate a facelet string and solve it.
///
/// # Errors
///
/// Validation failures before any search work, [`SolveError::SearchExhausted`]
/// or [`SolveError::TimeLimitExceeded`] out of the search itself.
pub fn solve(tables: &Tables, facelets: &str, options: &SolveOptions) -> Result<Solution, SolveError> {
    let cube = validate(facelets)?;
    solve_cube(tables, &cube, options)
}

/// Solve an already-decoded cube state.
///
/// # Errors
///
/// As [`solve`]; the state is still checked for reachability first.
pub fn solve_cube(
    tables: &Tables,
    cube: &CubieCube,
    options: &SolveOptions,
) -> Result<Solution, SolveError> {
    cube.verify()?;
    let begin = Instant::now();
    info!(start!("Searching for a solution"));
    let mut search = TwoPhaseSearch {
        tables,
        max_depth: options.max_depth,
        deadline: options.time_budget.map(|budget| begin + budget),
        node_budget: options.node_budget,
        keep_searching: options.time_budget.is_some(),
        origin: Origin {
            twist: cube.twist(),
            flip: cube.flip(),
            fr_to_br: cube.fr_to_br(),
            urf_to_dlf: cube.urf_to_dlf(),
            ur_to_ul: cube.ur_to_ul(),
            ub_to_df: cube.ub_to_df(),
            parity: cube.corner_parity(),
        },
        path1: Vec::new(),
        path2: Vec::new(),
        best: None,
        nodes_visited: 0,
        phase: Phase::One,
    };
    let moves = search.run()?;
    info!(
        success!("Found a {}-move solution in {:.3}s"),
        moves.len(),
        begin.elapsed().as_secs_f64()
    );
    debug!(
        working!("Traversed {} nodes in total"),
        search.nodes_visited
    );
    Ok(Solution { moves })
}

/// The coordinates of the scrambled cube. Phase 1 threads the first three
/// through its recursion; the rest are replayed along the phase-1 path at
/// each transition.
struct Origin {
    twist: u16,
    flip: u16,
    fr_to_br: u16,
    urf_to_dlf: u16,
    ur_to_ul: u16,
    ub_to_df: u16,
    parity: u8,
}

enum Interrupt {
    /// Deadline or node budget hit.
    Expired,
    /// First-solution mode found its answer; unwind the whole search.
    Accepted(Vec<Move>),
}

struct TwoPhaseSearch<'a> {
    tables: &'a Tables,
    max_depth: u8,
    deadline: Option<Instant>,
    node_budget: Option<u64>,
    keep_searching: bool,
    origin: Origin,
    path1: Vec<Move>,
    path2: Vec<Move>,
    best: Option<Vec<Move>>,
    nodes_visited: u64,
    phase: Phase,
}

impl TwoPhaseSearch<'_> {
    fn run(&mut self) -> Result<Vec<Move>, SolveError> {
        let origin_bound = self.tables.pruning.phase1_lower_bound(
            self.origin.twist,
            self.origin.flip,
            self.origin.fr_to_br / 24,
        );
        let mut bound = origin_bound;
        if bound > self.max_depth {
            return Err(self.exhausted());
        }
        loop {
            if let Some(best) = &self.best
                && usize::from(bound) >= best.len()
            {
                // every deeper total would be at least as long
                return Ok(self.best.take().unwrap_or_default());
            }
            debug!(working!("Searching phase 1 at bound {}"), bound);
            match self.phase1(
                self.origin.twist,
                self.origin.flip,
                self.origin.fr_to_br,
                bound,
            ) {
                Ok(()) => {
                    if bound == self.max_depth {
                        return match self.best.take() {
                            Some(best) => Ok(best),
                            None => Err(self.exhausted()),
                        };
                    }
                    bound += 1;
                }
                Err(Interrupt::Accepted(moves)) => return Ok(moves),
                Err(Interrupt::Expired) => {
                    return match self.best.take() {
                        Some(best) => Ok(best),
                        None => Err(SolveError::TimeLimitExceeded { phase: self.phase }),
                    };
                }
            }
        }
    }

    fn exhausted(&self) -> SolveError {
        SolveError::SearchExhausted {
            phase: Phase::One,
            bound: self.max_depth,
            max_depth: self.max_depth,
        }
    }

    /// One node of the phase-1 iterative-deepening DFS; `left` counts the
    /// moves still permitted at this bound.
    fn phase1(&mut self, twist: u16, flip: u16, fr_to_br: u16, left: u8) -> Result<(), Interrupt> {
        self.tick(Phase::One)?;
        let slice = fr_to_br / 24;
        if left == 0 {
            if twist == 0 && flip == 0 && slice == 0 {
                // A phase-1 solution ending inside the subgroup has a
                // shorter sibling that earlier bounds already tried.
                if let Some(&last) = self.path1.last()
                    && last.is_phase2()
                {
                    return Ok(());
                }
                self.transition()?;
            }
            return Ok(());
        }
        if self
            .tables
            .pruning
            .phase1_lower_bound(twist, flip, slice)
            > left
        {
            return Ok(());
        }
        for mv in Move::ALL {
            if let Some(&prev) = self.path1.last()
                && mv.redundant_after(prev)
            {
                continue;
            }
            self.path1.push(mv);
            let result = self.phase1(
                self.tables.moves.twist.apply(twist, mv),
                self.tables.moves.flip.apply(flip, mv),
                self.tables.moves.fr_to_br.apply(fr_to_br, mv),
                left - 1,
            );
            self.path1.pop();
            result?;
        }
        Ok(())
    }

    /// Extend the phase-1 solution on the stack with a phase-2 search.
    fn transition(&mut self) -> Result<(), Interrupt> {
        let moves = &self.tables.moves;
        let mut urf_to_dlf = self.origin.urf_to_dlf;
        let mut fr_to_br = self.origin.fr_to_br;
        let mut ur_to_ul = self.origin.ur_to_ul;
        let mut ub_to_df = self.origin.ub_to_df;
        let mut parity = self.origin.parity;
        for &mv in &self.path1 {
            urf_to_dlf = moves.urf_to_dlf.apply(urf_to_dlf, mv);
            fr_to_br = moves.fr_to_br.apply(fr_to_br, mv);
            ur_to_ul = moves.ur_to_ul.apply(ur_to_ul, mv);
            ub_to_df = moves.ub_to_df.apply(ub_to_df, mv);
            parity = PARITY_MOVE[parity as usize][mv.index()];
        }
        let ur_to_df = moves.merge.lookup(ur_to_ul, ub_to_df);
        let slice_perm = fr_to_br;

        let depth1 = self.path1.len() as u8;
        let mut cap = (self.max_depth - depth1).min(PHASE2_MAX_DEPTH);
        if let Some(best) = &self.best {
            let best_len = best.len() as u8;
            if best_len <= depth1 {
                return Ok(());
            }
            // only totals strictly shorter than the best are of interest
            cap = cap.min(best_len - depth1 - 1);
        }

        let lower_bound = self
            .tables
            .pruning
            .phase2_lower_bound(urf_to_dlf, ur_to_df, slice_perm, parity);
        for bound in lower_bound..=cap {
            if self.phase2(urf_to_dlf, ur_to_df, slice_perm, parity, bound)? {
                // Reject a phase 2 that opens on a move mergeable with the
                // end of phase 1; the merged, shorter variant is reached
                // through another phase-1 path. The transition is spent
                // either way: a deeper phase 2 here could only produce a
                // longer total than that variant.
                let mergeable = match (self.path1.last(), self.path2.first()) {
                    (Some(&last), Some(&first)) => first.redundant_after(last),
                    _ => false,
                };
                if !mergeable {
                    let total: Vec<Move> =
                        self.path1.iter().chain(&self.path2).copied().collect();
                    debug!(
                        working!("Candidate solution: {} + {} moves"),
                        depth1,
                        total.len() as u8 - depth1
                    );
                    if !self.keep_searching {
                        self.path2.clear();
                        return Err(Interrupt::Accepted(total));
                    }
                    if self.best.as_ref().is_none_or(|best| total.len() < best.len()) {
                        self.best = Some(total);
                    }
                }
                self.path2.clear();
                return Ok(());
            }
        }
        Ok(())
    }

    /// One node of the phase-2 DFS, restricted to subgroup moves. Returns
    /// whether a solution was found; on success the moves stay on
    /// `path2`.
    fn phase2(
        &mut self,
        urf_to_dlf: u16,
        ur_to_df: u16,
        slice_perm: u16,
        parity: u8,
        left: u8,
    ) -> Result<bool, Interrupt> {
        self.tick(Phase::Two)?;
        if left == 0 {
            // parity 0 pins the two pieces each permutation coordinate
            // leaves undetermined
            return Ok(urf_to_dlf == 0 && ur_to_df == 0 && slice_perm == 0 && parity == 0);
        }
        if self
            .tables
            .pruning
            .phase2_lower_bound(urf_to_dlf, ur_to_df, slice_perm, parity)
            > left
        {
            return Ok(false);
        }
        let moves = &self.tables.moves;
        for &index in &PHASE2_MOVE_INDICES {
            let mv = Move::ALL[index];
            if let Some(&prev) = self.path2.last()
                && mv.redundant_after(prev)
            {
                continue;
            }
            self.path2.push(mv);
            let found = self.phase2(
                moves.urf_to_dlf.apply(urf_to_dlf, mv),
                moves.ur_to_df.apply(ur_to_df, mv),
                moves.fr_to_br.apply(slice_perm, mv),
                PARITY_MOVE[parity as usize][index],
                left - 1,
            )?;
            if found {
                return Ok(true);
            }
            self.path2.pop();
        }
        Ok(false)
    }

    /// Bookkeeping at every search node: the node counter feeds the node
    /// budget, and the deadline is polled every 1024 nodes because
    /// `Instant::now` is not free.
    fn tick(&mut self, phase: Phase) -> Result<(), Interrupt> {
        self.phase = phase;
        self.nodes_visited += 1;
        if let Some(budget) = self.node_budget
            && self.nodes_visited > budget
        {
            return Err(Interrupt::Expired);
        }
        if let Some(deadline) = self.deadline
            && self.nodes_visited & 0x3ff == 0
            && Instant::now() > deadline
        {
            return Err(Interrupt::Expired);
        }
        Ok(())
    }
}
