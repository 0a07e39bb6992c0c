//! Random-state scrambles.
//!
//! A scramble is the inverse of a solution: draw a uniformly random legal
//! state, solve it, play the solution backwards. Unlike a fixed-length
//! random move sequence this samples the whole cube group evenly.

use crate::cache::Tables;
use crate::solver::{SolveError, SolveOptions, solve_cube};
use cube_core::moves::inverse_sequence;
use cube_core::{CubieCube, Move};

/// A move sequence taking the solved cube to a uniformly random state.
///
/// # Errors
///
/// Propagates search failures from the underlying solve; these do not
/// occur with default options.
pub fn scramble_sequence(tables: &Tables) -> Result<Vec<Move>, SolveError> {
    let cube = CubieCube::random();
    let solution = solve_cube(tables, &cube, &SolveOptions::default())?;
    Ok(inverse_sequence(solution.moves()))
}
