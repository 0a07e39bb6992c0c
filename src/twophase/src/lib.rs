//! A two-phase solving engine for the 3x3x3 cube, after [Herbert
//! Kociemba's algorithm][tp].
//!
//! Phase 1 reduces an arbitrary state into the domino subgroup generated
//! by {U, D, R2, L2, F2, B2}; phase 2 finishes the solve inside it. Both
//! phases run iterative-deepening A* over precomputed coordinate move
//! tables, bounded by breadth-first pruning tables. The tables are built
//! once per process and shared read-only by any number of concurrent
//! searches.
//!
//! [tp]: https://kociemba.org/cube.htm
//!
//! The fast path is [`solve`]: validate a 54-symbol facelet string, search,
//! and hand back the move sequence in standard notation.

pub mod cache;
pub mod pruning;
pub mod scramble;
pub mod solver;
pub mod tables;
pub mod worker;

pub use cache::{TableError, Tables, TablesHandle};
pub use solver::{Phase, Solution, SolveError, SolveOptions, solve, solve_cube};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
