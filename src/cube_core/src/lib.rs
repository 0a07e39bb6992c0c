//! The 3x3x3 cube model: facelet strings, cubie-level states, face moves,
//! coordinate ranking, and state validation.
//!
//! Everything in this crate is solver-agnostic. The solving engine in the
//! `twophase` crate builds its move and pruning tables on top of the
//! coordinate functions defined here.

pub mod coords;
pub mod cubie;
pub mod facelet;
pub mod moves;
pub mod validate;

pub use cubie::{Corner, CubieCube, Edge};
pub use facelet::{Face, FaceletCube};
pub use moves::{Move, Turn};
pub use validate::{CubeError, UnsolvableReason, validate};
