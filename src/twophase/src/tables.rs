//! Coordinate move tables.
//!
//! A move table is a flat array mapping (coordinate, move index) to the
//! coordinate after the move: unrank a representative cube, turn a face
//! on the cubie level, rank again. Built once, then every search step is
//! a lookup. The tables are plain data with no interior mutability, so a
//! built [`MoveTables`] can be shared freely between threads.

use crate::{start, success, working};
use cube_core::coords::{
    N_FLIP, N_FR_TO_BR, N_TWIST, N_UB_TO_DF, N_UR_TO_DF, N_UR_TO_UL, N_URF_TO_DLF, merge_ur_to_df,
};
use cube_core::{CubieCube, Move};
use log::{debug, info};
use std::time::Instant;

pub const N_MOVES: usize = 18;
/// Slice placements distinguished by phase 1: `fr_to_br / 24`.
pub const N_SLICE: usize = 495;
/// Slice permutations solved by phase 2: `fr_to_br % 24`.
pub const N_SLICE_PERM: usize = 24;
/// Both three-edge coordinates fall below this bound exactly on subgroup
/// states, which is when the merge table is defined.
pub const N_MERGE: usize = 336;

/// Entry for (coordinate, move) pairs that leave the table's domain.
pub const INVALID: u16 = u16::MAX;

/// Move indices of the ten turns that generate the domino subgroup, in
/// [`Move::ALL`] order. Phase 2 iterates over exactly these columns.
pub const PHASE2_MOVE_INDICES: [usize; 10] = [0, 1, 2, 4, 7, 9, 10, 11, 13, 16];

/// Corner parity transition per move: quarter turns toggle the parity,
/// half turns keep it.
pub const PARITY_MOVE: [[u8; N_MOVES]; 2] = [
    [1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1],
    [0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0],
];

/// One coordinate's transition table over all 18 moves.
pub struct MoveTable {
    data: Box<[u16]>,
}

impl MoveTable {
    /// Build a table by running every coordinate value through every face
    /// turn. The fourth quarter turn restores the representative, so each
    /// face costs four cubie-level multiplications.
    fn build(
        states: usize,
        set: impl Fn(&mut CubieCube, u16),
        get: impl Fn(&CubieCube) -> u16,
    ) -> MoveTable {
        let mut data = vec![0u16; states * N_MOVES].into_boxed_slice();
        for coord in 0..states {
            let mut cube = CubieCube::SOLVED;
            set(&mut cube, coord as u16);
            for (face, basic) in cube_core::cubie::BASIC_MOVES.iter().enumerate() {
                for turn in 0..3 {
                    cube.multiply(basic);
                    data[coord * N_MOVES + 3 * face + turn] = get(&cube);
                }
                cube.multiply(basic);
            }
        }
        MoveTable { data }
    }

    /// The `ur_to_df` coordinate only stays rankable under subgroup moves;
    /// the other columns hold [`INVALID`].
    fn build_phase2_only(
        states: usize,
        set: impl Fn(&mut CubieCube, u16),
        get: impl Fn(&CubieCube) -> u32,
    ) -> MoveTable {
        let mut data = vec![INVALID; states * N_MOVES].into_boxed_slice();
        for coord in 0..states {
            let mut cube = CubieCube::SOLVED;
            set(&mut cube, coord as u16);
            for (face, basic) in cube_core::cubie::BASIC_MOVES.iter().enumerate() {
                for turn in 0..3 {
                    cube.multiply(basic);
                    let index = 3 * face + turn;
                    if PHASE2_MOVE_INDICES.contains(&index) {
                        let next = get(&cube);
                        debug_assert!(next < states as u32);
                        data[coord * N_MOVES + index] = next as u16;
                    }
                }
                cube.multiply(basic);
            }
        }
        MoveTable { data }
    }

    #[inline]
    #[must_use]
    pub fn apply(&self, coord: u16, mv: Move) -> u16 {
        let next = self.data[coord as usize * N_MOVES + mv.index()];
        debug_assert_ne!(next, INVALID);
        next
    }
}

/// Merge of the two three-edge coordinates into the phase-2 edge
/// permutation, defined for subgroup states.
pub struct MergeTable {
    data: Box<[u16]>,
}

impl MergeTable {
    fn build() -> MergeTable {
        let mut data = vec![INVALID; N_MERGE * N_MERGE].into_boxed_slice();
        for ur_to_ul in 0..N_MERGE {
            for ub_to_df in 0..N_MERGE {
                if let Some(merged) = merge_ur_to_df(ur_to_ul as u16, ub_to_df as u16) {
                    data[ur_to_ul * N_MERGE + ub_to_df] = merged;
                }
            }
        }
        MergeTable { data }
    }

    #[inline]
    #[must_use]
    pub fn lookup(&self, ur_to_ul: u16, ub_to_df: u16) -> u16 {
        self.data[ur_to_ul as usize * N_MERGE + ub_to_df as usize]
    }
}

/// All move tables of the engine.
pub struct MoveTables {
    pub twist: MoveTable,
    pub flip: MoveTable,
    pub fr_to_br: MoveTable,
    pub urf_to_dlf: MoveTable,
    pub ur_to_df: MoveTable,
    pub ur_to_ul: MoveTable,
    pub ub_to_df: MoveTable,
    pub merge: MergeTable,
}

impl MoveTables {
    #[must_use]
    pub fn generate() -> MoveTables {
        info!(start!("Generating move tables"));
        let begin = Instant::now();
        let tables = MoveTables {
            twist: MoveTable::build(N_TWIST as usize, CubieCube::set_twist, CubieCube::twist),
            flip: MoveTable::build(N_FLIP as usize, CubieCube::set_flip, CubieCube::flip),
            fr_to_br: MoveTable::build(
                N_FR_TO_BR as usize,
                CubieCube::set_fr_to_br,
                CubieCube::fr_to_br,
            ),
            urf_to_dlf: MoveTable::build(
                N_URF_TO_DLF as usize,
                CubieCube::set_urf_to_dlf,
                CubieCube::urf_to_dlf,
            ),
            ur_to_df: MoveTable::build_phase2_only(
                N_UR_TO_DF as usize,
                |cube, coord| cube.set_ur_to_df(u32::from(coord)),
                CubieCube::ur_to_df,
            ),
            ur_to_ul: MoveTable::build(
                N_UR_TO_UL as usize,
                CubieCube::set_ur_to_ul,
                CubieCube::ur_to_ul,
            ),
            ub_to_df: MoveTable::build(
                N_UB_TO_DF as usize,
                CubieCube::set_ub_to_df,
                CubieCube::ub_to_df,
            ),
            merge: MergeTable::build(),
        };
        debug!(
            working!("Move tables cover {} coordinate/move pairs"),
            (N_TWIST as usize
                + N_FLIP as usize
                + N_FR_TO_BR as usize
                + N_URF_TO_DLF as usize
                + N_UR_TO_DF as usize
                + N_UR_TO_UL as usize
                + N_UB_TO_DF as usize)
                * N_MOVES
        );
        info!(
            success!("Move tables generated in {:.3}s"),
            begin.elapsed().as_secs_f64()
        );
        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Tables;
    use cube_core::Turn;

    #[test]
    fn phase2_move_indices_match_the_predicate() {
        let expected: Vec<usize> = Move::ALL
            .iter()
            .filter(|m| m.is_phase2())
            .map(|m| m.index())
            .collect();
        assert_eq!(PHASE2_MOVE_INDICES.to_vec(), expected);
    }

    #[test]
    fn parity_table_matches_turn_kinds() {
        for mv in Move::ALL {
            let toggles = mv.turn != Turn::Half;
            assert_eq!(PARITY_MOVE[0][mv.index()] == 1, toggles);
            assert_eq!(PARITY_MOVE[1][mv.index()] == 0, toggles);
        }
    }

    fn round_trip(table: &MoveTable, states: u16, moves: &[Move]) {
        for coord in 0..states {
            for &mv in moves {
                let there = table.apply(coord, mv);
                let back = table.apply(there, mv.inverse());
                assert_eq!(back, coord, "coordinate {coord} through {mv}");
            }
        }
    }

    #[test]
    fn every_table_round_trips_through_inverse_moves() {
        let tables = &Tables::shared().moves;
        round_trip(&tables.twist, N_TWIST, &Move::ALL);
        round_trip(&tables.flip, N_FLIP, &Move::ALL);
        round_trip(&tables.fr_to_br, N_FR_TO_BR, &Move::ALL);
        round_trip(&tables.urf_to_dlf, N_URF_TO_DLF, &Move::ALL);
        round_trip(&tables.ur_to_ul, N_UR_TO_UL, &Move::ALL);
        round_trip(&tables.ub_to_df, N_UB_TO_DF, &Move::ALL);
        let phase2: Vec<Move> = PHASE2_MOVE_INDICES.iter().map(|&i| Move::ALL[i]).collect();
        round_trip(&tables.ur_to_df, N_UR_TO_DF, &phase2);
    }

    #[test]
    fn tables_agree_with_cubie_level_moves() {
        let tables = &Tables::shared().moves;
        let mut cube = CubieCube::SOLVED;
        for _ in 0..30 {
            let mv = Move::ALL[fastrand_index()];
            let twist = tables.twist.apply(cube.twist(), mv);
            let flip = tables.flip.apply(cube.flip(), mv);
            let fr_to_br = tables.fr_to_br.apply(cube.fr_to_br(), mv);
            let urf_to_dlf = tables.urf_to_dlf.apply(cube.urf_to_dlf(), mv);
            let ur_to_ul = tables.ur_to_ul.apply(cube.ur_to_ul(), mv);
            let ub_to_df = tables.ub_to_df.apply(cube.ub_to_df(), mv);
            cube.apply_move(mv);
            assert_eq!(twist, cube.twist());
            assert_eq!(flip, cube.flip());
            assert_eq!(fr_to_br, cube.fr_to_br());
            assert_eq!(urf_to_dlf, cube.urf_to_dlf());
            assert_eq!(ur_to_ul, cube.ur_to_ul());
            assert_eq!(ub_to_df, cube.ub_to_df());
        }
    }

    #[test]
    fn merge_table_tracks_subgroup_walks() {
        let tables = &Tables::shared().moves;
        let mut cube = CubieCube::SOLVED;
        for _ in 0..60 {
            let index = PHASE2_MOVE_INDICES[fastrand_phase2_index()];
            cube.apply_move(Move::ALL[index]);
            let merged = tables.merge.lookup(cube.ur_to_ul(), cube.ub_to_df());
            assert_eq!(u32::from(merged), cube.ur_to_df());
        }
    }

    fn fastrand_index() -> usize {
        fastrand::usize(..N_MOVES)
    }

    fn fastrand_phase2_index() -> usize {
        fastrand::usize(..PHASE2_MOVE_INDICES.len())
    }
}
