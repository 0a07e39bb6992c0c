//! Cubie-level cube representation and its group operations.
//!
//! A state is a permutation of the 8 corner pieces with a twist in 0..3
//! each, and a permutation of the 12 edge pieces with a flip in 0..2 each.
//! Composition, inversion and the six basic face turns are defined here;
//! the bounded-integer views of a state live in [`crate::coords`].

use crate::facelet::{
    CORNER_COLORS, CORNER_FACELETS, EDGE_COLORS, EDGE_FACELETS, Face, FaceletCube,
};
use crate::moves::Move;
use crate::validate::{CubeError, UnsolvableReason};

/// The corner pieces, named by their home faces.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Corner {
    Urf = 0,
    Ufl = 1,
    Ulb = 2,
    Ubr = 3,
    Dfr = 4,
    Dlf = 5,
    Dbl = 6,
    Drb = 7,
}

/// The edge pieces, named by their home faces. The last four form the
/// middle slice between the R and L faces.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Edge {
    Ur = 0,
    Uf = 1,
    Ul = 2,
    Ub = 3,
    Dr = 4,
    Df = 5,
    Dl = 6,
    Db = 7,
    Fr = 8,
    Fl = 9,
    Bl = 10,
    Br = 11,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::Urf,
        Corner::Ufl,
        Corner::Ulb,
        Corner::Ubr,
        Corner::Dfr,
        Corner::Dlf,
        Corner::Dbl,
        Corner::Drb,
    ];
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::Ur,
        Edge::Uf,
        Edge::Ul,
        Edge::Ub,
        Edge::Dr,
        Edge::Df,
        Edge::Dl,
        Edge::Db,
        Edge::Fr,
        Edge::Fl,
        Edge::Bl,
        Edge::Br,
    ];
}

/// A cube state on the cubie level.
///
/// `cp[i]` is the piece sitting in corner position `i` and `co[i]` its
/// twist relative to the home orientation; likewise `ep`/`eo` for edges.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CubieCube {
    pub cp: [Corner; 8],
    pub co: [u8; 8],
    pub ep: [Edge; 12],
    pub eo: [u8; 12],
}

use Corner::{Dbl, Dfr, Dlf, Drb, Ubr, Ufl, Ulb, Urf};
use Edge::{Bl, Br, Db, Df, Dl, Dr, Fl, Fr, Ub, Uf, Ul, Ur};

/// The six basic clockwise face turns as cube states, indexed by [`Face`].
pub const BASIC_MOVES: [CubieCube; 6] = [
    // U
    CubieCube {
        cp: [Ubr, Urf, Ufl, Ulb, Dfr, Dlf, Dbl, Drb],
        co: [0; 8],
        ep: [Ub, Ur, Uf, Ul, Dr, Df, Dl, Db, Fr, Fl, Bl, Br],
        eo: [0; 12],
    },
    // R
    CubieCube {
        cp: [Dfr, Ufl, Ulb, Urf, Drb, Dlf, Dbl, Ubr],
        co: [2, 0, 0, 1, 1, 0, 0, 2],
        ep: [Fr, Uf, Ul, Ub, Br, Df, Dl, Db, Dr, Fl, Bl, Ur],
        eo: [0; 12],
    },
    // F
    CubieCube {
        cp: [Ufl, Dlf, Ulb, Ubr, Urf, Dfr, Dbl, Drb],
        co: [1, 2, 0, 0, 2, 1, 0, 0],
        ep: [Ur, Fl, Ul, Ub, Dr, Fr, Dl, Db, Uf, Df, Bl, Br],
        eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
    },
    // D
    CubieCube {
        cp: [Urf, Ufl, Ulb, Ubr, Dlf, Dbl, Drb, Dfr],
        co: [0; 8],
        ep: [Ur, Uf, Ul, Ub, Df, Dl, Db, Dr, Fr, Fl, Bl, Br],
        eo: [0; 12],
    },
    // L
    CubieCube {
        cp: [Urf, Ulb, Dbl, Ubr, Dfr, Ufl, Dlf, Drb],
        co: [0, 1, 2, 0, 0, 2, 1, 0],
        ep: [Ur, Uf, Bl, Ub, Dr, Df, Fl, Db, Fr, Ul, Dl, Br],
        eo: [0; 12],
    },
    // B
    CubieCube {
        cp: [Urf, Ufl, Ubr, Drb, Dfr, Dlf, Ulb, Dbl],
        co: [0, 0, 1, 2, 0, 0, 2, 1],
        ep: [Ur, Uf, Ul, Br, Dr, Df, Dl, Bl, Fr, Fl, Ub, Db],
        eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
    },
];

impl CubieCube {
    pub const SOLVED: CubieCube = CubieCube {
        cp: Corner::ALL,
        co: [0; 8],
        ep: Edge::ALL,
        eo: [0; 12],
    };

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == CubieCube::SOLVED
    }

    /// Compose the corner part with `other` applied second.
    pub fn corner_multiply(&mut self, other: &CubieCube) {
        let mut cp = [Urf; 8];
        let mut co = [0; 8];
        for i in 0..8 {
            let from = other.cp[i] as usize;
            cp[i] = self.cp[from];
            co[i] = (self.co[from] + other.co[i]) % 3;
        }
        self.cp = cp;
        self.co = co;
    }

    /// Compose the edge part with `other` applied second.
    pub fn edge_multiply(&mut self, other: &CubieCube) {
        let mut ep = [Ur; 12];
        let mut eo = [0; 12];
        for i in 0..12 {
            let from = other.ep[i] as usize;
            ep[i] = self.ep[from];
            eo[i] = (self.eo[from] + other.eo[i]) % 2;
        }
        self.ep = ep;
        self.eo = eo;
    }

    /// Group composition, `other` applied second.
    pub fn multiply(&mut self, other: &CubieCube) {
        self.corner_multiply(other);
        self.edge_multiply(other);
    }

    #[must_use]
    pub fn inverse(&self) -> CubieCube {
        let mut inv = CubieCube::SOLVED;
        for i in 0..8 {
            inv.cp[self.cp[i] as usize] = Corner::ALL[i];
        }
        for i in 0..8 {
            inv.co[i] = (3 - self.co[inv.cp[i] as usize]) % 3;
        }
        for i in 0..12 {
            inv.ep[self.ep[i] as usize] = Edge::ALL[i];
        }
        for i in 0..12 {
            inv.eo[i] = self.eo[inv.ep[i] as usize];
        }
        inv
    }

    /// Apply one face turn.
    pub fn apply_move(&mut self, mv: Move) {
        let basic = &BASIC_MOVES[mv.face as usize];
        for _ in 0..mv.turn as u8 {
            self.multiply(basic);
        }
    }

    /// Apply a sequence of face turns in order.
    pub fn apply_moves(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply_move(mv);
        }
    }

    /// Sign of the corner permutation, 0 even or 1 odd. Equal to
    /// [`edge_parity`](Self::edge_parity) on every reachable state.
    #[must_use]
    pub fn corner_parity(&self) -> u8 {
        let mut s = 0;
        for i in (1..8).rev() {
            for j in 0..i {
                if self.cp[j] as u8 > self.cp[i] as u8 {
                    s += 1;
                }
            }
        }
        s % 2
    }

    /// Sign of the edge permutation, 0 even or 1 odd.
    #[must_use]
    pub fn edge_parity(&self) -> u8 {
        let mut s = 0;
        for i in (1..12).rev() {
            for j in 0..i {
                if self.ep[j] as u8 > self.ep[i] as u8 {
                    s += 1;
                }
            }
        }
        s % 2
    }

    /// Render the state as 54 stickers.
    #[must_use]
    pub fn to_facelets(&self) -> FaceletCube {
        let mut facelets = [Face::U; 54];
        for (i, &face) in Face::ALL.iter().enumerate() {
            facelets[9 * i + 4] = face;
        }
        for i in 0..8 {
            let piece = self.cp[i] as usize;
            let ori = self.co[i] as usize;
            for k in 0..3 {
                facelets[CORNER_FACELETS[i][(k + ori) % 3]] = CORNER_COLORS[piece][k];
            }
        }
        for i in 0..12 {
            let piece = self.ep[i] as usize;
            let ori = self.eo[i] as usize;
            for k in 0..2 {
                facelets[EDGE_FACELETS[i][(k + ori) % 2]] = EDGE_COLORS[piece][k];
            }
        }
        FaceletCube(facelets)
    }

    /// Check the reachability invariants: twist sum divisible by 3, flip
    /// sum divisible by 2, and matching permutation parities. Also rejects
    /// a repeated piece, which can only arise in hand-built states.
    ///
    /// # Errors
    ///
    /// [`CubeError::IllegalPermutation`] or [`CubeError::UnsolvableState`].
    pub fn verify(&self) -> Result<(), CubeError> {
        let mut corner_seen = [false; 8];
        for &c in &self.cp {
            if corner_seen[c as usize] {
                return Err(CubeError::IllegalPermutation("a corner piece occurs twice"));
            }
            corner_seen[c as usize] = true;
        }
        let mut edge_seen = [false; 12];
        for &e in &self.ep {
            if edge_seen[e as usize] {
                return Err(CubeError::IllegalPermutation("an edge piece occurs twice"));
            }
            edge_seen[e as usize] = true;
        }
        if self.co.iter().sum::<u8>() % 3 != 0 {
            return Err(CubeError::UnsolvableState(UnsolvableReason::CornerTwist));
        }
        if self.eo.iter().sum::<u8>() % 2 != 0 {
            return Err(CubeError::UnsolvableState(UnsolvableReason::EdgeFlip));
        }
        if self.corner_parity() != self.edge_parity() {
            return Err(CubeError::UnsolvableState(
                UnsolvableReason::PermutationParity,
            ));
        }
        Ok(())
    }

    /// A uniformly random reachable state.
    #[must_use]
    pub fn random() -> CubieCube {
        let mut cube = CubieCube::SOLVED;
        for i in (1..8).rev() {
            cube.cp.swap(i, fastrand::usize(..=i));
        }
        for i in (1..12).rev() {
            cube.ep.swap(i, fastrand::usize(..=i));
        }
        if cube.corner_parity() != cube.edge_parity() {
            cube.ep.swap(0, 1);
        }
        let mut twist = 0;
        for o in &mut cube.co[..7] {
            *o = fastrand::u8(..3);
            twist += *o;
        }
        cube.co[7] = (3 - twist % 3) % 3;
        let mut flip = 0;
        for o in &mut cube.eo[..11] {
            *o = fastrand::u8(..2);
            flip += *o;
        }
        cube.eo[11] = flip % 2;
        cube
    }
}

impl TryFrom<&FaceletCube> for CubieCube {
    type Error = CubeError;

    /// Decode a sticker pattern into pieces. Fails when the pattern does
    /// not describe a bijective piece arrangement against the fixed
    /// color-letter convention.
    fn try_from(facelets: &FaceletCube) -> Result<CubieCube, CubeError> {
        let f = &facelets.0;
        for (i, &face) in Face::ALL.iter().enumerate() {
            if f[9 * i + 4] != face {
                return Err(CubeError::IllegalPermutation(
                    "center stickers are not in U, R, F, D, L, B face order",
                ));
            }
        }

        let mut cube = CubieCube::SOLVED;
        let mut corner_seen = [false; 8];
        for i in 0..8 {
            // The U or D sticker of the piece fixes its twist.
            let Some(ori) = (0..3).find(|&o| {
                let face = f[CORNER_FACELETS[i][o]];
                face == Face::U || face == Face::D
            }) else {
                return Err(CubeError::IllegalPermutation(
                    "a corner position has no U or D sticker",
                ));
            };
            let col1 = f[CORNER_FACELETS[i][(ori + 1) % 3]];
            let col2 = f[CORNER_FACELETS[i][(ori + 2) % 3]];
            let Some(piece) = (0..8)
                .find(|&j| CORNER_COLORS[j][1] == col1 && CORNER_COLORS[j][2] == col2)
            else {
                return Err(CubeError::IllegalPermutation(
                    "a sticker triple matches no corner piece",
                ));
            };
            if corner_seen[piece] {
                return Err(CubeError::IllegalPermutation("a corner piece occurs twice"));
            }
            corner_seen[piece] = true;
            cube.cp[i] = Corner::ALL[piece];
            cube.co[i] = ori as u8;
        }

        let mut edge_seen = [false; 12];
        for i in 0..12 {
            let col0 = f[EDGE_FACELETS[i][0]];
            let col1 = f[EDGE_FACELETS[i][1]];
            let Some((piece, ori)) = (0..12).find_map(|j| {
                if EDGE_COLORS[j] == [col0, col1] {
                    Some((j, 0))
                } else if EDGE_COLORS[j] == [col1, col0] {
                    Some((j, 1))
                } else {
                    None
                }
            }) else {
                return Err(CubeError::IllegalPermutation(
                    "a sticker pair matches no edge piece",
                ));
            };
            if edge_seen[piece] {
                return Err(CubeError::IllegalPermutation("an edge piece occurs twice"));
            }
            edge_seen[piece] = true;
            cube.ep[i] = Edge::ALL[piece];
            cube.eo[i] = ori;
        }
        Ok(cube)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    #[test]
    fn four_quarter_turns_are_identity() {
        for basic in &BASIC_MOVES {
            let mut cube = CubieCube::SOLVED;
            for _ in 0..4 {
                cube.multiply(basic);
            }
            assert!(cube.is_solved());
        }
    }

    #[test]
    fn move_then_inverse_move_is_identity() {
        for mv in Move::ALL {
            let mut cube = CubieCube::SOLVED;
            cube.apply_move(mv);
            cube.apply_move(mv.inverse());
            assert!(cube.is_solved(), "{mv} then {} is not identity", mv.inverse());
        }
    }

    #[test]
    fn inverse_composes_to_identity() {
        for _ in 0..20 {
            let cube = CubieCube::random();
            let mut composed = cube.clone();
            composed.multiply(&cube.inverse());
            assert!(composed.is_solved());
        }
    }

    #[test]
    fn facelets_round_trip() {
        let mut cube = CubieCube::SOLVED;
        assert_eq!(
            cube.to_facelets().to_string(),
            FaceletCube::SOLVED_STR,
        );
        cube.apply_move("R".parse().unwrap());
        let decoded = CubieCube::try_from(&cube.to_facelets()).unwrap();
        assert_eq!(decoded, cube);

        for _ in 0..20 {
            let cube = CubieCube::random();
            let decoded = CubieCube::try_from(&cube.to_facelets()).unwrap();
            assert_eq!(decoded, cube);
        }
    }

    #[test]
    fn random_states_are_reachable() {
        for _ in 0..50 {
            CubieCube::random().verify().unwrap();
        }
    }

    #[test]
    fn basic_moves_are_reachable_states() {
        for basic in &BASIC_MOVES {
            basic.verify().unwrap();
        }
    }

    #[test]
    fn quarter_turns_flip_both_parities_together() {
        let mut cube = CubieCube::SOLVED;
        cube.apply_move("R".parse().unwrap());
        assert_eq!(cube.corner_parity(), 1);
        assert_eq!(cube.edge_parity(), 1);
        cube.apply_move("U".parse().unwrap());
        assert_eq!(cube.corner_parity(), 0);
        assert_eq!(cube.edge_parity(), 0);
    }
}
