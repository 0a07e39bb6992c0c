//! Facelet-level cube representation.
//!
//! A cube state on the wire is 54 face symbols, face by face in the order
//! U, R, F, D, L, B, 9 stickers per face in row-major order. The face
//! letter doubles as the sticker color of that face's center (U=white,
//! R=red, F=green, D=yellow, L=orange, B=blue by convention); the engine
//! itself only ever deals in letters.

use crate::validate::CubeError;
use std::fmt;
use std::str::FromStr;

/// One of the six faces of the cube.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Face {
    U = 0,
    R = 1,
    F = 2,
    D = 3,
    L = 4,
    B = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    #[must_use]
    pub fn from_char(c: char) -> Option<Face> {
        match c {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        b"URFDLB"[self as usize] as char
    }

    /// U/D, R/L and F/B pairs share an axis.
    #[must_use]
    pub fn axis(self) -> u8 {
        self as u8 % 3
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The 54 stickers of a cube, indexed facelet-by-facelet in wire order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FaceletCube(pub [Face; 54]);

impl FaceletCube {
    pub const SOLVED_STR: &'static str =
        "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
}

impl FromStr for FaceletCube {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, CubeError> {
        let mut facelets = [Face::U; 54];
        let mut len = 0;
        for (i, c) in s.chars().enumerate() {
            let Some(face) = Face::from_char(c) else {
                return Err(CubeError::MalformedInput {
                    got: format!("symbol {c:?} at position {i}"),
                });
            };
            if i < 54 {
                facelets[i] = face;
            }
            len += 1;
        }
        if len != 54 {
            return Err(CubeError::MalformedInput {
                got: format!("{len} symbols"),
            });
        }
        Ok(FaceletCube(facelets))
    }
}

impl fmt::Display for FaceletCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in &self.0 {
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

/// Facelet indices of the three stickers of each corner position, in the
/// order URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB. The first sticker of each
/// triple lies on the U or D face.
pub const CORNER_FACELETS: [[usize; 3]; 8] = [
    [8, 9, 20],   // URF
    [6, 18, 38],  // UFL
    [0, 36, 47],  // ULB
    [2, 45, 11],  // UBR
    [29, 26, 15], // DFR
    [27, 44, 24], // DLF
    [33, 53, 42], // DBL
    [35, 17, 51], // DRB
];

/// Facelet indices of the two stickers of each edge position, in the order
/// UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR.
pub const EDGE_FACELETS: [[usize; 2]; 12] = [
    [5, 10],  // UR
    [7, 19],  // UF
    [3, 37],  // UL
    [1, 46],  // UB
    [32, 16], // DR
    [28, 25], // DF
    [30, 43], // DL
    [34, 52], // DB
    [23, 12], // FR
    [21, 41], // FL
    [50, 39], // BL
    [48, 14], // BR
];

/// Reference sticker pattern of each corner piece in its home position.
pub const CORNER_COLORS: [[Face; 3]; 8] = [
    [Face::U, Face::R, Face::F],
    [Face::U, Face::F, Face::L],
    [Face::U, Face::L, Face::B],
    [Face::U, Face::B, Face::R],
    [Face::D, Face::F, Face::R],
    [Face::D, Face::L, Face::F],
    [Face::D, Face::B, Face::L],
    [Face::D, Face::R, Face::B],
];

/// Reference sticker pattern of each edge piece in its home position.
pub const EDGE_COLORS: [[Face; 2]; 12] = [
    [Face::U, Face::R],
    [Face::U, Face::F],
    [Face::U, Face::L],
    [Face::U, Face::B],
    [Face::D, Face::R],
    [Face::D, Face::F],
    [Face::D, Face::L],
    [Face::D, Face::B],
    [Face::F, Face::R],
    [Face::F, Face::L],
    [Face::B, Face::L],
    [Face::B, Face::R],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_round_trips() {
        let cube: FaceletCube = FaceletCube::SOLVED_STR.parse().unwrap();
        assert_eq!(cube.to_string(), FaceletCube::SOLVED_STR);
    }

    #[test]
    fn wrong_length_is_malformed() {
        let short = &FaceletCube::SOLVED_STR[..53];
        assert!(matches!(
            short.parse::<FaceletCube>(),
            Err(CubeError::MalformedInput { .. })
        ));
        let long = format!("{}U", FaceletCube::SOLVED_STR);
        assert!(matches!(
            long.parse::<FaceletCube>(),
            Err(CubeError::MalformedInput { .. })
        ));
    }

    #[test]
    fn unknown_symbol_is_malformed() {
        let mut s = FaceletCube::SOLVED_STR.to_owned();
        s.replace_range(10..11, "x");
        assert!(matches!(
            s.parse::<FaceletCube>(),
            Err(CubeError::MalformedInput { .. })
        ));
    }

    #[test]
    fn facelet_tables_cover_every_sticker() {
        let mut seen = [false; 54];
        for i in (4..54).step_by(9) {
            seen[i] = true; // centers
        }
        for triple in &CORNER_FACELETS {
            for &i in triple {
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
        for pair in &EDGE_FACELETS {
            for &i in pair {
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
