//! Fail-fast validation of raw facelet strings.

use crate::cubie::CubieCube;
use crate::facelet::{Face, FaceletCube};
use std::fmt;
use thiserror::Error;

/// Why a facelet string does not describe a solvable cube.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// The string is not 54 symbols drawn from U, R, F, D, L, B.
    #[error("facelet string must be 54 symbols over U, R, F, D, L, B, got {got}")]
    MalformedInput { got: String },
    /// Some sticker color does not occur exactly nine times.
    #[error("every sticker color must occur exactly 9 times, {face} occurs {count} times")]
    StickerCount { face: Face, count: usize },
    /// The stickers do not decode to a bijective piece arrangement.
    #[error("facelets do not form a legal piece arrangement: {0}")]
    IllegalPermutation(&'static str),
    /// The pieces decode, but no sequence of face turns reaches the state.
    #[error("cube state is not reachable by face turns: {0}")]
    UnsolvableState(UnsolvableReason),
}

/// The reachability invariant a state violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsolvableReason {
    CornerTwist,
    EdgeFlip,
    PermutationParity,
}

impl fmt::Display for UnsolvableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnsolvableReason::CornerTwist => "corner orientations do not sum to a multiple of 3",
            UnsolvableReason::EdgeFlip => "edge orientations do not sum to a multiple of 2",
            UnsolvableReason::PermutationParity => {
                "corner and edge permutations have opposite parity"
            }
        };
        write!(f, "{text}")
    }
}

/// Check a raw facelet string and decode it into a cube state.
///
/// The checks run in order: shape, sticker counts, piece decoding,
/// reachability invariants. Nothing else happens; in particular no search
/// work starts before the input is known to be a legal cube.
///
/// # Errors
///
/// The first failed check, as a [`CubeError`].
pub fn validate(facelets: &str) -> Result<CubieCube, CubeError> {
    let facelet_cube: FaceletCube = facelets.parse()?;
    let mut counts = [0usize; 6];
    for &face in &facelet_cube.0 {
        counts[face as usize] += 1;
    }
    for (i, &count) in counts.iter().enumerate() {
        if count != 9 {
            return Err(CubeError::StickerCount {
                face: Face::ALL[i],
                count,
            });
        }
    }
    let cube = CubieCube::try_from(&facelet_cube)?;
    cube.verify()?;
    Ok(cube)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::parse_sequence;

    fn solved() -> String {
        FaceletCube::SOLVED_STR.to_owned()
    }

    #[test]
    fn accepts_solved_and_scrambled_states() {
        assert!(validate(FaceletCube::SOLVED_STR).unwrap().is_solved());

        let mut cube = CubieCube::SOLVED;
        cube.apply_moves(&parse_sequence("R U F' D2 L B2 U' R2 F D'").unwrap());
        let decoded = validate(&cube.to_facelets().to_string()).unwrap();
        assert_eq!(decoded, cube);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = validate(&solved()[..53]).unwrap_err();
        assert!(matches!(err, CubeError::MalformedInput { .. }));
    }

    #[test]
    fn rejects_wrong_sticker_counts() {
        // turn one D sticker into a U: 10 U's, 8 D's
        let mut s = solved();
        s.replace_range(27..28, "U");
        assert_eq!(
            validate(&s).unwrap_err(),
            CubeError::StickerCount {
                face: Face::U,
                count: 10
            }
        );
    }

    #[test]
    fn rejects_duplicated_corner_piece() {
        // rewrite the URF corner as a second UFL and the UL edge as a
        // second UR, keeping all sticker counts at nine
        let mut s = solved().into_bytes();
        s[9] = b'F';
        s[20] = b'L';
        s[37] = b'R';
        let s = String::from_utf8(s).unwrap();
        assert!(matches!(
            validate(&s).unwrap_err(),
            CubeError::IllegalPermutation(_)
        ));
    }

    #[test]
    fn rejects_single_flipped_edge() {
        let mut s = solved().into_bytes();
        // swap the two stickers of the UF edge
        s[7] = b'F';
        s[19] = b'U';
        let s = String::from_utf8(s).unwrap();
        assert_eq!(
            validate(&s).unwrap_err(),
            CubeError::UnsolvableState(UnsolvableReason::EdgeFlip)
        );
    }

    #[test]
    fn rejects_single_twisted_corner() {
        let mut cube = CubieCube::SOLVED;
        cube.co[0] = 1;
        let s = cube.to_facelets().to_string();
        assert_eq!(
            validate(&s).unwrap_err(),
            CubeError::UnsolvableState(UnsolvableReason::CornerTwist)
        );
    }

    #[test]
    fn rejects_swapped_edge_pair() {
        let mut cube = CubieCube::SOLVED;
        cube.ep.swap(0, 2);
        let s = cube.to_facelets().to_string();
        assert_eq!(
            validate(&s).unwrap_err(),
            CubeError::UnsolvableState(UnsolvableReason::PermutationParity)
        );
    }

    #[test]
    fn rejects_shuffled_centers() {
        let mut s = solved().into_bytes();
        s.swap(4, 13);
        let s = String::from_utf8(s).unwrap();
        assert!(matches!(
            validate(&s).unwrap_err(),
            CubeError::IllegalPermutation(_)
        ));
    }
}
