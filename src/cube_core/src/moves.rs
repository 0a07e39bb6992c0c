//! The 18 face turns and their notation.

use crate::facelet::Face;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How far a face is turned, clockwise as seen from outside that face.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Turn {
    Clockwise = 1,
    Half = 2,
    Counter = 3,
}

/// A single face turn, written `U`, `U2` or `U'` in standard notation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized move token {0:?}")]
pub struct ParseMoveError(pub String);

impl Move {
    /// All 18 turns in face-major order: U, U2, U', R, R2, R', ..., B'.
    /// [`Move::index`] follows this order.
    pub const ALL: [Move; 18] = {
        let mut all = [Move {
            face: Face::U,
            turn: Turn::Clockwise,
        }; 18];
        let faces = Face::ALL;
        let turns = [Turn::Clockwise, Turn::Half, Turn::Counter];
        let mut i = 0;
        while i < 18 {
            all[i] = Move {
                face: faces[i / 3],
                turn: turns[i % 3],
            };
            i += 1;
        }
        all
    };

    #[must_use]
    pub fn index(self) -> usize {
        self.face as usize * 3 + self.turn as usize - 1
    }

    #[must_use]
    pub fn from_index(index: usize) -> Move {
        Move::ALL[index]
    }

    #[must_use]
    pub fn inverse(self) -> Move {
        let turn = match self.turn {
            Turn::Clockwise => Turn::Counter,
            Turn::Half => Turn::Half,
            Turn::Counter => Turn::Clockwise,
        };
        Move { face: self.face, turn }
    }

    /// Whether the turn generates the domino subgroup: any U or D turn,
    /// or a half turn of the other four faces.
    #[must_use]
    pub fn is_phase2(self) -> bool {
        matches!(self.face, Face::U | Face::D) || self.turn == Turn::Half
    }

    /// Search-order pruning: a turn is redundant directly after a turn of
    /// the same face, and of each opposite-face pair only the
    /// lower-numbered face may come first (so of `U D` and `D U` only the
    /// former is ever explored).
    #[must_use]
    pub fn redundant_after(self, prev: Move) -> bool {
        self.face == prev.face
            || (self.face.axis() == prev.face.axis() && (self.face as u8) < (prev.face as u8))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.turn {
            Turn::Clockwise => write!(f, "{}", self.face),
            Turn::Half => write!(f, "{}2", self.face),
            Turn::Counter => write!(f, "{}'", self.face),
        }
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Move, ParseMoveError> {
        let mut chars = s.chars();
        let face = chars
            .next()
            .and_then(Face::from_char)
            .ok_or_else(|| ParseMoveError(s.to_owned()))?;
        let turn = match chars.next() {
            None => Turn::Clockwise,
            Some('2') => Turn::Half,
            Some('\'') => Turn::Counter,
            Some(_) => return Err(ParseMoveError(s.to_owned())),
        };
        if chars.next().is_some() {
            return Err(ParseMoveError(s.to_owned()));
        }
        Ok(Move { face, turn })
    }
}

/// Parse a whitespace-separated move sequence.
///
/// # Errors
///
/// Fails on the first unrecognized token.
pub fn parse_sequence(s: &str) -> Result<Vec<Move>, ParseMoveError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Render a move sequence in standard notation.
#[must_use]
pub fn format_sequence(moves: &[Move]) -> String {
    let tokens: Vec<String> = moves.iter().map(ToString::to_string).collect();
    tokens.join(" ")
}

/// The sequence undoing `moves`.
#[must_use]
pub fn inverse_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.inverse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for (i, mv) in Move::ALL.iter().enumerate() {
            assert_eq!(mv.index(), i);
            assert_eq!(Move::from_index(i), *mv);
        }
    }

    #[test]
    fn notation_round_trips() {
        for mv in Move::ALL {
            assert_eq!(mv.to_string().parse::<Move>().unwrap(), mv);
        }
        assert!("R3".parse::<Move>().is_err());
        assert!("X".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn ten_turns_generate_the_subgroup() {
        assert_eq!(Move::ALL.iter().filter(|m| m.is_phase2()).count(), 10);
    }

    #[test]
    fn inverse_is_an_involution() {
        for mv in Move::ALL {
            assert_eq!(mv.inverse().inverse(), mv);
        }
    }

    #[test]
    fn redundancy_rules() {
        let u: Move = "U".parse().unwrap();
        let u2: Move = "U2".parse().unwrap();
        let d: Move = "D".parse().unwrap();
        let r: Move = "R".parse().unwrap();
        let l2: Move = "L2".parse().unwrap();
        assert!(u2.redundant_after(u));
        assert!(d.redundant_after(d));
        // only one order of an opposite-face pair survives
        assert!(u.redundant_after(d));
        assert!(!d.redundant_after(u));
        assert!(!l2.redundant_after(u));
        assert!(!l2.redundant_after(r));
        assert!(r.redundant_after(l2));
    }

    #[test]
    fn sequences_round_trip() {
        let seq = parse_sequence("R U2 F' D L2 B").unwrap();
        assert_eq!(format_sequence(&seq), "R U2 F' D L2 B");
        assert_eq!(format_sequence(&inverse_sequence(&seq)), "B' L2 D' F U2 R'");
        assert!(parse_sequence("R U x").is_err());
    }
}
