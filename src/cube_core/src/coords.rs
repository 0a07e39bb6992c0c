//! Bounded-integer coordinates of a cube state.
//!
//! Each coordinate is a bijection between an aspect of the state and a
//! `0..N` range: positional base-3/base-2 codes for the orientations,
//! Lehmer ranks for permutations, and binomial ranks for the placement of
//! a piece subset. Every getter has a setter such that `get(set(x)) == x`
//! over the full range, which is what the solver's table builders rely on.

use crate::cubie::{Corner, CubieCube, Edge};

/// Corner orientations, `0..2187`.
pub const N_TWIST: u16 = 2187;
/// Edge orientations, `0..2048`.
pub const N_FLIP: u16 = 2048;
/// Placement and order of the four middle-slice edges, `0..11880`.
/// Divided by 24 it is the 0..495 placement used to define the domino
/// subgroup; modulo 24 it is the slice permutation solved in phase 2.
pub const N_FR_TO_BR: u16 = 11_880;
/// Permutation of the six corners URF..DLF, `0..20160`.
pub const N_URF_TO_DLF: u16 = 20_160;
/// Permutation of the six edges UR..DF within the subgroup, `0..20160`.
pub const N_UR_TO_DF: u16 = 20_160;
/// Placement and order of the edges UR, UF, UL, `0..1320`.
pub const N_UR_TO_UL: u16 = 1_320;
/// Placement and order of the edges UB, DR, DF, `0..1320`.
pub const N_UB_TO_DF: u16 = 1_320;

/// Binomial coefficient, zero when `k > n`.
#[must_use]
pub fn binomial(n: usize, k: usize) -> u32 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut b: u32 = 1;
    for i in 0..k {
        // exact at every step: the running value is C(n, i + 1)
        b = b * (n - i) as u32 / (i as u32 + 1);
    }
    b
}

impl CubieCube {
    /// Corner orientation coordinate. The twist of DRB is forced by the
    /// other seven.
    #[must_use]
    pub fn twist(&self) -> u16 {
        self.co[..7]
            .iter()
            .fold(0, |acc, &o| 3 * acc + u16::from(o))
    }

    pub fn set_twist(&mut self, mut twist: u16) {
        debug_assert!(twist < N_TWIST);
        let mut sum = 0;
        for i in (0..7).rev() {
            self.co[i] = (twist % 3) as u8;
            sum += self.co[i];
            twist /= 3;
        }
        self.co[7] = (3 - sum % 3) % 3;
    }

    /// Edge orientation coordinate. The flip of BR is forced by the other
    /// eleven.
    #[must_use]
    pub fn flip(&self) -> u16 {
        self.eo[..11]
            .iter()
            .fold(0, |acc, &o| 2 * acc + u16::from(o))
    }

    pub fn set_flip(&mut self, mut flip: u16) {
        debug_assert!(flip < N_FLIP);
        let mut sum = 0;
        for i in (0..11).rev() {
            self.eo[i] = (flip % 2) as u8;
            sum += self.eo[i];
            flip /= 2;
        }
        self.eo[11] = sum % 2;
    }

    /// Placement and order of the four middle-slice edges FR, FL, BL, BR:
    /// 24 times the binomial rank of their positions plus the Lehmer rank
    /// of their order.
    #[must_use]
    pub fn fr_to_br(&self) -> u16 {
        let mut a = 0;
        let mut x = 0;
        let mut edge4 = [Edge::Fr; 4];
        for j in (0..12).rev() {
            if self.ep[j] as u8 >= Edge::Fr as u8 {
                a += binomial(11 - j, x + 1);
                edge4[3 - x] = self.ep[j];
                x += 1;
            }
        }
        let mut b = 0u16;
        for j in (1..4).rev() {
            let mut k = 0;
            while edge4[j] as usize != j + 8 {
                edge4[..=j].rotate_left(1);
                k += 1;
            }
            b = (j as u16 + 1) * b + k;
        }
        24 * a as u16 + b
    }

    pub fn set_fr_to_br(&mut self, idx: u16) {
        debug_assert!(idx < N_FR_TO_BR);
        let mut a = u32::from(idx / 24);
        let mut b = idx % 24;
        let mut edge4 = [Edge::Fr, Edge::Fl, Edge::Bl, Edge::Br];
        const OTHER: [Edge; 8] = [
            Edge::Ur,
            Edge::Uf,
            Edge::Ul,
            Edge::Ub,
            Edge::Dr,
            Edge::Df,
            Edge::Dl,
            Edge::Db,
        ];
        // Db marks the positions still to be filled below.
        self.ep = [Edge::Db; 12];
        for j in 1..4 {
            let mut k = b % (j as u16 + 1);
            b /= j as u16 + 1;
            while k > 0 {
                edge4[..=j].rotate_right(1);
                k -= 1;
            }
        }
        let mut x = 3i32;
        for j in 0..12 {
            if x >= 0 && binomial(11 - j, (x + 1) as usize) <= a {
                self.ep[j] = edge4[(3 - x) as usize];
                a -= binomial(11 - j, (x + 1) as usize);
                x -= 1;
            }
        }
        let mut fill = OTHER.iter();
        for j in 0..12 {
            if self.ep[j] == Edge::Db {
                if let Some(&e) = fill.next() {
                    self.ep[j] = e;
                }
            }
        }
    }

    /// Lehmer-style rank of the permutation of the six corners URF..DLF
    /// over the eight corner positions.
    #[must_use]
    pub fn urf_to_dlf(&self) -> u16 {
        let mut a = 0;
        let mut x = 0;
        let mut corner6 = [Corner::Urf; 6];
        for j in 0..8 {
            if (self.cp[j] as u8) <= Corner::Dlf as u8 {
                a += binomial(j, x + 1);
                corner6[x] = self.cp[j];
                x += 1;
            }
        }
        let mut b = 0u16;
        for j in (1..6).rev() {
            let mut k = 0;
            while corner6[j] as usize != j {
                corner6[..=j].rotate_left(1);
                k += 1;
            }
            b = (j as u16 + 1) * b + k;
        }
        720 * a as u16 + b
    }

    pub fn set_urf_to_dlf(&mut self, idx: u16) {
        debug_assert!(idx < N_URF_TO_DLF);
        let mut a = u32::from(idx / 720);
        let mut b = idx % 720;
        let mut corner6 = [
            Corner::Urf,
            Corner::Ufl,
            Corner::Ulb,
            Corner::Ubr,
            Corner::Dfr,
            Corner::Dlf,
        ];
        const OTHER: [Corner; 2] = [Corner::Dbl, Corner::Drb];
        // Drb marks the two positions filled from OTHER afterwards.
        self.cp = [Corner::Drb; 8];
        for j in 1..6 {
            let mut k = b % (j as u16 + 1);
            b /= j as u16 + 1;
            while k > 0 {
                corner6[..=j].rotate_right(1);
                k -= 1;
            }
        }
        let mut x = 5i32;
        for j in (0..8).rev() {
            if x >= 0 && binomial(j, (x + 1) as usize) <= a {
                self.cp[j] = corner6[x as usize];
                a -= binomial(j, (x + 1) as usize);
                x -= 1;
            }
        }
        let mut fill = OTHER.iter();
        for j in 0..8 {
            if self.cp[j] == Corner::Drb {
                if let Some(&c) = fill.next() {
                    self.cp[j] = c;
                }
            }
        }
    }

    /// Lehmer-style rank of the permutation of the six edges UR..DF over
    /// all twelve positions. Stays below [`N_UR_TO_DF`] exactly when the
    /// state lies in the domino subgroup.
    #[must_use]
    pub fn ur_to_df(&self) -> u32 {
        let mut a = 0;
        let mut x = 0;
        let mut edge6 = [Edge::Ur; 6];
        for j in 0..12 {
            if (self.ep[j] as u8) <= Edge::Df as u8 {
                a += binomial(j, x + 1);
                edge6[x] = self.ep[j];
                x += 1;
            }
        }
        let mut b = 0u32;
        for j in (1..6).rev() {
            let mut k = 0;
            while edge6[j] as usize != j {
                edge6[..=j].rotate_left(1);
                k += 1;
            }
            b = (j as u32 + 1) * b + k;
        }
        720 * a + b
    }

    pub fn set_ur_to_df(&mut self, idx: u32) {
        let mut a = idx / 720;
        let mut b = idx % 720;
        let mut edge6 = [Edge::Ur, Edge::Uf, Edge::Ul, Edge::Ub, Edge::Dr, Edge::Df];
        const OTHER: [Edge; 6] = [Edge::Dl, Edge::Db, Edge::Fr, Edge::Fl, Edge::Bl, Edge::Br];
        // Br marks the positions filled from OTHER afterwards.
        self.ep = [Edge::Br; 12];
        for j in 1..6 {
            let mut k = b % (j as u32 + 1);
            b /= j as u32 + 1;
            while k > 0 {
                edge6[..=j].rotate_right(1);
                k -= 1;
            }
        }
        let mut x = 5i32;
        for j in (0..12).rev() {
            if x >= 0 && binomial(j, (x + 1) as usize) <= a {
                self.ep[j] = edge6[x as usize];
                a -= binomial(j, (x + 1) as usize);
                x -= 1;
            }
        }
        let mut fill = OTHER.iter();
        for j in 0..12 {
            if self.ep[j] == Edge::Br {
                if let Some(&e) = fill.next() {
                    self.ep[j] = e;
                }
            }
        }
    }

    /// Placement and order of the edges UR, UF, UL, threaded through
    /// phase 1 so the phase-2 edge coordinate can be merged at the phase
    /// boundary.
    #[must_use]
    pub fn ur_to_ul(&self) -> u16 {
        let mut a = 0;
        let mut x = 0;
        let mut edge3 = [Edge::Ur; 3];
        for j in 0..12 {
            if (self.ep[j] as u8) <= Edge::Ul as u8 {
                a += binomial(j, x + 1);
                edge3[x] = self.ep[j];
                x += 1;
            }
        }
        let mut b = 0u16;
        for j in (1..3).rev() {
            let mut k = 0;
            while edge3[j] as usize != j {
                edge3[..=j].rotate_left(1);
                k += 1;
            }
            b = (j as u16 + 1) * b + k;
        }
        6 * a as u16 + b
    }

    pub fn set_ur_to_ul(&mut self, idx: u16) {
        debug_assert!(idx < N_UR_TO_UL);
        let mut a = u32::from(idx / 6);
        let mut b = idx % 6;
        let mut edge3 = [Edge::Ur, Edge::Uf, Edge::Ul];
        // The other nine positions keep the Br marker; only the relative
        // placement of the three tracked edges feeds the coordinate.
        self.ep = [Edge::Br; 12];
        for j in 1..3 {
            let mut k = b % (j as u16 + 1);
            b /= j as u16 + 1;
            while k > 0 {
                edge3[..=j].rotate_right(1);
                k -= 1;
            }
        }
        let mut x = 2i32;
        for j in (0..12).rev() {
            if x >= 0 && binomial(j, (x + 1) as usize) <= a {
                self.ep[j] = edge3[x as usize];
                a -= binomial(j, (x + 1) as usize);
                x -= 1;
            }
        }
    }

    /// Counterpart of [`ur_to_ul`](Self::ur_to_ul) for UB, DR, DF.
    #[must_use]
    pub fn ub_to_df(&self) -> u16 {
        let mut a = 0;
        let mut x = 0;
        let mut edge3 = [Edge::Ub; 3];
        for j in 0..12 {
            let e = self.ep[j] as u8;
            if e >= Edge::Ub as u8 && e <= Edge::Df as u8 {
                a += binomial(j, x + 1);
                edge3[x] = self.ep[j];
                x += 1;
            }
        }
        let mut b = 0u16;
        for j in (1..3).rev() {
            let mut k = 0;
            while edge3[j] as usize != j + 3 {
                edge3[..=j].rotate_left(1);
                k += 1;
            }
            b = (j as u16 + 1) * b + k;
        }
        6 * a as u16 + b
    }

    pub fn set_ub_to_df(&mut self, idx: u16) {
        debug_assert!(idx < N_UB_TO_DF);
        let mut a = u32::from(idx / 6);
        let mut b = idx % 6;
        let mut edge3 = [Edge::Ub, Edge::Dr, Edge::Df];
        self.ep = [Edge::Br; 12];
        for j in 1..3 {
            let mut k = b % (j as u16 + 1);
            b /= j as u16 + 1;
            while k > 0 {
                edge3[..=j].rotate_right(1);
                k -= 1;
            }
        }
        let mut x = 2i32;
        for j in (0..12).rev() {
            if x >= 0 && binomial(j, (x + 1) as usize) <= a {
                self.ep[j] = edge3[x as usize];
                a -= binomial(j, (x + 1) as usize);
                x -= 1;
            }
        }
    }
}

/// Combine the two three-edge coordinates of a subgroup state into its
/// `ur_to_df` value. `None` when the placements overlap, which cannot
/// happen for the two coordinates of one actual state.
#[must_use]
pub fn merge_ur_to_df(ur_to_ul: u16, ub_to_df: u16) -> Option<u16> {
    let mut a = CubieCube::SOLVED;
    let mut b = CubieCube::SOLVED;
    a.set_ur_to_ul(ur_to_ul);
    b.set_ub_to_df(ub_to_df);
    for i in 0..8 {
        if a.ep[i] != Edge::Br {
            if b.ep[i] != Edge::Br {
                return None;
            }
            b.ep[i] = a.ep[i];
        }
    }
    Some(b.ur_to_df() as u16)
}
