// This file is part of the delta-movements generator.
// Copyright (C) 2026 The delta-movements developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Delta movement and delta base tables.
//!
//! # Example
//!
//! ```
//! use delta_movements::{Delta, Role, Square, Tables};
//!
//! let tables = Tables::generate()?;
//!
//! let from: Square = "e2".parse()?;
//! let to: Square = "b5".parse()?;
//! let delta = Delta::between(to, from);
//!
//! assert!(tables.movement_info().is_valid_for(Role::Bishop, delta));
//! assert!(!tables.movement_info().is_valid_for(Role::Rook, delta));
//!
//! // Walk the diagonal one square at a time.
//! assert_eq!(tables.bases().base(delta), Delta::new(0x0f));
//! let between = tables.bases().squares_between(from, to).expect("on a line");
//! assert_eq!(between.len(), 2);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use arrayvec::ArrayVec;
use tracing::debug;

use crate::{
    delta::Delta,
    errors::{GenerateError, Result},
    movers::Movers,
    role::Role,
    selftest,
    square::{self, Square},
    util::nibbles,
};

/// Length of the movement table: one entry per delta in `-0x77..=0x77`.
pub const MOVEMENT_INFO_LEN: usize = Delta::MAX as usize * 2 + 1;

/// Length of the delta base table: one entry per magnitude in `0..=0x77`.
pub const BASES_LEN: usize = Delta::MAX as usize + 1;

const KING_MAGNITUDES: [u8; 4] = [0x01, 0x0f, 0x10, 0x11];

#[rustfmt::skip]
const ROOK_MAGNITUDES: [u8; 14] = [
    0x01, 0x10, 0x02, 0x20, 0x03, 0x30, 0x04, 0x40,
    0x05, 0x50, 0x06, 0x60, 0x07, 0x70,
];

#[rustfmt::skip]
const BISHOP_MAGNITUDES: [u8; 14] = [
    0x11, 0x0f, 0x22, 0x1e, 0x33, 0x2d, 0x44, 0x3c,
    0x55, 0x4b, 0x66, 0x5a, 0x77, 0x69,
];

const KNIGHT_MAGNITUDES: [u8; 4] = [0x0e, 0x12, 0x1f, 0x21];

/// Magnitudes of all sliding moves, grouped by distance 1 to 7. Each group
/// holds the horizontal, anti-diagonal, vertical and diagonal offset.
#[rustfmt::skip]
pub const SLIDING_DELTAS: [u8; 28] = [
    0x01, 0x0f, 0x10, 0x11,
    0x02, 0x1e, 0x20, 0x22,
    0x03, 0x2d, 0x30, 0x33,
    0x04, 0x3c, 0x40, 0x44,
    0x05, 0x4b, 0x50, 0x55,
    0x06, 0x5a, 0x60, 0x66,
    0x07, 0x69, 0x70, 0x77,
];

/// Roles that can travel a delta of the given magnitude in one move.
///
/// # Examples
///
/// ```
/// use delta_movements::{tables, Movers};
///
/// assert_eq!(tables::movers_for_magnitude(0x0e), Movers::KNIGHT);
/// assert_eq!(tables::movers_for_magnitude(0x22), Movers::QUEEN | Movers::BISHOP);
/// assert_eq!(tables::movers_for_magnitude(0x13), Movers::empty());
/// ```
pub fn movers_for_magnitude(magnitude: u8) -> Movers {
    let mut movers = Movers::empty();
    if KING_MAGNITUDES.contains(&magnitude) {
        movers |= Movers::KING;
    }
    if ROOK_MAGNITUDES.contains(&magnitude) {
        movers |= Movers::QUEEN | Movers::ROOK;
    }
    if BISHOP_MAGNITUDES.contains(&magnitude) {
        movers |= Movers::QUEEN | Movers::BISHOP;
    }
    if KNIGHT_MAGNITUDES.contains(&magnitude) {
        movers |= Movers::KNIGHT;
    }
    movers
}

/// Smallest step that walks the direction of a sliding offset one square
/// at a time.
///
/// # Examples
///
/// ```
/// use delta_movements::tables::delta_base;
///
/// assert_eq!(delta_base(0x30), 0x10);
/// assert_eq!(delta_base(0x4b), 0x0f);
/// assert_eq!(delta_base(0x06), 0x01);
/// ```
pub const fn delta_base(delta: u8) -> u8 {
    let (high, low) = nibbles(delta);
    if high != 0 {
        if high != low && low != 0 {
            // Anti-diagonal: the distance is high + 1 steps of 0x0f.
            delta / (high + 1)
        } else {
            delta / high
        }
    } else if delta == 0x0f {
        // Anti-diagonal single step, despite the empty high nibble.
        0x0f
    } else {
        0x01
    }
}

/// For every delta, the set of roles that can travel it in one move.
///
/// Pawns are not covered. Bits follow [`Movers`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DeltaMovementInfo([u8; MOVEMENT_INFO_LEN]);

impl DeltaMovementInfo {
    /// Computes the table from every ordered pair of the given squares.
    ///
    /// # Errors
    ///
    /// Errors if two pairs with the same delta disagree on their movers.
    pub fn from_squares(squares: &[Square]) -> Result<DeltaMovementInfo, GenerateError> {
        DeltaMovementInfo::from_squares_with(squares, |m, n| {
            movers_for_magnitude(Delta::between(m, n).magnitude())
        })
    }

    pub(crate) fn from_squares_with<F>(
        squares: &[Square],
        rule: F,
    ) -> Result<DeltaMovementInfo, GenerateError>
    where
        F: Fn(Square, Square) -> Movers,
    {
        let mut table = [0; MOVEMENT_INFO_LEN];
        let mut seen = [false; MOVEMENT_INFO_LEN];

        for &m in squares {
            for &n in squares {
                let delta = Delta::between(m, n);
                let index = delta.table_index();
                let movers = rule(m, n);

                let slot = table
                    .get_mut(index)
                    .ok_or(GenerateError::IndexOutOfRange {
                        table: "delta movement info",
                        index,
                        len: MOVEMENT_INFO_LEN,
                    })?;

                if seen[index] && *slot != movers.bits() {
                    return Err(GenerateError::InconsistentDelta {
                        delta,
                        first: Movers::from_bits_retain(*slot),
                        second: movers,
                    });
                }

                *slot = movers.bits();
                seen[index] = true;
            }
        }

        Ok(DeltaMovementInfo(table))
    }

    /// Wraps an existing table, e.g. one read back from generated output.
    pub const fn from_bytes(bytes: [u8; MOVEMENT_INFO_LEN]) -> DeltaMovementInfo {
        DeltaMovementInfo(bytes)
    }

    /// Roles that can travel `delta` in one move.
    #[inline]
    pub fn movers(&self, delta: Delta) -> Movers {
        Movers::from_bits_retain(self.0[delta.table_index()])
    }

    /// Tests whether `role` can travel `delta` in one move, ignoring
    /// blockers.
    #[inline]
    pub fn is_valid_for(&self, role: Role, delta: Delta) -> bool {
        self.movers(delta).has(role)
    }

    pub fn as_bytes(&self) -> &[u8; MOVEMENT_INFO_LEN] {
        &self.0
    }
}

/// Maps the magnitude of a sliding delta to its delta base.
///
/// Only the offsets a table was built from have a base. All other entries
/// are zero.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DeltaBases([u8; BASES_LEN]);

impl DeltaBases {
    /// Computes the table for the given positive offsets.
    ///
    /// # Errors
    ///
    /// Errors if an offset exceeds [`Delta::MAX`].
    pub fn from_offsets(offsets: &[u8]) -> Result<DeltaBases, GenerateError> {
        let mut table = [0; BASES_LEN];

        for &offset in offsets {
            let index = usize::from(offset);
            let slot = table
                .get_mut(index)
                .ok_or(GenerateError::IndexOutOfRange {
                    table: "delta bases",
                    index,
                    len: BASES_LEN,
                })?;
            *slot = delta_base(offset);
        }

        Ok(DeltaBases(table))
    }

    /// Wraps an existing table, e.g. one read back from generated output.
    pub const fn from_bytes(bytes: [u8; BASES_LEN]) -> DeltaBases {
        DeltaBases(bytes)
    }

    /// Raw table entry for a non-negative magnitude. Zero means undefined.
    #[inline]
    pub fn get(&self, magnitude: u8) -> u8 {
        self.0.get(usize::from(magnitude)).copied().unwrap_or(0)
    }

    /// Signed single step in the direction of `delta`, or `None` if the
    /// delta is not a sliding offset.
    ///
    /// # Examples
    ///
    /// ```
    /// use delta_movements::{Delta, Tables};
    ///
    /// let bases = Tables::generate()?.bases().clone();
    /// let base = |d| bases.base(Delta::new(d).expect("in range")).map(i8::from);
    /// assert_eq!(base(-0x60), Some(-0x10));
    /// assert_eq!(base(0x4b), Some(0x0f));
    /// assert_eq!(base(0x21), None);
    /// # Ok::<_, delta_movements::Error>(())
    /// ```
    pub fn base(&self, delta: Delta) -> Option<Delta> {
        match self.get(delta.magnitude()) {
            0 => None,
            base => delta.with_magnitude(base),
        }
    }

    /// Squares strictly between `from` and `to`, found by stepping with the
    /// delta base. `None` if the squares are not on a common line or the
    /// walk misses `to`.
    pub fn squares_between(&self, from: Square, to: Square) -> Option<ArrayVec<Square, 6>> {
        let step = self.base(Delta::between(to, from))?;
        let mut between = ArrayVec::new();
        let mut sq = from;
        loop {
            sq = sq.offset(step)?;
            if sq == to {
                return Some(between);
            }
            between.try_push(sq).ok()?;
        }
    }

    pub fn as_bytes(&self) -> &[u8; BASES_LEN] {
        &self.0
    }
}

/// Both generated tables.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Tables {
    movement_info: DeltaMovementInfo,
    bases: DeltaBases,
}

impl Tables {
    /// Computes both tables without checking them.
    ///
    /// # Errors
    ///
    /// Errors on violated table invariants.
    pub fn compute() -> Result<Tables, GenerateError> {
        let squares = square::board_locations();
        let movement_info = DeltaMovementInfo::from_squares(&squares)?;
        let bases = DeltaBases::from_offsets(&SLIDING_DELTAS)?;

        debug!(
            squares = squares.len(),
            deltas = movement_info.0.iter().filter(|&&flags| flags != 0).count(),
            bases = bases.0.iter().filter(|&&base| base != 0).count(),
            "computed delta tables"
        );

        Ok(Tables {
            movement_info,
            bases,
        })
    }

    /// Computes both tables and runs the self-test on them.
    ///
    /// # Errors
    ///
    /// Errors on violated table invariants or a failed self-test.
    pub fn generate() -> Result<Tables> {
        let tables = Tables::compute()?;
        selftest::run(&tables)?;
        Ok(tables)
    }

    pub fn movement_info(&self) -> &DeltaMovementInfo {
        &self.movement_info
    }

    pub fn bases(&self) -> &DeltaBases {
        &self.bases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(value: i32) -> Delta {
        Delta::new(value).expect("in range")
    }

    #[test]
    fn test_table_lengths() {
        assert_eq!(MOVEMENT_INFO_LEN, 0xef);
        assert_eq!(BASES_LEN, 0x78);
    }

    #[test]
    fn test_corner_to_corner() {
        let tables = Tables::compute().expect("tables");
        for d in [delta(0x77), delta(-0x77)] {
            assert_eq!(tables.movement_info().movers(d), Movers::QUEEN | Movers::BISHOP);
        }
        assert_eq!(tables.bases().get(0x77), 0x11);
    }

    #[test]
    fn test_knight_and_anti_diagonal_neighbours() {
        let info = Tables::compute().expect("tables").movement_info().clone();
        assert_eq!(info.movers(delta(0x0e)), Movers::KNIGHT);
        assert_eq!(info.movers(delta(-0x0e)), Movers::KNIGHT);
        assert_eq!(
            info.movers(delta(0x0f)),
            Movers::KING | Movers::QUEEN | Movers::BISHOP
        );
        assert!(!info.is_valid_for(Role::Rook, delta(0x0f)));
        assert_eq!(info.movers(delta(0x1e)), Movers::QUEEN | Movers::BISHOP);
        assert_eq!(
            info.movers(delta(0x11)),
            Movers::KING | Movers::QUEEN | Movers::BISHOP
        );
        assert_eq!(
            info.movers(delta(-0x10)),
            Movers::KING | Movers::QUEEN | Movers::ROOK
        );
    }

    #[test]
    fn test_unreachable_magnitudes_are_empty() {
        let info = Tables::compute().expect("tables").movement_info().clone();
        for magnitude in [0x00, 0x08, 0x09, 0x13] {
            assert_eq!(info.movers(delta(magnitude)), Movers::empty());
            assert_eq!(info.movers(delta(-magnitude)), Movers::empty());
        }
    }

    #[test]
    fn test_movement_info_is_sign_symmetric() {
        let info = Tables::compute().expect("tables").movement_info().clone();
        for value in 0..=0x77 {
            assert_eq!(info.movers(delta(value)), info.movers(delta(-value)));
        }
    }

    #[test]
    fn test_bases() {
        let bases = DeltaBases::from_offsets(&SLIDING_DELTAS).expect("bases");
        assert_eq!(bases.get(0x30), 0x10);
        assert_eq!(bases.get(0x4b), 0x0f);
        assert_eq!(bases.get(0x0f), 0x0f);
        assert_eq!(bases.get(0x22), 0x11);
        assert_eq!(bases.get(0x07), 0x01);
        assert_eq!(bases.get(0x1e), 0x0f);

        let defined: Vec<u8> = (0..=Delta::MAX).filter(|&m| bases.get(m) != 0).collect();
        let mut expected = SLIDING_DELTAS.to_vec();
        expected.sort_unstable();
        assert_eq!(defined, expected);
    }

    #[test]
    fn test_signed_base() {
        let tables = Tables::compute().expect("tables");
        assert_eq!(tables.bases().base(delta(-0x60)), Some(delta(-0x10)));
        assert_eq!(tables.bases().base(delta(0x4b)), Some(delta(0x0f)));
        assert_eq!(tables.bases().base(delta(-0x2d)), Some(delta(-0x0f)));
        assert_eq!(tables.bases().base(delta(0x12)), None);
        assert_eq!(tables.bases().base(Delta::ZERO), None);
    }

    #[test]
    fn test_squares_between() {
        let bases = Tables::compute().expect("tables").bases().clone();
        let sq = |name: &str| name.parse::<Square>().expect("square");

        let between = bases.squares_between(sq("a1"), sq("a4")).expect("file");
        assert_eq!(between.as_slice(), [sq("a2"), sq("a3")]);

        let between = bases.squares_between(sq("h8"), sq("a1")).expect("diagonal");
        assert_eq!(between.len(), 6);
        assert_eq!(between.first(), Some(&sq("g7")));

        assert_eq!(
            bases.squares_between(sq("e4"), sq("e5")).map(|b| b.len()),
            Some(0)
        );
        assert_eq!(bases.squares_between(sq("b1"), sq("c3")), None);
        assert_eq!(bases.squares_between(sq("e4"), sq("e4")), None);
    }

    #[test]
    fn test_offset_out_of_range() {
        assert_eq!(
            DeltaBases::from_offsets(&[0x01, 0x78]),
            Err(GenerateError::IndexOutOfRange {
                table: "delta bases",
                index: 0x78,
                len: BASES_LEN,
            })
        );
    }

    #[test]
    fn test_inconsistent_delta() {
        // A rule that depends on the source square, not only on the delta.
        let err = DeltaMovementInfo::from_squares_with(&square::board_locations(), |m, _| {
            if m == Square::A1 {
                Movers::KNIGHT
            } else {
                Movers::empty()
            }
        })
        .unwrap_err();

        assert_eq!(
            err,
            GenerateError::InconsistentDelta {
                delta: Delta::ZERO,
                first: Movers::KNIGHT,
                second: Movers::empty(),
            }
        );
    }

    #[test]
    fn test_regeneration_is_identical() {
        let first = Tables::compute().expect("tables");
        let second = Tables::compute().expect("tables");
        assert_eq!(first.movement_info().as_bytes(), second.movement_info().as_bytes());
        assert_eq!(first.bases().as_bytes(), second.bases().as_bytes());
    }
}
