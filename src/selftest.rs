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

//! Checks generated tables against expectations derived without the
//! movement rules used to build them.

use tracing::debug;

use crate::{
    delta::Delta,
    errors::SelfTestError,
    role::{ByRole, Role},
    square::{self, Square},
    tables::{DeltaBases, DeltaMovementInfo, Tables, BASES_LEN, SLIDING_DELTAS},
    util::nibbles,
};

/// For each role, whether a delta of each magnitude is a valid move.
#[derive(Clone, Debug)]
pub struct Expectations(ByRole<[bool; BASES_LEN]>);

impl Expectations {
    /// Derives the expectations from the sliding offsets and the fixed king
    /// and knight steps.
    pub fn derive() -> Expectations {
        let mut expected = ByRole::new_with(|_| [false; BASES_LEN]);

        for magnitude in [0x01, 0x0f, 0x10, 0x11] {
            expected.king[magnitude] = true;
        }

        for magnitude in [0x0e, 0x12, 0x1f, 0x21] {
            expected.knight[magnitude] = true;
        }

        for (i, &offset) in SLIDING_DELTAS.iter().enumerate() {
            let magnitude = usize::from(offset);
            expected.queen[magnitude] = true;

            // Odd entries of every group are the two diagonals.
            if i & 1 != 0 {
                expected.bishop[magnitude] = true;
            }

            let (high, low) = nibbles(offset);
            if offset != 0x0f && (low == 0 || high == 0) {
                expected.rook[magnitude] = true;
            }
        }

        Expectations(expected)
    }

    /// Whether `role` may move by a delta of the given magnitude.
    pub fn is_valid(&self, role: Role, magnitude: u8) -> bool {
        self.0
            .get(role)
            .get(usize::from(magnitude))
            .copied()
            .unwrap_or(false)
    }
}

/// Runs all checks on the tables, stopping at the first failure.
///
/// # Errors
///
/// Reports the first disagreement found.
pub fn run(tables: &Tables) -> Result<(), SelfTestError> {
    let squares = square::board_locations();
    let expectations = Expectations::derive();

    check_movement_info(tables.movement_info(), &expectations, &squares)?;
    check_base_coverage(tables.bases())?;
    check_rays(tables.movement_info(), tables.bases(), &squares)?;

    debug!(squares = squares.len(), "self-test passed");
    Ok(())
}

/// Compares the movement table with the expectations for every ordered pair
/// of squares, looking up both the delta and its negation.
pub fn check_movement_info(
    info: &DeltaMovementInfo,
    expectations: &Expectations,
    squares: &[Square],
) -> Result<(), SelfTestError> {
    for &m in squares {
        for &n in squares {
            let delta = Delta::between(m, n);
            for role in Role::ALL {
                let expected = expectations.is_valid(role, delta.magnitude());
                for delta in [delta, -delta] {
                    let actual = info.is_valid_for(role, delta);
                    if actual != expected {
                        return Err(SelfTestError::Movement {
                            role,
                            delta,
                            expected,
                            actual,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

/// Checks that exactly the sliding offsets have a delta base.
pub fn check_base_coverage(bases: &DeltaBases) -> Result<(), SelfTestError> {
    for magnitude in 0..=Delta::MAX {
        let base = bases.get(magnitude);
        match (SLIDING_DELTAS.contains(&magnitude), base) {
            (true, 0) => return Err(SelfTestError::MissingBase { magnitude }),
            (false, base) if base != 0 => {
                return Err(SelfTestError::UnexpectedBase { magnitude, base })
            }
            _ => (),
        }
    }
    Ok(())
}

/// Checks that every queen move can be walked square by square with its
/// delta base without leaving the board.
pub fn check_rays(
    info: &DeltaMovementInfo,
    bases: &DeltaBases,
    squares: &[Square],
) -> Result<(), SelfTestError> {
    for &from in squares {
        for &to in squares {
            let delta = Delta::between(to, from);
            if info.is_valid_for(Role::Queen, delta) && bases.squares_between(from, to).is_none() {
                return Err(SelfTestError::Ray {
                    from,
                    to,
                    base: bases.base(delta),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::MOVEMENT_INFO_LEN;

    #[test]
    fn test_expectations() {
        let expectations = Expectations::derive();

        assert!(expectations.is_valid(Role::Rook, 0x70));
        assert!(expectations.is_valid(Role::Rook, 0x07));
        assert!(!expectations.is_valid(Role::Rook, 0x0f));
        assert!(expectations.is_valid(Role::Bishop, 0x0f));
        assert!(expectations.is_valid(Role::Bishop, 0x69));
        assert!(!expectations.is_valid(Role::Bishop, 0x70));
        assert!(expectations.is_valid(Role::Queen, 0x77));
        assert!(!expectations.is_valid(Role::King, 0x02));
        assert!(expectations.is_valid(Role::Knight, 0x1f));
        assert!(!expectations.is_valid(Role::Knight, 0x78));

        let count = |role| (0..=Delta::MAX).filter(|&m| expectations.is_valid(role, m)).count();
        assert_eq!(count(Role::Queen), 28);
        assert_eq!(count(Role::Rook), 14);
        assert_eq!(count(Role::Bishop), 14);
        assert_eq!(count(Role::King), 4);
        assert_eq!(count(Role::Knight), 4);
    }

    #[test]
    fn test_generated_tables_pass() {
        let tables = Tables::compute().expect("tables");
        assert_eq!(run(&tables), Ok(()));
    }

    #[test]
    fn test_movement_mismatch_is_reported() {
        let tables = Tables::compute().expect("tables");
        let mut bytes = *tables.movement_info().as_bytes();

        // Pretend the king may jump two files.
        let corrupted = Delta::new(-0x02).expect("in range");
        bytes[corrupted.table_index()] |= 1 << u8::from(Role::King);
        assert_eq!(bytes.len(), MOVEMENT_INFO_LEN);

        let info = DeltaMovementInfo::from_bytes(bytes);
        let err = check_movement_info(&info, &Expectations::derive(), &square::board_locations())
            .unwrap_err();
        match err {
            SelfTestError::Movement {
                role,
                delta,
                expected,
                actual,
            } => {
                assert_eq!(role, Role::King);
                assert_eq!(delta.magnitude(), 0x02);
                assert!(!expected);
                assert!(actual);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_broken_ray_is_reported() {
        let tables = Tables::compute().expect("tables");
        let mut bytes = *tables.bases().as_bytes();

        // Walk two-square diagonals along the rank instead.
        bytes[0x22] = 0x01;

        let bases = DeltaBases::from_bytes(bytes);
        assert_eq!(
            check_rays(tables.movement_info(), &bases, &square::board_locations()),
            Err(SelfTestError::Ray {
                from: Square::A1,
                to: Square::C3,
                base: Delta::new(0x01),
            })
        );
    }

    #[test]
    fn test_base_coverage_failures() {
        let missing = DeltaBases::from_offsets(&SLIDING_DELTAS[1..]).expect("bases");
        assert_eq!(
            check_base_coverage(&missing),
            Err(SelfTestError::MissingBase { magnitude: 0x01 })
        );

        let mut offsets = SLIDING_DELTAS.to_vec();
        offsets.push(0x21);
        let extra = DeltaBases::from_offsets(&offsets).expect("bases");
        assert_eq!(
            check_base_coverage(&extra),
            Err(SelfTestError::UnexpectedBase {
                magnitude: 0x21,
                base: 0x0b,
            })
        );
    }
}
