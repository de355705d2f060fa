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

use std::num::TryFromIntError;

/// Builds a `TryFromIntError` for conversions into the 0x88 value types.
pub(crate) fn overflow_error() -> TryFromIntError {
    // TryFromIntError has a private constructor, so borrow one from a
    // conversion that always overflows.
    u8::try_from(u16::MAX).unwrap_err()
}

/// Splits a byte into its high and low nibble.
#[inline]
pub(crate) const fn nibbles(value: u8) -> (u8, u8) {
    (value >> 4, value & 0x0f)
}
