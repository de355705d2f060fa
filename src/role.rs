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

use core::fmt;

/// Piece types covered by the movement table: `Knight`, `King`, `Bishop`,
/// `Rook` and `Queen`.
///
/// The discriminant of each role is the bit position used for it in the
/// movement table. Discriminants 0, 1 and 4 are reserved for the consuming
/// engine (empty square and pawns) and never appear in the table.
///
/// # Examples
///
/// ```
/// use delta_movements::Role;
///
/// assert_eq!(u8::from(Role::Knight), 2);
/// assert_eq!(u8::from(Role::Queen), 7);
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Role {
    Knight = 2,
    King = 3,
    Bishop = 5,
    Rook = 6,
    Queen = 7,
}

impl Role {
    /// Gets the uppercase English letter for the piece type.
    pub const fn upper_char(self) -> char {
        match self {
            Role::Knight => 'N',
            Role::King => 'K',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Queen => 'Q',
        }
    }

    /// Gets the lowercase English name of the piece type.
    pub const fn name(self) -> &'static str {
        match self {
            Role::Knight => "knight",
            Role::King => "king",
            Role::Bishop => "bishop",
            Role::Rook => "rook",
            Role::Queen => "queen",
        }
    }

    /// `Knight`, `King`, `Bishop`, `Rook`, and `Queen`, in table bit order.
    pub const ALL: [Role; 5] = [
        Role::Knight,
        Role::King,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Role> for u8 {
    #[inline]
    fn from(role: Role) -> u8 {
        role as u8
    }
}

/// Container with values for each [`Role`].
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct ByRole<T> {
    pub knight: T,
    pub king: T,
    pub bishop: T,
    pub rook: T,
    pub queen: T,
}

impl<T> ByRole<T> {
    pub fn new_with<F>(mut init: F) -> ByRole<T>
    where
        F: FnMut(Role) -> T,
    {
        ByRole {
            knight: init(Role::Knight),
            king: init(Role::King),
            bishop: init(Role::Bishop),
            rook: init(Role::Rook),
            queen: init(Role::Queen),
        }
    }

    #[inline]
    pub const fn get(&self, role: Role) -> &T {
        match role {
            Role::Knight => &self.knight,
            Role::King => &self.king,
            Role::Bishop => &self.bishop,
            Role::Rook => &self.rook,
            Role::Queen => &self.queen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_discriminants_are_bit_positions() {
        let bits: Vec<u8> = Role::ALL.iter().map(|&role| u8::from(role)).collect();
        assert_eq!(bits, [2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_role_display() {
        let names: Vec<String> = Role::ALL.iter().map(|role| role.to_string()).collect();
        assert_eq!(names, ["knight", "king", "bishop", "rook", "queen"]);
        assert_eq!(Role::Knight.upper_char(), 'N');
    }

    #[test]
    fn test_by_role() {
        let by_role = ByRole::new_with(Role::name);
        for role in Role::ALL {
            assert_eq!(*by_role.get(role), role.name());
        }
        assert_eq!(by_role.rook, "rook");
    }
}
