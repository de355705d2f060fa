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

use std::fmt;

use bitflags::bitflags;

use crate::role::Role;

bitflags! {
    /// Set of roles that can travel a delta in a single move, ignoring
    /// blockers.
    ///
    /// Each role occupies the bit given by its discriminant, which is also
    /// the layout of a byte in the generated movement table.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Movers: u8 {
        const KNIGHT = 1 << Role::Knight as u8;
        const KING = 1 << Role::King as u8;
        const BISHOP = 1 << Role::Bishop as u8;
        const ROOK = 1 << Role::Rook as u8;
        const QUEEN = 1 << Role::Queen as u8;
    }
}

impl Movers {
    /// The single-role set for `role`.
    #[inline]
    pub const fn from_role(role: Role) -> Movers {
        Movers::from_bits_retain(1 << role as u8)
    }

    #[inline]
    pub const fn has(self, role: Role) -> bool {
        self.contains(Movers::from_role(role))
    }

    /// Iterates over the roles in the set, in [`Role::ALL`] order.
    pub fn roles(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |&role| self.has(role))
    }
}

impl From<Role> for Movers {
    fn from(role: Role) -> Movers {
        Movers::from_role(role)
    }
}

impl fmt::Display for Movers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for role in self.roles() {
            write!(f, "{}", role.upper_char())?;
        }
        Ok(())
    }
}
