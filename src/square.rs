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

use std::{error::Error, fmt, num, str::FromStr};

use arrayvec::ArrayVec;

use crate::{delta::Delta, util::overflow_error};

/// Mask of the bits that are set for every off-board 0x88 address.
pub const OFF_BOARD: u8 = 0x88;

/// A square on the 0x88 board.
///
/// The low nibble is the file and the high nibble is the rank, so an 8x8
/// board lives in a 16x8 address space. Every value held by a `Square` has
/// both bits of [`OFF_BOARD`] clear.
///
/// # Examples
///
/// ```
/// use delta_movements::Square;
///
/// let e4: Square = "e4".parse()?;
/// assert_eq!(u8::from(e4), 0x34);
/// assert_eq!(e4.file(), 4);
/// assert_eq!(e4.rank(), 3);
/// # Ok::<_, delta_movements::ParseSquareError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Number of addresses in the 0x88 space, on and off the board.
    pub const ADDRESSES: usize = 0x80;

    /// Tests whether `index` is an on-board 0x88 address.
    #[inline]
    pub const fn is_valid(index: u8) -> bool {
        index & OFF_BOARD == 0
    }

    /// Gets the square at the given 0x88 address, or `None` if the address
    /// is off the board.
    #[inline]
    pub const fn new(index: u8) -> Option<Square> {
        if Square::is_valid(index) {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Gets the square from zero-based file and rank.
    pub const fn from_coords(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square(rank << 4 | file))
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 & 0x0f
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 >> 4
    }

    #[inline]
    pub const fn to_u8(self) -> u8 {
        self.0
    }

    /// Adds `delta` to the address, returning `None` if the result leaves
    /// the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use delta_movements::{Delta, Square};
    ///
    /// let step = Delta::new(0x11).expect("in range");
    /// assert_eq!(Square::A1.offset(step), "b2".parse::<Square>().ok());
    /// assert_eq!(Square::H1.offset(step), None);
    /// ```
    pub fn offset(self, delta: Delta) -> Option<Square> {
        let target = i16::from(self.0) + i16::from(delta.to_i8());
        u8::try_from(target).ok().and_then(Square::new)
    }
}

macro_rules! square_consts {
    ($($name:ident = $index:expr,)+) => {
        #[allow(missing_docs)]
        impl Square {
            $(pub const $name: Square = Square($index);)+
        }
    }
}

#[rustfmt::skip]
square_consts! {
    A1 = 0x00, B1 = 0x01, C1 = 0x02, D1 = 0x03, E1 = 0x04, F1 = 0x05, G1 = 0x06, H1 = 0x07,
    A2 = 0x10, B2 = 0x11, C2 = 0x12, D2 = 0x13, E2 = 0x14, F2 = 0x15, G2 = 0x16, H2 = 0x17,
    A3 = 0x20, B3 = 0x21, C3 = 0x22, D3 = 0x23, E3 = 0x24, F3 = 0x25, G3 = 0x26, H3 = 0x27,
    A4 = 0x30, B4 = 0x31, C4 = 0x32, D4 = 0x33, E4 = 0x34, F4 = 0x35, G4 = 0x36, H4 = 0x37,
    A5 = 0x40, B5 = 0x41, C5 = 0x42, D5 = 0x43, E5 = 0x44, F5 = 0x45, G5 = 0x46, H5 = 0x47,
    A6 = 0x50, B6 = 0x51, C6 = 0x52, D6 = 0x53, E6 = 0x54, F6 = 0x55, G6 = 0x56, H6 = 0x57,
    A7 = 0x60, B7 = 0x61, C7 = 0x62, D7 = 0x63, E7 = 0x64, F7 = 0x65, G7 = 0x66, H7 = 0x67,
    A8 = 0x70, B8 = 0x71, C8 = 0x72, D8 = 0x73, E8 = 0x74, F8 = 0x75, G8 = 0x76, H8 = 0x77,
}

/// Lists the 64 on-board 0x88 addresses in ascending order.
///
/// # Examples
///
/// ```
/// use delta_movements::{square, Square};
///
/// let squares = square::board_locations();
/// assert_eq!(squares.len(), 64);
/// assert_eq!(squares.first(), Some(&Square::A1));
/// assert_eq!(squares.last(), Some(&Square::H8));
/// ```
pub fn board_locations() -> ArrayVec<Square, 64> {
    (0..Square::ADDRESSES as u8).filter_map(Square::new).collect()
}

impl From<Square> for u8 {
    #[inline]
    fn from(sq: Square) -> u8 {
        sq.0
    }
}

impl TryFrom<u8> for Square {
    type Error = num::TryFromIntError;

    #[inline]
    fn try_from(index: u8) -> Result<Square, Self::Error> {
        Square::new(index).ok_or_else(overflow_error)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file()),
            char::from(b'1' + self.rank())
        )
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self, self.0)
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        match *s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Square::from_coords(file - b'a', rank - b'1').ok_or(ParseSquareError)
            }
            _ => Err(ParseSquareError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_locations() {
        let squares = board_locations();
        assert_eq!(squares.len(), 64);
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
        assert!(squares.iter().all(|sq| u8::from(*sq) & OFF_BOARD == 0));
        assert_eq!(squares[8], Square::A2);
        assert_eq!(Square::from_coords(2, 4), Some(Square::C5));
    }

    #[test]
    fn test_square_coords() {
        for file in 0..8 {
            for rank in 0..8 {
                let sq = Square::from_coords(file, rank).expect("on board");
                assert_eq!(sq.file(), file);
                assert_eq!(sq.rank(), rank);
            }
        }
        assert_eq!(Square::from_coords(8, 0), None);
        assert_eq!(Square::from_coords(0, 8), None);
    }

    #[test]
    fn test_off_board_addresses() {
        assert_eq!(Square::new(0x08), None);
        assert_eq!(Square::new(0x80), None);
        assert_eq!(Square::try_from(0x7f_u8).ok(), None);
        assert_eq!(Square::try_from(0x77_u8), Ok(Square::H8));
    }

    #[test]
    fn test_parse_square() {
        assert_eq!("a1".parse::<Square>(), Ok(Square::A1));
        assert_eq!("h8".parse::<Square>(), Ok(Square::H8));
        assert_eq!("e4".parse::<Square>().map(u8::from), Ok(0x34));
        assert_eq!("i1".parse::<Square>(), Err(ParseSquareError));
        assert_eq!("a9".parse::<Square>(), Err(ParseSquareError));
        assert_eq!("a10".parse::<Square>(), Err(ParseSquareError));
        assert_eq!(Square::A8.to_string(), "a8");
    }

    #[test]
    fn test_offset() {
        let up = Delta::new(0x10).expect("in range");
        assert_eq!(Square::A1.offset(up), Some(Square::A2));
        assert_eq!(Square::A8.offset(up), None);
        assert_eq!(Square::A1.offset(-up), None);
        assert_eq!(Square::H1.offset(Delta::new(0x01).expect("in range")), None);
    }
}
