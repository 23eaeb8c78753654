// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use strum_macros::EnumIter;

use super::material::Color;

use Color::*;

/// Returns true if `file` (0-based) and `rank` (1-based) name a square
/// on the board.
#[inline]
pub const fn on_board(file: i8, rank: i8) -> bool {
    file >= 0 && file < 8 && rank >= 1 && rank <= 8
}

#[rustfmt::skip]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

#[rustfmt::skip]
use Square::{
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
};

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::from_index(rank.to_index() * 8 + file.to_index())
    }

    #[rustfmt::skip]
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Square; 64] = [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ];
        debug_assert!(index < 64);
        VALUES[index]
    }

    /// Converts a 0-based file and a 1-based rank into a square, or
    /// `None` if the pair falls off the board.
    #[inline]
    pub const fn try_from_coords(file: i8, rank: i8) -> Option<Self> {
        if !on_board(file, rank) {
            return None;
        }
        Some(Self::new(
            File::from_index(file as usize),
            Rank::from_index((rank - 1) as usize),
        ))
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn file(&self) -> File {
        File::from_index(self.to_index() % 8)
    }
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.to_index() / 8)
    }
    /// The `(file, rank)` pair with file in `0..8` and rank in `1..=8`.
    #[inline]
    pub const fn coords(&self) -> (i8, i8) {
        (self.file().to_index() as i8, self.rank().number())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum File {
    FileA,
    FileB,
    FileC,
    FileD,
    FileE,
    FileF,
    FileG,
    FileH,
}

use File::{FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH};

impl File {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [File; 8] = [FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const VALUES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        write!(f, "{}", VALUES[self.to_index()])
    }
}

impl Add<isize> for File {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Rank1,
    Rank2,
    Rank3,
    Rank4,
    Rank5,
    Rank6,
    Rank7,
    Rank8,
}

use Rank::{Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8};

impl Rank {
    #[inline]
    pub const fn back_rank(color: Color) -> Self {
        match color {
            White => Rank1,
            Black => Rank8,
        }
    }
    #[inline]
    pub const fn pawn_rank(color: Color) -> Self {
        match color {
            White => Rank2,
            Black => Rank7,
        }
    }
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Rank; 8] = [Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    /// The rank as printed on the board (1 through 8).
    #[inline]
    pub const fn number(&self) -> i8 {
        self.to_index() as i8 + 1
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Add<isize> for Rank {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

/// A (file, rank) displacement. Positive `y` points towards rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

impl Offset {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let file = (self.file() + rhs.x)?;
        let rank = (self.rank() + rhs.y)?;
        Some(Square::new(file, rank))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
    DownLeft,
    UpLeft,
    DownRight,
    UpRight,
}

use Direction::{Down, DownLeft, DownRight, Left, Right, Up, UpLeft, UpRight};

impl Direction {
    /// File sweeps first, then rank sweeps.
    pub fn horizontals() -> impl Iterator<Item = Self> {
        [Left, Right, Down, Up].into_iter()
    }
    pub fn diagonals() -> impl Iterator<Item = Self> {
        [DownLeft, UpLeft, DownRight, UpRight].into_iter()
    }
    pub fn all() -> impl Iterator<Item = Self> {
        Self::horizontals().chain(Self::diagonals())
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            Left => Self::new(-1, 0),
            Right => Self::new(1, 0),
            Down => Self::new(0, -1),
            Up => Self::new(0, 1),
            DownLeft => Self::new(-1, -1),
            UpLeft => Self::new(-1, 1),
            DownRight => Self::new(1, -1),
            UpRight => Self::new(1, 1),
        }
    }
}

impl Add<Direction> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_on_board() {
        assert!(on_board(0, 1));
        assert!(on_board(7, 8));
        assert!(!on_board(-1, 1));
        assert!(!on_board(8, 1));
        assert!(!on_board(0, 0));
        assert!(!on_board(0, 9));
    }
    #[test]
    fn test_coords_round_trip_every_square() {
        for square in Square::iter() {
            let (file, rank) = square.coords();
            assert_eq!(Square::try_from_coords(file, rank), Some(square));
        }
    }
    #[test]
    fn test_try_from_coords() {
        assert_eq!(Square::try_from_coords(0, 1), Some(A1));
        assert_eq!(Square::try_from_coords(4, 1), Some(E1));
        assert_eq!(Square::try_from_coords(7, 8), Some(H8));
        assert_eq!(Square::try_from_coords(2, 0), None);
        assert_eq!(Square::try_from_coords(-2, 3), None);
    }
    #[test]
    fn test_display() {
        assert_eq!(A1.to_string(), "a1");
        assert_eq!(E4.to_string(), "e4");
        assert_eq!(H8.to_string(), "h8");
    }
    #[test]
    fn test_offsets() {
        assert_eq!(B1 + Offset::new(-1, 2), Some(A3));
        assert_eq!(B1 + Offset::new(-2, 1), None);
        assert_eq!(H8 + Up, None);
        assert_eq!(D4 + DownLeft, Some(C3));
    }
    #[test]
    fn test_direction_order() {
        let dirs: Vec<Direction> = Direction::all().collect();
        assert_eq!(dirs.len(), 8);
        assert_eq!(&dirs[..4], &[Left, Right, Down, Up]);
    }
}
