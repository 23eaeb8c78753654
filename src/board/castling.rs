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

use super::material::Color;
use super::square::{File, Rank, Square};

use File::*;

/// Which castling right a rook guards. Fixed when the rook is created
/// from its starting square.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RookSide {
    Queenside,
    Kingside,
    Neither,
}

impl RookSide {
    pub fn from_square(square: Square, color: Color) -> Self {
        if square.rank() != Rank::back_rank(color) {
            return RookSide::Neither;
        }
        match square.file() {
            FileA => RookSide::Queenside,
            FileH => RookSide::Kingside,
            _ => RookSide::Neither,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    kingside: bool,
    queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl CastlingRights {
    pub fn new(kingside: bool, queenside: bool) -> Self {
        Self {
            kingside,
            queenside,
        }
    }
    #[inline]
    pub fn kingside(&self) -> bool {
        self.kingside
    }
    #[inline]
    pub fn queenside(&self) -> bool {
        self.queenside
    }
    #[inline]
    pub fn allows(&self, side: RookSide) -> bool {
        match side {
            RookSide::Kingside => self.kingside,
            RookSide::Queenside => self.queenside,
            RookSide::Neither => false,
        }
    }
    pub fn clear(&mut self) {
        self.kingside = false;
        self.queenside = false;
    }
    pub fn clear_side(&mut self, side: RookSide) {
        match side {
            RookSide::Kingside => self.kingside = false,
            RookSide::Queenside => self.queenside = false,
            RookSide::Neither => {}
        }
    }
}

/// The squares involved in castling towards one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingLane {
    color: Color,
    side: RookSide,
}

impl CastlingLane {
    pub fn new(color: Color, side: RookSide) -> Option<Self> {
        match side {
            RookSide::Neither => None,
            _ => Some(Self { color, side }),
        }
    }

    /// The lane a king travelling from `from` to `to` would castle along,
    /// if the move is a castling move at all.
    pub fn from_king_move(color: Color, from: Square, to: Square) -> Option<Self> {
        [RookSide::Kingside, RookSide::Queenside]
            .into_iter()
            .filter_map(|side| Self::new(color, side))
            .find(|lane| lane.king_src() == from && lane.king_dest() == to)
    }

    #[inline]
    pub fn side(&self) -> RookSide {
        self.side
    }
    #[inline]
    fn rank(&self) -> Rank {
        Rank::back_rank(self.color)
    }
    #[inline]
    pub fn king_src(&self) -> Square {
        Square::new(FileE, self.rank())
    }
    #[inline]
    pub fn king_dest(&self) -> Square {
        match self.side {
            RookSide::Queenside => Square::new(FileC, self.rank()),
            _ => Square::new(FileG, self.rank()),
        }
    }
    #[inline]
    pub fn rook_src(&self) -> Square {
        match self.side {
            RookSide::Queenside => Square::new(FileA, self.rank()),
            _ => Square::new(FileH, self.rank()),
        }
    }
    #[inline]
    pub fn rook_dest(&self) -> Square {
        match self.side {
            RookSide::Queenside => Square::new(FileD, self.rank()),
            _ => Square::new(FileF, self.rank()),
        }
    }
    /// The square the king crosses on its way, which must not be attacked.
    #[inline]
    pub fn passing(&self) -> Square {
        self.rook_dest()
    }
    /// Squares strictly between king and rook, which must all be empty.
    pub fn blocking_lane(&self) -> impl Iterator<Item = Square> {
        let rank = self.rank();
        let files = match self.side {
            RookSide::Queenside => FileB.to_index()..FileE.to_index(),
            _ => FileF.to_index()..FileH.to_index(),
        };
        files.map(move |index| Square::new(File::from_index(index), rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::Square::*;
    use Color::*;

    #[test]
    fn test_rook_side_from_square() {
        assert_eq!(RookSide::from_square(A1, White), RookSide::Queenside);
        assert_eq!(RookSide::from_square(H1, White), RookSide::Kingside);
        assert_eq!(RookSide::from_square(A8, Black), RookSide::Queenside);
        assert_eq!(RookSide::from_square(H8, Black), RookSide::Kingside);
        assert_eq!(RookSide::from_square(A8, White), RookSide::Neither);
        assert_eq!(RookSide::from_square(D1, White), RookSide::Neither);
    }
    #[test]
    fn test_clear_side() {
        let mut rights = CastlingRights::default();
        rights.clear_side(RookSide::Kingside);
        assert!(!rights.kingside());
        assert!(rights.queenside());
        rights.clear_side(RookSide::Neither);
        assert!(rights.queenside());
        rights.clear();
        assert!(!rights.allows(RookSide::Queenside));
    }
    #[test]
    fn test_white_kingside_lane() {
        let lane = CastlingLane::new(White, RookSide::Kingside).unwrap();
        assert_eq!(lane.king_src(), E1);
        assert_eq!(lane.king_dest(), G1);
        assert_eq!(lane.rook_src(), H1);
        assert_eq!(lane.rook_dest(), F1);
        assert_eq!(lane.blocking_lane().collect::<Vec<_>>(), vec![F1, G1]);
    }
    #[test]
    fn test_black_queenside_lane() {
        let lane = CastlingLane::new(Black, RookSide::Queenside).unwrap();
        assert_eq!(lane.king_dest(), C8);
        assert_eq!(lane.rook_src(), A8);
        assert_eq!(lane.passing(), D8);
        assert_eq!(lane.blocking_lane().collect::<Vec<_>>(), vec![B8, C8, D8]);
    }
    #[test]
    fn test_from_king_move() {
        let lane = CastlingLane::from_king_move(White, E1, C1).unwrap();
        assert_eq!(lane.side(), RookSide::Queenside);
        assert!(CastlingLane::from_king_move(White, E1, F1).is_none());
        assert!(CastlingLane::from_king_move(Black, E1, G1).is_none());
        assert!(CastlingLane::new(White, RookSide::Neither).is_none());
    }
}
