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

use super::material::{Color, Kind};
use super::piece::Piece;
use super::square::{File, Rank};

/// Selects pieces by color, kind, file and rank. A criterion left unset
/// matches anything; the ones that are set must all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceFilter {
    color: Option<Color>,
    kind: Option<Kind>,
    file: Option<File>,
    rank: Option<Rank>,
}

impl PieceFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }
    pub fn file(mut self, file: File) -> Self {
        self.file = Some(file);
        self
    }
    pub fn rank(mut self, rank: Rank) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn matches(&self, piece: &Piece) -> bool {
        self.color.map_or(true, |color| piece.color() == color)
            && self.kind.map_or(true, |kind| piece.kind() == kind)
            && self.file.map_or(true, |file| piece.file() == file)
            && self.rank.map_or(true, |rank| piece.rank() == rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::Square::*;
    use crate::board::Board;

    #[test]
    fn test_empty_filter_matches_everything() {
        let board = Board::new();
        assert_eq!(board.pieces_matching(PieceFilter::new()).count(), 32);
    }
    #[test]
    fn test_filters_combine() {
        let board = Board::new();
        let filter = PieceFilter::new().color(Color::White).kind(Kind::Pawn);
        assert_eq!(board.pieces_matching(filter).count(), 8);
        let filter = PieceFilter::new().kind(Kind::Rook).file(File::FileH);
        let squares: Vec<_> = board.pieces_matching(filter).map(|p| p.square()).collect();
        assert_eq!(squares, vec![H1, H8]);
        let filter = PieceFilter::new().color(Color::Black).rank(Rank::Rank1);
        assert_eq!(board.pieces_matching(filter).count(), 0);
    }
    #[test]
    fn test_find_piece() {
        let board = Board::new();
        let filter = PieceFilter::new().color(Color::Black).kind(Kind::Queen);
        assert_eq!(board.find_piece(filter).map(|p| p.square()), Some(D8));
    }
}
