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

use super::castling::{CastlingLane, CastlingRights, RookSide};
use super::check::Probe;
use super::material::{Color, Kind};
use super::square::{Direction, File, Offset, Rank, Square};
use super::Board;

/// Knight offsets in the order they are tried.
const KNIGHT_OFFSETS: [Offset; 8] = [
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(2, -1),
    Offset::new(2, 1),
    Offset::new(-1, -2),
    Offset::new(-1, 2),
    Offset::new(1, -2),
    Offset::new(1, 2),
];

/// A piece kind together with the state only that kind carries.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Pawn,
    Knight,
    Bishop,
    Rook(RookSide),
    Queen,
    King(CastlingRights),
}

impl Role {
    pub fn kind(&self) -> Kind {
        match self {
            Role::Pawn => Kind::Pawn,
            Role::Knight => Kind::Knight,
            Role::Bishop => Kind::Bishop,
            Role::Rook(_) => Kind::Rook,
            Role::Queen => Kind::Queen,
            Role::King(_) => Kind::King,
        }
    }
}

/// A piece standing on a board.
///
/// Pieces are owned by their [`Board`]; every operation that needs to
/// look at other pieces takes the board as a parameter.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    square: Square,
    role: Role,
}

impl Piece {
    /// Rooks take their castling side from `square`; kings start with
    /// both castling rights.
    pub fn new(kind: Kind, color: Color, square: Square) -> Self {
        let role = match kind {
            Kind::Pawn => Role::Pawn,
            Kind::Knight => Role::Knight,
            Kind::Bishop => Role::Bishop,
            Kind::Rook => Role::Rook(RookSide::from_square(square, color)),
            Kind::Queen => Role::Queen,
            Kind::King => Role::King(CastlingRights::default()),
        };
        Self {
            color,
            square,
            role,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }
    #[inline]
    pub fn file(&self) -> File {
        self.square.file()
    }
    #[inline]
    pub fn rank(&self) -> Rank {
        self.square.rank()
    }
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }
    #[inline]
    pub fn kind(&self) -> Kind {
        self.role.kind()
    }
    #[inline]
    pub fn symbol(&self) -> char {
        self.kind().symbol()
    }
    pub fn rook_side(&self) -> Option<RookSide> {
        match self.role {
            Role::Rook(side) => Some(side),
            _ => None,
        }
    }
    pub fn castling_rights(&self) -> Option<CastlingRights> {
        match self.role {
            Role::King(rights) => Some(rights),
            _ => None,
        }
    }

    pub(super) fn castling_rights_mut(&mut self) -> Option<&mut CastlingRights> {
        match &mut self.role {
            Role::King(rights) => Some(rights),
            _ => None,
        }
    }

    pub(super) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    /// Returns true if this piece may move to (`file`, `rank`).
    ///
    /// The destination must be on the board, reachable by the piece's
    /// movement pattern without passing through other pieces, and not
    /// occupied by a piece of the same color. When `check` is set the
    /// move must also not leave our own king attacked. Check detection
    /// evaluates the opponent's replies with `check` cleared, which is
    /// what keeps the two from recursing into each other.
    pub fn allowed(&self, board: &Board, file: i8, rank: i8, check: bool) -> bool {
        match Square::try_from_coords(file, rank) {
            Some(dest) => self.allowed_square(board, dest, check),
            None => false,
        }
    }

    pub fn allowed_square(&self, board: &Board, dest: Square, check: bool) -> bool {
        self.candidates(board, check).contains(&dest) && (!check || self.is_safe(board, dest))
    }

    /// All destinations satisfying [`Piece::allowed`], in pattern order.
    pub fn allowed_moves(&self, board: &Board, check: bool) -> Vec<Square> {
        let mut moves = self.candidates(board, check);
        if check {
            moves.retain(|&dest| self.is_safe(board, dest));
        }
        moves
    }

    /// The hypothetical move used to test whether moving to `dest`
    /// exposes our king. Castling also carries the rook along.
    pub fn probe(&self, dest: Square) -> Probe {
        if self.kind().is_king() {
            if let Some(lane) = CastlingLane::from_king_move(self.color, self.square, dest) {
                return Probe::castle(lane);
            }
        }
        Probe::new(self.square, dest)
    }

    fn is_safe(&self, board: &Board, dest: Square) -> bool {
        !board.is_check(self.color, Some(self.probe(dest)))
    }

    // Pattern destinations, respecting blockers and own-color occupancy
    // but not king safety.
    fn candidates(&self, board: &Board, check: bool) -> Vec<Square> {
        match self.role {
            Role::Pawn => self.pawn_candidates(board),
            Role::Knight => self.step_candidates(board, KNIGHT_OFFSETS.iter().copied()),
            Role::Bishop => self.line_candidates(board, Direction::diagonals()),
            Role::Rook(_) => self.line_candidates(board, Direction::horizontals()),
            Role::Queen => self.line_candidates(board, Direction::all()),
            Role::King(rights) => {
                let mut result = self.step_candidates(board, Direction::all().map(Offset::from));
                // castling is never an attack, so it is only considered
                // for real moves
                if check {
                    result.extend(self.castle_candidates(board, rights));
                }
                result
            }
        }
    }

    fn is_target(&self, board: &Board, square: Square) -> bool {
        match board.piece_at(square) {
            Some(piece) => piece.color != self.color,
            None => true,
        }
    }

    fn step_candidates<I>(&self, board: &Board, offsets: I) -> Vec<Square>
    where
        I: IntoIterator<Item = Offset>,
    {
        offsets
            .into_iter()
            .filter_map(|offset| self.square + offset)
            .filter(|&dest| self.is_target(board, dest))
            .collect()
    }

    fn line_candidates<I>(&self, board: &Board, directions: I) -> Vec<Square>
    where
        I: IntoIterator<Item = Direction>,
    {
        let mut result = Vec::new();
        for dir in directions {
            let mut next = self.square + dir;
            while let Some(dest) = next {
                match board.piece_at(dest) {
                    None => {
                        result.push(dest);
                        next = dest + dir;
                    }
                    Some(piece) => {
                        if piece.color != self.color {
                            result.push(dest);
                        }
                        break;
                    }
                }
            }
        }
        result
    }

    fn pawn_candidates(&self, board: &Board) -> Vec<Square> {
        let mut result = Vec::new();
        let forward = self.color.forward();
        if let Some(single) = self.square + Offset::new(0, forward) {
            if board.is_vacant(single) {
                result.push(single);
                if self.rank() == Rank::pawn_rank(self.color) {
                    if let Some(double) = single + Offset::new(0, forward) {
                        if board.is_vacant(double) {
                            result.push(double);
                        }
                    }
                }
            }
        }
        for x in [-1, 1] {
            if let Some(dest) = self.square + Offset::new(x, forward) {
                if board.piece_at(dest).is_some_and(|piece| piece.color != self.color) {
                    result.push(dest);
                }
            }
        }
        result
    }

    fn castle_candidates(&self, board: &Board, rights: CastlingRights) -> Vec<Square> {
        let mut result = Vec::new();
        for side in [RookSide::Kingside, RookSide::Queenside] {
            if !rights.allows(side) {
                continue;
            }
            let Some(lane) = CastlingLane::new(self.color, side) else {
                continue;
            };
            if self.square != lane.king_src() {
                continue;
            }
            let rook_ready = board
                .piece_at(lane.rook_src())
                .is_some_and(|rook| rook.color == self.color && rook.rook_side() == Some(side));
            if !rook_ready || !lane.blocking_lane().all(|square| board.is_vacant(square)) {
                continue;
            }
            if board.is_check(self.color, None)
                || board.is_check(self.color, Some(Probe::new(self.square, lane.passing())))
            {
                continue;
            }
            result.push(lane.king_dest());
        }
        result
    }
}
