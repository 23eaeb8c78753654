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

//! Chess board with move legality and checkmate detection
//!
//! A _board_ holds the pieces of a game in progress and decides which
//! moves are legal. The following features are supported:
//!
//! [x] Movement rules for every piece
//! [x] Turn enforcement
//! [x] Check and checkmate detection
//! [x] Castling (rights tracking and execution)
//! [ ] En passant
//! [ ] Pawn promotion
//! [ ] Repetition and fifty-move draws
//! [ ] Time Controls
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square on an
//!   8-by-8 board. Squares are identified by a `File` (`FileA` ..
//!   `FileH`, numbered 0 to 7) and a `Rank` (`Rank1` .. `Rank8`,
//!   numbered 1 to 8).
//!
//! * A `Piece` has a `Color`, a square and a `Role`. The role is one of
//!   six variants and carries the state that only some pieces need: a
//!   rook remembers which castling right it guards and a king holds its
//!   `CastlingRights`.
//!
//! * A `Board` owns its pieces in a single list and keeps an 8-by-8 grid
//!   of indices into that list. Piece operations take the board as a
//!   parameter instead of holding a reference to it, so cloning a board
//!   yields a fully independent copy.
//!
//! * Legality is decided by simulation. To test whether a move leaves the
//!   king attacked, `Board::is_check` clones the board, plays a `Probe`
//!   on the clone and asks every opposing piece whether it can reach the
//!   king. See the `check` module for details.
//!
//! * `Board::move_piece` is the only way to change a board in play. It
//!   refuses moves that are illegal, made out of turn, or made after
//!   checkmate, and hands the turn to the other side otherwise.
//!

use anyhow::Result;
use once_cell::sync::Lazy;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;
use thiserror::Error;

mod castling;
mod check;
mod filter;
mod material;
mod moves;
mod piece;
mod square;

pub use castling::*;
pub use check::*;
pub use filter::*;
pub use material::*;
pub use moves::*;
pub use piece::*;
pub use square::*;

use Color::*;
use Kind::*;

pub trait Turn {
    fn turn(&self) -> Color;
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("Square {0} is already occupied")]
    Occupied(Square),
    #[error("{0} already has a king")]
    DuplicateKing(Color),
    #[error("{0} has no king")]
    MissingKing(Color),
    #[error("{0} is in check but it is not {0}'s turn")]
    WaitingSideInCheck(Color),
    #[error("Checkmate flag does not match the position (expected {0})")]
    CheckmateMismatch(bool),
}

/// Index into the piece list for each square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Grid([Option<usize>; 64]);

impl Grid {
    fn empty() -> Self {
        Self([None; 64])
    }
}

impl Index<Square> for Grid {
    type Output = Option<usize>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Square> for Grid {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pieces: Vec<Piece>,
    grid: Grid,
    turn: Color,
    checkmate: bool,
}

static STANDARD: Lazy<Board> = Lazy::new(|| {
    const BACK_RANK: [Kind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
    let mut board = Board::empty(White);
    for file in File::iter() {
        for color in Color::iter() {
            let back = Square::new(file, Rank::back_rank(color));
            board.insert(Piece::new(BACK_RANK[file.to_index()], color, back));
            let pawn = Square::new(file, Rank::pawn_rank(color));
            board.insert(Piece::new(Pawn, color, pawn));
        }
    }
    board
});

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        STANDARD.clone()
    }

    /// A board without pieces. Pieces are added with [`Board::place`].
    pub fn empty(turn: Color) -> Self {
        Self {
            pieces: Vec::new(),
            grid: Grid::empty(),
            turn,
            checkmate: false,
        }
    }

    /// Builds a position from `(kind, color, square)` triples, checks
    /// that it is playable and works out whether `turn` is already mated.
    pub fn from_pieces<I>(turn: Color, pieces: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Kind, Color, Square)>,
    {
        let mut board = Self::empty(turn);
        for (kind, color, square) in pieces {
            board.place(kind, color, square)?;
        }
        board.validate()?;
        board.checkmate = board.is_mated(turn);
        Ok(board)
    }

    /// Puts a new piece on an empty square. Setup only: the checkmate
    /// flag is not recomputed.
    pub fn place(&mut self, kind: Kind, color: Color, square: Square) -> Result<(), BoardError> {
        if self.grid[square].is_some() {
            return Err(BoardError::Occupied(square));
        }
        if kind == King && self.find_king(color).is_some() {
            return Err(BoardError::DuplicateKing(color));
        }
        self.insert(Piece::new(kind, color, square));
        Ok(())
    }

    /// Checks that each side has a king and that the side not on turn is
    /// not in check.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::iter() {
            if self.find_king(color).is_none() {
                return Err(BoardError::MissingKing(color));
            }
        }
        let waiting = !self.turn;
        if self.is_check(waiting, None) {
            return Err(BoardError::WaitingSideInCheck(waiting));
        }
        Ok(())
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.grid[square].map(|index| &self.pieces[index])
    }

    /// Looks up a square by 0-based file and 1-based rank. Off-board
    /// coordinates hold nothing.
    pub fn piece_at_coords(&self, file: i8, rank: i8) -> Option<&Piece> {
        Square::try_from_coords(file, rank).and_then(|square| self.piece_at(square))
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.grid[square].is_none()
    }

    pub fn pieces_matching(&self, filter: PieceFilter) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |piece| filter.matches(piece))
    }

    pub fn find_piece(&self, filter: PieceFilter) -> Option<&Piece> {
        self.pieces_matching(filter).next()
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// # Panics
    ///
    /// Panics if `color` has no king, which a valid board never allows.
    pub fn king(&self, color: Color) -> &Piece {
        self.find_king(color)
            .unwrap_or_else(|| panic!("board has no {color} king"))
    }

    fn find_king(&self, color: Color) -> Option<&Piece> {
        self.find_piece(PieceFilter::new().color(color).kind(King))
    }

    fn castling_rights_mut(&mut self, color: Color) -> &mut CastlingRights {
        self.pieces
            .iter_mut()
            .filter(|piece| piece.color() == color)
            .find_map(|piece| piece.castling_rights_mut())
            .unwrap_or_else(|| panic!("board has no {color} king"))
    }

    fn insert(&mut self, piece: Piece) {
        debug_assert!(self.grid[piece.square()].is_none());
        self.grid[piece.square()] = Some(self.pieces.len());
        self.pieces.push(piece);
    }

    fn remove(&mut self, square: Square) -> Option<Piece> {
        let index = self.grid[square]?;
        let piece = self.pieces.remove(index);
        self.reindex();
        Some(piece)
    }

    /// Moves whatever stands on `from` to `to`, returning the piece that
    /// was captured there. No legality checks.
    fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        if from == to || self.is_vacant(from) {
            return None;
        }
        let captured = self.remove(to);
        // removal shifts indices, so look the mover up again
        if let Some(index) = self.grid[from].take() {
            self.pieces[index].set_square(to);
            self.grid[to] = Some(index);
        }
        captured
    }

    fn reindex(&mut self) {
        self.grid = Grid::empty();
        for (index, piece) in self.pieces.iter().enumerate() {
            self.grid[piece.square()] = Some(index);
        }
    }
}

impl Turn for Board {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let c = match self.piece_at(Square::new(file, rank)) {
                    Some(piece) if piece.color() == White => piece.symbol(),
                    Some(piece) => piece.symbol().to_ascii_lowercase(),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.pieces)?;
        tuple.serialize_element(&self.turn)?;
        tuple.serialize_element(&self.checkmate)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BoardVisitor;
        impl<'de> serde::de::Visitor<'de> for BoardVisitor {
            type Value = (Vec<Piece>, Color, bool);
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a Board struct condensed into a 3-element tuple")
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let pieces = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::custom("Missing elements"))?;
                let turn = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::custom("Missing elements"))?;
                let checkmate = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::custom("Missing elements"))?;
                Ok((pieces, turn, checkmate))
            }
        }
        let (pieces, turn, checkmate) = deserializer.deserialize_tuple(3, BoardVisitor)?;
        let mut board = Board::empty(turn);
        for piece in pieces {
            if !board.is_vacant(piece.square()) {
                return Err(serde::de::Error::custom(BoardError::Occupied(piece.square())));
            }
            if piece.kind() == King && board.find_king(piece.color()).is_some() {
                return Err(serde::de::Error::custom(BoardError::DuplicateKing(
                    piece.color(),
                )));
            }
            // keep the piece as-is so castling state survives
            board.insert(piece);
        }
        board.validate().map_err(serde::de::Error::custom)?;
        let mated = board.is_mated(turn);
        if checkmate != mated {
            return Err(serde::de::Error::custom(BoardError::CheckmateMismatch(mated)));
        }
        board.checkmate = mated;
        Ok(board)
    }
}
