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
use thiserror::Error;
use tracing::{debug, info, trace};

use super::castling::{CastlingLane, RookSide};
use super::material::{Color, Kind};
use super::piece::Piece;
use super::square::Square;
use super::Board;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("The game is over")]
    GameOver,
    #[error("No piece on {0}")]
    NoPiece(Square),
    #[error("It is not {0}'s turn")]
    NotYourTurn(Color),
    #[error("Not a legal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },
}
use MoveError::*;

/// A move that has been played on a board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub color: Color,
    pub kind: Kind,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Kind>,
    pub castle: Option<RookSide>,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}-{}", self.color, self.kind, self.from, self.to)
    }
}

impl Board {
    /// Returns true if the piece on `from` may move to (`file`, `rank`).
    /// An empty `from` square allows nothing.
    pub fn allowed(&self, from: Square, file: i8, rank: i8, check: bool) -> bool {
        self.piece_at(from)
            .is_some_and(|piece| piece.allowed(self, file, rank, check))
    }

    pub fn allowed_moves(&self, from: Square, check: bool) -> Vec<Square> {
        self.piece_at(from)
            .map(|piece| piece.allowed_moves(self, check))
            .unwrap_or_default()
    }

    /// Moves the piece on `from` to (`file`, `rank`) and hands the turn
    /// to the other side. Returns false, leaving the board untouched, if
    /// the move is not allowed, the piece is not on turn, or the game has
    /// already ended in checkmate.
    pub fn move_piece(&mut self, from: Square, file: i8, rank: i8) -> bool {
        let Some(to) = Square::try_from_coords(file, rank) else {
            trace!(%from, file, rank, "move off the board rejected");
            return false;
        };
        self.try_move(from, to).is_ok()
    }

    /// Like [`Board::move_piece`], but reports why a move was refused.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        let piece = self.validate_move(from, to).map_err(|err| {
            trace!(%from, %to, %err, "move rejected");
            err
        })?;
        let castle = match piece.kind() {
            Kind::King => CastlingLane::from_king_move(piece.color(), from, to),
            _ => None,
        };
        let captured = self.relocate(from, to);
        if let Some(lane) = castle {
            self.relocate(lane.rook_src(), lane.rook_dest());
        }
        self.revoke_castling(&piece, captured.as_ref());
        let record = MoveRecord {
            color: piece.color(),
            kind: piece.kind(),
            from,
            to,
            captured: captured.map(|piece| piece.kind()),
            castle: castle.map(|lane| lane.side()),
        };
        debug!(%record, captured = ?record.captured, "move played");
        self.change_turn();
        if self.checkmate {
            info!(winner = %piece.color(), "checkmate");
        }
        Ok(record)
    }

    fn validate_move(&self, from: Square, to: Square) -> Result<Piece, MoveError> {
        if self.checkmate {
            return Err(GameOver);
        }
        let piece = *self.piece_at(from).ok_or(NoPiece(from))?;
        if piece.color() != self.turn {
            return Err(NotYourTurn(piece.color()));
        }
        if !piece.allowed_square(self, to, true) {
            return Err(IllegalMove { from, to });
        }
        Ok(piece)
    }

    // Moving the king gives up both rights; moving a rook, or losing it
    // on its corner, gives up the right on its side.
    fn revoke_castling(&mut self, moved: &Piece, captured: Option<&Piece>) {
        match moved.kind() {
            Kind::King => self.castling_rights_mut(moved.color()).clear(),
            Kind::Rook => {
                if let Some(side) = moved.rook_side() {
                    self.castling_rights_mut(moved.color()).clear_side(side);
                }
            }
            _ => {}
        }
        if let Some(side) = captured.and_then(|piece| piece.rook_side()) {
            self.castling_rights_mut(!moved.color()).clear_side(side);
        }
    }
}
