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

use anyhow::Result;
#[cfg(feature = "random")]
use rand::{seq::SliceRandom, thread_rng, Rng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Board, Color, MoveRecord, Square, Turn};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
    #[cfg(feature = "random")]
    pub fn random() -> Self {
        Self(thread_rng().gen())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// The winner, i.e. the side that delivered mate.
    CheckMate(Color),
    StaleMate,
}

/// A board together with the moves that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    board: Board,
    history: Vec<MoveRecord>,
}

impl Game {
    pub fn new(id: GameId) -> Self {
        Self::with_board(id, Board::new())
    }

    pub fn with_board(id: GameId, board: Board) -> Self {
        Self {
            id,
            board,
            history: Vec::new(),
        }
    }

    /// Plays `moves` from the starting position. Fails on the first move
    /// that is refused.
    pub fn replay(id: GameId, moves: &[(Square, Square)]) -> Result<Self> {
        let mut game = Self::new(id);
        for &(from, to) in moves {
            game.submit_move(from, to)?;
        }
        Ok(game)
    }

    #[inline]
    pub fn id(&self) -> GameId {
        self.id
    }
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }
    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn submit_move(&mut self, from: Square, to: Square) -> Result<&MoveRecord> {
        let record = self.board.try_move(from, to)?;
        self.history.push(record);
        if let Some(result) = self.result() {
            info!(id = self.id.0, ?result, moves = self.history.len(), "game over");
        }
        Ok(&self.history[self.history.len() - 1])
    }

    pub fn result(&self) -> Option<GameResult> {
        if self.board.is_checkmate() {
            Some(GameResult::CheckMate(!self.board.turn()))
        } else if self.board.is_stalemate() {
            Some(GameResult::StaleMate)
        } else {
            None
        }
    }

    /// Picks one of the legal moves for the side to move, or None once
    /// the game is over.
    #[cfg(feature = "random")]
    pub fn random_move<R: Rng>(&self, rng: &mut R) -> Option<(Square, Square)> {
        if self.result().is_some() {
            return None;
        }
        self.board
            .legal_moves(self.board.turn())
            .choose(rng)
            .copied()
    }
}
