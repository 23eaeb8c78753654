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

//! Check and checkmate detection.
//!
//! Legality is decided by simulation rather than by pin or ray analysis:
//! to find out whether a move leaves the king attacked, the board is
//! cloned, the move is applied to the clone, and every opposing piece is
//! asked whether the king's square is among its (unchecked) moves.

use tracing::trace;

use super::castling::CastlingLane;
use super::material::Color;
use super::square::Square;
use super::Board;

/// A hypothetical move, applied to a clone of the board without any
/// legality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Probe {
    from: Square,
    to: Square,
    companion: Option<(Square, Square)>,
}

impl Probe {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            companion: None,
        }
    }

    /// The king's move plus the rook's move of a castle.
    pub fn castle(lane: CastlingLane) -> Self {
        Self {
            from: lane.king_src(),
            to: lane.king_dest(),
            companion: Some((lane.rook_src(), lane.rook_dest())),
        }
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }
    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }
    #[inline]
    pub fn companion(&self) -> Option<(Square, Square)> {
        self.companion
    }
}

impl Board {
    /// Returns true if the king of `color` is attacked, either in the
    /// current position or, when `probe` is given, in the position that
    /// `probe` would produce.
    ///
    /// # Panics
    ///
    /// Panics if the board has no king of `color`.
    pub fn is_check(&self, color: Color, probe: Option<Probe>) -> bool {
        let mut board = self.clone();
        if let Some(probe) = probe {
            board.relocate(probe.from, probe.to);
            if let Some((from, to)) = probe.companion {
                board.relocate(from, to);
            }
        }
        let king = board.king(color).square();
        let attacked = board
            .pieces()
            .iter()
            .filter(|piece| piece.color() != color)
            .any(|piece| piece.allowed_moves(&board, false).contains(&king));
        if attacked {
            trace!(%color, %king, ?probe, "king attacked");
        }
        attacked
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.is_check(self.turn, None)
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        self.pieces()
            .iter()
            .filter(|piece| piece.color() == color)
            .any(|piece| !piece.allowed_moves(self, true).is_empty())
    }

    /// Every legal `(from, to)` pair for `color`, grouped by piece in
    /// board order.
    pub fn legal_moves(&self, color: Color) -> Vec<(Square, Square)> {
        self.pieces()
            .iter()
            .filter(|piece| piece.color() == color)
            .flat_map(|piece| {
                let from = piece.square();
                piece
                    .allowed_moves(self, true)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    /// The side to move has no legal move but is not in check. This is
    /// informational only; moves remain governed by the checkmate flag.
    pub fn is_stalemate(&self) -> bool {
        !self.checkmate && !self.in_check() && !self.has_legal_move(self.turn)
    }

    /// Hands the move to the other side and recomputes the checkmate flag.
    pub fn change_turn(&mut self) {
        self.turn = !self.turn;
        self.checkmate = self.is_mated(self.turn);
    }

    pub(super) fn is_mated(&self, color: Color) -> bool {
        self.is_check(color, None) && !self.has_legal_move(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::material::Kind::*;
    use crate::board::square::Square::*;
    use crate::board::Turn;
    use Color::*;

    #[test]
    fn test_no_check_at_start() {
        let board = Board::new();
        assert!(!board.is_check(White, None));
        assert!(!board.is_check(Black, None));
        assert!(!board.is_checkmate());
    }
    #[test]
    fn test_probe_does_not_touch_board() {
        let board = Board::new();
        let before = board.clone();
        assert!(!board.is_check(White, Some(Probe::new(E2, E4))));
        assert_eq!(board, before);
    }
    #[test]
    fn test_probe_to_own_square_changes_nothing() {
        let board = Board::new();
        assert!(!board.is_check(White, Some(Probe::new(E2, E2))));
        assert!(!board.is_check(White, Some(Probe::new(E1, E1))));
        let board = Board::from_pieces(
            White,
            [(King, White, E1), (Rook, Black, E8), (King, Black, A8)],
        )
        .unwrap();
        assert!(board.is_check(White, Some(Probe::new(E1, E1))));
    }
    #[test]
    fn test_probe_capturing_the_attacker() {
        let board = Board::from_pieces(
            White,
            [
                (King, White, E1),
                (Rook, White, A8),
                (Rook, Black, E8),
                (King, Black, H7),
            ],
        )
        .unwrap();
        assert!(board.is_check(White, None));
        assert!(!board.is_check(White, Some(Probe::new(A8, E8))));
        assert!(board.is_check(White, Some(Probe::new(A8, B8))));
    }
    #[test]
    fn test_knight_check() {
        let board = Board::from_pieces(
            White,
            [(King, White, E1), (Knight, Black, F3), (King, Black, E8)],
        )
        .unwrap();
        assert!(board.is_check(White, None));
        assert!(board.in_check());
        assert!(!board.is_checkmate());
    }
    #[test]
    fn test_pawn_attacks_diagonally_only() {
        let board = Board::from_pieces(
            White,
            [(King, White, E4), (Pawn, Black, E5), (King, Black, A8)],
        )
        .unwrap();
        assert!(!board.in_check());
        let board = Board::from_pieces(
            White,
            [(King, White, E4), (Pawn, Black, F5), (King, Black, A8)],
        )
        .unwrap();
        assert!(board.in_check());
    }
    #[test]
    fn test_back_rank_mate() {
        let mut board = Board::from_pieces(
            Black,
            [
                (King, White, G1),
                (Pawn, White, F2),
                (Pawn, White, G2),
                (Pawn, White, H2),
                (Rook, Black, A8),
                (King, Black, G8),
            ],
        )
        .unwrap();
        assert!(board.move_piece(A8, 0, 1));
        assert_eq!(board.turn(), White);
        assert!(board.is_checkmate());
        assert!(board.legal_moves(White).is_empty());
    }
    #[test]
    fn test_escape_clears_checkmate() {
        // same mate, but h2 is empty so the king can run
        let mut board = Board::from_pieces(
            Black,
            [
                (King, White, G1),
                (Pawn, White, F2),
                (Pawn, White, G2),
                (Rook, Black, A8),
                (King, Black, G8),
            ],
        )
        .unwrap();
        assert!(board.move_piece(A8, 0, 1));
        assert!(board.in_check());
        assert!(!board.is_checkmate());
        assert_eq!(board.legal_moves(White), vec![(G1, H2)]);
    }
    #[test]
    fn test_change_turn_computes_checkmate() {
        // white is mated, but the flag is only set by change_turn
        let mut board = Board::empty(Black);
        board.place(King, White, H1).unwrap();
        board.place(Rook, Black, A1).unwrap();
        board.place(Rook, Black, B2).unwrap();
        board.place(King, Black, H8).unwrap();
        assert!(!board.is_checkmate());
        board.change_turn();
        assert_eq!(board.turn(), White);
        assert!(board.is_checkmate());
        board.change_turn();
        assert!(!board.is_checkmate());
    }
    #[test]
    fn test_stalemate() {
        let board = Board::from_pieces(
            White,
            [(King, White, H1), (Queen, Black, F2), (King, Black, A8)],
        )
        .unwrap();
        assert!(!board.in_check());
        assert!(!board.is_checkmate());
        assert!(board.is_stalemate());
        assert!(!Board::new().is_stalemate());
    }
    #[test]
    fn test_legal_moves_at_start() {
        let board = Board::new();
        assert_eq!(board.legal_moves(White).len(), 20);
        assert_eq!(board.legal_moves(Black).len(), 20);
    }
}
