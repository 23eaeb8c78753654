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

use probe_chess::*;
use proptest::prelude::*;
use strum::IntoEnumIterator;
use Square::*;

fn assert_consistent(board: &Board) {
    let mut occupied = 0;
    for square in Square::iter() {
        if let Some(piece) = board.piece_at(square) {
            assert_eq!(piece.square(), square);
            occupied += 1;
        }
    }
    assert_eq!(occupied, board.pieces().len());
    for color in Color::iter() {
        let kings = board
            .pieces_matching(PieceFilter::new().color(color).kind(Kind::King))
            .count();
        assert_eq!(kings, 1);
    }
    assert!(!board.is_check(!board.turn(), None));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_play_keeps_board_consistent(choices in prop::collection::vec(any::<usize>(), 0..40)) {
        let mut board = Board::new();
        for choice in choices {
            let moves = board.legal_moves(board.turn());
            if moves.is_empty() {
                prop_assert!(board.is_checkmate() || board.is_stalemate());
                break;
            }
            let (from, to) = moves[choice % moves.len()];
            let mover = board.turn();
            let before = board.pieces().len();
            let record = board.try_move(from, to).unwrap();
            prop_assert_eq!(record.color, mover);
            prop_assert_eq!(board.turn(), !mover);
            let expected = before - usize::from(record.captured.is_some());
            prop_assert_eq!(board.pieces().len(), expected);
            assert_consistent(&board);
            prop_assert_eq!(
                board.is_checkmate(),
                board.in_check() && !board.has_legal_move(board.turn())
            );
        }
    }

    #[test]
    fn allowed_agrees_with_allowed_moves(choices in prop::collection::vec(any::<usize>(), 0..12)) {
        let mut board = Board::new();
        for choice in choices {
            let moves = board.legal_moves(board.turn());
            if moves.is_empty() {
                break;
            }
            let (from, to) = moves[choice % moves.len()];
            board.try_move(from, to).unwrap();
        }
        for piece in board.pieces() {
            let moves = piece.allowed_moves(&board, true);
            for square in Square::iter() {
                let (file, rank) = square.coords();
                prop_assert_eq!(piece.allowed(&board, file, rank, true), moves.contains(&square));
            }
        }
    }
}

#[test]
fn scholars_mate() {
    let game = Game::replay(
        GameId::new(1),
        &[
            (E2, E4),
            (E7, E5),
            (F1, C4),
            (B8, C6),
            (D1, H5),
            (G8, F6),
            (H5, F7),
        ],
    )
    .unwrap();
    assert_eq!(game.result(), Some(GameResult::CheckMate(Color::White)));
    assert_eq!(game.history()[6].captured, Some(Kind::Pawn));
    assert_consistent(game.board());
}

#[test]
fn castle_both_sides() {
    let game = Game::replay(
        GameId::new(2),
        &[
            (G1, F3),
            (B8, C6),
            (G2, G3),
            (D7, D6),
            (F1, G2),
            (C8, E6),
            (E1, G1),
            (D8, D7),
            (D2, D3),
            (E8, C8),
        ],
    )
    .unwrap();
    let board = game.board();
    assert_eq!(board.piece_at(G1).map(Piece::kind), Some(Kind::King));
    assert_eq!(board.piece_at(F1).map(Piece::kind), Some(Kind::Rook));
    assert_eq!(board.piece_at(C8).map(Piece::kind), Some(Kind::King));
    assert_eq!(board.piece_at(D8).map(Piece::kind), Some(Kind::Rook));
    assert_eq!(game.history()[6].castle, Some(RookSide::Kingside));
    assert_eq!(game.history()[9].castle, Some(RookSide::Queenside));
    assert_consistent(board);
}
