/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use chesstree::{
    moves_from, rook_moves, Board, Color, EndReason, Evaluator, GameError, GameState, Mover,
    Outcome, Piece, PieceKind, RandomMover, Score, Square, INITIAL_MATERIAL_VALUE,
};

fn sq(row: usize, col: usize) -> Square {
    Square::new(row, col)
}

fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
    squares.sort();
    squares
}

/// Plays a seeded random game, checking every reachable position as it goes.
fn random_positions(seed: u64, plies: usize) -> Vec<GameState> {
    let mut game = GameState::default();
    let mut mover = RandomMover::seeded(seed);
    let mut positions = vec![game.clone()];

    for _ in 0..plies {
        if game.is_game_over() {
            break;
        }
        mover.play(&mut game).unwrap();
        positions.push(game.clone());
    }

    positions
}

#[test]
fn rook_blocked_rightward_by_friendly_pawn() {
    let mut board = Board::new(4, 3);
    board.place(sq(2, 1), Piece::WHITE_ROOK);
    board.place(sq(2, 2), Piece::WHITE_PAWN);

    let moves = sorted(rook_moves(&board, sq(2, 1), Color::White));

    // Up, down, and the open square to the left; the pawn blocks the right
    assert_eq!(moves, [sq(0, 1), sq(1, 1), sq(2, 0), sq(3, 1)]);
    assert!(!moves.contains(&sq(2, 2)));
}

#[test]
fn lone_king_can_take_adjacent_knight() {
    let mut board = Board::new(3, 3);
    board.place(sq(1, 1), Piece::WHITE_KING);
    board.place(sq(2, 2), Piece::BLACK_KNIGHT);

    let moves = sorted(moves_from(&board, sq(1, 1)));
    let neighbours = sorted(
        (0..3)
            .flat_map(|row| (0..3).map(move |col| sq(row, col)))
            .filter(|&s| s != sq(1, 1))
            .collect(),
    );

    assert_eq!(moves, neighbours);
}

#[test]
fn standard_game_is_not_over_until_black_king_is_gone() {
    let game = GameState::default();
    assert!(!game.is_game_over());

    let mut board = Board::standard();
    for (square, _) in Board::standard().pieces_of(Color::Black) {
        board.take(square);
    }

    let game = GameState::new(board);
    assert_eq!(
        game.outcome(),
        Some(Outcome {
            winner: Color::White,
            reason: EndReason::KingCaptured
        })
    );
}

#[test]
fn undo_on_fresh_game_fails_without_changes() {
    let mut game = GameState::default();
    assert_eq!(game.undo(), Err(GameError::NothingToUndo));
    assert_eq!(game.board(), &Board::standard());
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn generators_stay_on_board_and_off_friends() {
    for game in random_positions(11, 60) {
        let board = game.board();
        for (square, piece) in board.pieces() {
            for to in moves_from(board, square) {
                assert!(board.contains(to), "{piece} at {square} left the board");
                assert_ne!(
                    board.color_at(to),
                    Some(piece.color()),
                    "{piece} at {square} landed on a friend at {to}"
                );
            }
        }
    }
}

#[test]
fn slider_rays_end_at_first_blocker() {
    for game in random_positions(5, 60) {
        let board = game.board();
        for (square, piece) in board.pieces().filter(|(_, p)| p.kind().is_slider()) {
            let moves = moves_from(board, square);
            for to in &moves {
                // Every square strictly between the slider and its destination is empty
                let dr = (to.row as isize - square.row as isize).signum();
                let dc = (to.col as isize - square.col as isize).signum();
                let mut between = square;
                while let Some(next) = between.offset(dr, dc, board.rows(), board.cols()) {
                    if next == *to {
                        break;
                    }
                    assert!(
                        board.piece_at(next).is_none(),
                        "{piece} at {square} jumped over {next} to reach {to}"
                    );
                    between = next;
                }
            }
        }
    }
}

#[test]
fn make_move_then_undo_restores_everything() {
    for game in random_positions(23, 40) {
        for (from, to) in game.candidate_moves() {
            let mut copy = game.clone();
            copy.make_move(from, to).unwrap();
            copy.undo().unwrap();

            assert_eq!(copy.board(), game.board());
            assert_eq!(copy.side_to_move(), game.side_to_move());
            for color in Color::all() {
                assert_eq!(copy.captured(color), game.captured(color));
            }
        }
    }
}

#[test]
fn undo_then_redo_restores_post_move_state() {
    let positions = random_positions(31, 30);
    let Some(last) = positions.last() else {
        return;
    };

    let mut game = last.clone();
    let mut undone = 0;
    while game.undo().is_ok() {
        undone += 1;
    }
    assert_eq!(game.board(), game.original_board());

    for _ in 0..undone {
        game.redo().unwrap();
    }

    assert_eq!(game.board(), last.board());
    assert_eq!(game.side_to_move(), last.side_to_move());
    assert_eq!(game.history(), last.history());
    for color in Color::all() {
        assert_eq!(game.captured(color), last.captured(color));
    }
}

#[test]
fn new_move_after_undo_clears_redo() {
    let mut game = GameState::default();
    game.make_move(sq(6, 2), sq(5, 2)).unwrap();
    game.undo().unwrap();
    assert_eq!(game.redo_history().len(), 1);

    game.make_move(sq(7, 6), sq(5, 5)).unwrap();
    assert!(game.redo_history().is_empty());
}

#[test]
fn material_drops_by_captured_values() {
    // A White queen sweeps along the top row, capturing three Black pieces
    let board: Board = "Qrnbk\n.....\n.....\n....K".parse().unwrap();
    let mut game = GameState::new(board);

    let captured = [sq(0, 1), sq(0, 2), sq(0, 3)];
    let mut from = sq(0, 0);
    for to in captured {
        game.make_move_unchecked(from, to).unwrap();
        from = to;
    }

    let lost = [PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop]
        .iter()
        .map(|kind| kind.value())
        .sum::<i32>();

    let eval = Evaluator::new(&game);
    assert_eq!(
        eval.material(Color::Black),
        Score::from_pawns(INITIAL_MATERIAL_VALUE - lost)
    );
    assert_eq!(eval.material(Color::White), Score::from_pawns(INITIAL_MATERIAL_VALUE));
}

#[test]
fn illegal_moves_leave_game_untouched() {
    let mut game = GameState::default();
    let before = game.clone();

    assert!(game.make_move(sq(7, 0), sq(5, 0)).is_err());
    assert!(game.make_move(sq(1, 1), sq(2, 1)).is_err());
    assert!(game.make_move(sq(0, 0), sq(100, 100)).is_err());
    assert!(!game.is_legal(sq(6, 0), sq(100, 0)));

    assert_eq!(game, before);
}
