/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use chesstree::{perft_generic, Board, Color, GameState};

fn test_perft_board_nodes(depth: usize, board: &str, side: Color, expected: u64) {
    let board = board.parse::<Board>().unwrap();
    let game = GameState::with_side_to_move(board, side);
    let res = perft_generic::<false>(&game, depth);
    assert_eq!(res, expected, "PERFT({depth}) failed on {:?}", game.board());
}

#[cfg(test)]
mod standard_perft {
    use super::*;

    const STANDARD: &str = "rnbqkbnr/pppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR";

    #[test]
    fn test_standard_perft_1() {
        test_perft_board_nodes(1, STANDARD, Color::White, 12);
    }

    #[test]
    fn test_standard_perft_2() {
        test_perft_board_nodes(2, STANDARD, Color::White, 144);
    }

    #[test]
    fn test_standard_perft_1_black() {
        test_perft_board_nodes(1, STANDARD, Color::Black, 12);
    }
}

#[cfg(test)]
mod small_board_perft {
    use super::*;

    #[test]
    fn test_lone_rook_perft() {
        // Rook on an open 4x3 board reaches 3 + 2 squares
        test_perft_board_nodes(1, "...\n...\n.R.\n...", Color::White, 5);
    }

    #[test]
    fn test_lone_queen_center_perft() {
        // 8 neighbours on a 3x3 board
        test_perft_board_nodes(1, "...\n.Q.\n...", Color::White, 8);
    }

    #[test]
    fn test_knights_face_off_perft() {
        // A knight in the corner of a 3x3 board can only reach two edge midpoints
        test_perft_board_nodes(1, "N..\n...\n..n", Color::White, 2);
        test_perft_board_nodes(2, "N..\n...\n..n", Color::White, 4);
    }

    #[test]
    fn test_pawns_blocked_perft() {
        test_perft_board_nodes(1, "...\n.p.\n.P.", Color::White, 0);
        test_perft_board_nodes(1, "...\np..\n.P.", Color::White, 2);
    }
}
