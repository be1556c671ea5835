/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, Color, PieceKind, Square};

/// Deltas for the movement of the Queen, as `(row, col)` pairs.
const QUEEN_DELTAS: [(isize, isize); 8] = [
    /* Rook */
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Deltas for the movement of the Rook.
const ROOK_DELTAS: [(isize, isize); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
const BISHOP_DELTAS: [(isize, isize); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Deltas for the movement of the King.
const KING_DELTAS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, 1),
    (1, 0),
    (1, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Computes every square the piece at `square` can reach in one move.
///
/// Turn order and king safety are not considered. An empty (or off-board) `square`
/// yields no moves.
///
/// # Example
/// ```
/// # use chesstree::{moves_from, Board, Square};
/// let board = Board::standard();
///
/// // Knight on its home square
/// let mut moves = moves_from(&board, Square::new(7, 1));
/// moves.sort();
/// assert_eq!(moves, [Square::new(5, 0), Square::new(5, 2)]);
///
/// assert!(moves_from(&board, Square::new(4, 4)).is_empty());
/// ```
pub fn moves_from(board: &Board, square: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(square) else {
        return Vec::new();
    };

    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, square, piece.color()),
        PieceKind::Knight => knight_moves(board, square, piece.color()),
        PieceKind::Bishop => bishop_moves(board, square, piece.color()),
        PieceKind::Rook => rook_moves(board, square, piece.color()),
        PieceKind::Queen => queen_moves(board, square, piece.color()),
        PieceKind::King => king_moves(board, square, piece.color()),
    }
}

/// Computes the destinations of a `color` Pawn at `square`.
///
/// Candidates are gathered first: one step forward and both forward diagonals,
/// whenever they lie on the board. They are then filtered: the forward step must
/// be empty, and a diagonal must hold an enemy piece.
pub fn pawn_moves(board: &Board, square: Square, color: Color) -> Vec<Square> {
    let forward = color.forward();

    let push = square.offset(forward, 0, board.rows(), board.cols());
    let captures = [-1, 1]
        .into_iter()
        .filter_map(|dc| square.offset(forward, dc, board.rows(), board.cols()));

    let mut candidates = push.into_iter().map(|to| (to, false)).collect::<Vec<_>>();
    candidates.extend(captures.map(|to| (to, true)));

    candidates
        .into_iter()
        .filter(|&(to, is_capture)| {
            let occupant = board.color_at(to);
            if is_capture {
                occupant == Some(color.opponent())
            } else {
                occupant.is_none()
            }
        })
        .map(|(to, _)| to)
        .collect()
}

/// Computes the destinations of a `color` Rook at `square`.
pub fn rook_moves(board: &Board, square: Square, color: Color) -> Vec<Square> {
    rider_moves(board, square, color, &ROOK_DELTAS)
}

/// Computes the destinations of a `color` Bishop at `square`.
pub fn bishop_moves(board: &Board, square: Square, color: Color) -> Vec<Square> {
    rider_moves(board, square, color, &BISHOP_DELTAS)
}

/// Computes the destinations of a `color` Queen at `square`.
pub fn queen_moves(board: &Board, square: Square, color: Color) -> Vec<Square> {
    rider_moves(board, square, color, &QUEEN_DELTAS)
}

/// Computes the destinations of a `color` Knight at `square`.
pub fn knight_moves(board: &Board, square: Square, color: Color) -> Vec<Square> {
    leaper_moves(board, square, color, &KNIGHT_DELTAS)
}

/// Computes the destinations of a `color` King at `square`.
///
/// The King may step onto an attacked square; there is no check detection.
pub fn king_moves(board: &Board, square: Square, color: Color) -> Vec<Square> {
    leaper_moves(board, square, color, &KING_DELTAS)
}

/// Builds the ray of squares from `square` outward along `delta`, nearest first,
/// up to the edge of the board. `square` itself is not included.
///
/// # Example
/// ```
/// # use chesstree::{ray, Board, Square};
/// let board = Board::new(4, 3);
/// let up = ray(&board, Square::new(2, 1), (-1, 0));
/// assert_eq!(up, [Square::new(1, 1), Square::new(0, 1)]);
/// ```
pub fn ray(board: &Board, square: Square, (dr, dc): (isize, isize)) -> Vec<Square> {
    let mut ray = Vec::new();
    let mut current = square;

    while let Some(shifted) = current.offset(dr, dc, board.rows(), board.cols()) {
        ray.push(shifted);
        current = shifted;
    }

    ray
}

/// Walks `ray` from nearest to farthest, collecting the squares a `color` slider may move to.
///
/// Empty squares are collected and the walk continues. A friendly piece stops the walk
/// and is excluded. An enemy piece is collected as a capture, then stops the walk.
pub fn scan_ray(board: &Board, ray: &[Square], color: Color) -> Vec<Square> {
    let mut reachable = Vec::with_capacity(ray.len());

    for &square in ray {
        match board.color_at(square) {
            None => reachable.push(square),
            Some(occupant) if occupant == color => break,
            Some(_) => {
                reachable.push(square);
                break;
            }
        }
    }

    reachable
}

/// Moves for the "Rider" pieces, which slide along each delta until blocked.
fn rider_moves(board: &Board, square: Square, color: Color, deltas: &[(isize, isize)]) -> Vec<Square> {
    deltas
        .iter()
        .flat_map(|&delta| scan_ray(board, &ray(board, square, delta), color))
        .collect()
}

/// Moves for the "Leaper" pieces, which jump directly to each delta.
///
/// Squares held by a friendly piece are excluded.
fn leaper_moves(board: &Board, square: Square, color: Color, deltas: &[(isize, isize)]) -> Vec<Square> {
    deltas
        .iter()
        .filter_map(|&(dr, dc)| square.offset(dr, dc, board.rows(), board.cols()))
        .filter(|&to| board.color_at(to) != Some(color))
        .collect()
}
