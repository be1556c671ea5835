/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::RangeInclusive};

use crate::{Board, Color, GameState, PieceKind, Score, Square};

/// Material value of a full army in the standard setup, not counting the King.
pub const INITIAL_MATERIAL_VALUE: i32 = PieceKind::Pawn.value() * 8
    + PieceKind::Knight.value() * 2
    + PieceKind::Bishop.value() * 2
    + PieceKind::Rook.value() * 2
    + PieceKind::Queen.value();

/// Bonus for a piece standing on a center square.
const CENTER_BONUS: Score = Score(3);

/// Bonus for a piece standing on the ring around the center.
const EDGE_BONUS: Score = Score(1);

/// Which positional region of the board a square belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Center,
    Edge,
}

impl Zone {
    #[inline(always)]
    pub const fn bonus(&self) -> Score {
        match self {
            Self::Center => CENTER_BONUS,
            Self::Edge => EDGE_BONUS,
        }
    }
}

/// Indices of the center along a dimension of length `n`.
///
/// Odd lengths have a single middle index, even lengths have the two straddling the middle.
///
/// # Example
/// ```
/// # use chesstree::center_span;
/// assert_eq!(center_span(8), 3..=4);
/// assert_eq!(center_span(5), 2..=2);
/// ```
pub fn center_span(n: usize) -> RangeInclusive<usize> {
    let mid = n / 2;
    if n % 2 == 1 {
        mid..=mid
    } else {
        mid.saturating_sub(1)..=mid
    }
}

/// Indices of the band one step outside the center, along a dimension of length `n`.
///
/// Includes the center itself, and is clipped to the board.
///
/// # Example
/// ```
/// # use chesstree::edge_span;
/// assert_eq!(edge_span(8), 2..=5);
/// assert_eq!(edge_span(5), 1..=3);
/// assert_eq!(edge_span(2), 0..=1);
/// ```
pub fn edge_span(n: usize) -> RangeInclusive<usize> {
    let center = center_span(n);
    let last = n.saturating_sub(1);
    center.start().saturating_sub(1)..=(center.end() + 1).min(last)
}

/// Determines whether `square` is a center square, an edge square, or neither.
pub fn zone_of(board: &Board, square: Square) -> Option<Zone> {
    let in_center = center_span(board.rows()).contains(&square.row)
        && center_span(board.cols()).contains(&square.col);
    let in_edge = edge_span(board.rows()).contains(&square.row)
        && edge_span(board.cols()).contains(&square.col);

    if in_center {
        Some(Zone::Center)
    } else if in_edge {
        Some(Zone::Edge)
    } else {
        None
    }
}

/// Encapsulates the logic of scoring a position.
///
/// A high score is good for White, and a low score is good for Black.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    /// The game whose position to evaluate.
    game: &'a GameState,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] for `game`.
    #[inline(always)]
    pub fn new(game: &'a GameState) -> Self {
        Self { game }
    }

    /// Evaluate this position from White's perspective.
    ///
    /// # Example
    /// ```
    /// # use chesstree::{Evaluator, GameState, Score};
    /// let game = GameState::default();
    /// assert_eq!(Evaluator::new(&game).eval(), Score::DRAW);
    /// ```
    #[inline(always)]
    pub fn eval(&self) -> Score {
        self.material(Color::White) - self.material(Color::Black) + self.positional()
    }

    /// Remaining material of `color`: a full army, minus every piece of `color` that has been captured.
    pub fn material(&self, color: Color) -> Score {
        let lost = self
            .game
            .captured(color)
            .iter()
            .map(|piece| piece.kind().value())
            .sum::<i32>();

        Score::from_pawns(INITIAL_MATERIAL_VALUE - lost)
    }

    /// Bonuses for pieces near the center of the board, White's minus Black's.
    pub fn positional(&self) -> Score {
        let board = self.game.board();

        board
            .pieces()
            .filter_map(|(square, piece)| {
                zone_of(board, square)
                    .map(|zone| zone.bonus() * piece.color().negation_multiplier())
            })
            .sum()
    }
}

impl fmt::Display for Evaluator<'_> {
    /// Prints the board with each piece's positional contribution, followed by the score breakdown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.game.board();

        for row in 0..board.rows() {
            for col in 0..board.cols() {
                let square = Square::new(row, col);
                let cell = match (board.piece_at(square), zone_of(board, square)) {
                    (Some(piece), Some(zone)) => {
                        let bonus = zone.bonus() * piece.color().negation_multiplier();
                        format!("{piece}{:+}", bonus.normalize())
                    }
                    (Some(piece), None) => format!("{piece}"),
                    (None, Some(Zone::Center)) => String::from("c"),
                    (None, Some(Zone::Edge)) => String::from("e"),
                    (None, None) => String::from("."),
                };
                write!(f, "{cell:^6}")?;
            }
            writeln!(f)?;
        }

        let score = self.eval();
        let winning_side = if score > Score::DRAW {
            Some(Color::White)
        } else if score < Score::DRAW {
            Some(Color::Black)
        } else {
            None
        };

        writeln!(f)?;
        writeln!(f, "White material: {}", self.material(Color::White))?;
        writeln!(f, "Black material: {}", self.material(Color::Black))?;
        writeln!(f, "Positional: {}", self.positional())?;
        writeln!(
            f,
            "Winning side: {}",
            winning_side.map(|c| c.name()).unwrap_or("N/A")
        )?;
        write!(f, "Score: {score}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_material() {
        assert_eq!(INITIAL_MATERIAL_VALUE, 39);
        let game = GameState::default();
        let eval = Evaluator::new(&game);
        assert_eq!(eval.material(Color::White), Score::from_pawns(39));
        assert_eq!(eval.material(Color::Black), Score::from_pawns(39));
    }

    #[test]
    fn test_material_after_captures() {
        // White queen in the middle of three Black pieces
        let board: Board = "k...K\n.r...\n.nQb.\n.....\n.....".parse().unwrap();
        let mut game = GameState::new(board);
        game.make_move_unchecked(Square::new(2, 2), Square::new(1, 1)).unwrap();
        game.make_move_unchecked(Square::new(1, 1), Square::new(2, 1)).unwrap();

        let eval = Evaluator::new(&game);
        assert_eq!(eval.material(Color::Black), Score::from_pawns(39 - 5 - 3));
        assert_eq!(eval.material(Color::White), Score::from_pawns(39));
    }

    #[test]
    fn test_zones_standard() {
        let board = Board::standard();
        assert_eq!(zone_of(&board, Square::new(3, 3)), Some(Zone::Center));
        assert_eq!(zone_of(&board, Square::new(4, 4)), Some(Zone::Center));
        assert_eq!(zone_of(&board, Square::new(2, 5)), Some(Zone::Edge));
        assert_eq!(zone_of(&board, Square::new(5, 3)), Some(Zone::Edge));
        assert_eq!(zone_of(&board, Square::new(1, 3)), None);
        assert_eq!(zone_of(&board, Square::new(3, 6)), None);

        let edge_squares = (0..8)
            .flat_map(|row| (0..8).map(move |col| Square::new(row, col)))
            .filter(|&sq| zone_of(&board, sq) == Some(Zone::Edge))
            .count();
        assert_eq!(edge_squares, 12);
    }

    #[test]
    fn test_positional_bonuses() {
        // White knight in the center, Black pawn on the ring
        let board: Board = ".....\n.p...\n..N..\n.....\n.....".parse().unwrap();
        let game = GameState::new(board);
        let eval = Evaluator::new(&game);
        assert_eq!(eval.positional(), Score(3 - 1));
        assert_eq!(eval.eval(), Score(2));
    }

    #[test]
    fn test_symmetric_start_is_even() {
        let game = GameState::default();
        let eval = Evaluator::new(&game);
        assert_eq!(eval.positional(), Score::DRAW);
        assert!(eval.to_string().contains("Winning side: N/A"));
    }
}
