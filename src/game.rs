/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{moves_from, Board, Color, GameError, GameResult, Piece, PieceKind, Square};

/// A move that has been applied to a board.
///
/// Stores the pre-move contents of both squares, which is everything needed to undo it exactly.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,

    /// The piece that moved.
    pub moved: Piece,

    /// Whatever occupied `to` before the move.
    pub captured: Option<Piece>,
}

impl MoveRecord {
    /// The captured piece, if it belonged to the opponent of the mover.
    ///
    /// Only these are ever placed in a capture list.
    #[inline(always)]
    pub fn enemy_capture(&self) -> Option<Piece> {
        self.captured
            .filter(|piece| piece.color() != self.moved.color())
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.moved, self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, " x{captured}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The loser's King is no longer on the board.
    KingCaptured,

    /// None of the loser's non-King pieces has a move.
    NoMovesLeft,

    /// The loser gave up.
    Resignation,
}

/// The result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub winner: Color,
    pub reason: EndReason,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loser = self.winner.opponent();
        match self.reason {
            EndReason::KingCaptured => {
                write!(f, "{} wins: the {loser} king was captured", self.winner)
            }
            EndReason::NoMovesLeft => write!(f, "{} wins: {loser} has no moves left", self.winner),
            EndReason::Resignation => write!(f, "{} wins: {loser} resigned", self.winner),
        }
    }
}

/// A game in progress.
///
/// Owns the live [`Board`], the side to move, both capture lists, and the undo/redo stacks.
/// Every mutating operation either commits entirely or returns an error and changes nothing.
///
/// # Example
/// ```
/// # use chesstree::{Board, Color, GameState, Square};
/// let mut game = GameState::new(Board::standard());
///
/// game.make_move(Square::new(6, 4), Square::new(5, 4)).unwrap();
/// assert_eq!(game.side_to_move(), Color::Black);
///
/// game.undo().unwrap();
/// assert_eq!(game.board(), game.original_board());
/// assert_eq!(game.side_to_move(), Color::White);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct GameState {
    /// The board this game started from.
    original: Board,

    board: Board,

    side_to_move: Color,

    /// Pieces of each color that have been captured, in capture order.
    captured: [Vec<Piece>; Color::COUNT],

    /// Applied moves, newest last.
    history: Vec<MoveRecord>,

    /// Undone moves, newest last.
    redo: Vec<MoveRecord>,
}

impl GameState {
    /// Starts a new game on `board`, with White to move.
    pub fn new(board: Board) -> Self {
        Self::with_side_to_move(board, Color::White)
    }

    /// Starts a new game on `board`, with `side` to move.
    pub fn with_side_to_move(board: Board, side: Color) -> Self {
        Self {
            original: board.clone(),
            board,
            side_to_move: side,
            captured: [Vec::new(), Vec::new()],
            history: Vec::new(),
            redo: Vec::new(),
        }
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub const fn original_board(&self) -> &Board {
        &self.original
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Pieces of `color` that have been captured so far.
    #[inline(always)]
    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    /// Every applied move, oldest first.
    #[inline(always)]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Every undone move that can still be redone, with the next redo last.
    #[inline(always)]
    pub fn redo_history(&self) -> &[MoveRecord] {
        &self.redo
    }

    #[inline(always)]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Destinations of the piece at `square`, regardless of whose turn it is.
    #[inline(always)]
    pub fn moves_from(&self, square: Square) -> Vec<Square> {
        moves_from(&self.board, square)
    }

    /// Returns `true` if both squares are on the board and `to` is reachable by the piece at `from`.
    ///
    /// Turn ownership is not considered.
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.board.contains(from) && self.board.contains(to) && self.moves_from(from).contains(&to)
    }

    /// Every `(from, to)` pair available to the side to move.
    pub fn candidate_moves(&self) -> Vec<(Square, Square)> {
        self.board
            .pieces_of(self.side_to_move)
            .flat_map(|(from, _)| self.moves_from(from).into_iter().map(move |to| (from, to)))
            .collect()
    }

    /// Returns `true` if any of `color`'s pieces, not counting its King, has a move.
    pub fn has_any_move(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .filter(|(_, piece)| !piece.is_king())
            .any(|(square, _)| !self.moves_from(square).is_empty())
    }

    /// Determines whether the game has ended, and who won.
    ///
    /// A side loses when its King is gone or when none of its non-King pieces can move.
    /// A Black win is checked before a White win.
    pub fn outcome(&self) -> Option<Outcome> {
        [Color::White, Color::Black]
            .into_iter()
            .find_map(|loser| self.loss_reason(loser))
            .map(|(loser, reason)| Outcome {
                winner: loser.opponent(),
                reason,
            })
    }

    #[inline(always)]
    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    fn loss_reason(&self, color: Color) -> Option<(Color, EndReason)> {
        if !self.board.has_piece(Piece::new(color, PieceKind::King)) {
            Some((color, EndReason::KingCaptured))
        } else if !self.has_any_move(color) {
            Some((color, EndReason::NoMovesLeft))
        } else {
            None
        }
    }

    /// Validates and applies a move for the side to move.
    ///
    /// Checks, in order: both squares are on the board, `from` holds a piece,
    /// that piece belongs to the side to move, and `to` is one of its destinations.
    /// On success the redo stack is cleared and the turn passes to the opponent.
    pub fn make_move(&mut self, from: Square, to: Square) -> GameResult<MoveRecord> {
        let piece = self.piece_to_move(from, to)?;

        if piece.color() != self.side_to_move {
            return Err(GameError::WrongSide {
                square: from,
                expected: self.side_to_move,
            });
        }

        if !self.moves_from(from).contains(&to) {
            return Err(GameError::IllegalMove { from, to });
        }

        Ok(self.commit(from, to, piece))
    }

    /// Applies a move without checking turn order or piece movement rules.
    ///
    /// History, capture lists, and the side to move are updated exactly as with [`Self::make_move`],
    /// so the move can be undone the same way. Both squares must still be on the board,
    /// and `from` must hold a piece.
    pub fn make_move_unchecked(&mut self, from: Square, to: Square) -> GameResult<MoveRecord> {
        let piece = self.piece_to_move(from, to)?;
        Ok(self.commit(from, to, piece))
    }

    /// Copies this game and applies the move, unchecked, to the copy.
    ///
    /// # Example
    /// ```
    /// # use chesstree::{GameState, Square};
    /// let game = GameState::default();
    /// let next = game.with_move_made(Square::new(6, 0), Square::new(5, 0)).unwrap();
    /// assert_eq!(next.history().len(), 1);
    /// assert!(game.history().is_empty());
    /// ```
    pub fn with_move_made(&self, from: Square, to: Square) -> GameResult<Self> {
        let mut copied = self.clone();
        copied.make_move_unchecked(from, to)?;
        Ok(copied)
    }

    /// Reverts the most recent move, making it available to [`Self::redo`].
    pub fn undo(&mut self) -> GameResult<MoveRecord> {
        let record = self.history.pop().ok_or(GameError::NothingToUndo)?;

        self.board.set(record.from, Some(record.moved));
        self.board.set(record.to, record.captured);

        if let Some(captured) = record.enemy_capture() {
            let list = &mut self.captured[captured.color().index()];
            if let Some(index) = list.iter().rposition(|piece| *piece == captured) {
                list.remove(index);
            }
        }

        self.side_to_move = self.side_to_move.opponent();
        self.redo.push(record);
        tracing::debug!("undo {record}");

        Ok(record)
    }

    /// Re-applies the most recently undone move.
    pub fn redo(&mut self) -> GameResult<MoveRecord> {
        let record = self.redo.pop().ok_or(GameError::NothingToRedo)?;

        self.apply(&record);
        self.history.push(record);
        tracing::debug!("redo {record}");

        Ok(record)
    }

    /// Fetches the piece on `from` after checking that both squares are on the board.
    fn piece_to_move(&self, from: Square, to: Square) -> GameResult<Piece> {
        for square in [from, to] {
            if !self.board.contains(square) {
                return Err(GameError::OutOfBounds { square });
            }
        }

        self.board
            .piece_at(from)
            .ok_or(GameError::EmptySquare { square: from })
    }

    fn commit(&mut self, from: Square, to: Square, moved: Piece) -> MoveRecord {
        let record = MoveRecord {
            from,
            to,
            moved,
            captured: self.board.piece_at(to),
        };

        self.redo.clear();
        self.apply(&record);
        self.history.push(record);
        tracing::debug!("{} played {record}", moved.color());

        record
    }

    /// Moves the piece, files any capture, and passes the turn.
    fn apply(&mut self, record: &MoveRecord) {
        self.board.take(record.from);
        self.board.place(record.to, record.moved);

        if let Some(captured) = record.enemy_capture() {
            self.captured[captured.color().index()].push(captured);
        }

        self.side_to_move = self.side_to_move.opponent();
    }
}

impl Default for GameState {
    /// A new game on the standard board.
    #[inline(always)]
    fn default() -> Self {
        Self::new(Board::standard())
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move", self.side_to_move)
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("board", &self.board)
            .field("side_to_move", &self.side_to_move)
            .field("captured", &self.captured)
            .field("history", &self.history)
            .field("redo", &self.redo)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col)
    }

    /// White rook on (2, 0) can take a Black knight on (0, 0).
    fn capture_game() -> GameState {
        let board: Board = "n.k\n...\nR.K".parse().unwrap();
        GameState::new(board)
    }

    #[test]
    fn test_make_move_flips_side_and_records() {
        let mut game = GameState::default();
        let record = game.make_move(sq(6, 3), sq(5, 3)).unwrap();

        assert_eq!(record.moved, Piece::WHITE_PAWN);
        assert_eq!(record.captured, None);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.last_move(), Some(&record));
        assert_eq!(game.board().piece_at(sq(6, 3)), None);
        assert_eq!(game.board().piece_at(sq(5, 3)), Some(Piece::WHITE_PAWN));
    }

    #[test]
    fn test_make_move_rejections_leave_state_untouched() {
        let mut game = GameState::default();
        let before = game.clone();

        assert_eq!(
            game.make_move(sq(8, 0), sq(5, 0)),
            Err(GameError::OutOfBounds { square: sq(8, 0) })
        );
        assert_eq!(
            game.make_move(sq(4, 4), sq(3, 4)),
            Err(GameError::EmptySquare { square: sq(4, 4) })
        );
        assert_eq!(
            game.make_move(sq(1, 0), sq(2, 0)),
            Err(GameError::WrongSide {
                square: sq(1, 0),
                expected: Color::White
            })
        );
        assert_eq!(
            game.make_move(sq(6, 0), sq(4, 0)),
            Err(GameError::IllegalMove {
                from: sq(6, 0),
                to: sq(4, 0)
            })
        );

        assert_eq!(game, before);
    }

    #[test]
    fn test_capture_and_undo() {
        let mut game = capture_game();
        let before = game.clone();

        let record = game.make_move(sq(2, 0), sq(0, 0)).unwrap();
        assert_eq!(record.captured, Some(Piece::BLACK_KNIGHT));
        assert_eq!(game.captured(Color::Black), [Piece::BLACK_KNIGHT]);
        assert!(game.captured(Color::White).is_empty());

        game.undo().unwrap();
        assert_eq!(game.board(), before.board());
        assert_eq!(game.side_to_move(), before.side_to_move());
        assert!(game.captured(Color::Black).is_empty());
        assert_eq!(game.redo_history(), [record]);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut game = capture_game();
        game.make_move(sq(2, 0), sq(0, 0)).unwrap();
        let after = game.clone();

        game.undo().unwrap();
        game.redo().unwrap();

        assert_eq!(game, after);
        assert!(game.redo_history().is_empty());
    }

    #[test]
    fn test_new_move_clears_redo() {
        let mut game = GameState::default();
        game.make_move(sq(6, 0), sq(5, 0)).unwrap();
        game.make_move(sq(1, 0), sq(2, 0)).unwrap();
        game.undo().unwrap();
        game.undo().unwrap();
        assert_eq!(game.redo_history().len(), 2);

        game.make_move(sq(6, 7), sq(5, 7)).unwrap();
        assert!(game.redo_history().is_empty());
        assert_eq!(game.redo(), Err(GameError::NothingToRedo));
    }

    #[test]
    fn test_undo_on_fresh_game_fails() {
        let mut game = GameState::default();
        assert_eq!(game.undo(), Err(GameError::NothingToUndo));
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn test_unchecked_ignores_turn_and_geometry() {
        let mut game = GameState::default();
        let record = game.make_move_unchecked(sq(0, 3), sq(6, 3)).unwrap();

        assert_eq!(record.captured, Some(Piece::WHITE_PAWN));
        assert_eq!(game.captured(Color::White), [Piece::WHITE_PAWN]);
        assert_eq!(game.side_to_move(), Color::Black);

        game.undo().unwrap();
        assert_eq!(game.board(), &Board::standard());
        assert!(game.captured(Color::White).is_empty());

        assert!(game.make_move_unchecked(sq(3, 3), sq(4, 3)).is_err());
    }

    #[test]
    fn test_unchecked_friendly_overwrite_is_not_a_capture() {
        let mut game = GameState::default();
        game.make_move_unchecked(sq(7, 0), sq(6, 0)).unwrap();
        assert!(game.captured(Color::White).is_empty());

        game.undo().unwrap();
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn test_is_legal() {
        let game = GameState::default();
        assert!(game.is_legal(sq(7, 1), sq(5, 2)));
        assert!(!game.is_legal(sq(7, 1), sq(6, 3)));
        assert!(!game.is_legal(sq(7, 1), sq(8, 2)));
        // Turn is not considered
        assert!(game.is_legal(sq(1, 0), sq(2, 0)));
    }

    #[test]
    fn test_outcome() {
        assert_eq!(GameState::default().outcome(), None);

        let game = GameState::new("...\n.K.\nP..".parse().unwrap());
        assert_eq!(
            game.outcome(),
            Some(Outcome {
                winner: Color::White,
                reason: EndReason::KingCaptured
            })
        );

        // White's only non-King piece is a stuck pawn
        let game = GameState::new("p.k\nP..\n..K".parse().unwrap());
        assert_eq!(
            game.outcome(),
            Some(Outcome {
                winner: Color::Black,
                reason: EndReason::NoMovesLeft
            })
        );
    }

    #[test]
    fn test_black_win_is_checked_first() {
        // Neither King is on the board
        let game = GameState::new("p..\n...\n..P".parse().unwrap());
        assert_eq!(game.outcome().map(|o| o.winner), Some(Color::Black));
    }

    #[test]
    fn test_candidate_moves_standard() {
        let game = GameState::default();
        assert_eq!(game.candidate_moves().len(), 12);
        assert!(game
            .candidate_moves()
            .iter()
            .all(|(from, _)| game.board().color_at(*from) == Some(Color::White)));
    }
}
