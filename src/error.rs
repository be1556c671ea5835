/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, Square};

/// Everything that can go wrong when querying or mutating a [`crate::GameState`].
///
/// Every error is recoverable: an operation that returns one has left the game untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("square {square} is not on the board")]
    OutOfBounds { square: Square },

    #[error("there is no piece on {square}")]
    EmptySquare { square: Square },

    #[error("the piece on {square} does not belong to {expected}")]
    WrongSide { square: Square, expected: Color },

    #[error("cannot move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("there is no move to undo")]
    NothingToUndo,

    #[error("there is no move to redo")]
    NothingToRedo,

    #[error("{side} has no moves available")]
    NoMovesAvailable { side: Color },

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}

/// Result alias for operations on a game.
pub type GameResult<T> = Result<T, GameError>;
