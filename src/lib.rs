/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Pieces, squares, the board itself, and per-piece move generation.
mod board;

/// Command-line arguments and in-game commands.
mod cli;

/// The interactive session that drives a game.
mod engine;

/// Errors returned by game operations.
mod error;

/// Evaluation of positions.
mod eval;

/// Game state: move execution, undo/redo history, and game-over detection.
mod game;

/// Move-count enumeration, for testing move generation.
mod perft;

/// Computer players.
mod player;

/// Numerical scores of positions.
mod score;

/// The search tree and move selection.
mod search;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use error::*;
pub use eval::*;
pub use game::*;
pub use perft::*;
pub use player::*;
pub use score::*;
pub use search::*;
