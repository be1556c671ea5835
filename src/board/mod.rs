/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The rectangular grid of cells.
mod grid;

/// Per-piece move generation, including the line scanner for sliding pieces.
mod movegen;

/// Colors, piece kinds, and their glyphs.
mod piece;

/// Board coordinates.
mod square;

pub use grid::*;
pub use movegen::*;
pub use piece::*;
pub use square::*;
