/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

/// A `(row, col)` coordinate on a board.
///
/// Row 0 is the top of the board (Black's home side in the standard setup).
/// A [`Square`] carries no knowledge of board dimensions; use [`crate::Board::contains`]
/// to check whether it lies on a particular board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    /// Creates a new [`Square`] at `(row, col)`.
    #[inline(always)]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Attempt to offset this [`Square`] by the row and column deltas,
    /// staying within a board of `rows` by `cols`.
    ///
    /// If the result would fall off the board, `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use chesstree::Square;
    /// let sq = Square::new(2, 1);
    /// assert_eq!(sq.offset(-1, 1, 8, 8), Some(Square::new(1, 2)));
    /// assert_eq!(sq.offset(0, -2, 8, 8), None);
    /// assert_eq!(sq.offset(1, 0, 3, 8), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, row_delta: isize, col_delta: isize, rows: usize, cols: usize) -> Option<Self> {
        let Some(row) = self.row.checked_add_signed(row_delta) else {
            return None;
        };

        let Some(col) = self.col.checked_add_signed(col_delta) else {
            return None;
        };

        if row < rows && col < cols {
            Some(Self::new(row, col))
        } else {
            None
        }
    }
}

impl From<(usize, usize)> for Square {
    #[inline(always)]
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
