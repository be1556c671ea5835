/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use super::{Color, Piece, PieceKind, Square};
use crate::GameError;

/// A rectangular grid of cells, each either empty or holding a [`Piece`].
///
/// Dimensions are fixed at construction. Every lookup is bounds-checked against
/// the actual dimensions, so boards of any `rows` by `cols` size are supported.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Back rank layout of the standard setup, from column 0 onward.
    const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Creates an empty board of `rows` by `cols`.
    ///
    /// # Example
    /// ```
    /// # use chesstree::{Board, Square};
    /// let board = Board::new(4, 3);
    /// assert_eq!(board.rows(), 4);
    /// assert_eq!(board.cols(), 3);
    /// assert!(board.piece_at(Square::new(0, 0)).is_none());
    /// ```
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Creates the standard 8x8 starting setup.
    ///
    /// Black occupies rows 0 and 1, White occupies rows 6 and 7.
    pub fn standard() -> Self {
        let mut board = Self::new(8, 8);

        for (col, kind) in Self::BACK_RANK.into_iter().enumerate() {
            board.place(Square::new(0, col), Piece::new(Color::Black, kind));
            board.place(Square::new(1, col), Piece::BLACK_PAWN);
            board.place(Square::new(6, col), Piece::WHITE_PAWN);
            board.place(Square::new(7, col), Piece::new(Color::White, kind));
        }

        board
    }

    #[inline(always)]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if `square` lies on this board.
    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        square.row < self.rows && square.col < self.cols
    }

    #[inline(always)]
    const fn index_of(&self, square: Square) -> usize {
        square.row * self.cols + square.col
    }

    /// Fetches the piece at `square`, if there is one.
    ///
    /// Out-of-bounds squares are treated as empty.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if self.contains(square) {
            self.cells[self.index_of(square)]
        } else {
            None
        }
    }

    /// Fetches the color of the piece at `square`, if there is one.
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color())
    }

    /// Places `piece` at `square`, returning whatever was there before.
    ///
    /// Does nothing if `square` is off the board.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.set(square, Some(piece))
    }

    /// Removes and returns the piece at `square`, if there is one.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.set(square, None)
    }

    /// Overwrites the cell at `square`, returning its previous contents.
    pub fn set(&mut self, square: Square, cell: Option<Piece>) -> Option<Piece> {
        if !self.contains(square) {
            return None;
        }
        let index = self.index_of(square);
        std::mem::replace(&mut self.cells[index], cell)
    }

    /// An iterator over every occupied square and the piece on it, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|piece| (Square::new(i / self.cols, i % self.cols), piece))
        })
    }

    /// An iterator over every occupied square holding a piece of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    /// Returns `true` if `piece` appears anywhere on the board.
    #[inline(always)]
    pub fn has_piece(&self, piece: Piece) -> bool {
        self.cells.iter().any(|cell| *cell == Some(piece))
    }

    /// Number of occupied cells.
    #[inline(always)]
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().count()
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parses a board from text.
    ///
    /// Rows are separated by newlines or `/`. Each character is one cell:
    /// `.` or a space is empty, while FEN letters and chess glyphs are pieces.
    /// Leading and trailing newlines are ignored, but a row of spaces is still a row.
    ///
    /// # Example
    /// ```
    /// # use chesstree::{Board, Piece, Square};
    /// let board: Board = "...\n.R.\n..k".parse().unwrap();
    /// assert_eq!(board.rows(), 3);
    /// assert_eq!(board.piece_at(Square::new(1, 1)), Some(Piece::WHITE_ROOK));
    /// assert_eq!(board.piece_at(Square::new(2, 2)), Some(Piece::BLACK_KING));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_matches(['\n', '\r']);
        if s.is_empty() {
            return Err(GameError::InvalidBoard(String::from(
                "a board needs at least one row",
            )));
        }

        let lines = s
            .split(['\n', '/'])
            .map(|line| line.trim_end_matches('\r'))
            .collect::<Vec<_>>();
        let first = lines[0];

        let rows = lines.len();
        let cols = first.chars().count();
        let mut board = Self::new(rows, cols);

        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(GameError::InvalidBoard(format!(
                    "row {row} has {width} cells, expected {cols}"
                )));
            }

            for (col, c) in line.chars().enumerate() {
                if c == '.' || c == ' ' {
                    continue;
                }

                let piece = Piece::from_char(c).ok_or_else(|| {
                    GameError::InvalidBoard(format!("invalid piece {c:?} at ({row}, {col})"))
                })?;
                board.place(Square::new(row, col), piece);
            }
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    /// Prints the board with row indices on the left and column indices underneath.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rows.saturating_sub(1).to_string().len();

        for row in 0..self.rows {
            write!(f, "{row:>width$} |")?;
            for col in 0..self.cols {
                match self.piece_at(Square::new(row, col)) {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }

        write!(f, "{:>width$}  ", "")?;
        for col in 0..self.cols {
            write!(f, " {}", col % 10)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                f.write_str("/")?;
            }
            for col in 0..self.cols {
                let c = self
                    .piece_at(Square::new(row, col))
                    .map(|piece| piece.to_fen())
                    .unwrap_or('.');
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
