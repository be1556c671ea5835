/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use anyhow::{bail, Context};
use clap::{builder::PossibleValue, Parser, ValueEnum};

use crate::{Color, EngineKind, GameState, SearchConfig, Session, DEFAULT_DEPTH};

/// Play a simplified game of chess in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Number of human players. The remaining sides are played by the computer.
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub players: u8,

    /// Computer opponent to play against.
    #[arg(short, long, value_enum, default_value_t = EngineKind::OnePly)]
    pub engine: EngineKind,

    /// Side played by the human when there is exactly one.
    #[arg(short, long, value_enum, default_value_t = Color::White)]
    pub side: Color,

    /// Number of plies the search tree is built to.
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Seed for the random engine, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop the game once this many plies have been played.
    #[arg(long)]
    pub max_turns: Option<usize>,
}

impl Cli {
    /// Sides played by the computer.
    pub fn computer_sides(&self) -> Vec<Color> {
        match self.players {
            0 => Color::all().to_vec(),
            1 => vec![self.side.opponent()],
            _ => Vec::new(),
        }
    }

    /// Builds a [`Session`] on the standard board according to these arguments.
    pub fn session(&self) -> Session {
        let mut session = Session::new(GameState::default());

        let sides = self.computer_sides();
        if !sides.is_empty() {
            let config = SearchConfig { depth: self.depth };
            session = session.with_computer(self.engine.mover(self.seed, config), &sides);
        }

        if let Some(max) = self.max_turns {
            session = session.with_max_turns(max);
        }

        session
    }
}

/// A command entered during a game.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(multicall = true, rename_all = "lower", override_usage("r1, c1, r2, c2 | <COMMAND>"))]
pub enum SessionCommand {
    /// Move the piece at (r1, c1) to (r2, c2).
    #[command(alias = "m")]
    Move {
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    },

    /// Take back the last move.
    #[command(alias = "u")]
    Undo,

    /// Replay the last move that was taken back.
    #[command(alias = "r")]
    Redo,

    /// Print the pieces each side has captured.
    #[command(aliases = ["p", "print"])]
    Captures,

    /// Give up. The other side wins.
    #[command(aliases = ["f", "forfeit"])]
    Resign,

    /// Print the board.
    #[command(alias = "d")]
    Display,

    /// Print an evaluation of the current position.
    Eval,

    /// Show every destination of the piece at (row, col).
    Moves { row: usize, col: usize },

    /// Leave the game without a result.
    #[command(aliases = ["q", "exit"])]
    Quit,
}

impl SessionCommand {
    /// Parses the four comma-separated coordinates of a move, such as `"6, 4, 5, 4"`.
    fn parse_coordinates(s: &str) -> anyhow::Result<Self> {
        let fields = s
            .split(',')
            .map(|field| {
                let field = field.trim();
                field
                    .parse::<usize>()
                    .with_context(|| format!("{field:?} is not a non-negative integer"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let [from_row, from_col, to_row, to_col] = fields[..] else {
            bail!(
                "expected 4 comma-separated coordinates, found {}",
                fields.len()
            );
        };

        Ok(Self::Move {
            from_row,
            from_col,
            to_row,
            to_col,
        })
    }
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    /// Attempt to parse a [`SessionCommand`] from a string.
    ///
    /// Input containing a comma is treated as a move in `r1, c1, r2, c2` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(',') {
            return Self::parse_coordinates(s);
        }

        Ok(Self::try_parse_from(s.split_ascii_whitespace())?)
    }
}

impl ValueEnum for Color {
    fn value_variants<'a>() -> &'a [Self] {
        &[Color::White, Color::Black]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let value = match self {
            Color::White => PossibleValue::new("white").alias("w"),
            Color::Black => PossibleValue::new("black").alias("b"),
        };

        Some(value)
    }
}

impl ValueEnum for EngineKind {
    fn value_variants<'a>() -> &'a [Self] {
        &[EngineKind::Random, EngineKind::OnePly]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let value = match self {
            EngineKind::Random => PossibleValue::new("random").alias("r"),
            EngineKind::OnePly => PossibleValue::new("one-ply").aliases(["oneply", "tree", "t"]),
        };

        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_move() {
        let cmd: SessionCommand = "6, 4, 5, 4".parse().unwrap();
        assert_eq!(
            cmd,
            SessionCommand::Move {
                from_row: 6,
                from_col: 4,
                to_row: 5,
                to_col: 4
            }
        );

        assert!("6, 4, 5".parse::<SessionCommand>().is_err());
        assert!("6, 4, 5, -4".parse::<SessionCommand>().is_err());
        assert!("a, 4, 5, 4".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_parse_words_and_aliases() {
        assert_eq!("u".parse::<SessionCommand>().unwrap(), SessionCommand::Undo);
        assert_eq!("redo".parse::<SessionCommand>().unwrap(), SessionCommand::Redo);
        assert_eq!("f".parse::<SessionCommand>().unwrap(), SessionCommand::Resign);
        assert_eq!("p".parse::<SessionCommand>().unwrap(), SessionCommand::Captures);
        assert_eq!(
            "moves 7 1".parse::<SessionCommand>().unwrap(),
            SessionCommand::Moves { row: 7, col: 1 }
        );
        assert_eq!(
            "move 6 0 5 0".parse::<SessionCommand>().unwrap(),
            SessionCommand::Move {
                from_row: 6,
                from_col: 0,
                to_row: 5,
                to_col: 0
            }
        );
        assert!("castle".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["chesstree"]).unwrap();
        assert_eq!(cli.players, 2);
        assert_eq!(cli.engine, EngineKind::OnePly);
        assert_eq!(cli.depth, DEFAULT_DEPTH);
        assert!(cli.computer_sides().is_empty());
    }

    #[test]
    fn test_cli_one_player() {
        let cli =
            Cli::try_parse_from(["chesstree", "-p", "1", "--side", "black", "-e", "random"]).unwrap();
        assert_eq!(cli.computer_sides(), [Color::White]);
        assert_eq!(cli.engine, EngineKind::Random);

        assert!(Cli::try_parse_from(["chesstree", "-p", "3"]).is_err());
    }
}
