/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::{
    Color, EndReason, Evaluator, GameState, Mover, Outcome, Piece, SessionCommand, Square,
};

/// What the session loop should do after a command.
enum Flow {
    Continue,
    End(Option<Outcome>),
}

/// An interactive game between humans, the computer, or both.
///
/// Commands are read line by line from any [`BufRead`] and all output goes to any [`Write`],
/// so a session can be driven by stdin/stdout or by a script.
pub struct Session {
    game: GameState,

    /// Plays every side marked in `computer`.
    mover: Option<Box<dyn Mover>>,

    /// Which sides the computer plays.
    computer: [bool; Color::COUNT],

    /// Plies after which the session stops, if any.
    max_turns: Option<usize>,
}

impl Session {
    /// Constructs a new [`Session`] on `game` where every side is played by a human.
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            mover: None,
            computer: [false; Color::COUNT],
            max_turns: None,
        }
    }

    /// Hands `sides` over to `mover`.
    pub fn with_computer(mut self, mover: Box<dyn Mover>, sides: &[Color]) -> Self {
        for &side in sides {
            self.computer[side.index()] = true;
        }
        self.mover = Some(mover);
        self
    }

    /// Stops the session once `max` plies have been played.
    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = Some(max);
        self
    }

    #[inline(always)]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Returns `true` if `side` is played by the computer.
    #[inline(always)]
    pub fn is_computer(&self, side: Color) -> bool {
        self.computer[side.index()] && self.mover.is_some()
    }

    /// Runs the game until it ends, returning its [`Outcome`].
    ///
    /// `None` is returned if the players quit, the input runs out, or the turn limit is reached.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> Result<Option<Outcome>> {
        let mut buffer = String::new();
        writeln!(output, "{}", self.game.board())?;

        loop {
            if let Some(outcome) = self.game.outcome() {
                tracing::info!("game over after {} plies: {outcome}", self.game.history().len());
                writeln!(output, "{outcome}")?;
                return Ok(Some(outcome));
            }

            if self
                .max_turns
                .is_some_and(|max| self.game.history().len() >= max)
            {
                writeln!(output, "Turn limit reached")?;
                return Ok(None);
            }

            let side = self.game.side_to_move();
            if self.is_computer(side) {
                self.computer_turn(output)?;
                continue;
            }

            write!(output, "{side} to move> ")?;
            output.flush()?;

            buffer.clear();
            let bytes = input
                .read_line(&mut buffer)
                .context("Failed to read a command")?;

            // For ctrl + d
            if bytes == 0 {
                writeln!(output)?;
                return Ok(None);
            }

            let line = buffer.trim();
            if line.is_empty() {
                continue;
            }

            let cmd = match line.parse::<SessionCommand>() {
                Ok(cmd) => cmd,
                Err(err) => {
                    tracing::warn!("rejected input {line:?}: {err}");
                    writeln!(output, "{err}")?;
                    continue;
                }
            };

            if let Flow::End(outcome) = self.execute(cmd, output)? {
                return Ok(outcome);
            }
        }
    }

    /// Lets the computer play the side to move.
    fn computer_turn<W: Write>(&mut self, output: &mut W) -> Result<()> {
        let side = self.game.side_to_move();
        let Some(mover) = self.mover.as_mut() else {
            return Ok(());
        };

        let record = mover
            .play(&mut self.game)
            .with_context(|| format!("{} failed to move for {side}", mover.name()))?;

        writeln!(output, "{side} ({}) played {record}", mover.name())?;
        writeln!(output, "{}", self.game.board())?;
        Ok(())
    }

    /// Executes a single [`SessionCommand`] for the human to move.
    fn execute<W: Write>(&mut self, cmd: SessionCommand, output: &mut W) -> Result<Flow> {
        match cmd {
            SessionCommand::Move {
                from_row,
                from_col,
                to_row,
                to_col,
            } => {
                let from = Square::new(from_row, from_col);
                let to = Square::new(to_row, to_col);

                if let Some(square) = [from, to].into_iter().find(|&sq| !self.game.board().contains(sq)) {
                    tracing::warn!("rejected out-of-bounds square {square}");
                    writeln!(
                        output,
                        "{square} is off the {}x{} board",
                        self.game.board().rows(),
                        self.game.board().cols()
                    )?;
                    return Ok(Flow::Continue);
                }

                match self.game.make_move(from, to) {
                    Ok(record) => {
                        writeln!(output, "Played {record}")?;
                        writeln!(output, "{}", self.game.board())?;
                    }
                    Err(err) => {
                        tracing::warn!("rejected move {from} -> {to}: {err}");
                        writeln!(output, "Invalid move: {err}")?;
                    }
                }
            }

            SessionCommand::Undo => match self.game.undo() {
                Ok(record) => {
                    writeln!(output, "Took back {record}")?;
                    writeln!(output, "{}", self.game.board())?;
                }
                Err(err) => writeln!(output, "{err}")?,
            },

            SessionCommand::Redo => match self.game.redo() {
                Ok(record) => {
                    writeln!(output, "Replayed {record}")?;
                    writeln!(output, "{}", self.game.board())?;
                }
                Err(err) => writeln!(output, "{err}")?,
            },

            SessionCommand::Captures => {
                for side in Color::all() {
                    let taken = self.game.captured(side.opponent());
                    writeln!(output, "Captured by {side}: {}", format_pieces(taken))?;
                }
            }

            SessionCommand::Resign => {
                let outcome = Outcome {
                    winner: self.game.side_to_move().opponent(),
                    reason: EndReason::Resignation,
                };
                tracing::info!("{outcome}");
                writeln!(output, "{outcome}")?;
                return Ok(Flow::End(Some(outcome)));
            }

            SessionCommand::Display => writeln!(output, "{}", self.game.board())?,

            SessionCommand::Eval => writeln!(output, "{}", Evaluator::new(&self.game))?,

            SessionCommand::Moves { row, col } => {
                let square = Square::new(row, col);
                match self.game.board().piece_at(square) {
                    Some(piece) => {
                        let moves = self.game.moves_from(square);
                        let moves_string = if moves.is_empty() {
                            String::from("(none)")
                        } else {
                            moves
                                .into_iter()
                                .map(|to| to.to_string())
                                .collect::<Vec<_>>()
                                .join(", ")
                        };
                        writeln!(output, "{piece} {square}: {moves_string}")?;
                    }
                    None => writeln!(output, "There is no piece on {square}")?,
                }
            }

            SessionCommand::Quit => return Ok(Flow::End(None)),
        }

        Ok(Flow::Continue)
    }
}

/// Joins the glyphs of `pieces` with spaces, or `(none)` if there are none.
fn format_pieces(pieces: &[Piece]) -> String {
    if pieces.is_empty() {
        return String::from("(none)");
    }

    pieces
        .iter()
        .map(|piece| piece.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
