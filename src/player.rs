/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};

use crate::{GameError, GameResult, GameState, MoveRecord, Search, SearchConfig, Square};

/// A computer player.
pub trait Mover {
    /// Human-readable name of this player.
    fn name(&self) -> &str;

    /// Picks a move for the side to move in `game`, without playing it.
    fn choose(&mut self, game: &GameState) -> GameResult<(Square, Square)>;

    /// Picks a move and commits it through [`GameState::make_move`].
    fn play(&mut self, game: &mut GameState) -> GameResult<MoveRecord> {
        let (from, to) = self.choose(game)?;
        game.make_move(from, to)
    }
}

/// Plays a uniformly random move from every move available to the side to move.
#[derive(Debug, Clone)]
pub struct RandomMover<R = StdRng> {
    rng: R,
}

impl RandomMover {
    /// Creates a [`RandomMover`] seeded from the thread-local generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Creates a [`RandomMover`] whose choices are reproducible for a given `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomMover<R> {
    #[inline(always)]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Mover for RandomMover<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, game: &GameState) -> GameResult<(Square, Square)> {
        let candidates = game.candidate_moves();
        tracing::debug!("random mover picking from {} moves", candidates.len());

        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoMovesAvailable {
                side: game.side_to_move(),
            })
    }
}

/// Plays the move picked by a [`Search`] over the game tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeMover {
    config: SearchConfig,
}

impl TreeMover {
    #[inline(always)]
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl Mover for TreeMover {
    fn name(&self) -> &str {
        "one-ply"
    }

    fn choose(&mut self, game: &GameState) -> GameResult<(Square, Square)> {
        Search::new(game, self.config)
            .start()?
            .bestmove
            .ok_or(GameError::NoMovesAvailable {
                side: game.side_to_move(),
            })
    }
}

/// The kinds of computer player available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Random,

    #[default]
    OnePly,
}

impl EngineKind {
    /// Constructs the computer player for this kind.
    ///
    /// `seed` only affects [`EngineKind::Random`], and `config` only affects [`EngineKind::OnePly`].
    pub fn mover(self, seed: Option<u64>, config: SearchConfig) -> Box<dyn Mover> {
        match self {
            Self::Random => Box::new(seed.map_or_else(RandomMover::new, RandomMover::seeded)),
            Self::OnePly => Box::new(TreeMover::new(config)),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::OnePly => f.write_str("one-ply"),
        }
    }
}
