/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{GameState, Square};

/// Perform a perft at the specified depth, collecting only data about the number of possible positions (nodes).
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
///
/// # Example
/// ```
/// # use chesstree::{perft, GameState};
/// let game = GameState::default();
/// assert_eq!(perft(&game, 1), 12);
/// assert_eq!(perft(&game, 2), 144);
/// ```
#[inline(always)]
pub fn perft(game: &GameState, depth: usize) -> u64 {
    perft_generic::<true>(game, depth)
}

/// Generic version of [`perft`] that allows you to specify whether to perform bulk counting.
///
/// Moves are played with [`GameState::with_move_made`], so turn order alternates
/// and no King safety is considered.
pub fn perft_generic<const BULK: bool>(game: &GameState, depth: usize) -> u64 {
    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && depth == 1 {
        return game.candidate_moves().len() as u64;
    }
    // Recursion limit; return 1, since we're fathoming this node.
    else if depth == 0 {
        return 1;
    }

    game.candidate_moves()
        .into_iter()
        .fold(0, |nodes, (from, to)| {
            nodes
                + game
                    .with_move_made(from, to)
                    .map_or(0, |next| perft_generic::<BULK>(&next, depth - 1))
        })
}

/// Perform a perft at the specified depth, returning the number of nodes reachable after each move available at the root.
pub fn splitperft(game: &GameState, depth: usize) -> Vec<((Square, Square), u64)> {
    game.candidate_moves()
        .into_iter()
        .map(|(from, to)| {
            let nodes = game
                .with_move_made(from, to)
                .map_or(0, |next| perft(&next, depth.saturating_sub(1)));
            ((from, to), nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_matches_full_count() {
        let game = GameState::default();
        for depth in 0..=3 {
            assert_eq!(perft_generic::<true>(&game, depth), perft_generic::<false>(&game, depth));
        }
    }

    #[test]
    fn test_splitperft_sums_to_perft() {
        let game = GameState::default();
        let split = splitperft(&game, 3);
        assert_eq!(split.len(), 12);
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), perft(&game, 3));
    }
}
