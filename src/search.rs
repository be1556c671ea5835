/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::ops::Range;

use crate::{Color, Evaluator, GameError, GameResult, GameState, MoveRecord, Score, Square};

/// Default number of plies to build the search tree to.
pub const DEFAULT_DEPTH: usize = 3;

/// The result of a search, containing the best move found, score, and total nodes built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    /// Number of nodes in the search tree, not counting the root.
    pub nodes: u64,

    /// Best move found during the search.
    pub bestmove: Option<(Square, Square)>,

    /// Evaluation of the node that `bestmove` was chosen for.
    pub score: Score,
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of plies to build the tree to. A depth of 0 is treated as 1.
    pub depth: usize,
}

impl Default for SearchConfig {
    #[inline(always)]
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

/// A position in the [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Index of this node's parent. Only the root has none.
    pub parent: Option<usize>,

    /// Static evaluation of the position after [`Node::mv`] was played.
    pub score: Score,

    /// The move leading to this position from its parent.
    pub mv: Option<MoveRecord>,
}

/// A fixed-depth tree of every position reachable from a starting position.
///
/// Nodes are stored flat, grouped by ply: the root is at index 0, followed by every
/// child of the root, followed by every grandchild, and so on. Each ply alternates the side to move.
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<Node>,

    /// Index range into `nodes` for each ply, starting with the root.
    plies: Vec<Range<usize>>,

    /// Side to move at the root.
    side: Color,
}

impl SearchTree {
    /// Builds a tree `depth` plies deep from the current position of `game`.
    ///
    /// Each branch is explored on its own copy of the game, so `game` is never mutated.
    /// Construction stops early if a ply has no moves at all.
    ///
    /// # Example
    /// ```
    /// # use chesstree::{GameState, SearchTree};
    /// let tree = SearchTree::build(&GameState::default(), 2).unwrap();
    /// assert_eq!(tree.ply(1).len(), 12);
    /// assert_eq!(tree.ply(2).len(), 144);
    /// ```
    pub fn build(game: &GameState, depth: usize) -> GameResult<Self> {
        let root = Node {
            parent: None,
            score: Evaluator::new(game).eval(),
            mv: None,
        };

        let mut tree = Self {
            nodes: vec![root],
            plies: vec![0..1],
            side: game.side_to_move(),
        };

        let mut frontier = vec![(0, game.clone())];

        for ply in 1..=depth {
            let start = tree.nodes.len();
            let keep_positions = ply < depth;
            let mut next_frontier = Vec::new();

            for (parent, position) in &frontier {
                for (record, score, child) in branches(position)? {
                    let index = tree.nodes.len();
                    tracing::trace!("ply {ply} node {index}: {record} scored {score}");

                    tree.nodes.push(Node {
                        parent: Some(*parent),
                        score,
                        mv: Some(record),
                    });

                    if keep_positions {
                        next_frontier.push((index, child));
                    }
                }
            }

            if tree.nodes.len() == start {
                break;
            }

            tree.plies.push(start..tree.nodes.len());
            frontier = next_frontier;
        }

        Ok(tree)
    }

    /// Side to move at the root of this tree.
    #[inline(always)]
    pub const fn side(&self) -> Color {
        self.side
    }

    #[inline(always)]
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    #[inline(always)]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Every node in the tree, in ply order.
    #[inline(always)]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Total number of nodes, including the root.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds only its root.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Number of plies actually built below the root.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.plies.len() - 1
    }

    /// Index range of the nodes at `ply`. Empty if the tree is not that deep.
    pub fn ply_range(&self, ply: usize) -> Range<usize> {
        self.plies.get(ply).cloned().unwrap_or(0..0)
    }

    /// Nodes at `ply`, where ply 0 is the root.
    pub fn ply(&self, ply: usize) -> &[Node] {
        &self.nodes[self.ply_range(ply)]
    }

    /// The moves leading from the root to the node at `index`, in the order they are played.
    pub fn line_to(&self, index: usize) -> Vec<MoveRecord> {
        let mut line = Vec::new();
        let mut current = self.nodes.get(index);

        while let Some(node) = current {
            if let Some(mv) = node.mv {
                line.push(mv);
            }
            current = node.parent.and_then(|parent| self.nodes.get(parent));
        }

        line.reverse();
        line
    }
}

/// Every position reachable in one move by the side to move in `game`.
///
/// Each entry pairs the move with the static score of the resulting position
/// and the resulting position itself. `game` is left untouched.
pub fn branches(game: &GameState) -> GameResult<Vec<(MoveRecord, Score, GameState)>> {
    game.candidate_moves()
        .into_iter()
        .map(|(from, to)| -> GameResult<_> {
            let child = game.with_move_made(from, to)?;
            let record = *child
                .last_move()
                .ok_or(GameError::IllegalMove { from, to })?;
            let score = Evaluator::new(&child).eval();
            Ok((record, score, child))
        })
        .collect()
}

/// Strategy for picking the node of a [`SearchTree`] whose line should be played.
///
/// Deeper selection, such as minimax over the whole tree, plugs in here.
pub trait Selector {
    /// Returns the index of the chosen node, or `None` if the tree has no children.
    fn select(&self, tree: &SearchTree) -> Option<usize>;
}

/// Picks the immediate child of the root with the most extreme score for the side to move:
/// highest for White, lowest for Black.
///
/// The first child seeds the comparison, and only strictly better children replace it,
/// so ties go to the earliest generated move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImmediateChild;

impl Selector for ImmediateChild {
    fn select(&self, tree: &SearchTree) -> Option<usize> {
        let side = tree.side();
        let children = tree.ply_range(1);

        let mut best: Option<(usize, Score)> = None;
        for index in children {
            let score = tree.nodes()[index].score;
            let improves = match best {
                None => true,
                Some((_, best_score)) => match side {
                    Color::White => score > best_score,
                    Color::Black => score < best_score,
                },
            };

            if improves {
                best = Some((index, score));
            }
        }

        best.map(|(index, _)| index)
    }
}

/// Executes a search on the provided game.
#[derive(Debug)]
pub struct Search<'a, S = ImmediateChild> {
    /// The game to search on. It is copied when moves are applied to it.
    game: &'a GameState,

    /// Configuration variables for this instance of the search.
    config: SearchConfig,

    selector: S,
}

impl<'a> Search<'a> {
    /// Construct a new [`Search`] instance that selects among the immediate children of the root.
    #[inline(always)]
    pub fn new(game: &'a GameState, config: SearchConfig) -> Self {
        Self::with_selector(game, config, ImmediateChild)
    }
}

impl<'a, S: Selector> Search<'a, S> {
    /// Construct a new [`Search`] instance with a custom [`Selector`].
    #[inline(always)]
    pub fn with_selector(game: &'a GameState, config: SearchConfig, selector: S) -> Self {
        Self {
            game,
            config,
            selector,
        }
    }

    /// Start the search, returning its results.
    ///
    /// Fails with [`GameError::NoMovesAvailable`] if the side to move has no moves at all.
    pub fn start(self) -> GameResult<SearchResult> {
        let side = self.game.side_to_move();
        if self.game.candidate_moves().is_empty() {
            return Err(GameError::NoMovesAvailable { side });
        }

        let tree = SearchTree::build(self.game, self.config.depth.max(1))?;

        for ply in 1..=tree.depth() {
            tracing::info!("ply {ply}: {} nodes", tree.ply(ply).len());
        }

        let chosen = self
            .selector
            .select(&tree)
            .ok_or(GameError::NoMovesAvailable { side })?;

        let bestmove = tree
            .line_to(chosen)
            .first()
            .map(|record| (record.from, record.to));
        let score = tree.nodes()[chosen].score;

        if let Some((from, to)) = bestmove {
            tracing::info!("{side} chose {from} -> {to} with score {score}");
        }

        Ok(SearchResult {
            nodes: (tree.len() - 1) as u64,
            bestmove,
            score,
        })
    }
}

/// Searches the current position and commits the chosen move through [`GameState::make_move`].
pub fn play_best_move(game: &mut GameState, config: SearchConfig) -> GameResult<SearchResult> {
    let result = Search::new(game, config).start()?;

    if let Some((from, to)) = result.bestmove {
        game.make_move(from, to)?;
    }

    Ok(result)
}
