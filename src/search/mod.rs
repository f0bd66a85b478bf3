//! Implements [Monte Carlo Tree Search] (MCTS) with [UCB1] selection and
//! uniformly random rollouts.
//!
//! Each round of the search consists of four steps:
//!
//! 1. Selection: walk down from the root, picking the child with the highest
//!    UCB1 score and applying its move to the shared state, until an unvisited
//!    node or a node without children is reached.
//! 2. Expansion: a node gets its children (one per legal move) the second
//!    time it becomes the current node of a walk, i.e. when it has exactly one
//!    visit.
//! 3. Simulation: play a random game from the current state and take it back.
//! 4. Backpropagation: update the statistics of every node on the path and
//!    undo the moves applied during selection.
//!
//! The state is never copied: all moves are applied and undone in stack order
//! on the single state the caller lends to [`Searcher::search`].
//!
//! [Monte Carlo Tree Search]: https://en.wikipedia.org/wiki/Monte_Carlo_tree_search
//! [UCB1]: https://www.chessprogramming.org/UCT

use anyhow::bail;
use tracing::{debug, trace};

use crate::environment::{Environment, Player};

pub mod random;
pub mod rollout;
pub mod tree;

pub use random::RandomSource;
pub use rollout::rollout;
pub use tree::{Node, NodeIndex, Tree};

/// UCB1 exploration constant used during the search rounds (roughly √2).
pub const DEFAULT_TEMPERATURE: f64 = 1.41;
/// Number of rounds per decision. More rounds trade time for accuracy.
pub const DEFAULT_ROUNDS: u32 = 100_000;

/// Where the random playout of a newly reached leaf starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LeafEvaluation {
    /// The leaf's own move is not applied before the rollout: the playout
    /// starts from the parent's position and the leaf is credited with
    /// whatever that game produced. Its statistics only start to reflect the
    /// leaf's position from the second visit on. Selection still scores
    /// unvisited children as [`f64::MAX`] at any temperature.
    #[default]
    Parent,
    /// The leaf's move is applied before the rollout and undone during
    /// backpropagation. Positions that are already decided are not expanded.
    Leaf,
}

/// Parameters of the search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Number of rounds performed for every decision.
    pub rounds: u32,
    /// UCB1 exploration constant for the rounds. The final choice is always
    /// made with zero temperature, i.e. pure exploitation.
    pub temperature: f64,
    #[allow(missing_docs)]
    pub leaf_evaluation: LeafEvaluation,
}

impl Config {
    /// # Errors
    ///
    /// Returns an error if there are no rounds to perform or the temperature
    /// is negative or not finite.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rounds == 0 {
            bail!("search needs at least one round");
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            bail!(
                "temperature should be a finite non-negative number, got {}",
                self.temperature
            );
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            temperature: DEFAULT_TEMPERATURE,
            leaf_evaluation: LeafEvaluation::default(),
        }
    }
}

/// Decides moves by building a fresh search tree for every call. Nothing is
/// carried over between decisions.
#[derive(Debug)]
pub struct Searcher<S: RandomSource> {
    config: Config,
    rng: S,
}

impl<S: RandomSource> Searcher<S> {
    #[must_use]
    pub const fn new(config: Config, rng: S) -> Self {
        Self { config, rng }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the move the search considers best for the player to move in
    /// `state`, or `None` if the search found no moves at all.
    ///
    /// `state` is restored before returning.
    pub fn get_next_move<E: Environment>(&mut self, state: &mut E) -> Option<E::Action> {
        let tree = self.search(state);
        let best = tree.best_action(self.config.rounds, &mut self.rng);
        if let Some(best) = best {
            let root = tree.node(tree.root());
            for &child in root.children() {
                let node = tree.node(child);
                trace!(
                    action = ?node.action(),
                    visits = node.visits(),
                    mean = node.mean_value(),
                    "root child"
                );
            }
            debug!(
                rounds = self.config.rounds,
                nodes = tree.len(),
                action = ?best,
                "search finished"
            );
        }
        best
    }

    /// Runs all rounds of the search from `state` and returns the resulting
    /// tree. `state` is restored before returning.
    pub fn search<E: Environment>(&mut self, state: &mut E) -> Tree<E::Action> {
        let mut tree = Tree::new(!state.player_to_move());
        // The root is treated as already seen, so it is expanded right away.
        tree.node_mut(tree.root()).record_visit();
        for round in 0..self.config.rounds {
            self.run_round(&mut tree, state, round);
        }
        tree
    }

    /// Selection, expansion, simulation and backpropagation for one round.
    fn run_round<E: Environment>(&mut self, tree: &mut Tree<E::Action>, state: &mut E, round: u32) {
        let player_to_move = state.player_to_move();
        let leaf_evaluation = self.config.leaf_evaluation;

        let mut current = tree.root();
        loop {
            let node = tree.node(current);
            if let Some(action) = node.action() {
                state.apply(action);
            }
            if node.visits() == 1
                && node.children().is_empty()
                && !(leaf_evaluation == LeafEvaluation::Leaf && state.is_terminal())
            {
                let actions = state.actions();
                tree.expand(current, actions.as_ref());
            }
            let Some(next) =
                tree.select_best_child(current, round, self.config.temperature, &mut self.rng)
            else {
                break;
            };
            current = next;
            if !tree.node(current).visited() {
                if leaf_evaluation == LeafEvaluation::Leaf {
                    if let Some(action) = tree.node(current).action() {
                        state.apply(action);
                    }
                }
                break;
            }
        }

        let winner = rollout(state, &mut self.rng);
        backpropagate(tree, state, current, winner);
        state.set_player_to_move(player_to_move);
    }
}

/// Updates every node from `leaf` up to the root and undoes their moves.
///
/// In [`LeafEvaluation::Parent`] mode the leaf's move was never applied, its
/// undo clears an empty cell.
fn backpropagate<E: Environment>(
    tree: &mut Tree<E::Action>,
    state: &mut E,
    leaf: NodeIndex,
    winner: Option<Player>,
) {
    let mut current = Some(leaf);
    while let Some(index) = current {
        let node = tree.node_mut(index);
        node.update_value(winner);
        node.record_visit();
        if let Some(action) = node.action() {
            state.undo(action);
        }
        current = node.parent();
    }
}
