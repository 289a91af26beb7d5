//! Monte Carlo Tree Search with UCT selection and uniformly random rollouts.
//!
//! Each decision grows a fresh tree for a fixed number of rollouts, then plays the root move that
//! was visited the most. Nothing is kept between decisions.

use std::time;

use log::{debug, trace, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::SearchError;
use crate::game::{GameAdapter, Side};

pub use self::mcts_core::{NodeIndex, RandomRollout, SearchNode, Simulation, Tree};

mod arena;
/// The tree itself and its selection, expansion, simulation and backpropagation phases.
mod mcts_core;
pub use arena::{Arena, ArenaError, Index};

/// Settings for one MCTS decision.
#[derive(Clone, PartialEq, Debug)]
pub struct MctsSetting {
    rollouts: u64,
    exploration_weight: f64,
    seed: Option<u64>,
    max_nodes: Option<u32>,
    max_time: Option<time::Duration>,
}

impl Default for MctsSetting {
    fn default() -> Self {
        MctsSetting {
            rollouts: 100,
            exploration_weight: 5.0,
            seed: None,
            max_nodes: None,
            max_time: None,
        }
    }
}

impl MctsSetting {
    /// Number of selection/expansion/simulation/backpropagation cycles per decision
    pub fn add_rollouts(mut self, rollouts: u64) -> Self {
        self.rollouts = rollouts;
        self
    }

    /// Weight of the exploration term in the UCT score
    pub fn add_exploration_weight(mut self, exploration_weight: f64) -> Self {
        self.exploration_weight = exploration_weight;
        self
    }

    /// Seed the rollout generator, for reproducible play
    pub fn add_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Stop searching early once the tree holds this many nodes
    pub fn add_max_nodes(mut self, max_nodes: u32) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Stop searching early once this much time has passed
    pub fn add_max_time(mut self, max_time: time::Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    pub fn rollouts(&self) -> u64 {
        self.rollouts
    }

    pub fn exploration_weight(&self) -> f64 {
        self.exploration_weight
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn max_nodes(&self) -> Option<u32> {
        self.max_nodes
    }

    pub fn max_time(&self) -> Option<time::Duration> {
        self.max_time
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.rollouts == 0 {
            return Err(SearchError::InvalidConfiguration(
                "rollout count must be at least 1".to_string(),
            ));
        }
        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(SearchError::InvalidConfiguration(format!(
                "exploration weight must be a non-negative number, got {}",
                self.exploration_weight
            )));
        }
        if let Some(max_nodes) = self.max_nodes {
            if max_nodes < 2 {
                return Err(SearchError::InvalidConfiguration(format!(
                    "node limit must leave room for the root and one child, got {}",
                    max_nodes
                )));
            }
        }
        Ok(())
    }

    /// A generator seeded from the configured seed, or from system entropy if there is none.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

/// Abstract representation of a Monte Carlo Search Tree.
/// Gives more fine-grained control of the search process compared to using the `mcts` function.
pub struct MonteCarloTree<'a, G: GameAdapter, S> {
    adapter: &'a G,
    tree: Tree<G>,
    simulation: S,
    settings: MctsSetting,
    rollouts_done: u64,
}

impl<'a, G: GameAdapter, S: Simulation<G>> MonteCarloTree<'a, G, S> {
    pub fn new(
        adapter: &'a G,
        state: G::State,
        side: Side,
        settings: MctsSetting,
        simulation: S,
    ) -> Result<Self, SearchError> {
        settings.validate()?;
        let tree = Tree::new(state, side, settings.max_nodes.unwrap_or(u32::MAX))
            .map_err(|err| SearchError::InvalidConfiguration(err.to_string()))?;
        Ok(MonteCarloTree {
            adapter,
            tree,
            simulation,
            settings,
            rollouts_done: 0,
        })
    }

    /// Run one iteration of MCTS, returning the rollout's utility.
    /// Returns `Ok(None)` without touching the tree if it has run out of nodes.
    pub fn select(&mut self) -> Result<Option<f64>, SearchError> {
        let leaf = self
            .tree
            .select(self.adapter, self.settings.exploration_weight)?;
        let Some(expanded) = self.tree.expand(self.adapter, leaf)? else {
            return Ok(None);
        };
        let utility = self
            .tree
            .simulate(self.adapter, &mut self.simulation, expanded)?;
        self.tree.backpropagate(expanded, utility);
        self.rollouts_done += 1;
        trace!(
            "Rollout {} from {:?} ended with utility {}",
            self.rollouts_done,
            self.tree.node(expanded).state,
            utility
        );
        Ok(Some(utility))
    }

    /// Runs the configured number of rollouts, stopping early if the node or time limit is hit.
    /// Returns the number of rollouts that were run.
    pub fn search(&mut self) -> Result<u64, SearchError> {
        let start_time = time::Instant::now();
        for _ in 0..self.settings.rollouts {
            if self.select()?.is_none() {
                warn!(
                    "Search stopped early after {} rollouts: {}",
                    self.rollouts_done,
                    ArenaError::Full(self.tree.node_count())
                );
                break;
            }
            if let Some(max_time) = self.settings.max_time {
                if start_time.elapsed() >= max_time {
                    warn!(
                        "Search stopped early after {} rollouts: {:.3}s time limit reached",
                        self.rollouts_done,
                        max_time.as_secs_f64()
                    );
                    break;
                }
            }
        }
        Ok(self.rollouts_done)
    }

    /// Returns the most visited root move and its visit count, or `None` if the root is terminal.
    pub fn best_move(&self) -> Option<(G::Move, u64)> {
        self.tree.best_move(self.adapter)
    }

    pub fn tree(&self) -> &Tree<G> {
        &self.tree
    }

    pub fn root_visits(&self) -> u64 {
        self.tree.node(self.tree.root()).visit_count
    }

    /// Visit count and mean value of every expanded root move, in legal move order.
    /// A child that was expanded but never backpropagated, e.g. after a failed rollout,
    /// has a mean value of 0.
    pub fn child_stats(&self) -> Vec<(G::Move, u64, f64)> {
        let root = self.tree.node(self.tree.root());
        self.adapter
            .legal_moves(&root.state, root.side_to_move)
            .into_iter()
            .filter_map(|mv| {
                let child_state = self.adapter.apply_move(&root.state, root.side_to_move, &mv);
                root.child(&child_state).map(|index| {
                    let child = self.tree.node(index);
                    let mean = if child.visit_count == 0 {
                        0.0
                    } else {
                        child.value_sum / child.visit_count as f64
                    };
                    (mv, child.visit_count, mean)
                })
            })
            .collect()
    }

    pub fn rollouts_done(&self) -> u64 {
        self.rollouts_done
    }
}

/// The simplest way to use the mcts module. Runs a full search with the given settings and returns
/// the most visited move, or `None` if `side` has no legal moves.
pub fn mcts<G: GameAdapter>(
    adapter: &G,
    state: &G::State,
    side: Side,
    settings: &MctsSetting,
) -> Result<Option<G::Move>, SearchError> {
    mcts_with_rng(adapter, state, side, settings, settings.rng())
}

/// Runs MCTS with random rollouts drawn from `rng`.
pub fn mcts_with_rng<G: GameAdapter, R: Rng>(
    adapter: &G,
    state: &G::State,
    side: Side,
    settings: &MctsSetting,
    rng: R,
) -> Result<Option<G::Move>, SearchError> {
    mcts_with_simulation(adapter, state, side, settings, RandomRollout::new(rng))
}

/// Runs MCTS with a custom rollout policy.
pub fn mcts_with_simulation<G: GameAdapter, S: Simulation<G>>(
    adapter: &G,
    state: &G::State,
    side: Side,
    settings: &MctsSetting,
    simulation: S,
) -> Result<Option<G::Move>, SearchError> {
    let mut tree = MonteCarloTree::new(adapter, state.clone(), side, settings.clone(), simulation)?;
    if adapter.legal_moves(state, side).is_empty() {
        debug!("MCTS for {} side: no legal moves", side);
        return Ok(None);
    }
    let rollouts = tree.search()?;
    let best = tree.best_move();
    debug!(
        "MCTS for {} side: {} rollouts, {} nodes, best move {:?}",
        side,
        rollouts,
        tree.tree().node_count(),
        best
    );
    Ok(best.map(|(mv, _)| mv))
}
