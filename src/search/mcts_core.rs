//! The four phases of Monte Carlo Tree Search over an arena-backed tree.
use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SearchError;
use crate::game::{GameAdapter, Side};

use super::arena::{Arena, ArenaError, Index};

pub type NodeIndex<G> = Index<SearchNode<G>>;

/// One (state, side to move) pair in the search tree, reached by a unique path from the root.
pub struct SearchNode<G: GameAdapter> {
    pub state: G::State,
    pub side_to_move: Side,
    pub visit_count: u64,
    /// Sum of rollout utilities, from the perspective of the side that moved into this node.
    pub value_sum: f64,
    pub parent: Option<NodeIndex<G>>,
    /// Children in the order they were expanded
    children: Vec<NodeIndex<G>>,
    child_lookup: HashMap<G::State, NodeIndex<G>>,
}

impl<G: GameAdapter> SearchNode<G> {
    fn new(state: G::State, side_to_move: Side, parent: Option<NodeIndex<G>>) -> Self {
        SearchNode {
            state,
            side_to_move,
            visit_count: 0,
            value_sum: 0.0,
            parent,
            children: vec![],
            child_lookup: HashMap::new(),
        }
    }

    pub fn children(&self) -> &[NodeIndex<G>] {
        &self.children
    }

    /// The child holding `state`, if it has been expanded.
    pub fn child(&self, state: &G::State) -> Option<NodeIndex<G>> {
        self.child_lookup.get(state).copied()
    }

    /// Upper confidence bound of this node as a child of a node with `parent_visits` visits.
    #[inline]
    pub fn uct(&self, parent_visits: u64, exploration_weight: f64) -> f64 {
        let visits = self.visit_count as f64;
        self.value_sum / visits
            + exploration_weight * ((parent_visits as f64).ln() / visits).sqrt()
    }
}

/// Runs one playout from a leaf to the end of the game and returns the final utility.
pub trait Simulation<G: GameAdapter> {
    fn simulate(&mut self, adapter: &G, state: &G::State, side: Side) -> f64;
}

/// Plays uniformly random legal moves until neither side to move has any.
pub struct RandomRollout<R> {
    rng: R,
}

impl<R: Rng> RandomRollout<R> {
    pub fn new(rng: R) -> Self {
        RandomRollout { rng }
    }
}

impl<G: GameAdapter, R: Rng> Simulation<G> for RandomRollout<R> {
    fn simulate(&mut self, adapter: &G, state: &G::State, side: Side) -> f64 {
        let mut state = state.clone();
        let mut side = side;
        loop {
            let moves = adapter.legal_moves(&state, side);
            match moves.choose(&mut self.rng) {
                Some(mv) => {
                    state = adapter.apply_move(&state, side, mv);
                    side = !side;
                }
                None => return adapter.utility(&state),
            }
        }
    }
}

/// A Monte Carlo search tree, with every node owned by a single arena.
pub struct Tree<G: GameAdapter> {
    arena: Arena<SearchNode<G>>,
    root: NodeIndex<G>,
}

impl<G: GameAdapter> Tree<G> {
    /// Creates a tree holding just the root. The root starts with one visit,
    /// so the exploration term is defined on the first selection.
    pub fn new(state: G::State, side: Side, max_nodes: u32) -> Result<Self, ArenaError> {
        let mut arena = Arena::new(max_nodes);
        let mut root = SearchNode::new(state, side, None);
        root.visit_count = 1;
        let root = arena.add(root)?;
        Ok(Tree { arena, root })
    }

    pub fn root(&self) -> NodeIndex<G> {
        self.root
    }

    pub fn node(&self, index: NodeIndex<G>) -> &SearchNode<G> {
        self.arena.get(index)
    }

    pub fn node_count(&self) -> u32 {
        self.arena.slots_used()
    }

    /// Descends from the root through fully expanded nodes, following the child with the highest
    /// UCT score. Stops at the first node that is terminal or still has an unexpanded move.
    pub fn select(
        &self,
        adapter: &G,
        exploration_weight: f64,
    ) -> Result<NodeIndex<G>, SearchError> {
        let mut current = self.root;
        loop {
            let node = self.node(current);
            let moves = adapter.legal_moves(&node.state, node.side_to_move);
            if moves.is_empty() {
                return Ok(current);
            }
            let fully_expanded = moves.iter().all(|mv| {
                let child_state = adapter.apply_move(&node.state, node.side_to_move, mv);
                node.child(&child_state).is_some()
            });
            if !fully_expanded {
                return Ok(current);
            }
            current = self.best_uct_child(current, exploration_weight)?;
        }
    }

    fn best_uct_child(
        &self,
        parent: NodeIndex<G>,
        exploration_weight: f64,
    ) -> Result<NodeIndex<G>, SearchError> {
        let node = self.node(parent);
        let mut best_uct = f64::NEG_INFINITY;
        let mut best_child = None;

        for &child_index in node.children() {
            let child = self.node(child_index);
            if child.visit_count == 0 {
                return Err(SearchError::AdapterContractViolation(format!(
                    "unvisited child {:?} reached during selection",
                    child.state
                )));
            }
            let uct = child.uct(node.visit_count, exploration_weight);
            if uct > best_uct || best_child.is_none() {
                best_uct = uct;
                best_child = Some(child_index);
            }
        }
        best_child.ok_or_else(|| {
            SearchError::AdapterContractViolation(format!(
                "state {:?} has legal moves but no children after full expansion",
                node.state
            ))
        })
    }

    /// Adds one child for the first legal move whose resulting state is not yet in the tree.
    /// Terminal nodes are returned unchanged.
    ///
    /// Returns `Ok(None)` if the arena is full.
    pub fn expand(
        &mut self,
        adapter: &G,
        leaf: NodeIndex<G>,
    ) -> Result<Option<NodeIndex<G>>, SearchError> {
        let node = self.node(leaf);
        let side = node.side_to_move;
        let moves = adapter.legal_moves(&node.state, side);
        if moves.is_empty() {
            return Ok(Some(leaf));
        }

        let unexpanded = moves
            .iter()
            .map(|mv| adapter.apply_move(&node.state, side, mv))
            .find(|child_state| node.child(child_state).is_none());

        let Some(child_state) = unexpanded else {
            return Err(SearchError::AdapterContractViolation(format!(
                "every legal move from {:?} is already expanded, but selection stopped there",
                node.state
            )));
        };

        let child = SearchNode::new(child_state.clone(), !side, Some(leaf));
        let child_index = match self.arena.add(child) {
            Ok(index) => index,
            Err(ArenaError::Full(_)) => return Ok(None),
        };
        let parent = self.arena.get_mut(leaf);
        parent.children.push(child_index);
        parent.child_lookup.insert(child_state, child_index);
        Ok(Some(child_index))
    }

    /// Runs a playout from `leaf` and checks that the adapter returned a usable utility.
    pub fn simulate<S: Simulation<G>>(
        &self,
        adapter: &G,
        simulation: &mut S,
        leaf: NodeIndex<G>,
    ) -> Result<f64, SearchError> {
        let node = self.node(leaf);
        let utility = simulation.simulate(adapter, &node.state, node.side_to_move);
        if utility.is_finite() {
            Ok(utility)
        } else {
            Err(SearchError::AdapterContractViolation(format!(
                "rollout from {:?} ended with non-finite utility {}",
                node.state, utility
            )))
        }
    }

    /// Walks from `leaf` up to the root, counting the visit and crediting the utility to the
    /// side that moved into each node: subtracted where First is to move, added where Second is.
    pub fn backpropagate(&mut self, leaf: NodeIndex<G>, utility: f64) {
        let mut current = Some(leaf);
        while let Some(index) = current {
            let node = self.arena.get_mut(index);
            node.visit_count += 1;
            match node.side_to_move {
                Side::First => node.value_sum -= utility,
                Side::Second => node.value_sum += utility,
            }
            current = node.parent;
        }
    }

    /// The root move whose child has the strictly highest visit count. The earliest legal move
    /// wins ties, and moves that were never expanded count as zero visits.
    pub fn best_move(&self, adapter: &G) -> Option<(G::Move, u64)> {
        let root = self.node(self.root);
        let mut best = None;
        let mut most_visits = 0;
        for mv in adapter.legal_moves(&root.state, root.side_to_move) {
            let child_state = adapter.apply_move(&root.state, root.side_to_move, &mv);
            let visits = root
                .child(&child_state)
                .map_or(0, |child| self.node(child).visit_count);
            if visits > most_visits {
                most_visits = visits;
                best = Some(mv);
            }
        }
        best.map(|mv| (mv, most_visits))
    }
}
