//! Picks a move with whichever engine the player is configured to use.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::SearchError;
use crate::game::{GameAdapter, Side};
use crate::minmax;
use crate::search::{self, MctsSetting};

#[derive(Clone, PartialEq, Debug)]
pub enum Strategy {
    Minimax,
    Mcts(MctsSetting),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Mcts(MctsSetting::default())
    }
}

impl Strategy {
    pub fn validate(&self) -> Result<(), SearchError> {
        match self {
            Strategy::Minimax => Ok(()),
            Strategy::Mcts(settings) => settings.validate(),
        }
    }

    /// The name the player introduces itself with.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Minimax => "Minimax AI",
            Strategy::Mcts(_) => "MCTS AI",
        }
    }
}

pub struct MoveSelector<G> {
    adapter: G,
    strategy: Strategy,
    rng: SmallRng,
}

impl<G: GameAdapter> MoveSelector<G> {
    /// Fails with `InvalidConfiguration` if the strategy's parameters are out of range.
    pub fn new(adapter: G, strategy: Strategy) -> Result<Self, SearchError> {
        strategy.validate()?;
        let rng = match &strategy {
            Strategy::Mcts(settings) => settings.rng(),
            // Minimax never draws from it
            Strategy::Minimax => SmallRng::seed_from_u64(0),
        };
        Ok(MoveSelector {
            adapter,
            strategy,
            rng,
        })
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn adapter(&self) -> &G {
        &self.adapter
    }

    /// Chooses a move for `side`, or `None` if it has no legal moves.
    pub fn select_move(
        &mut self,
        state: &G::State,
        side: Side,
    ) -> Result<Option<G::Move>, SearchError> {
        match &self.strategy {
            Strategy::Minimax => minmax::minimax(&self.adapter, state, side).map(|(_, mv)| mv),
            Strategy::Mcts(settings) => {
                search::mcts_with_rng(&self.adapter, state, side, settings, &mut self.rng)
            }
        }
    }
}
