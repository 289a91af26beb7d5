//! The abstract notion of a game shared by both search engines.

use std::fmt;
use std::hash::Hash;
use std::ops;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the two players. `First` moves first, and positive utilities favor it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// The integer used for this side by the game manager: 1 for dark, 2 for light.
    pub fn protocol_id(self) -> u8 {
        match self {
            Side::First => 1,
            Side::Second => 2,
        }
    }

    pub fn from_protocol_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Side::First),
            2 => Some(Side::Second),
            _ => None,
        }
    }
}

impl ops::Not for Side {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// The rules of a game, as seen by the search engines.
///
/// States are treated as immutable values: two states with equal contents are the same
/// state, regardless of how they were reached. Every method must be a pure function of
/// its arguments.
pub trait GameAdapter {
    type State: Clone + Eq + Hash + fmt::Debug;
    type Move: Clone + PartialEq + fmt::Debug;

    /// All legal moves for `side`, in a fixed order. An empty list means the position is terminal.
    fn legal_moves(&self, state: &Self::State, side: Side) -> Vec<Self::Move>;

    /// The state reached when `side` plays `mv`. The input state is left untouched.
    fn apply_move(&self, state: &Self::State, side: Side, mv: &Self::Move) -> Self::State;

    /// Utility of a terminal state. Positive values favor [`Side::First`].
    fn utility(&self, state: &Self::State) -> f64;
}
