//! Game-tree search for two-player, perfect-information, zero-sum games.
//!
//! Two interchangeable engines pick a move for the side to move: exhaustive minimax with
//! alpha-beta pruning ([`minmax`]) and Monte Carlo Tree Search with UCT selection ([`search`]).
//! Both are driven through a [`GameAdapter`], which supplies the rules of the game.
//! [`selector::MoveSelector`] wraps either engine behind a single call, and [`driver`] speaks
//! the line-based protocol of an Othello game manager.

extern crate rand;

pub mod driver;
pub mod error;
pub mod game;
pub mod minmax;
pub mod othello;
pub mod search;
pub mod selector;
mod tests;

pub use error::SearchError;
pub use game::{GameAdapter, Side};
