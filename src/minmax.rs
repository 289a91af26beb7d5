//! Exhaustive minimax search with alpha-beta pruning.
//!
//! The search always runs to the end of the game, so it is only practical for small games or
//! positions close to the end. [`Side::First`] maximizes utility and [`Side::Second`] minimizes it.

use log::debug;

use crate::error::SearchError;
use crate::game::{GameAdapter, Side};

/// Counters collected during one alpha-beta search.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MinimaxStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Returns the game-theoretic value of `state` with `side` to move, and the best move.
///
/// The move is `None` only when `side` has no legal moves, in which case the value is the
/// utility of `state`.
pub fn minimax<G: GameAdapter>(
    adapter: &G,
    state: &G::State,
    side: Side,
) -> Result<(f64, Option<G::Move>), SearchError> {
    let mut stats = MinimaxStats::default();
    let (value, mv) = alpha_beta(
        adapter,
        state,
        side,
        f64::NEG_INFINITY,
        f64::INFINITY,
        &mut stats,
    )?;
    debug!(
        "Minimax for {} side: value {}, move {:?}, {} nodes, {} cutoffs",
        side, value, mv, stats.nodes, stats.cutoffs
    );
    Ok((value, mv))
}

/// Alpha-beta search within the window `(alpha, beta)`.
///
/// When a cutoff happens, the returned value is a bound rather than the exact value, but it is
/// always on the correct side of the window.
pub fn alpha_beta<G: GameAdapter>(
    adapter: &G,
    state: &G::State,
    side: Side,
    mut alpha: f64,
    mut beta: f64,
    stats: &mut MinimaxStats,
) -> Result<(f64, Option<G::Move>), SearchError> {
    stats.nodes += 1;
    let moves = adapter.legal_moves(state, side);
    if moves.is_empty() {
        return Ok((terminal_utility(adapter, state)?, None));
    }

    let mut best_value = match side {
        Side::First => f64::NEG_INFINITY,
        Side::Second => f64::INFINITY,
    };
    let mut best_move = None;

    for mv in moves {
        let child = adapter.apply_move(state, side, &mv);
        let (value, _) = alpha_beta(adapter, &child, !side, alpha, beta, stats)?;
        match side {
            Side::First => {
                if value > best_value || best_move.is_none() {
                    best_value = value;
                    best_move = Some(mv);
                }
                if best_value >= beta {
                    stats.cutoffs += 1;
                    break;
                }
                alpha = alpha.max(best_value);
            }
            Side::Second => {
                if value < best_value || best_move.is_none() {
                    best_value = value;
                    best_move = Some(mv);
                }
                if best_value <= alpha {
                    stats.cutoffs += 1;
                    break;
                }
                beta = beta.min(best_value);
            }
        }
    }
    Ok((best_value, best_move))
}

/// Plain minimax without pruning. Visits every node of the game tree, and agrees with
/// [`minimax`] on both value and move.
pub fn minimax_unpruned<G: GameAdapter>(
    adapter: &G,
    state: &G::State,
    side: Side,
) -> Result<(f64, Option<G::Move>), SearchError> {
    let moves = adapter.legal_moves(state, side);
    if moves.is_empty() {
        return Ok((terminal_utility(adapter, state)?, None));
    }
    let mut best_value = match side {
        Side::First => f64::NEG_INFINITY,
        Side::Second => f64::INFINITY,
    };
    let mut best_move = None;
    for mv in moves {
        let child = adapter.apply_move(state, side, &mv);
        let (value, _) = minimax_unpruned(adapter, &child, !side)?;
        let improves = match side {
            Side::First => value > best_value,
            Side::Second => value < best_value,
        };
        if improves || best_move.is_none() {
            best_value = value;
            best_move = Some(mv);
        }
    }
    Ok((best_value, best_move))
}

pub(crate) fn terminal_utility<G: GameAdapter>(
    adapter: &G,
    state: &G::State,
) -> Result<f64, SearchError> {
    let utility = adapter.utility(state);
    if utility.is_finite() {
        Ok(utility)
    } else {
        Err(SearchError::AdapterContractViolation(format!(
            "utility {} of terminal state {:?} is not finite",
            utility, state
        )))
    }
}
