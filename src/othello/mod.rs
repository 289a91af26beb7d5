//! Othello (Reversi) rules, as used by the game manager the `player` binary talks to.
//!
//! Dark is [`Side::First`] and light is [`Side::Second`]. A side with no legal move is treated as
//! having reached a terminal position; passing is left to the game manager.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::game::{GameAdapter, Side};

mod parse;

pub use parse::BoardParseError;

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 16;

const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// A placement on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub row: usize,
    pub column: usize,
}

impl Move {
    pub fn new(row: usize, column: usize) -> Self {
        Move { row, column }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.column)
    }
}

/// A square Othello board. Cells are stored row by row.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    size: usize,
    cells: Vec<Option<Side>>,
}

impl Board {
    /// An empty board. Panics if `size` is outside `MIN_SIZE..=MAX_SIZE`.
    pub fn empty(size: usize) -> Self {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "Unsupported board size {}",
            size
        );
        Board {
            size,
            cells: vec![None; size * size],
        }
    }

    /// The standard opening with four discs in the centre. Requires an even size of at least 4.
    pub fn start_position(size: usize) -> Option<Self> {
        if size < 4 || size > MAX_SIZE || size % 2 != 0 {
            return None;
        }
        let mut board = Board::empty(size);
        let mid = size / 2;
        board.set(mid - 1, mid - 1, Some(Side::Second));
        board.set(mid, mid, Some(Side::Second));
        board.set(mid - 1, mid, Some(Side::First));
        board.set(mid, mid - 1, Some(Side::First));
        Some(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Side> {
        self.cells[row * self.size + column]
    }

    fn set(&mut self, row: usize, column: usize, value: Option<Side>) {
        self.cells[row * self.size + column] = value;
    }

    /// Disc counts for `(First, Second)`.
    pub fn score(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(first, second), cell| match cell {
                Some(Side::First) => (first + 1, second),
                Some(Side::Second) => (first, second + 1),
                None => (first, second),
            })
    }

    pub fn is_legal(&self, side: Side, mv: Move) -> bool {
        mv.row < self.size
            && mv.column < self.size
            && self.cell(mv.row, mv.column).is_none()
            && !self.flips(side, mv).is_empty()
    }

    /// Every opponent disc that `side` would flip by playing `mv`.
    fn flips(&self, side: Side, mv: Move) -> Vec<(usize, usize)> {
        let mut flipped = vec![];
        for (row_step, column_step) in DIRECTIONS {
            let mut line = vec![];
            let mut row = mv.row as isize + row_step;
            let mut column = mv.column as isize + column_step;
            while self.on_board(row, column) {
                match self.cell(row as usize, column as usize) {
                    None => break,
                    Some(owner) if owner == side => {
                        flipped.append(&mut line);
                        break;
                    }
                    Some(_) => line.push((row as usize, column as usize)),
                }
                row += row_step;
                column += column_step;
            }
        }
        flipped
    }

    fn on_board(&self, row: isize, column: isize) -> bool {
        row >= 0 && column >= 0 && (row as usize) < self.size && (column as usize) < self.size
    }

    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = vec![];
        for row in 0..self.size {
            for column in 0..self.size {
                let mv = Move::new(row, column);
                if self.cell(row, column).is_none() && !self.flips(side, mv).is_empty() {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// Returns the board after `side` plays `mv`. The disc is placed even if nothing flips.
    pub fn play(&self, side: Side, mv: Move) -> Board {
        let mut board = self.clone();
        for (row, column) in self.flips(side, mv) {
            board.set(row, column, Some(side));
        }
        board.set(mv.row, mv.column, Some(side));
        board
    }
}

/// Renders the board in the game manager's literal form, listed column by column.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for column in 0..self.size {
            if column > 0 {
                write!(f, ", ")?;
            }
            write!(f, "(")?;
            for row in 0..self.size {
                if row > 0 {
                    write!(f, ", ")?;
                }
                let value = self.cell(row, column).map_or(0, Side::protocol_id);
                write!(f, "{}", value)?;
            }
            write!(f, ")")?;
        }
        write!(f, ")")
    }
}

/// The Othello rules as a [`GameAdapter`]. Utility is dark's disc count minus light's.
#[derive(Clone, Copy, Default, Debug)]
pub struct Othello;

impl GameAdapter for Othello {
    type State = Board;
    type Move = Move;

    fn legal_moves(&self, state: &Board, side: Side) -> Vec<Move> {
        state.legal_moves(side)
    }

    fn apply_move(&self, state: &Board, side: Side, mv: &Move) -> Board {
        state.play(side, *mv)
    }

    fn utility(&self, state: &Board) -> f64 {
        let (first, second) = state.score();
        first as f64 - second as f64
    }
}
