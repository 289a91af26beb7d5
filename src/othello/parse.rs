use std::str::FromStr;

use thiserror::Error;

use super::{Board, MAX_SIZE, MIN_SIZE};
use crate::game::Side;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("unbalanced brackets in board literal")]
    Unbalanced,
    #[error("board literal is nested too deeply")]
    TooDeep,
    #[error("unexpected character '{0}' in board literal")]
    UnexpectedCharacter(char),
    #[error("invalid cell value '{0}', expected 0, 1 or 2")]
    InvalidCell(String),
    #[error("unsupported board size {0}")]
    InvalidSize(usize),
    #[error("column {column} has {got} cells, expected {expected}")]
    RaggedColumn {
        column: usize,
        expected: usize,
        got: usize,
    },
}

fn push_cell(
    columns: &mut [Vec<Option<Side>>],
    digits: &mut String,
) -> Result<(), BoardParseError> {
    if digits.is_empty() {
        return Ok(());
    }
    let cell = match digits.as_str() {
        "0" => None,
        "1" => Some(Side::First),
        "2" => Some(Side::Second),
        _ => return Err(BoardParseError::InvalidCell(digits.clone())),
    };
    if let Some(column) = columns.last_mut() {
        column.push(cell);
    }
    digits.clear();
    Ok(())
}

/// Parses the game manager's board literal: a sequence of columns, each a sequence of cells,
/// written with either tuple or list brackets, e.g. `((0, 1), (2, 0))`.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut columns: Vec<Vec<Option<Side>>> = vec![];
        let mut digits = String::new();
        let mut depth = 0;
        let mut closed = false;

        for ch in input.trim().chars() {
            if closed && !ch.is_whitespace() {
                return Err(BoardParseError::UnexpectedCharacter(ch));
            }
            match ch {
                '(' | '[' => {
                    depth += 1;
                    match depth {
                        1 => (),
                        2 => columns.push(vec![]),
                        _ => return Err(BoardParseError::TooDeep),
                    }
                }
                ')' | ']' => {
                    match depth {
                        0 => return Err(BoardParseError::Unbalanced),
                        1 => closed = true,
                        _ => push_cell(&mut columns, &mut digits)?,
                    }
                    depth -= 1;
                }
                '0'..='9' if depth == 2 => digits.push(ch),
                ',' => push_cell(&mut columns, &mut digits)?,
                c if c.is_whitespace() => push_cell(&mut columns, &mut digits)?,
                c => return Err(BoardParseError::UnexpectedCharacter(c)),
            }
        }
        if depth != 0 || !closed {
            return Err(BoardParseError::Unbalanced);
        }

        let size = columns.len();
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(BoardParseError::InvalidSize(size));
        }
        let mut board = Board::empty(size);
        for (column, cells) in columns.iter().enumerate() {
            if cells.len() != size {
                return Err(BoardParseError::RaggedColumn {
                    column,
                    expected: size,
                    got: cells.len(),
                });
            }
            for (row, cell) in cells.iter().enumerate() {
                board.set(row, column, *cell);
            }
        }
        Ok(board)
    }
}
