//! The line-based protocol spoken with the Othello game manager.
//!
//! The player first prints its name and reads its side (`1` for dark, `2` for light). After that,
//! the manager repeatedly sends a status line, `SCORE <dark> <light>` or `FINAL <dark> <light>`.
//! Each `SCORE` line is followed by a board literal, answered with `<row> <column>`, or a blank
//! line if there is no legal move. `FINAL` is answered with a blank line and ends the game.

use std::io::{self, BufRead, Write};

use log::{debug, info};
use thiserror::Error;

use crate::error::SearchError;
use crate::game::Side;
use crate::othello::{Board, BoardParseError, Othello};
use crate::selector::MoveSelector;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid side \"{0}\", expected 1 or 2")]
    InvalidSide(String),
    #[error("malformed status line \"{0}\"")]
    MalformedStatus(String),
    #[error("input ended while waiting for {0}")]
    UnexpectedEof(&'static str),
    #[error("invalid board: {0}")]
    Board(#[from] BoardParseError),
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Status {
    Score,
    Final,
}

fn parse_status(line: &str) -> Result<(Status, u32, u32), DriverError> {
    let malformed = || DriverError::MalformedStatus(line.to_string());
    let words: Vec<&str> = line.split_whitespace().collect();
    let [status, dark, light] = words.as_slice() else {
        return Err(malformed());
    };
    let status = match *status {
        "SCORE" => Status::Score,
        "FINAL" => Status::Final,
        _ => return Err(malformed()),
    };
    let dark = dark.parse().map_err(|_| malformed())?;
    let light = light.parse().map_err(|_| malformed())?;
    Ok((status, dark, light))
}

/// Reads one line, without its line ending. Returns `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}

/// Plays one game against the game manager, answering every position with `selector`'s move.
pub fn run<R: BufRead, W: Write>(
    selector: &mut MoveSelector<Othello>,
    mut input: R,
    mut output: W,
) -> Result<(), DriverError> {
    writeln!(output, "{}", selector.strategy().name())?;
    output.flush()?;

    let side_line = read_line(&mut input)?.ok_or(DriverError::UnexpectedEof("the side"))?;
    let side = side_line
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Side::from_protocol_id)
        .ok_or_else(|| DriverError::InvalidSide(side_line.clone()))?;
    info!("Playing as the {} side", side);

    loop {
        let Some(status_line) = read_line(&mut input)? else {
            info!("Input closed before the game ended");
            return Ok(());
        };
        if status_line.trim().is_empty() {
            continue;
        }
        let (status, dark, light) = parse_status(&status_line)?;
        if status == Status::Final {
            info!("Game over, final score {} - {}", dark, light);
            writeln!(output)?;
            output.flush()?;
            return Ok(());
        }

        let board_line = read_line(&mut input)?.ok_or(DriverError::UnexpectedEof("a board"))?;
        let board = board_line.parse::<Board>()?;
        let mv = selector.select_move(&board, side)?;
        debug!("Score {} - {}, playing {:?}", dark, light, mv);
        match mv {
            Some(mv) => writeln!(output, "{}", mv)?,
            None => writeln!(output)?,
        }
        output.flush()?;
    }
}
