#[cfg(test)]
mod arena_tests;
#[cfg(test)]
mod board_tests;

#[cfg(test)]
use crate::game::{GameAdapter, Side};
#[cfg(test)]
use crate::othello::Board;
#[cfg(test)]
use rand::Rng;

/// An explicit game tree. States are node ids and moves are indices into a node's children.
/// Sides only matter to the engines; the tree itself looks the same for both.
#[cfg(test)]
#[derive(Clone, Debug)]
pub(crate) struct TreeGame {
    children: Vec<Vec<usize>>,
    utilities: Vec<f64>,
}

#[cfg(test)]
impl TreeGame {
    pub const ROOT: usize = 0;

    pub fn new() -> Self {
        TreeGame {
            children: vec![vec![]],
            utilities: vec![0.0],
        }
    }

    /// Adds a new node below `parent` and returns its id.
    pub fn add(&mut self, parent: usize, utility: f64) -> usize {
        let id = self.children.len();
        self.children.push(vec![]);
        self.utilities.push(utility);
        self.children[parent].push(id);
        id
    }

    /// Adds an edge to an existing node, so that two moves lead to the same state.
    pub fn link(&mut self, parent: usize, child: usize) {
        self.children[parent].push(child);
    }

    /// A root with one leaf per utility.
    pub fn one_ply(utilities: &[f64]) -> Self {
        let mut game = TreeGame::new();
        for utility in utilities {
            game.add(Self::ROOT, *utility);
        }
        game
    }

    /// A root with one inner node per group, each with one leaf per utility.
    pub fn two_ply(groups: &[&[f64]]) -> Self {
        let mut game = TreeGame::new();
        for group in groups {
            let node = game.add(Self::ROOT, 0.0);
            for utility in group.iter() {
                game.add(node, *utility);
            }
        }
        game
    }

    /// A random tree with small integer utilities, so that ties are common.
    pub fn random<R: Rng>(rng: &mut R, max_depth: u32, max_branching: usize) -> Self {
        fn grow<R: Rng>(
            game: &mut TreeGame,
            rng: &mut R,
            node: usize,
            depth: u32,
            max_branching: usize,
        ) {
            if depth == 0 {
                return;
            }
            for _ in 0..rng.gen_range(1..=max_branching) {
                let utility = rng.gen_range(-3..=3) as f64;
                let child = game.add(node, utility);
                // Leaves appear at every depth
                if rng.gen_bool(0.7) {
                    grow(game, rng, child, depth - 1, max_branching);
                }
            }
        }
        let mut game = TreeGame::new();
        grow(&mut game, rng, Self::ROOT, max_depth, max_branching);
        game
    }
}

#[cfg(test)]
impl GameAdapter for TreeGame {
    type State = usize;
    type Move = usize;

    fn legal_moves(&self, state: &usize, _side: Side) -> Vec<usize> {
        (0..self.children[*state].len()).collect()
    }

    fn apply_move(&self, state: &usize, _side: Side, mv: &usize) -> usize {
        self.children[*state][*mv]
    }

    fn utility(&self, state: &usize) -> f64 {
        self.utilities[*state]
    }
}

/// Single-pile Nim: take one to three stones, whoever takes the last stone wins.
/// The state is the pile size and the side to move.
#[cfg(test)]
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Nim;

#[cfg(test)]
impl GameAdapter for Nim {
    type State = (u32, Side);
    type Move = u32;

    fn legal_moves(&self, state: &(u32, Side), _side: Side) -> Vec<u32> {
        (1..=state.0.min(3)).collect()
    }

    fn apply_move(&self, state: &(u32, Side), side: Side, mv: &u32) -> (u32, Side) {
        (state.0 - mv, !side)
    }

    fn utility(&self, state: &(u32, Side)) -> f64 {
        // The side to move on an empty pile has lost
        match state.1 {
            Side::First => -1.0,
            Side::Second => 1.0,
        }
    }
}

/// Builds a board from rows of `.` (empty), `X` (first) and `O` (second),
/// by writing the game manager's column-by-column literal.
#[cfg(test)]
pub(crate) fn board_from_rows(rows: &[&str]) -> Board {
    let size = rows.len();
    let columns: Vec<String> = (0..size)
        .map(|column| {
            let cells: Vec<&str> = rows
                .iter()
                .map(|row| match row.as_bytes()[column] {
                    b'.' => "0",
                    b'X' => "1",
                    b'O' => "2",
                    c => panic!("Unknown cell {}", c as char),
                })
                .collect();
            format!("({})", cells.join(", "))
        })
        .collect();
    format!("({})", columns.join(", ")).parse().unwrap()
}

/// An 8x8 board with only the top-left corner empty. Both sides can play there, and only there.
#[cfg(test)]
pub(crate) fn one_empty_cell_board() -> Board {
    board_from_rows(&[
        ".OXXXXXX",
        "XXXXXXXX",
        "OXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
        "XXXXXXXX",
    ])
}
