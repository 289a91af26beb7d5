use crate::game::{GameAdapter, Side};
use crate::othello::{Board, BoardParseError, Move, Othello};
use crate::tests::board_from_rows;

#[test]
fn start_position_moves_test() {
    let board = Board::start_position(8).unwrap();
    assert_eq!(board.score(), (2, 2));
    assert_eq!(
        board.legal_moves(Side::First),
        vec![
            Move::new(2, 3),
            Move::new(3, 2),
            Move::new(4, 5),
            Move::new(5, 4)
        ]
    );
    assert_eq!(
        board.legal_moves(Side::Second),
        vec![
            Move::new(2, 4),
            Move::new(3, 5),
            Move::new(4, 2),
            Move::new(5, 3)
        ]
    );
}

#[test]
fn play_flips_and_leaves_original_untouched_test() {
    let board = Board::start_position(8).unwrap();
    let next = Othello.apply_move(&board, Side::First, &Move::new(2, 3));

    assert_eq!(next.cell(2, 3), Some(Side::First));
    assert_eq!(next.cell(3, 3), Some(Side::First));
    assert_eq!(next.score(), (4, 1));
    assert_eq!(Othello.utility(&next), 3.0);

    assert_eq!(board, Board::start_position(8).unwrap());
    assert_eq!(board.cell(2, 3), None);
}

#[test]
fn flips_in_several_directions_test() {
    let board = board_from_rows(&[".OX.", "OO..", "X.X.", "...."]);
    assert!(board.is_legal(Side::First, Move::new(0, 0)));

    let next = board.play(Side::First, Move::new(0, 0));
    assert_eq!(next, board_from_rows(&["XXX.", "XX..", "X.X.", "...."]));
    assert_eq!(next.score(), (7, 0));
}

#[test]
fn illegal_moves_test() {
    let board = Board::start_position(8).unwrap();
    // Occupied, off the board, and flipping nothing
    assert!(!board.is_legal(Side::First, Move::new(3, 3)));
    assert!(!board.is_legal(Side::First, Move::new(8, 0)));
    assert!(!board.is_legal(Side::First, Move::new(0, 0)));

    let full = board_from_rows(&["XXXX", "XXXX", "XXXX", "XXXX"]);
    assert!(full.legal_moves(Side::First).is_empty());
    assert!(full.legal_moves(Side::Second).is_empty());
    assert_eq!(Othello.utility(&full), 16.0);
}

#[test]
fn start_position_sizes_test() {
    assert!(Board::start_position(4).is_some());
    assert!(Board::start_position(16).is_some());
    assert!(Board::start_position(2).is_none());
    assert!(Board::start_position(7).is_none());
    assert!(Board::start_position(18).is_none());
}

#[test]
fn display_lists_columns_test() {
    let board = Board::start_position(4).unwrap();
    assert_eq!(
        board.to_string(),
        "((0, 0, 0, 0), (0, 2, 1, 0), (0, 1, 2, 0), (0, 0, 0, 0))"
    );
    assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
}

#[test]
fn parse_is_column_major_test() {
    let board: Board = "((0,1),(2,0))".parse().unwrap();
    assert_eq!(board.size(), 2);
    assert_eq!(board.cell(0, 0), None);
    assert_eq!(board.cell(1, 0), Some(Side::First));
    assert_eq!(board.cell(0, 1), Some(Side::Second));
    assert_eq!(board.cell(1, 1), None);
}

#[test]
fn parse_accepts_list_brackets_and_whitespace_test() {
    let tuple: Board = "((0, 1), (2, 0))".parse().unwrap();
    let list: Board = "  [[0 1] [2 0]]\n".parse().unwrap();
    assert_eq!(tuple, list);
}

#[test]
fn parse_errors_test() {
    assert_eq!(
        "((0,0),(0))".parse::<Board>(),
        Err(BoardParseError::RaggedColumn {
            column: 1,
            expected: 2,
            got: 1
        })
    );
    assert_eq!(
        "((0,3),(0,0))".parse::<Board>(),
        Err(BoardParseError::InvalidCell("3".to_string()))
    );
    assert_eq!(
        "((0,0),(0,0)".parse::<Board>(),
        Err(BoardParseError::Unbalanced)
    );
    assert_eq!(
        ")((0,0),(0,0))".parse::<Board>(),
        Err(BoardParseError::Unbalanced)
    );
    assert_eq!(
        "(((0)))".parse::<Board>(),
        Err(BoardParseError::TooDeep)
    );
    assert_eq!("((1))".parse::<Board>(), Err(BoardParseError::InvalidSize(1)));
    assert_eq!("()".parse::<Board>(), Err(BoardParseError::InvalidSize(0)));
    assert_eq!(
        "((0,a),(0,0))".parse::<Board>(),
        Err(BoardParseError::UnexpectedCharacter('a'))
    );
    assert_eq!(
        "((0,0),(0,0)) x".parse::<Board>(),
        Err(BoardParseError::UnexpectedCharacter('x'))
    );
}

#[test]
fn move_display_test() {
    assert_eq!(Move::new(2, 3).to_string(), "2 3");
}
