use gambit::board::{Board, Position};
use gambit::error::EngineError;
use gambit::square::Square;
use std::str::FromStr;

fn play(board: &mut Board, line: &str) {
    for text in line.split(',') {
        board
            .make_move_text(text.trim())
            .unwrap_or_else(|e| panic!("move {} failed: {}", text, e));
    }
}

#[test]
fn illegal_pawn_moves_from_the_start_are_rejected() {
    let mut board = Board::new();
    for text in ["A2-A5", "A2-A1", "A2-A2", "A2-B2", "A2-B3"] {
        assert_eq!(
            board.make_move_text(text),
            Err(EngineError::InvalidMove),
            "{} should be an invalid move",
            text
        );
    }
    // The failed attempts must not have touched the board.
    assert_eq!(board.current(), &Position::start());
}

#[test]
fn moving_the_opponents_piece_is_not_allowed() {
    let mut board = Board::new();
    assert_eq!(
        board.make_move_text("A7-A6"),
        Err(EngineError::WrongPlayersTurn)
    );
    assert_eq!(
        board.get_moves_from(Square::from_str("A7").unwrap()),
        Err(EngineError::WrongPlayersTurn)
    );
}

#[test]
fn listing_moves_of_an_empty_square_fails() {
    let board = Board::new();
    assert_eq!(
        board.get_moves_from(Square::from_str("A5").unwrap()),
        Err(EngineError::NoPieceHere)
    );
}

#[test]
fn off_board_squares_are_rejected() {
    let mut board = Board::new();
    assert_eq!(
        board.get_moves_from(Square::new(8, 0)),
        Err(EngineError::InvalidPosition)
    );
    assert_eq!(
        board.make_move_text("J2-J4"),
        Err(EngineError::InvalidPosition)
    );
    assert_eq!(
        board.make_move_text("A9-A8"),
        Err(EngineError::InvalidPosition)
    );
}

#[test]
fn malformed_move_text_is_rejected() {
    let mut board = Board::new();
    assert_eq!(
        board.make_move_text("A2"),
        Err(EngineError::InvalidPosition)
    );
}

#[test]
fn undo_restores_the_previous_snapshot_exactly() {
    let mut board = Board::new();
    play(&mut board, "E2-E4,E7-E5");
    let before = board.current().clone();
    let hash_before = board.hash();

    play(&mut board, "G1-F3");
    assert_ne!(board.hash(), hash_before);

    board.undo().unwrap();
    assert_eq!(board.current(), &before);
    assert_eq!(board.hash(), hash_before);
}

#[test]
fn undo_unwinds_to_the_start_and_then_fails() {
    let mut board = Board::new();
    play(&mut board, "D2-D4,D7-D5,C1-F4");
    board.undo().unwrap();
    board.undo().unwrap();
    board.undo().unwrap();
    assert_eq!(board.current(), &Position::start());
    assert_eq!(board.undo(), Err(EngineError::NoUndoAvailable));
}

#[test]
fn capture_by_text_works_with_any_separator() {
    let mut board = Board::new();
    play(&mut board, "A2-A4,B7-B5");
    // The writer would emit A4xB5; the reader accepts '-' too.
    board.make_move_text("A4-B5").unwrap();
    let b5 = board
        .current()
        .get(Square::from_str("B5").unwrap());
    assert!(b5.is_of_color(gambit::board::Color::White));
}

#[test]
fn a_loaded_fen_is_one_undo_step() {
    let mut board = Board::new();
    board.load_fen("K7/8/8/8/8/8/8/k7 w").unwrap();
    assert_eq!(board.fen(), "K7/8/8/8/8/8/8/k7 w");
    board.undo().unwrap();
    assert_eq!(board.current(), &Position::start());
}

#[test]
fn a_failed_fen_load_leaves_the_board_untouched() {
    let mut board = Board::new();
    let before = board.fen();
    assert!(board.load_fen("8/8 w").is_err());
    assert_eq!(board.fen(), before);
    assert_eq!(board.undo(), Err(EngineError::NoUndoAvailable));
}
