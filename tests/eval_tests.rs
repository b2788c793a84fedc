use gambit::board::{Board, Position};
use gambit::search::WINDOW_MAX;
use gambit::search::eval::evaluate;
use std::str::FromStr;

#[test]
fn bare_kings_evaluate_to_zero() {
    let pos = Position::from_str("K7/8/8/8/8/8/8/k7 w").unwrap();
    assert_eq!(evaluate(&pos), 0);
    let pos = Position::from_str("K7/8/8/8/8/8/8/k7 b").unwrap();
    assert_eq!(evaluate(&pos), 0);
}

#[test]
fn a_missing_black_king_is_a_win_for_the_side_to_move() {
    let winning = Position::from_str("K7/8/8/8/8/8/8/q7 w").unwrap();
    assert!(evaluate(&winning) > 200_000);
    let losing = Position::from_str("K7/8/8/8/8/8/8/q7 b").unwrap();
    assert!(evaluate(&losing) < -200_000);
}

#[test]
fn a_missing_white_king_mirrors_the_sentinel() {
    let losing = Position::from_str("Q7/8/8/8/8/8/8/k7 w").unwrap();
    assert_eq!(evaluate(&losing), -WINDOW_MAX);
    let winning = Position::from_str("Q7/8/8/8/8/8/8/k7 b").unwrap();
    assert_eq!(evaluate(&winning), WINDOW_MAX);
}

#[test]
fn the_start_position_is_balanced() {
    assert_eq!(evaluate(&Position::start()), 0);
}

#[test]
fn evaluation_is_relative_to_the_side_to_move() {
    // Same layout, opposite movers: the scores must be exact negatives.
    let white = Position::from_str("QK6/8/8/8/8/8/8/kq6 w").unwrap();
    let black = Position::from_str("QK6/8/8/8/8/8/8/kq6 b").unwrap();
    assert_eq!(evaluate(&white), -evaluate(&black));
}

#[test]
fn extra_material_scores_positive_for_its_owner() {
    let pos = Position::from_str("QK6/8/8/8/8/8/8/k7 w").unwrap();
    assert!(evaluate(&pos) > 0, "a spare queen should be winning");
    let pos = Position::from_str("QK6/8/8/8/8/8/8/k7 b").unwrap();
    assert!(evaluate(&pos) < 0, "the bare side should be losing");
}

#[test]
fn evaluation_is_deterministic() {
    let mut board = Board::new();
    board.make_move_text("E2-E4").unwrap();
    let first = board.evaluate();
    assert_eq!(board.evaluate(), first);

    let reloaded = Position::from_str(&board.fen()).unwrap();
    assert_eq!(evaluate(&reloaded), first);
}

#[test]
fn the_facade_delegates_to_the_evaluator() {
    let mut board = Board::new();
    board.load_fen("K7/8/8/8/8/8/8/k7 w").unwrap();
    assert_eq!(board.evaluate(), 0);
}
