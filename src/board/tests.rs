use super::*;

#[test]
fn piece_packing_round_trips() {
    for color in [Color::White, Color::Black] {
        for kind in [
            PieceKind::Pawn,
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
        ] {
            let piece = Piece::new(color, kind);
            assert!(!piece.is_empty());
            assert_eq!(piece.split(), Some((color, kind)));
            assert!(piece.is_of_color(color));
            assert!(!piece.is_of_color(color.opposite()));
        }
    }
    assert!(Piece::EMPTY.is_empty());
    assert_eq!(Piece::EMPTY.split(), None);
    assert!(!Piece::EMPTY.is_of_color(Color::White));
    assert!(!Piece::EMPTY.is_of_color(Color::Black));
}

#[test]
fn piece_codes_are_distinct() {
    let mut seen = std::collections::HashSet::new();
    seen.insert(Piece::EMPTY.code());
    for color in [Color::White, Color::Black] {
        for kind in [
            PieceKind::Pawn,
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
        ] {
            assert!(seen.insert(Piece::new(color, kind).code()));
        }
    }
    assert_eq!(Piece::EMPTY.code(), 0);
}

#[test]
fn starting_layout_is_canonical() {
    let pos = Position::start();
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(
        pos.get(Square::new(0, 0)),
        Piece::new(Color::White, PieceKind::Rook)
    );
    assert_eq!(
        pos.get(Square::new(4, 0)),
        Piece::new(Color::White, PieceKind::King)
    );
    assert_eq!(
        pos.get(Square::new(3, 7)),
        Piece::new(Color::Black, PieceKind::Queen)
    );
    for x in 0..8 {
        assert_eq!(
            pos.get(Square::new(x, 1)),
            Piece::new(Color::White, PieceKind::Pawn)
        );
        assert_eq!(
            pos.get(Square::new(x, 6)),
            Piece::new(Color::Black, PieceKind::Pawn)
        );
        for y in 2..6 {
            assert!(pos.get(Square::new(x, y)).is_empty());
        }
    }
}

#[test]
fn apply_moves_piece_and_toggles_side() {
    let mut pos = Position::start();
    pos.apply(&Move::new(Square::new(4, 1), Square::new(4, 3)));
    assert!(pos.get(Square::new(4, 1)).is_empty());
    assert_eq!(
        pos.get(Square::new(4, 3)),
        Piece::new(Color::White, PieceKind::Pawn)
    );
    assert_eq!(pos.side_to_move(), Color::Black);
}

#[test]
fn position_equality_tracks_squares_and_side() {
    let a = Position::start();
    let mut b = Position::start();
    assert_eq!(a, b);
    b.set_side_to_move(Color::Black);
    assert_ne!(a, b);
    b.set_side_to_move(Color::White);
    b.set(Square::new(0, 3), Piece::new(Color::White, PieceKind::Pawn));
    assert_ne!(a, b);
}

#[test]
fn board_starts_with_no_undo() {
    let mut board = Board::new();
    assert_eq!(board.undo(), Err(EngineError::NoUndoAvailable));
}

#[test]
fn reset_discards_history() {
    let mut board = Board::new();
    board.make_move_text("D2-D4").unwrap();
    board.reset();
    assert_eq!(board.undo(), Err(EngineError::NoUndoAvailable));
    assert_eq!(board.current(), &Position::start());
}
