//! Pseudo-legal move generation, one visitor call per candidate move.
//!
//! The visitor returns `true` to keep receiving moves; returning `false`
//! stops all further emission, which is how the alpha-beta search cuts off a
//! subtree mid-generation. Geometry and block/capture rules are respected,
//! but moves that leave the own king attacked are not filtered, and the king
//! itself is an ordinary capture target.
//!
//! Knight, king and slider emission includes friendly-occupied targets (the
//! evaluator counts those as defences); pawn diagonals emit only genuine
//! captures. The side-filtered collector in [`crate::moves::types`] strips
//! friendly targets before moves reach a user.

use crate::board::{Color, Piece, PieceKind, Position};
use crate::error::{EngineError, EngineResult};
use crate::square::{SQUARES, Square};
use crate::moves::types::Move;

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (-2, 1),
    (-2, -1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Outside,
    Empty,
    Capture,
    Friendly,
}

/// Classify `m.to` and snapshot its occupant into `m.pto` when on the board.
#[inline(always)]
fn probe(pos: &Position, us: Color, m: &mut Move) -> Target {
    if !m.to.is_inside() {
        return Target::Outside;
    }
    m.pto = pos.get(m.to);
    if m.pto.is_empty() {
        Target::Empty
    } else if m.pto.is_of_color(us) {
        Target::Friendly
    } else {
        Target::Capture
    }
}

/// Offer the current target to the visitor. Returns whether a sliding ray
/// may continue past it; a visitor refusal is recorded in `stop`.
#[inline(always)]
fn offer<F: FnMut(Move) -> bool>(
    pos: &Position,
    us: Color,
    m: &mut Move,
    visitor: &mut F,
    stop: &mut bool,
) -> bool {
    let target = probe(pos, us, m);
    if target == Target::Outside {
        return false;
    }
    if !visitor(*m) {
        *stop = true;
    }
    target == Target::Empty
}

fn slide<F: FnMut(Move) -> bool>(
    pos: &Position,
    us: Color,
    dirs: &[(i8, i8); 4],
    m: &mut Move,
    visitor: &mut F,
    stop: &mut bool,
) {
    for &(dx, dy) in dirs {
        m.to = m.from;
        loop {
            if *stop {
                return;
            }
            m.to = Square::new(m.to.x + dx, m.to.y + dy);
            if !offer(pos, us, m, visitor, stop) {
                break;
            }
        }
    }
}

fn jumps<F: FnMut(Move) -> bool>(
    pos: &Position,
    us: Color,
    offsets: &[(i8, i8); 8],
    m: &mut Move,
    visitor: &mut F,
    stop: &mut bool,
) -> bool {
    for &(dx, dy) in offsets {
        m.to = Square::new(m.from.x + dx, m.from.y + dy);
        offer(pos, us, m, visitor, stop);
        if *stop {
            return false;
        }
    }
    true
}

fn pawn<F: FnMut(Move) -> bool>(
    pos: &Position,
    us: Color,
    m: &mut Move,
    visitor: &mut F,
) -> bool {
    let dy: i8 = match us {
        Color::White => 1,
        Color::Black => -1,
    };
    // Diagonal captures, never friendly touches.
    m.to = Square::new(m.from.x - 1, m.from.y + dy);
    if probe(pos, us, m) == Target::Capture && !visitor(*m) {
        return false;
    }
    m.to = Square::new(m.from.x + 1, m.from.y + dy);
    if probe(pos, us, m) == Target::Capture && !visitor(*m) {
        return false;
    }
    // Single push, only onto an empty square.
    m.to = Square::new(m.from.x, m.from.y + dy);
    if probe(pos, us, m) != Target::Empty {
        return true;
    }
    if !visitor(*m) {
        return false;
    }
    // Double push from the starting rank, through the empty square above.
    let start_rank = match us {
        Color::White => 1,
        Color::Black => 6,
    };
    if m.from.y != start_rank {
        return true;
    }
    m.to = Square::new(m.from.x, m.from.y + 2 * dy);
    if probe(pos, us, m) != Target::Empty {
        return true;
    }
    visitor(*m)
}

/// Emit all moves of the piece on `from`, which must be occupied. Returns
/// `false` when the visitor asked to stop.
pub(crate) fn generate_from_occupied<F: FnMut(Move) -> bool>(
    pos: &Position,
    from: Square,
    visitor: &mut F,
) -> bool {
    let pfrom = pos.get(from);
    let Some((us, kind)) = pfrom.split() else {
        return true;
    };
    let mut m = Move {
        from,
        to: from,
        pfrom,
        pto: Piece::EMPTY,
    };
    let mut stop = false;
    match kind {
        PieceKind::Pawn => {
            if !pawn(pos, us, &mut m, visitor) {
                return false;
            }
        }
        PieceKind::Rook => {
            slide(pos, us, &ORTHOGONAL, &mut m, visitor, &mut stop);
            if stop {
                return false;
            }
        }
        PieceKind::Knight => {
            if !jumps(pos, us, &KNIGHT_JUMPS, &mut m, visitor, &mut stop) {
                return false;
            }
        }
        PieceKind::Bishop => {
            slide(pos, us, &DIAGONAL, &mut m, visitor, &mut stop);
            if stop {
                return false;
            }
        }
        PieceKind::Queen => {
            slide(pos, us, &DIAGONAL, &mut m, visitor, &mut stop);
            if stop {
                return false;
            }
            slide(pos, us, &ORTHOGONAL, &mut m, visitor, &mut stop);
            if stop {
                return false;
            }
        }
        PieceKind::King => {
            if !jumps(pos, us, &KING_STEPS, &mut m, visitor, &mut stop) {
                return false;
            }
        }
    }
    true
}

/// Emit the moves of the piece on `from` through the visitor. Returns
/// `Ok(false)` when the visitor stopped the run early, and
/// [`EngineError::InvalidGenerateTarget`] when the square is empty.
pub fn generate_from<F: FnMut(Move) -> bool>(
    pos: &Position,
    from: Square,
    visitor: &mut F,
) -> EngineResult<bool> {
    if pos.get(from).is_empty() {
        return Err(EngineError::InvalidGenerateTarget);
    }
    Ok(generate_from_occupied(pos, from, visitor))
}

/// Emit the moves of every piece on the board, both colors, in square index
/// order 0..63. Stops as soon as the visitor returns `false`.
pub fn generate<F: FnMut(Move) -> bool>(pos: &Position, visitor: &mut F) {
    for ix in 0..SQUARES {
        if pos.get_ix(ix).is_empty() {
            continue;
        }
        if !generate_from_occupied(pos, Square::from_index(ix), visitor) {
            return;
        }
    }
}
