use crate::board::{Color, PieceKind, Position};
use crate::moves::movegen::generate_from_occupied;
use crate::moves::types::Move;
use crate::search::WINDOW_MAX;
use crate::square::{SQUARES, Square};
use crate::status::{EndState, end_state};

/// Plain material scale. The king's value only matters as "irreplaceable";
/// attack terms use [`KING_ATTACK_VALUE`] instead.
pub fn material_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 6,
        PieceKind::Queen => 10,
        PieceKind::King => 2_000_000,
    }
}

/// What attacking the enemy king is worth in the per-piece activity term.
const KING_ATTACK_VALUE: i32 = 2000;

/// Static evaluation relative to the side to move.
///
/// Terminal positions short-circuit: a missing king is `±WINDOW_MAX`
/// depending on whose king is gone and who is to move, and bare kings score
/// zero. Otherwise each piece contributes three times its material value
/// plus one point per reachable square, a bonus for defending pieces worth
/// about four, and the value surplus of every attack; pieces of the side not
/// to move contribute negatively.
pub fn evaluate(pos: &Position) -> i32 {
    let turn = pos.side_to_move();
    match end_state(pos) {
        EndState::NoWhiteKing => {
            return if turn == Color::White {
                -WINDOW_MAX
            } else {
                WINDOW_MAX
            };
        }
        EndState::NoBlackKing => {
            return if turn == Color::Black {
                -WINDOW_MAX
            } else {
                WINDOW_MAX
            };
        }
        EndState::BareKings => return 0,
        EndState::InPlay => {}
    }

    let mut total = 0i32;
    for ix in 0..SQUARES {
        let piece = pos.get_ix(ix);
        let Some((color, kind)) = piece.split() else {
            continue;
        };
        let own_value = material_value(kind);
        // Holding a piece outweighs merely being able to capture one.
        let mut val = own_value * 3;
        let mut visitor = |m: Move| -> bool {
            let target_is_king = m.pto.kind() == Some(PieceKind::King);
            let defensive = m.pto.is_of_color(color);
            if defensive && target_is_king {
                // Shielding the own king this way is worthless.
                return true;
            }
            val += 1;
            let Some(target_kind) = m.pto.kind() else {
                return true;
            };
            if defensive {
                // Defending pieces worth about four matters most.
                val += (3 - (material_value(target_kind) - 4).abs()).max(0);
            } else {
                let target_value = if target_is_king {
                    KING_ATTACK_VALUE
                } else {
                    material_value(target_kind)
                };
                val += (target_value - own_value).max(0);
            }
            true
        };
        generate_from_occupied(pos, Square::from_index(ix), &mut visitor);
        if !piece.is_of_color(turn) {
            val = -val;
        }
        total += val;
    }
    total
}
