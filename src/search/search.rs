//! Iterative-deepening negamax with alpha-beta pruning.
//!
//! Each deepening iteration searches every root candidate with a fresh
//! transposition table, then re-sorts the candidates by score so the next
//! iteration examines the most promising line first.

use crate::board::Position;
use crate::error::{EngineError, EngineResult};
use crate::moves::movegen::generate_from_occupied;
use crate::moves::types::{Move, MoveScore};
use crate::search::WINDOW_MAX;
use crate::search::eval::evaluate;
use crate::search::tt::{EntryState, TranspositionTable};
use crate::square::{SQUARES, Square};
use crate::status::{EndState, end_state};
use tracing::{debug, instrument};

/// Search the current position at depths `0..=max_depth`, reporting the best
/// move after each iteration through `on_progress(move, depth, score)`.
///
/// Returns the root candidates in the final iteration's order, best first.
/// Fails with [`EngineError::NoMovesPossible`] when the side to move has no
/// candidate moves at all.
#[instrument(level = "debug", skip(pos, on_progress))]
pub fn think(
    pos: &Position,
    max_depth: u32,
    mut on_progress: impl FnMut(&Move, u32, i32),
) -> EngineResult<Vec<MoveScore>> {
    let turn = pos.side_to_move();
    let mut candidates: Vec<MoveScore> = Vec::new();
    for ix in 0..SQUARES {
        if !pos.get_ix(ix).is_of_color(turn) {
            continue;
        }
        let mut collect = |m: Move| {
            if !m.pto.is_of_color(turn) {
                candidates.push(MoveScore::new(m, 0));
            }
            true
        };
        generate_from_occupied(pos, Square::from_index(ix), &mut collect);
    }
    if candidates.is_empty() {
        return Err(EngineError::NoMovesPossible);
    }

    for depth in 0..=max_depth {
        let mut a = -WINDOW_MAX;
        let b = WINDOW_MAX;
        let mut table = TranspositionTable::new();
        for candidate in &mut candidates {
            let mut child = pos.clone();
            child.apply(&candidate.mv);
            let score = -negamax(&mut table, &child, depth as i32, -b, -a);
            // A score that merely ties the incumbent best is usually an
            // alpha-beta fail-low bound, not a genuine equal line; doubling
            // and docking one point sorts such moves below the real best.
            let ties_alpha = score == a;
            if score > a {
                a = score;
            }
            candidate.score = score * 2 - i32::from(ties_alpha);
        }
        candidates.sort_by(|l, r| r.score.cmp(&l.score));
        let best = candidates[0];
        debug!(depth, score = best.score, best = %best.mv, "deepening iteration done");
        on_progress(&best.mv, depth, best.score);
    }
    Ok(candidates)
}

/// Negamax over pseudo-legal moves with an in-iteration score cache.
///
/// Cached entries go through `NotSet -> Finding -> Found`; a `Finding` hit
/// means the same position is already on the current search path and the
/// move is skipped. A result that only equals alpha is a fail-low bound, so
/// the entry is reset to `NotSet` rather than kept.
fn negamax(
    table: &mut TranspositionTable,
    pos: &Position,
    depth: i32,
    mut a: i32,
    b: i32,
) -> i32 {
    if depth <= 0 || end_state(pos) != EndState::InPlay {
        return evaluate(pos);
    }
    let turn = pos.side_to_move();
    let mut visitor = |m: Move| -> bool {
        let mut child = pos.clone();
        child.apply(&m);
        let handle = table.find_or_insert(&child);
        let new_score = match table.state(handle) {
            EntryState::Finding => return true,
            EntryState::Found => table.score(handle),
            EntryState::NotSet => {
                table.set_state(handle, EntryState::Finding);
                let score = -negamax(table, &child, depth - 1, -b, -a);
                // The bucket may have grown during recursion; the handle
                // indexes the entry rather than pointing at it, so the
                // stores below land on the right slot regardless.
                table.set_score(handle, score);
                table.set_state(
                    handle,
                    if score == a {
                        EntryState::NotSet
                    } else {
                        EntryState::Found
                    },
                );
                score
            }
        };
        if new_score > a {
            a = new_score;
        }
        a < b
    };
    for ix in 0..SQUARES {
        if !pos.get_ix(ix).is_of_color(turn) {
            continue;
        }
        if !generate_from_occupied(pos, Square::from_index(ix), &mut visitor) {
            break;
        }
    }
    a
}
