use crate::square::SQUARES;
use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// One slot per piece code: 0 = empty, otherwise `2 * kind + color` with
/// kinds 1 (pawn) through 6 (king) and color 0 (white) / 1 (black).
pub const PIECE_CODES: usize = 14;

/// Fixed seed so hashes are reproducible across runs and processes.
const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct ZobristKeys {
    /// `[square][piece_code]`; the empty code carries a key too, so an empty
    /// board hashes to a nonzero fingerprint.
    pub piece: [[u64; PIECE_CODES]; SQUARES],
    /// XOR-ed in whenever Black is to move.
    pub side_to_move: u64,
}

/// Global keys, initialized on first use and read-only afterwards.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| generate_keys(StdRng::seed_from_u64(ZOBRIST_SEED)))
}

fn generate_keys(mut rng: StdRng) -> ZobristKeys {
    #[inline]
    fn non_zero(r: &mut StdRng) -> u64 {
        // avoid zero keys to reduce degenerate collisions
        let mut v = r.next_u64();
        while v == 0 {
            v = r.next_u64();
        }
        v
    }

    let mut keys = ZobristKeys {
        piece: [[0u64; PIECE_CODES]; SQUARES],
        side_to_move: 0,
    };

    for sq in 0..SQUARES {
        for code in 0..PIECE_CODES {
            keys.piece[sq][code] = non_zero(&mut rng);
        }
    }
    keys.side_to_move = non_zero(&mut rng);

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_stable_across_calls() {
        let a = zobrist_keys();
        let b = zobrist_keys();
        assert_eq!(a.piece[0][0], b.piece[0][0]);
        assert_eq!(a.side_to_move, b.side_to_move);
    }

    #[test]
    fn keys_are_nonzero_and_distinct_enough() {
        let keys = zobrist_keys();
        assert_ne!(keys.side_to_move, 0);
        assert_ne!(keys.piece[0][1], keys.piece[0][2]);
        assert_ne!(keys.piece[0][1], keys.piece[1][1]);
    }
}
