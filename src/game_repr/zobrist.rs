use super::bitboards::pop_lsb;
use super::Color;
use once_cell::sync::OnceCell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed seed so hashes are identical across runs.
const ZOBRIST_SEED: u64 = 0x517c_c1b7_2722_0a95;

/// Zobrist hashing constants for Breakthrough positions
///
/// One random 64-bit number per (color, square) plus one for the side to
/// move. The hash of a position is the XOR of the keys of every occupied
/// square, XOR the side key when black is to move.
pub struct ZobristKeys {
    /// [color][square]
    pub pieces: [[u64; 64]; 2],
    /// Toggled when it's black's turn
    pub side_to_move: u64,
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

        let mut pieces = [[0u64; 64]; 2];
        for color in &mut pieces {
            for square in color {
                *square = rng.gen();
            }
        }

        Self {
            pieces,
            side_to_move: rng.gen(),
        }
    }

    /// Full recomputation from the bitboards.
    pub fn hash(&self, pieces: &[u64; 2], side_to_move: Color) -> u64 {
        let mut hash = 0u64;
        for (color, keys) in self.pieces.iter().enumerate() {
            let mut bb = pieces[color];
            while bb != 0 {
                hash ^= keys[pop_lsb(&mut bb) as usize];
            }
        }
        if side_to_move == Color::Black {
            hash ^= self.side_to_move;
        }
        hash
    }
}

static ZOBRIST: OnceCell<ZobristKeys> = OnceCell::new();

/// Build the key tables. Call once at startup; later calls are no-ops.
pub fn init() {
    ZOBRIST.get_or_init(ZobristKeys::generate);
}

/// Shared key tables, initialised on first use if `init` was never called.
#[inline]
pub fn keys() -> &'static ZobristKeys {
    ZOBRIST.get_or_init(ZobristKeys::generate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_deterministic() {
        let a = ZobristKeys::generate();
        let b = ZobristKeys::generate();
        assert_eq!(a.pieces, b.pieces);
        assert_eq!(a.side_to_move, b.side_to_move);
    }

    #[test]
    fn test_init_then_keys_shares_table() {
        init();
        let first = keys() as *const ZobristKeys;
        init();
        assert_eq!(first, keys() as *const ZobristKeys);
    }

    #[test]
    fn test_side_to_move_only_differs_by_side_key() {
        let k = keys();
        let pieces = [0xFFFF, 0xFFFF << 48];
        let white = k.hash(&pieces, Color::White);
        let black = k.hash(&pieces, Color::Black);
        assert_eq!(white ^ black, k.side_to_move);
    }

    #[test]
    fn test_empty_board_hash_is_zero_for_white() {
        assert_eq!(keys().hash(&[0, 0], Color::White), 0);
    }
}
