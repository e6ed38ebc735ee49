//! Bitboard helpers for the 8x8 board.
//!
//! Squares are numbered `rank * 8 + file`, so a1 = 0, h1 = 7 and h8 = 63.
//! White advances by shifting left, black by shifting right.

use super::Color;

// Square-by-square reference tables for the shift-based generator's tests
#[cfg(test)]
pub(crate) mod tables;

pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_H: u64 = FILE_A << 7;
pub const RANK_1: u64 = 0xFF;
pub const RANK_2: u64 = RANK_1 << 8;
pub const RANK_7: u64 = RANK_1 << 48;
pub const RANK_8: u64 = RANK_1 << 56;

/// Rank a piece of `color` must reach to break through.
#[inline]
pub const fn goal_rank(color: Color) -> u64 {
    match color {
        Color::White => RANK_8,
        Color::Black => RANK_1,
    }
}

#[inline]
pub const fn square_bit(sq: u8) -> u64 {
    1u64 << sq
}

/// Pop the least significant bit and return its square index.
#[inline]
pub fn pop_lsb(bb: &mut u64) -> u8 {
    let sq = bb.trailing_zeros() as u8;
    *bb &= *bb - 1;
    sq
}

/// Square name in file-letter, rank-digit form ("a1" .. "h8").
pub fn square_name(sq: u8) -> String {
    let file = (b'a' + sq % 8) as char;
    let rank = (b'1' + sq / 8) as char;
    format!("{}{}", file, rank)
}

/// Parse a two character square name. Accepts upper-case files as well.
pub fn parse_square(name: &str) -> Option<u8> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some((rank - b'1') * 8 + (file - b'a'))
}

#[cfg(test)]
mod tests {
    use super::tables::FORWARD_DIAGONALS;
    use super::*;

    #[test]
    fn test_square_names() {
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(7), "h1");
        assert_eq!(square_name(63), "h8");
        assert_eq!(parse_square("e4"), Some(28));
        assert_eq!(parse_square("E4"), Some(28));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a"), None);
    }

    #[test]
    fn test_forward_diagonals_at_edges() {
        // a2 (8) can only reach b3 (17) for white
        assert_eq!(FORWARD_DIAGONALS[0][8], square_bit(17));
        // h7 (55) can only reach g6 (46) for black
        assert_eq!(FORWARD_DIAGONALS[1][55], square_bit(46));
        // Nothing ahead on the last rank
        assert_eq!(FORWARD_DIAGONALS[0][60], 0);
        assert_eq!(FORWARD_DIAGONALS[1][3], 0);
    }

    #[test]
    fn test_pop_lsb() {
        let mut bb = square_bit(3) | square_bit(40);
        assert_eq!(pop_lsb(&mut bb), 3);
        assert_eq!(pop_lsb(&mut bb), 40);
        assert_eq!(bb, 0);
    }
}
