use super::bitboards::{parse_square, square_name};
use super::MoveParseError;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/*-------ARCHITECTURE--------*/

// | 6 bits | 6 bits | 1 bit   |
// |   To   |  From  | Capture |
// |        13 bits            |

const CAPTURE_MASK: u16 = 0x1;
const FROM_SHIFT: u16 = 1;
const TO_SHIFT: u16 = 7;
const SQUARE_MASK: u16 = 0x3F;
const ENCODED_BITS: u16 = 13;

/// Legal moves of one position. Breakthrough never has more than 48.
pub type MoveList = SmallVec<[Move; 64]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    buf: u16,
}

impl Move {
    pub fn new(from: u8, to: u8, capture: bool) -> Move {
        debug_assert!(from < 64 && to < 64);
        let mut buf = capture as u16;
        buf |= (from as u16) << FROM_SHIFT;
        buf |= (to as u16) << TO_SHIFT;

        Self { buf }
    }

    pub fn _from(&self) -> usize {
        ((self.buf >> FROM_SHIFT) & SQUARE_MASK) as usize
    }

    pub fn _to(&self) -> usize {
        ((self.buf >> TO_SHIFT) & SQUARE_MASK) as usize
    }

    pub fn is_capture(&self) -> bool {
        self.buf & CAPTURE_MASK != 0
    }

    /// Packed `capture | from << 1 | to << 7` value.
    pub fn raw(&self) -> u16 {
        self.buf
    }

    /// Rebuild a move from its packed value, rejecting stray high bits.
    pub fn from_raw(raw: u16) -> Option<Move> {
        (raw >> ENCODED_BITS == 0).then_some(Self { buf: raw })
    }

    pub fn coords(&self) -> MoveCoords {
        MoveCoords::from(*self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(
            f,
            "{}{}{}",
            square_name(self._from() as u8),
            sep,
            square_name(self._to() as u8)
        )
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 5 || !s.is_ascii() {
            return Err(MoveParseError::Malformed(s.to_string()));
        }
        let capture = match &s[2..3] {
            "-" => false,
            "x" | "X" => true,
            _ => return Err(MoveParseError::Malformed(s.to_string())),
        };
        let from = parse_square(&s[0..2]).ok_or_else(|| MoveParseError::BadSquare(s[0..2].to_string()))?;
        let to = parse_square(&s[3..5]).ok_or_else(|| MoveParseError::BadSquare(s[3..5].to_string()))?;

        Ok(Move::new(from, to, capture))
    }
}

/// Column/row form of a move, as used by the square-array board layout.
/// Columns and rows are zero based; row 0 is rank 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCoords {
    pub from_col: u8,
    pub from_row: u8,
    pub to_col: u8,
    pub to_row: u8,
    pub capture: bool,
}

impl From<Move> for MoveCoords {
    fn from(mv: Move) -> Self {
        let (from, to) = (mv._from() as u8, mv._to() as u8);
        Self {
            from_col: from % 8,
            from_row: from / 8,
            to_col: to % 8,
            to_row: to / 8,
            capture: mv.is_capture(),
        }
    }
}

impl From<MoveCoords> for Move {
    fn from(c: MoveCoords) -> Self {
        Move::new(c.from_row * 8 + c.from_col, c.to_row * 8 + c.to_col, c.capture)
    }
}
