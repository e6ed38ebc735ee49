use std::fmt;

/// Side identifier. White is the first player and starts on ranks 1-2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Index into per-color arrays (bitboards, Zobrist keys).
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Side digit used by the board string: `0` for white, `1` for black.
    pub fn digit(&self) -> char {
        match self {
            Self::White => '0',
            Self::Black => '1',
        }
    }

    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::White),
            '1' => Some(Self::Black),
            _ => None,
        }
    }

    /// Board-string character for a piece of this color.
    pub fn symbol(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "White"),
            Self::Black => write!(f, "Black"),
        }
    }
}
