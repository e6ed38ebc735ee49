use super::bitboards::{goal_rank, pop_lsb, square_bit, FILE_A, FILE_H, RANK_1, RANK_2, RANK_7, RANK_8};
use super::zobrist;
use super::{Color, GameState, Move, MoveList, Outcome, SetupError, LOSS_VALUE, WIN_VALUE};
use std::fmt;

/// Board string of the initial layout, white to move.
pub const START_BOARD: &str = "bbbbbbbbbbbbbbbb................................wwwwwwwwwwwwwwww 0";

/// Bitboard Breakthrough position.
///
/// `pieces[Color::index()]` holds one bit per occupied square. `result` is
/// relative to `side_to_move` and only ever becomes `Loss`: a move either
/// eliminates the opponent or reaches the goal rank, and in both cases the
/// side now to move has lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pieces: [u64; 2],
    side_to_move: Color,
    result: Outcome,
    key: u64,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Initial layout: two full back rows per side, white to move.
    pub fn new() -> Self {
        let pieces = [RANK_1 | RANK_2, RANK_7 | RANK_8];
        Self {
            pieces,
            side_to_move: Color::White,
            result: Outcome::Unknown,
            key: zobrist::keys().hash(&pieces, Color::White),
        }
    }

    /// Build a position from a board string.
    pub fn from_board(board: &str) -> Result<Self, SetupError> {
        let mut pos = Self::new();
        pos.setup(board)?;
        Ok(pos)
    }

    pub fn pieces(&self, color: Color) -> u64 {
        self.pieces[color.index()]
    }

    pub fn piece_count(&self, color: Color) -> u32 {
        self.pieces[color.index()].count_ones()
    }

    pub fn piece_at(&self, sq: u8) -> Option<Color> {
        let bit = square_bit(sq);
        if self.pieces[0] & bit != 0 {
            Some(Color::White)
        } else if self.pieces[1] & bit != 0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Resolve move notation against the legal moves of this position.
    /// Returns `None` for unparsable text or a move that isn't legal here.
    pub fn legal_move_from_notation(&self, text: &str) -> Option<Move> {
        let wanted: Move = text.parse().ok()?;
        self.generate_moves(None).into_iter().find(|&mv| mv == wanted)
    }

    /// Perft (Performance Test) - counts leaf nodes at a given depth
    /// Terminal positions count as leaves. Used to validate move generation
    pub fn perft(&self, depth: u32) -> u64 {
        let mut pos = *self;
        pos.perft_inner(depth)
    }

    fn perft_inner(&mut self, depth: u32) -> u64 {
        if depth == 0 || self.is_terminal() {
            return 1;
        }

        let moves = self.generate_moves(None);

        // Bulk counting at the last ply
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.make(mv);
            nodes += self.perft_inner(depth - 1);
            self.retract(mv);
        }
        nodes
    }

    /// Human readable board with coordinates, rank 8 on top.
    pub fn diagram(&self) -> String {
        let mut out = format!("Side: {}\n  A B C D E F G H\n", self.side_to_move);
        for rank in (0..8u8).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..8u8 {
                let ch = self.piece_at(rank * 8 + file).map_or('.', |c| c.symbol());
                out.push(ch);
                out.push(' ');
            }
            out.push_str(&format!("{}\n", rank + 1));
        }
        out.push_str("  A B C D E F G H\n");
        out
    }

    fn generate(&self, captures_only: bool, hint: Option<Move>) -> MoveList {
        let us = self.pieces[self.side_to_move.index()];
        let them = self.pieces[self.side_to_move.opposite().index()];
        let empty = !(us | them);

        // (destination set, displacement from origin) per direction
        let (left, right, forward) = match self.side_to_move {
            Color::White => (
                ((us & !FILE_A) << 7, 7i8),
                ((us & !FILE_H) << 9, 9i8),
                ((us << 8) & empty, 8i8),
            ),
            Color::Black => (
                ((us & !FILE_A) >> 9, -9i8),
                ((us & !FILE_H) >> 7, -7i8),
                ((us >> 8) & empty, -8i8),
            ),
        };

        let mut moves = MoveList::new();
        push_moves(&mut moves, left.0 & them, left.1, true);
        push_moves(&mut moves, right.0 & them, right.1, true);
        if !captures_only {
            push_moves(&mut moves, forward.0, forward.1, false);
            push_moves(&mut moves, left.0 & empty, left.1, false);
            push_moves(&mut moves, right.0 & empty, right.1, false);
        }

        if let Some(hint) = hint {
            if let Some(idx) = moves.iter().position(|&mv| mv == hint) {
                if idx > 0 {
                    let mv = moves.remove(idx);
                    moves.insert(0, mv);
                }
            }
        }
        moves
    }
}

fn push_moves(moves: &mut MoveList, mut targets: u64, delta: i8, capture: bool) {
    while targets != 0 {
        let to = pop_lsb(&mut targets);
        let from = (to as i8 - delta) as u8;
        moves.push(Move::new(from, to, capture));
    }
}

fn parse_board(board: &str) -> Result<([u64; 2], Color), SetupError> {
    let board = board.trim();
    let (squares, rest) = match board.char_indices().nth(64) {
        Some((idx, _)) => board.split_at(idx),
        None => (board, ""),
    };

    let count = squares.chars().count();
    if count != 64 {
        return Err(SetupError::WrongLength(count));
    }

    let mut pieces = [0u64; 2];
    for (index, ch) in squares.chars().enumerate() {
        // Scan order is a8..h8, a7..h7, ..., a1..h1
        let sq = ((7 - index / 8) * 8 + index % 8) as u8;
        match ch {
            'w' => pieces[Color::White.index()] |= square_bit(sq),
            'b' => pieces[Color::Black.index()] |= square_bit(sq),
            '.' => {}
            _ => return Err(SetupError::InvalidSquare { index, ch }),
        }
    }

    let mut side_chars = rest.trim().chars();
    let side = match (side_chars.next(), side_chars.next()) {
        (None, _) => Color::White,
        (Some(c), None) => Color::from_digit(c).ok_or_else(|| SetupError::InvalidSide(rest.trim().to_string()))?,
        _ => return Err(SetupError::InvalidSide(rest.trim().to_string())),
    };

    Ok((pieces, side))
}

impl GameState for Position {
    fn generate_moves(&self, hint: Option<Move>) -> MoveList {
        self.generate(false, hint)
    }

    fn capture_moves(&self, hint: Option<Move>) -> MoveList {
        self.generate(true, hint)
    }

    fn make(&mut self, mv: Move) {
        debug_assert_eq!(self.result, Outcome::Unknown, "make on a finished game");
        let keys = zobrist::keys();
        let us = self.side_to_move;
        let them = us.opposite();
        let (from, to) = (mv._from(), mv._to());
        let to_bit = square_bit(to as u8);
        debug_assert!(self.pieces[us.index()] & square_bit(from as u8) != 0, "no piece on {}", from);

        self.pieces[us.index()] ^= square_bit(from as u8);
        self.key ^= keys.pieces[us.index()][from];

        if mv.is_capture() {
            debug_assert!(self.pieces[them.index()] & to_bit != 0, "nothing to capture on {}", to);
            self.pieces[them.index()] ^= to_bit;
            self.key ^= keys.pieces[them.index()][to];
            if self.pieces[them.index()] == 0 {
                self.result = Outcome::Loss;
            }
        }

        self.pieces[us.index()] |= to_bit;
        self.key ^= keys.pieces[us.index()][to];
        if to_bit & goal_rank(us) != 0 {
            self.result = Outcome::Loss;
        }

        self.side_to_move = them;
        self.key ^= keys.side_to_move;

        debug_assert_eq!(self.key, keys.hash(&self.pieces, self.side_to_move));
    }

    fn retract(&mut self, mv: Move) {
        let keys = zobrist::keys();
        let us = self.side_to_move.opposite();
        let them = self.side_to_move;
        let (from, to) = (mv._from(), mv._to());

        self.side_to_move = us;
        self.key ^= keys.side_to_move;

        self.pieces[us.index()] ^= square_bit(to as u8);
        self.key ^= keys.pieces[us.index()][to];

        if mv.is_capture() {
            self.pieces[them.index()] |= square_bit(to as u8);
            self.key ^= keys.pieces[them.index()][to];
        }

        self.pieces[us.index()] |= square_bit(from as u8);
        self.key ^= keys.pieces[us.index()][from];

        self.result = Outcome::Unknown;
    }

    fn is_terminal(&self) -> bool {
        self.result != Outcome::Unknown
    }

    fn result(&self) -> Outcome {
        self.result
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn evaluation(&self) -> i32 {
        match self.result {
            Outcome::Win => WIN_VALUE,
            Outcome::Loss => LOSS_VALUE,
            Outcome::Unknown => {
                let value = self.pieces[0].count_ones() as i32 - self.pieces[1].count_ones() as i32;
                match self.side_to_move {
                    Color::White => value,
                    Color::Black => -value,
                }
            }
        }
    }

    fn key(&self) -> u64 {
        self.key
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn setup(&mut self, board: &str) -> Result<(), SetupError> {
        let (pieces, side) = parse_board(board)?;
        let mover = side.index();
        let other = side.opposite().index();

        if pieces[other] == 0 {
            return Err(SetupError::NoOpponentPieces);
        }
        if pieces[mover] & goal_rank(side) != 0 {
            return Err(SetupError::MoverOnGoalRank);
        }
        let broken_through = (pieces[other] & goal_rank(side.opposite())).count_ones();
        if broken_through > 1 {
            return Err(SetupError::MultipleBreakthroughs(broken_through));
        }

        self.pieces = pieces;
        self.side_to_move = side;
        self.result = if broken_through == 1 || pieces[mover] == 0 {
            Outcome::Loss
        } else {
            Outcome::Unknown
        };
        self.key = zobrist::keys().hash(&pieces, side);
        Ok(())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let ch = self.piece_at(rank * 8 + file).map_or('.', |c| c.symbol());
                write!(f, "{}", ch)?;
            }
        }
        write!(f, " {}", self.side_to_move.digit())
    }
}
