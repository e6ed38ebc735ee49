use super::search::MAX_SEARCH_DEPTH;
use crate::game_repr::Move;

const WIDTH: usize = MAX_SEARCH_DEPTH + 1;

/// Triangular principal variation table
///
/// Row `ply` holds the best line found from that ply onward, starting on the
/// diagonal cell. A `None` cell terminates a line. Only row 0 is read from
/// outside the search.
pub struct PrincipalVariation {
    cells: Vec<Option<Move>>,
}

impl PrincipalVariation {
    pub fn new() -> Self {
        Self {
            cells: vec![None; WIDTH * WIDTH],
        }
    }

    #[inline]
    fn cell(row: usize, col: usize) -> usize {
        row * WIDTH + col
    }

    /// Start a fresh line at `ply`.
    #[inline]
    pub fn clear_ply(&mut self, ply: usize) {
        if ply < WIDTH {
            self.cells[Self::cell(ply, ply)] = None;
        }
    }

    /// Record `mv` as best at `ply`, followed by the line found one ply deeper.
    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply >= WIDTH {
            return;
        }
        self.cells[Self::cell(ply, ply)] = Some(mv);

        let mut col = ply + 1;
        while col < WIDTH {
            let next = self.cells[Self::cell(ply + 1, col)];
            self.cells[Self::cell(ply, col)] = next;
            if next.is_none() {
                break;
            }
            col += 1;
        }
    }

    /// Best line from the root.
    pub fn line(&self) -> Vec<Move> {
        self.cells[..WIDTH].iter().map_while(|&cell| cell).collect()
    }

    pub fn best_move(&self) -> Option<Move> {
        self.cells[0]
    }

    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }
}

impl Default for PrincipalVariation {
    fn default() -> Self {
        Self::new()
    }
}
