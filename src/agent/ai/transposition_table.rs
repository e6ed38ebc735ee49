use crate::game_repr::Move;

/// Default number of slots, split evenly between the two regions.
pub const DEFAULT_TT_ENTRIES: usize = 2 << 18;

/// Bound type for transposition table entries
///
/// - Exact: the true negamax value of the position
/// - Lower: value is at least this much (the search failed high)
/// - Upper: value is at most this much (every move failed low)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

/// Entry in the transposition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    /// Full Zobrist key, checked on probe to reject index collisions
    pub key: u64,
    pub bound: Bound,
    /// Remaining depth the score was searched to (0 for horizon leaves)
    pub depth: i32,
    pub score: i32,
    pub best_move: Option<Move>,
}

impl TtEntry {
    /// Whether the stored score settles a node searched with `depth` and
    /// window `[alpha, beta]`.
    #[inline]
    pub fn cutoff(&self, depth: i32, alpha: i32, beta: i32) -> bool {
        if self.depth < depth {
            return false;
        }
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => self.score >= beta,
            Bound::Upper => self.score <= alpha,
        }
    }
}

/// Fixed-size two-region transposition table
///
/// Slots `[0, region)` are depth-preferred, `[region, 2 * region)` are
/// always-replace. A key maps to the same index in both regions, so a deep
/// entry survives while recent shallow results still get cached next to it.
pub struct TranspositionTable {
    slots: Vec<Option<TtEntry>>,
    region: usize,
    /// Statistics: number of successful probes
    pub hits: u64,
    /// Statistics: number of failed probes
    pub misses: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TT_ENTRIES)
    }

    /// Create a table with `entries` slots in total (at least two).
    pub fn with_capacity(entries: usize) -> Self {
        let region = (entries / 2).max(1);
        Self {
            slots: vec![None; region * 2],
            region,
            hits: 0,
            misses: 0,
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.region as u64) as usize
    }

    /// Look up `key` in the depth-preferred slot, then the always-replace slot.
    pub fn probe(&mut self, key: u64) -> Option<TtEntry> {
        let idx = self.index(key);
        let found = [idx, idx + self.region]
            .into_iter()
            .filter_map(|slot| self.slots[slot])
            .find(|entry| entry.key == key);

        match found {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        found
    }

    /// Store a search result.
    ///
    /// Replacement: the depth-preferred slot takes the entry when it is empty
    /// or no deeper than `depth`. A deeper entry for the same position that has
    /// no move yet gets `best_move` attached. Anything else goes to the
    /// always-replace slot.
    pub fn put(&mut self, key: u64, bound: Bound, depth: i32, score: i32, best_move: Option<Move>) {
        let idx = self.index(key);
        let entry = TtEntry {
            key,
            bound,
            depth,
            score,
            best_move,
        };

        let region = self.region;
        let preferred = &mut self.slots[idx];
        match preferred {
            Some(existing) if existing.depth > depth => {
                if existing.key == key && existing.best_move.is_none() {
                    existing.best_move = best_move;
                } else {
                    self.slots[idx + region] = Some(entry);
                }
            }
            _ => *preferred = Some(entry),
        }
    }

    /// Store a horizon evaluation, classifying it against the window it was
    /// searched with.
    pub fn put_leaf(&mut self, key: u64, score: i32, alpha: i32, beta: i32) {
        let bound = if score >= beta {
            Bound::Lower
        } else if score <= alpha {
            Bound::Upper
        } else {
            Bound::Exact
        };
        self.put(key, bound, 0, score, None);
    }

    /// Empty every slot and reset the statistics
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
