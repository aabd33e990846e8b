//! Order-independent board signatures and the visited set built on them.
//!
//! Physically permuting tubes does not change the puzzle, so the search
//! treats every tube permutation of a board as one node. `CanonicalKey` is
//! the sorted list of tube contents; two boards share a key iff one is a
//! permutation of the other.
use crate::engine::{Board, Tube};
use rustc_hash::FxHashSet;

/// Sorted tube contents of a board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(Vec<Tube>);

impl CanonicalKey {
    pub fn of(board: &Board) -> Self {
        let mut tubes = board.tubes().to_vec();
        tubes.sort_unstable();
        CanonicalKey(tubes)
    }

    /// Tube contents in canonical (ascending) order.
    pub fn tubes(&self) -> &[Tube] {
        &self.0
    }
}

/// Canonical keys seen during one search; grows monotonically.
#[derive(Debug, Default)]
pub struct VisitedSet {
    keys: FxHashSet<CanonicalKey>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set already holding the key of `origin`.
    pub fn seeded(origin: &Board) -> Self {
        let mut visited = Self::new();
        visited.insert(origin);
        visited
    }

    /// Marks `board` as visited. Returns `false` if an equivalent board was
    /// already present.
    pub fn insert(&mut self, board: &Board) -> bool {
        self.keys.insert(board.canonical_key())
    }

    pub fn contains(&self, board: &Board) -> bool {
        self.keys.contains(&board.canonical_key())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
