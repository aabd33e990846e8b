//! Search results and their external representation.
//!
//! Internally every move is 0-based. The conversion to the 1-based tube
//! numbers shown to players happens here and nowhere else.
use crate::engine::{Board, Move};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Effort spent by one search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off a frontier and expanded.
    pub expanded: u64,
    /// Successor boards that were new to their visited set.
    pub generated: u64,
    /// Canonical keys held by the visited set(s) at the end.
    pub visited: usize,
    pub peak_frontier: usize,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Folds a worker's counters into this total. Elapsed time is left
    /// untouched because workers run concurrently.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.expanded += other.expanded;
        self.generated += other.generated;
        self.visited += other.visited;
        self.peak_frontier = self.peak_frontier.max(other.peak_frontier);
    }
}

/// Outcome of a `solve` call.
///
/// `moves` is `None` when no solution was found; this is a regular result,
/// not an error. `final_board` is the solved board on success and the
/// initial board otherwise.
#[derive(Clone, Debug)]
pub struct Solution {
    pub final_board: Board,
    pub moves: Option<Vec<Move>>,
    pub stats: SearchStats,
}

impl Solution {
    pub fn found(final_board: Board, moves: Vec<Move>, stats: SearchStats) -> Self {
        Solution {
            final_board,
            moves: Some(moves),
            stats,
        }
    }

    pub fn not_found(initial_board: Board, stats: SearchStats) -> Self {
        Solution {
            final_board: initial_board,
            moves: None,
            stats,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.moves.is_some()
    }

    /// The move list in 1-based tube numbers.
    pub fn numbered_moves(&self) -> Option<Vec<NumberedMove>> {
        self.moves.as_deref().map(to_one_based)
    }

    /// The final board as one string of concatenated codes per tube.
    pub fn tube_strings(&self) -> Vec<String> {
        self.final_board.to_list()
    }

    pub fn report(&self) -> SolveReport {
        SolveReport {
            tubes: self.tube_strings(),
            moves: self.numbered_moves(),
            expanded: self.stats.expanded,
            visited: self.stats.visited,
            elapsed_ms: u64::try_from(self.stats.elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// A move with tubes numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NumberedMove {
    pub from: usize,
    pub to: usize,
}

impl From<Move> for NumberedMove {
    fn from(mv: Move) -> Self {
        NumberedMove {
            from: mv.source + 1,
            to: mv.destination + 1,
        }
    }
}

impl fmt::Display for NumberedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.from, self.to)
    }
}

/// Renumbers 0-based moves to the 1-based external convention.
pub fn to_one_based(moves: &[Move]) -> Vec<NumberedMove> {
    moves.iter().copied().map(NumberedMove::from).collect()
}

/// Plays `moves` in order from `board`.
///
/// # Panics
/// Panics if a move is illegal at the point it is played.
pub fn replay(board: &Board, moves: &[Move]) -> Board {
    moves
        .iter()
        .fold(board.clone(), |current, &mv| current.apply_move(mv))
}

/// Serializable summary of a [`Solution`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    pub tubes: Vec<String>,
    pub moves: Option<Vec<NumberedMove>>,
    pub expanded: u64,
    pub visited: usize,
    pub elapsed_ms: u64,
}
