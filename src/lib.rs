//! # Ball Sort Solver Library
//!
//! This library provides the core model of the ball sort (tube sorting)
//! puzzle and two breadth-first solvers for it.
//!
//! It is used by three binaries:
//! - `ballsort_solver`: Reads a board file and prints a solution as 1-based
//!   tube moves.
//! - `human_player`: Allows interactive play via the command line.
//! - `strategy_evaluator`: Runs both solvers over seeded random puzzles and
//!   compares solution lengths and timings.
//!
//! ## Modules
//! - `engine`: Colors, palettes, tubes, moves and the `Board` with move
//!   generation, move application, the solved check and canonicalization.
//! - `canonical`: The tube-order-independent `CanonicalKey` and the
//!   `VisitedSet` used for deduplication.
//! - `solver`: Exhaustive breadth-first search (`solve_bfs`). Returns a
//!   shortest solution up to tube permutation.
//! - `parallel`: Iterative deepening over work items dispatched to a worker
//!   pool (`solve_parallel`). Faster on large puzzles, not guaranteed shortest.
//! - `solution`: Search results and their 1-based external form.
//! - `config`: Tuning knobs for both strategies.
//! - `progress`: The observer interface for progress reports.
//! - `game`: An interactive play session with undo.
//! - `utils`: Parsing boards from text.
//! - `error`: Error types.

pub mod canonical;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod parallel;
pub mod progress;
pub mod solution;
pub mod solver;
pub mod utils;
