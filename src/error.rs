//! Error types for board construction, palette definition, board parsing
//! and search configuration.
//!
//! "No solution found" is not an error; it is reported through
//! [`crate::solution::Solution::moves`].

use thiserror::Error;

/// Errors raised while defining a color alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,
    #[error("palette holds at most {max} colors, got {found}")]
    TooManyColors { max: usize, found: usize },
    #[error("color code at position {index} is empty")]
    EmptyCode { index: usize },
    #[error("color code '{code}' contains whitespace or a comma")]
    InvalidCode { code: String },
    #[error("duplicate color code '{code}'")]
    DuplicateCode { code: String },
}

/// Errors raised while building a [`crate::engine::Board`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid color '{code}' in tube {tube}")]
    InvalidColor { code: String, tube: usize },
    #[error("tube {tube} holds {len} tokens but capacity is {capacity}")]
    TubeOverflow {
        tube: usize,
        len: usize,
        capacity: usize,
    },
    #[error("tube capacity must be at least 1")]
    ZeroCapacity,
    #[error("requested {requested} colors but the palette only has {available}")]
    NotEnoughColors { requested: usize, available: usize },
}

/// Errors raised while reading a board from its text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: {source}")]
    Board {
        line: usize,
        #[source]
        source: BoardError,
    },
    #[error(transparent)]
    Invalid(#[from] BoardError),
    #[error("board text contains no tubes")]
    NoTubes,
}

/// Errors raised by [`crate::config`] validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("progress interval must be greater than zero")]
    ZeroProgressInterval,
    #[error("initial depth must be greater than zero")]
    ZeroInitialDepth,
    #[error("depth step must be greater than zero")]
    ZeroDepthStep,
    #[error("initial depth {initial} exceeds max depth {max}")]
    InitialDepthAboveMax { initial: usize, max: usize },
    #[error("items per worker must be greater than zero")]
    ZeroItemsPerWorker,
    #[error("worker count must be greater than zero")]
    ZeroWorkers,
}

/// Errors raised by the partitioned search before any work is dispatched.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
