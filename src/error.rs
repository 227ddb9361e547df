//! Error types shared across the crate

use crate::core::GameState;
use std::path::PathBuf;

/// Errors raised when building a color sequence
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("sequence must have between 1 and {max} columns, got {len}")]
    InvalidLength { len: usize, max: usize },

    #[error("color {color} is out of range for a {colors}-color game")]
    ColorOutOfRange { color: u8, colors: u8 },

    #[error("could not parse color '{0}'")]
    Parse(String),
}

/// Errors raised by the board when a guess cannot be accepted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("game is over ({0:?}), no further guesses accepted")]
    GameOver(GameState),

    #[error("guess has {got} columns, board has {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("invalid sequence: {0}")]
    Sequence(#[from] SequenceError),
}

/// Errors raised while searching for a guess
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    #[error("maximum pool size exceeded ({budget_mb} MB)")]
    PoolTooLarge { budget_mb: usize },
}

/// Errors raised while driving a game to completion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
