//! Core domain types for Mastermind
//!
//! Rows, feedback and the board. Everything the strategies search over is
//! defined here.

mod board;
mod feedback;
mod sequence;

pub use board::{Board, BoardEvent, BoardSettings, BoardView, GameState, PlayedRow};
pub use feedback::Feedback;
pub use sequence::{ColorSequence, MAX_COLORS, MAX_COLUMNS};
