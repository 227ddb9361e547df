//! Mastermind Solver
//!
//! Automated guessing for Mastermind boards of configurable shape, using
//! exhaustive constraint filtering, genetic search, or a hybrid of both.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mastermind_solver::core::{Board, BoardSettings, ColorSequence};
//! use mastermind_solver::solver::{Game, StrategyType};
//!
//! let answer: ColorSequence = "3 1 4 1".parse().unwrap();
//! let board = Board::new(BoardSettings::new(10, 4, 6), answer).unwrap();
//!
//! let mut game = Game::new(board, StrategyType::from_name("hybrid"));
//! let state = game.play_out().unwrap();
//! println!("{state:?} after {} guesses", game.board().guesses().len());
//! ```

// Core domain types
pub mod core;

// Guessing strategies
pub mod solver;

// Configuration file handling
pub mod config;

// Error types
pub mod error;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
