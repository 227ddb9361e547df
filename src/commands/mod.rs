//! Command implementations

pub mod benchmark;
pub mod solve;

pub use benchmark::{BenchmarkResult, progress_bar, random_answers, run_benchmark};
pub use solve::{GuessStep, SolveConfig, SolveResult, solve_game};
