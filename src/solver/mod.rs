//! Mastermind guessing strategies
//!
//! Each strategy implements [`Strategy`]; [`StrategyType`] selects one at
//! runtime and [`Game`] drives it against a board.

mod engine;
pub mod exhaustive;
pub mod genetic;
mod hybrid;
mod seed;
mod sort;
mod status;
pub mod strategy;

pub use engine::Game;
pub use exhaustive::{ExhaustiveSettings, ExhaustiveStrategy};
pub use genetic::{
    CrossoverKind, GeneticAlgorithm, GeneticFactory, GeneticSettings, GeneticStrategy,
    GuessFactory, PoolMember,
};
pub use hybrid::{HybridMode, HybridStrategy, SWITCH_MARGIN};
pub use seed::{seed_guess, use_seed};
pub use sort::par_sort_by;
pub use status::{AbortSignal, StatusFeed, SubscriptionId};
pub use strategy::{RandomStrategy, Strategy, StrategyType};
