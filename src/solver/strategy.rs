//! Guess selection strategies
//!
//! Defines the Strategy trait, the runtime-selectable [`StrategyType`] and the
//! trivial [`RandomStrategy`].

use super::status::{AbortSignal, StatusFeed};
use super::{ExhaustiveStrategy, GeneticStrategy, HybridStrategy};
use crate::config::AppConfig;
use crate::core::{BoardView, ColorSequence};
use crate::error::SolverError;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A source of guesses for a Mastermind board
///
/// Strategies keep search state between calls and must be [`reset`] between
/// games. Calls for one strategy must not overlap.
///
/// [`reset`]: Strategy::reset
pub trait Strategy {
    /// Produce the next guess for `board`
    ///
    /// Never modifies the board; the caller plays the returned guess.
    ///
    /// # Errors
    /// Returns `SolverError` if the search could not run at all. An abort is
    /// not an error: the best guess found so far is returned instead.
    fn next_guess(&mut self, board: BoardView<'_>) -> Result<ColorSequence, SolverError>;

    /// Drop cached search state
    fn reset(&mut self);

    /// Handle to the cancellation flag polled by [`Strategy::next_guess`]
    ///
    /// Clone it before the call to abort from another thread.
    fn abort_signal(&self) -> AbortSignal;

    /// Progress messages published while searching
    fn status(&self) -> &StatusFeed;

    /// Ask an in-flight search to stop early
    fn abort(&self) {
        self.abort_signal().raise();
    }
}

impl<S: Strategy + ?Sized> Strategy for &mut S {
    fn next_guess(&mut self, board: BoardView<'_>) -> Result<ColorSequence, SolverError> {
        (**self).next_guess(board)
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn abort_signal(&self) -> AbortSignal {
        (**self).abort_signal()
    }

    fn status(&self) -> &StatusFeed {
        (**self).status()
    }
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
pub enum StrategyType {
    /// Consistent-candidate enumeration and filtering
    Exhaustive(ExhaustiveStrategy),
    /// Evolutionary search toward consistent candidates
    Genetic(GeneticStrategy),
    /// Genetic search that hands over to exhaustive filtering near the end
    Hybrid(HybridStrategy),
    /// Uniformly random guesses
    Random(RandomStrategy),
}

impl Strategy for StrategyType {
    fn next_guess(&mut self, board: BoardView<'_>) -> Result<ColorSequence, SolverError> {
        match self {
            Self::Exhaustive(s) => s.next_guess(board),
            Self::Genetic(s) => s.next_guess(board),
            Self::Hybrid(s) => s.next_guess(board),
            Self::Random(s) => s.next_guess(board),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Exhaustive(s) => s.reset(),
            Self::Genetic(s) => s.reset(),
            Self::Hybrid(s) => s.reset(),
            Self::Random(s) => s.reset(),
        }
    }

    fn abort_signal(&self) -> AbortSignal {
        match self {
            Self::Exhaustive(s) => s.abort_signal(),
            Self::Genetic(s) => s.abort_signal(),
            Self::Hybrid(s) => s.abort_signal(),
            Self::Random(s) => s.abort_signal(),
        }
    }

    fn status(&self) -> &StatusFeed {
        match self {
            Self::Exhaustive(s) => s.status(),
            Self::Genetic(s) => s.status(),
            Self::Hybrid(s) => s.status(),
            Self::Random(s) => s.status(),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string with default settings
    ///
    /// Supported names: "hybrid", "genetic", "exhaustive" (or "knuth"), "random".
    /// Defaults to hybrid if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::from_config(name, &AppConfig::default(), None)
    }

    /// Create strategy from name string using the given settings
    ///
    /// A `seed` makes every random choice of the strategy reproducible.
    #[must_use]
    pub fn from_config(name: &str, config: &AppConfig, seed: Option<u64>) -> Self {
        let genetic = config.genetic.clone();
        let exhaustive = config.exhaustive.clone();

        match name {
            "genetic" => Self::Genetic(GeneticStrategy::with_options(
                genetic,
                seed,
                AbortSignal::new(),
            )),
            "exhaustive" | "knuth" => Self::Exhaustive(ExhaustiveStrategy::with_options(
                exhaustive,
                seed,
                AbortSignal::new(),
            )),
            "random" => Self::Random(seed.map_or_else(RandomStrategy::new, RandomStrategy::with_seed)),
            _ => Self::Hybrid(HybridStrategy::with_seed(genetic, exhaustive, seed)),
        }
    }

    /// Short name of the selected strategy
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Exhaustive(_) => "exhaustive",
            Self::Genetic(_) => "genetic",
            Self::Hybrid(_) => "hybrid",
            Self::Random(_) => "random",
        }
    }
}

/// Random strategy
///
/// Guesses uniformly at random with no regard for feedback. Useful as a
/// baseline and for exercising the board.
pub struct RandomStrategy {
    rng: StdRng,
    status: StatusFeed,
    abort: AbortSignal,
}

impl RandomStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_rng(&mut rand::rng()))
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            status: StatusFeed::new(),
            abort: AbortSignal::new(),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn next_guess(&mut self, board: BoardView<'_>) -> Result<ColorSequence, SolverError> {
        self.status.publish("");
        Ok(ColorSequence::random(
            &mut self.rng,
            board.colors(),
            board.columns(),
        ))
    }

    fn reset(&mut self) {}

    fn abort_signal(&self) -> AbortSignal {
        self.abort.clone()
    }

    fn status(&self) -> &StatusFeed {
        &self.status
    }
}
