//! Genetic search that hands over to exhaustive filtering
//!
//! Genetic search is cheap on large boards but slow to pin down the last few
//! columns; exhaustive filtering is the reverse. The hybrid starts genetic and
//! switches for the rest of the game once the latest feedback has at most
//! [`SWITCH_MARGIN`] columns not exactly matched.

use super::exhaustive::{ExhaustiveSettings, ExhaustiveStrategy};
use super::genetic::{GeneticSettings, GeneticStrategy};
use super::status::{AbortSignal, StatusFeed, SubscriptionId};
use super::strategy::Strategy;
use crate::core::{BoardView, ColorSequence};
use crate::error::{ConfigError, SolverError};

/// Switch once the last guess is within this many exact matches of a win
pub const SWITCH_MARGIN: usize = 4;

const GENETIC_PREFIX: &str = "Genetic Mode: ";
const EXHAUSTIVE_PREFIX: &str = "Knuth Mode: ";

/// Which engine the hybrid is currently delegating to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HybridMode {
    Genetic,
    Exhaustive,
}

/// Genetic until close, exhaustive afterwards
pub struct HybridStrategy {
    genetic: GeneticStrategy,
    exhaustive: ExhaustiveStrategy,
    mode: HybridMode,
    status: StatusFeed,
    abort: AbortSignal,
    relay: SubscriptionId,
}

impl HybridStrategy {
    #[must_use]
    pub fn new(genetic: GeneticSettings, exhaustive: ExhaustiveSettings) -> Self {
        Self::with_seed(genetic, exhaustive, None)
    }

    /// Create a hybrid whose engines make reproducible random choices
    #[must_use]
    pub fn with_seed(
        genetic: GeneticSettings,
        exhaustive: ExhaustiveSettings,
        seed: Option<u64>,
    ) -> Self {
        let abort = AbortSignal::new();
        let status = StatusFeed::new();
        let genetic = GeneticStrategy::with_options(genetic, seed, abort.clone());
        let exhaustive = ExhaustiveStrategy::with_options(exhaustive, seed, abort.clone());
        let relay = relay(genetic.status(), &status, GENETIC_PREFIX);

        Self {
            genetic,
            exhaustive,
            mode: HybridMode::Genetic,
            status,
            abort,
            relay,
        }
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> HybridMode {
        self.mode
    }

    /// Settings of the genetic engine
    #[must_use]
    pub fn genetic_settings(&self) -> GeneticSettings {
        self.genetic.settings()
    }

    /// Settings of the exhaustive engine
    #[must_use]
    pub fn exhaustive_settings(&self) -> ExhaustiveSettings {
        self.exhaustive.settings()
    }

    /// Replace the genetic engine's settings and restart the game state
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` and changes nothing if the settings
    /// are out of range.
    pub fn set_genetic_settings(&mut self, settings: GeneticSettings) -> Result<(), ConfigError> {
        self.genetic.set_settings(settings)?;
        self.reset();
        Ok(())
    }

    /// Replace the exhaustive engine's settings and restart the game state
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` and changes nothing if the settings
    /// are out of range.
    pub fn set_exhaustive_settings(
        &mut self,
        settings: ExhaustiveSettings,
    ) -> Result<(), ConfigError> {
        self.exhaustive.set_settings(settings)?;
        self.reset();
        Ok(())
    }

    /// Check if the latest feedback is close enough to switch modes
    fn should_switch(board: &BoardView<'_>) -> bool {
        board
            .last()
            .is_some_and(|row| usize::from(row.feedback().exact()) + SWITCH_MARGIN >= board.columns())
    }

    fn switch_to_exhaustive(&mut self) {
        self.genetic.reset();
        self.genetic.status().unsubscribe(self.relay);
        self.relay = relay(self.exhaustive.status(), &self.status, EXHAUSTIVE_PREFIX);
        self.mode = HybridMode::Exhaustive;
        tracing::info!("hybrid switching to exhaustive mode");
    }
}

impl Default for HybridStrategy {
    fn default() -> Self {
        Self::new(GeneticSettings::default(), ExhaustiveSettings::default())
    }
}

impl Strategy for HybridStrategy {
    fn next_guess(&mut self, board: BoardView<'_>) -> Result<ColorSequence, SolverError> {
        if self.mode == HybridMode::Genetic && Self::should_switch(&board) {
            self.switch_to_exhaustive();
        }

        match self.mode {
            HybridMode::Genetic => self.genetic.next_guess(board),
            HybridMode::Exhaustive => self.exhaustive.next_guess(board),
        }
    }

    fn reset(&mut self) {
        self.genetic.reset();
        self.exhaustive.reset();

        if self.mode == HybridMode::Exhaustive {
            self.exhaustive.status().unsubscribe(self.relay);
            self.relay = relay(self.genetic.status(), &self.status, GENETIC_PREFIX);
            self.mode = HybridMode::Genetic;
        }
    }

    /// Shared by both engines, so raising it stops whichever is running
    fn abort_signal(&self) -> AbortSignal {
        self.abort.clone()
    }

    fn status(&self) -> &StatusFeed {
        &self.status
    }
}

/// Forward every message from `source` to `target` with a prefix
fn relay(source: &StatusFeed, target: &StatusFeed, prefix: &'static str) -> SubscriptionId {
    let target = target.clone();
    source.subscribe(move |message| target.publish(&format!("{prefix}{message}")))
}
