//! Exhaustive constraint filtering
//!
//! Keeps the set of every row still consistent with the feedback seen so far
//! and guesses uniformly at random from it. The set is built once per game by
//! enumeration, then narrowed as new rows are played.

mod enumerate;
mod filter;

pub use enumerate::{Enumeration, MEMORY_CHECK_INTERVAL, enumerate};
pub use filter::{PARALLEL_FILTER_THRESHOLD, filter_pool};

use crate::core::{BoardView, ColorSequence, PlayedRow};
use crate::error::{ConfigError, SolverError};
use crate::solver::seed::{seed_guess, use_seed};
use crate::solver::status::{AbortSignal, StatusFeed};
use crate::solver::strategy::Strategy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Tuning parameters for [`ExhaustiveStrategy`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhaustiveSettings {
    /// Largest estimated candidate pool, in megabytes
    pub memory_budget_mb: usize,
}

impl Default for ExhaustiveSettings {
    fn default() -> Self {
        Self {
            memory_budget_mb: 4096,
        }
    }
}

impl ExhaustiveSettings {
    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` if the budget is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_budget_mb == 0 {
            return Err(ConfigError::Validation(
                "exhaustive.memory_budget_mb must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Guesses at random among all candidates consistent with the board
pub struct ExhaustiveStrategy {
    settings: ExhaustiveSettings,
    pool: Option<Vec<ColorSequence>>,
    /// Board rows the pool has been filtered against, in play order
    filtered: Vec<PlayedRow>,
    rng: StdRng,
    status: StatusFeed,
    abort: AbortSignal,
}

impl ExhaustiveStrategy {
    #[must_use]
    pub fn new(settings: ExhaustiveSettings) -> Self {
        Self::with_options(settings, None, AbortSignal::new())
    }

    /// Create a strategy with a fixed RNG seed and a shared abort signal
    #[must_use]
    pub fn with_options(settings: ExhaustiveSettings, seed: Option<u64>, abort: AbortSignal) -> Self {
        let rng = seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);
        Self {
            settings,
            pool: None,
            filtered: Vec::new(),
            rng,
            status: StatusFeed::new(),
            abort,
        }
    }

    /// A copy of the current settings
    #[must_use]
    pub fn settings(&self) -> ExhaustiveSettings {
        self.settings.clone()
    }

    /// Replace the settings and drop the pool
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` and keeps the old settings if the new
    /// ones are out of range.
    pub fn set_settings(&mut self, settings: ExhaustiveSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.settings = settings;
        self.reset();
        Ok(())
    }

    /// Surviving candidates, if the pool has been built
    #[must_use]
    pub fn pool_size(&self) -> Option<usize> {
        self.pool.as_ref().map(Vec::len)
    }

    /// Build the pool from scratch against every played row
    fn build(&mut self, board: &BoardView<'_>) -> Result<Option<Vec<ColorSequence>>, SolverError> {
        let rows = board.guesses();
        match enumerate(
            board.columns(),
            board.colors(),
            rows,
            self.settings.memory_budget_mb,
            &self.abort,
        ) {
            Enumeration::Complete(pool) => {
                tracing::info!(candidates = pool.len(), rows = rows.len(), "candidate pool built");
                self.pool = Some(pool);
                self.filtered = rows.to_vec();
                Ok(None)
            }
            // Partial pools are never cached; the next call enumerates again
            Enumeration::Aborted(partial) => {
                tracing::debug!(candidates = partial.len(), "enumeration aborted");
                Ok(Some(partial))
            }
            Enumeration::OverBudget => {
                tracing::warn!(
                    budget_mb = self.settings.memory_budget_mb,
                    "candidate pool exceeded memory budget"
                );
                self.reset();
                Err(SolverError::PoolTooLarge {
                    budget_mb: self.settings.memory_budget_mb,
                })
            }
        }
    }

    /// Narrow the cached pool by the rows played since the last pass
    fn refresh(&mut self, board: &BoardView<'_>) {
        let rows = board.guesses();
        let Some(pool) = self.pool.take() else {
            return;
        };

        let before = pool.len();
        let fresh = &rows[self.filtered.len()..];
        let pool = filter_pool(pool, fresh, &self.abort);
        if !self.abort.is_raised() {
            self.filtered.extend_from_slice(fresh);
        }
        tracing::debug!(before, after = pool.len(), "candidate pool filtered");
        self.pool = Some(pool);
    }

    fn choose(&mut self, candidates: &[ColorSequence], columns: usize) -> ColorSequence {
        candidates
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| ColorSequence::zeros(columns))
    }
}

impl Default for ExhaustiveStrategy {
    fn default() -> Self {
        Self::new(ExhaustiveSettings::default())
    }
}

impl Strategy for ExhaustiveStrategy {
    fn next_guess(&mut self, board: BoardView<'_>) -> Result<ColorSequence, SolverError> {
        self.abort.clear();

        if use_seed(&board) {
            return Ok(seed_guess(&board));
        }

        // The pool only carries over while the board extends the rows it saw
        if self.pool.is_some() && !board.guesses().starts_with(&self.filtered) {
            tracing::debug!(
                rows = board.guesses().len(),
                filtered = self.filtered.len(),
                "board is a different game, dropping candidate pool"
            );
            self.reset();
        }

        if self.pool.is_none() {
            if let Some(partial) = self.build(&board)? {
                self.status.publish(&format!("Pool Size: {}", partial.len()));
                return Ok(self.choose(&partial, board.columns()));
            }
        } else {
            self.refresh(&board);
        }

        let pool = self.pool.take().unwrap_or_default();
        self.status.publish(&format!("Pool Size: {}", pool.len()));
        debug_assert!(
            !pool.is_empty(),
            "no consistent candidates remain; feedback history is contradictory"
        );
        let guess = self.choose(&pool, board.columns());
        self.pool = Some(pool);
        Ok(guess)
    }

    fn reset(&mut self) {
        self.pool = None;
        self.filtered.clear();
    }

    fn abort_signal(&self) -> AbortSignal {
        self.abort.clone()
    }

    fn status(&self) -> &StatusFeed {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, BoardSettings, GameState};

    fn board(columns: usize, colors: u8, answer: &[u8]) -> Board {
        Board::new(
            BoardSettings::new(12, columns, colors),
            ColorSequence::new(answer).unwrap(),
        )
        .unwrap()
    }

    fn strategy(seed: u64) -> ExhaustiveStrategy {
        ExhaustiveStrategy::with_options(ExhaustiveSettings::default(), Some(seed), AbortSignal::new())
    }

    #[test]
    fn guesses_stay_consistent_until_win() {
        let mut strategy = strategy(1);
        let mut board = board(4, 6, &[2, 5, 0, 2]);

        while board.state() == GameState::InProgress {
            let guess = strategy.next_guess(board.view()).unwrap();
            if board.guesses().len() >= 2 {
                assert!(board.guesses().iter().all(|row| row.is_consistent(&guess)));
            }
            board.add_guess(guess).unwrap();
        }

        assert_eq!(board.state(), GameState::Won);
    }

    #[test]
    fn pool_only_shrinks() {
        let mut strategy = strategy(2);
        let mut board = board(5, 6, &[1, 1, 4, 0, 3]);
        let mut last = usize::MAX;

        while board.state() == GameState::InProgress {
            let guess = strategy.next_guess(board.view()).unwrap();
            if let Some(size) = strategy.pool_size() {
                assert!(size <= last);
                assert!(size >= 1);
                last = size;
            }
            board.add_guess(guess).unwrap();
        }
    }

    #[test]
    fn status_reports_pool_size() {
        let mut strategy = strategy(3);
        let (_, rx) = strategy.status().channel();
        let mut board = board(4, 6, &[0, 1, 2, 3]);
        board.add_guess(ColorSequence::new(&[0, 0, 1, 1]).unwrap()).unwrap();
        board.add_guess(ColorSequence::new(&[2, 2, 3, 3]).unwrap()).unwrap();

        strategy.next_guess(board.view()).unwrap();
        let message = rx.try_recv().unwrap();
        assert_eq!(message, format!("Pool Size: {}", strategy.pool_size().unwrap()));
    }

    #[test]
    fn over_budget_is_recoverable_error() {
        let mut strategy = ExhaustiveStrategy::with_options(
            ExhaustiveSettings {
                memory_budget_mb: 1,
            },
            Some(4),
            AbortSignal::new(),
        );
        // Both openings miss entirely, leaving 8^6 = 262,144 candidates
        let mut board = board(6, 12, &[11, 10, 9, 8, 7, 6]);
        board.add_guess(ColorSequence::new(&[0, 0, 0, 1, 1, 1]).unwrap()).unwrap();
        board.add_guess(ColorSequence::new(&[2, 2, 2, 3, 3, 3]).unwrap()).unwrap();

        assert_eq!(
            strategy.next_guess(board.view()),
            Err(SolverError::PoolTooLarge { budget_mb: 1 })
        );
        assert_eq!(strategy.pool_size(), None);

        // Recoverable: a larger budget succeeds on the same board
        strategy
            .set_settings(ExhaustiveSettings {
                memory_budget_mb: 64,
            })
            .unwrap();
        strategy.next_guess(board.view()).unwrap();
        assert_eq!(strategy.pool_size(), Some(262_144));
    }

    #[test]
    fn aborted_build_is_not_cached() {
        let abort = AbortSignal::new();
        let mut strategy =
            ExhaustiveStrategy::with_options(ExhaustiveSettings::default(), Some(5), abort.clone());
        let mut board = board(4, 6, &[5, 4, 3, 2]);
        board.add_guess(ColorSequence::new(&[0, 0, 1, 1]).unwrap()).unwrap();
        board.add_guess(ColorSequence::new(&[2, 2, 3, 3]).unwrap()).unwrap();

        abort.raise();
        let partial = strategy.build(&board.view()).unwrap();
        assert!(partial.is_some());
        assert_eq!(strategy.pool_size(), None);

        // The next request clears the signal and builds normally
        strategy.next_guess(board.view()).unwrap();
        assert!(strategy.pool_size().is_some());
        strategy.reset();
        assert_eq!(strategy.pool_size(), None);
    }

    #[test]
    fn new_game_without_reset_rebuilds_pool() {
        let mut exhaustive = strategy(6);
        let mut first = board(4, 6, &[4, 4, 5, 1]);
        while first.state() == GameState::InProgress {
            let guess = exhaustive.next_guess(first.view()).unwrap();
            first.add_guess(guess).unwrap();
        }
        assert!(first.guesses().len() > 2);

        // Same opening guesses, different feedback on the second row
        let mut second = board(4, 6, &[3, 0, 2, 2]);
        second.add_guess(ColorSequence::new(&[0, 0, 1, 1]).unwrap()).unwrap();
        second.add_guess(ColorSequence::new(&[2, 2, 3, 3]).unwrap()).unwrap();

        let guess = exhaustive.next_guess(second.view()).unwrap();
        assert!(second.guesses().iter().all(|row| row.is_consistent(&guess)));

        let mut fresh = strategy(7);
        fresh.next_guess(second.view()).unwrap();
        assert_eq!(exhaustive.pool_size(), fresh.pool_size());
    }

    #[test]
    fn settings_validation() {
        let mut strategy = ExhaustiveStrategy::default();
        assert!(strategy.set_settings(ExhaustiveSettings { memory_budget_mb: 0 }).is_err());
        assert_eq!(strategy.settings().memory_budget_mb, 4096);
        strategy
            .set_settings(ExhaustiveSettings { memory_budget_mb: 16 })
            .unwrap();
        assert_eq!(strategy.settings().memory_budget_mb, 16);
    }
}
