//! Guess selection by genetic search

use super::{GeneticAlgorithm, GeneticSettings, GuessFactory, PoolMember};
use crate::core::{BoardView, ColorSequence};
use crate::error::{ConfigError, SolverError};
use crate::solver::seed::{seed_guess, use_seed};
use crate::solver::status::{AbortSignal, StatusFeed};
use crate::solver::strategy::Strategy;

/// Evolves a pool of candidates toward consistency with the board
///
/// The pool is created lazily on the first searched guess and carried over
/// between guesses of the same game, so each search starts from the previous
/// generation rather than from scratch.
pub struct GeneticStrategy {
    settings: GeneticSettings,
    engine: Option<GeneticAlgorithm<GuessFactory>>,
    seed: Option<u64>,
    status: StatusFeed,
    abort: AbortSignal,
}

impl GeneticStrategy {
    #[must_use]
    pub fn new(settings: GeneticSettings) -> Self {
        Self::with_options(settings, None, AbortSignal::new())
    }

    /// Create a strategy with a fixed RNG seed and a shared abort signal
    #[must_use]
    pub fn with_options(settings: GeneticSettings, seed: Option<u64>, abort: AbortSignal) -> Self {
        Self {
            settings,
            engine: None,
            seed,
            status: StatusFeed::new(),
            abort,
        }
    }

    /// A copy of the current settings
    #[must_use]
    pub fn settings(&self) -> GeneticSettings {
        self.settings.clone()
    }

    /// Replace the settings and drop the pool
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` and keeps the old settings if the new
    /// ones are out of range.
    pub fn set_settings(&mut self, settings: GeneticSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.settings = settings;
        self.reset();
        Ok(())
    }
}

impl Default for GeneticStrategy {
    fn default() -> Self {
        Self::new(GeneticSettings::default())
    }
}

impl Strategy for GeneticStrategy {
    fn next_guess(&mut self, board: BoardView<'_>) -> Result<ColorSequence, SolverError> {
        self.abort.clear();

        if use_seed(&board) {
            return Ok(seed_guess(&board));
        }

        let settings = self.settings.clone();
        let mutation = settings.effective_mutation(
            board.last().map(|row| row.feedback().exact()),
            board.columns(),
        );
        let abort = self.abort.clone();

        let engine = match self.engine.take() {
            Some(engine) if fits(&engine, &board) => engine,
            _ => build_engine(&settings, self.seed, &board),
        };
        let engine = self.engine.insert(engine);
        engine.factory_mut().set_history(board.guesses());
        engine.score_and_sort_pool();

        let mut generations = 0;
        while generations < settings.max_generations
            && engine.best().is_some_and(|best| best.score != 0)
            && !abort.is_raised()
        {
            engine.evolve(
                settings.elitism_cutoff,
                settings.crossover_fraction,
                mutation,
            );
            engine.score_and_sort_pool();
            generations += 1;
            report(&self.status, engine.pool(), settings.elitism_cutoff, generations);
        }

        if generations == 0 {
            report(&self.status, engine.pool(), settings.elitism_cutoff, generations);
        }

        let guess = engine
            .pool()
            .iter()
            .find(|member| !board.was_played(&member.item))
            .map_or_else(
                || ColorSequence::zeros(board.columns()),
                |member| member.item.clone(),
            );

        Ok(guess)
    }

    fn reset(&mut self) {
        self.engine = None;
    }

    fn abort_signal(&self) -> AbortSignal {
        self.abort.clone()
    }

    fn status(&self) -> &StatusFeed {
        &self.status
    }
}

/// Check if an existing engine was built for this board shape
fn fits(engine: &GeneticAlgorithm<GuessFactory>, board: &BoardView<'_>) -> bool {
    engine.factory().columns() == board.columns() && engine.factory().colors() == board.colors()
}

fn build_engine(
    settings: &GeneticSettings,
    seed: Option<u64>,
    board: &BoardView<'_>,
) -> GeneticAlgorithm<GuessFactory> {
    let factory = GuessFactory::new(
        board.columns(),
        board.colors(),
        settings.match_weight,
        settings.partial_weight,
        settings.crossover,
    );
    let mut engine = match seed {
        Some(seed) => GeneticAlgorithm::with_seed(factory, seed),
        None => GeneticAlgorithm::new(factory),
    };
    engine.generate_pool(settings.pool_size);
    tracing::debug!(pool_size = settings.pool_size, "genetic pool created");
    engine
}

fn report(
    status: &StatusFeed,
    pool: &[PoolMember<ColorSequence>],
    elitism: usize,
    generations: usize,
) {
    let message = format_status(pool, elitism, generations);
    tracing::debug!("{message}");
    status.publish(&message);
}

/// Summary line for one generation: best, elite average, pool average, count
fn format_status(pool: &[PoolMember<ColorSequence>], elitism: usize, generations: usize) -> String {
    let best = pool.first().map_or(0, |member| member.score);
    let elite = average_score(&pool[..elitism.min(pool.len())]);
    let average = average_score(pool);
    format!("Best: {best}, Elite: {elite}, Pool: {average}, Generations: {generations}")
}

fn average_score(members: &[PoolMember<ColorSequence>]) -> i64 {
    if members.is_empty() {
        return 0;
    }
    let total: i64 = members.iter().map(|member| i64::from(member.score)).sum();
    total / members.len() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, BoardSettings, GameState};

    fn small_settings() -> GeneticSettings {
        GeneticSettings {
            pool_size: 120,
            elitism_cutoff: 10,
            max_generations: 60,
            ..Default::default()
        }
    }

    fn board(answer: &[u8]) -> Board {
        Board::new(
            BoardSettings::new(12, 4, 6),
            ColorSequence::new(answer).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn opening_guesses_are_seeds() {
        let mut strategy = GeneticStrategy::with_options(small_settings(), Some(1), AbortSignal::new());
        let mut board = board(&[5, 4, 3, 2]);

        let first = strategy.next_guess(board.view()).unwrap();
        assert_eq!(first.colors(), &[0, 0, 1, 1]);
        board.add_guess(first).unwrap();

        let second = strategy.next_guess(board.view()).unwrap();
        assert_eq!(second.colors(), &[2, 2, 3, 3]);
    }

    #[test]
    fn searched_guess_is_unplayed_and_fits() {
        let mut strategy = GeneticStrategy::with_options(small_settings(), Some(2), AbortSignal::new());
        let mut board = board(&[1, 3, 5, 0]);

        for _ in 0..3 {
            let guess = strategy.next_guess(board.view()).unwrap();
            assert!(!board.view().was_played(&guess));
            assert!(guess.check_colors(6).is_ok());
            board.add_guess(guess).unwrap();
            if board.state() != GameState::InProgress {
                break;
            }
        }
    }

    #[test]
    fn status_reported_per_generation() {
        let mut strategy = GeneticStrategy::with_options(small_settings(), Some(3), AbortSignal::new());
        let (_, rx) = strategy.status().channel();
        let mut board = board(&[2, 2, 4, 1]);

        board.add_guess(ColorSequence::new(&[0, 0, 1, 1]).unwrap()).unwrap();
        board.add_guess(ColorSequence::new(&[2, 2, 3, 3]).unwrap()).unwrap();
        strategy.next_guess(board.view()).unwrap();

        let messages: Vec<String> = rx.try_iter().collect();
        assert!(!messages.is_empty());
        assert!(messages.iter().all(|m| m.starts_with("Best: ")));
        assert!(messages.last().unwrap().contains("Generations: "));
    }

    #[test]
    fn pre_raised_abort_is_cleared_on_entry() {
        let abort = AbortSignal::new();
        let mut strategy = GeneticStrategy::with_options(small_settings(), Some(4), abort.clone());
        abort.raise();

        let board = board(&[0, 1, 2, 3]);
        strategy.next_guess(board.view()).unwrap();
        assert!(!abort.is_raised());
    }

    #[test]
    fn abort_during_search_stops_after_current_generation() {
        let mut strategy = GeneticStrategy::with_options(small_settings(), Some(5), AbortSignal::new());
        let abort = strategy.abort_signal();
        strategy.status().subscribe(move |_| abort.raise());
        let (_, rx) = strategy.status().channel();

        // Only colors 6 and 7 appear, so the three seeds all miss entirely
        let mut board = Board::new(
            BoardSettings::new(12, 8, 8),
            ColorSequence::new(&[6, 7, 6, 7, 6, 7, 6, 7]).unwrap(),
        )
        .unwrap();
        for _ in 0..3 {
            let seed = strategy.next_guess(board.view()).unwrap();
            board.add_guess(seed).unwrap();
        }
        assert!(rx.try_recv().is_err());

        let guess = strategy.next_guess(board.view()).unwrap();
        let messages: Vec<String> = rx.try_iter().collect();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].ends_with("Generations: 1"));
        assert!(strategy.abort_signal().is_raised());
        assert!(!board.view().was_played(&guess));
        assert!(guess.check_colors(8).is_ok());
    }

    #[test]
    fn settings_are_validated_and_reset_pool() {
        let mut strategy = GeneticStrategy::default();
        let mut settings = strategy.settings();
        settings.pool_size = 1;
        assert!(strategy.set_settings(settings).is_err());
        assert_eq!(strategy.settings().pool_size, 500);

        let settings = small_settings();
        strategy.set_settings(settings.clone()).unwrap();
        assert_eq!(strategy.settings(), settings);
    }

    #[test]
    fn status_line_format() {
        let pool = vec![
            PoolMember {
                item: ColorSequence::zeros(2),
                score: 0,
            },
            PoolMember {
                item: ColorSequence::zeros(2),
                score: -20,
            },
            PoolMember {
                item: ColorSequence::zeros(2),
                score: -70,
            },
        ];
        assert_eq!(
            format_status(&pool, 2, 7),
            "Best: 0, Elite: -10, Pool: -30, Generations: 7"
        );
    }
}
