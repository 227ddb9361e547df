//! Benchmark command
//!
//! Plays many games against random answers and summarizes how a strategy
//! performs.

use crate::core::{Board, BoardSettings, ColorSequence, GameState};
use crate::error::GameError;
use crate::solver::{AbortSignal, Game, Strategy};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
#[derive(Debug)]
pub struct BenchmarkResult {
    /// Games actually played; less than requested if the run was aborted
    pub total_games: usize,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    /// Games lost by running out of rows
    pub failures: usize,
    /// Guesses played per game, lost games included
    pub distribution: FxHashMap<usize, usize>,
    pub average_time: Duration,
    pub duration: Duration,
    pub games_per_second: f64,
    pub aborted: bool,
}

impl BenchmarkResult {
    fn new() -> Self {
        Self {
            total_games: 0,
            total_guesses: 0,
            average_guesses: 0.0,
            min_guesses: 0,
            max_guesses: 0,
            failures: 0,
            distribution: FxHashMap::default(),
            average_time: Duration::ZERO,
            duration: Duration::ZERO,
            games_per_second: 0.0,
            aborted: false,
        }
    }

    fn record(&mut self, guesses: usize, state: GameState) {
        self.min_guesses = if self.total_games == 0 {
            guesses
        } else {
            self.min_guesses.min(guesses)
        };
        self.max_guesses = self.max_guesses.max(guesses);
        self.total_games += 1;
        self.total_guesses += guesses;
        if state == GameState::Lost {
            self.failures += 1;
        }
        *self.distribution.entry(guesses).or_insert(0) += 1;
        self.average_guesses = self.total_guesses as f64 / self.total_games as f64;
    }

    fn finish(&mut self, duration: Duration) {
        self.duration = duration;
        if self.total_games > 0 {
            self.average_time = duration / self.total_games as u32;
            self.games_per_second = self.total_games as f64 / duration.as_secs_f64().max(f64::EPSILON);
        }
    }
}

/// Draw `count` uniformly random answers for `settings`
pub fn random_answers<R: Rng + ?Sized>(
    rng: &mut R,
    settings: BoardSettings,
    count: usize,
) -> Vec<ColorSequence> {
    (0..count)
        .map(|_| ColorSequence::random(rng, settings.colors, settings.columns))
        .collect()
}

/// Progress bar styled like the rest of the CLI
#[must_use]
pub fn progress_bar(games: usize) -> ProgressBar {
    let bar = ProgressBar::new(games as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        bar.set_style(style.progress_chars("█▓▒░"));
    }
    bar
}

/// Play one game per answer, reusing `strategy` between games
///
/// `abort` is checked between games; once raised, the run stops and the
/// result covers the games finished so far.
///
/// # Errors
///
/// Returns the first error a game raises, e.g. an answer that does not fit
/// `settings` or a strategy whose candidate pool exceeds its budget.
pub fn run_benchmark<S: Strategy>(
    strategy: &mut S,
    settings: BoardSettings,
    answers: &[ColorSequence],
    abort: &AbortSignal,
    progress: Option<&ProgressBar>,
) -> Result<BenchmarkResult, GameError> {
    let start = Instant::now();
    let mut result = BenchmarkResult::new();

    for answer in answers {
        if abort.is_raised() {
            tracing::info!(played = result.total_games, "benchmark aborted");
            result.aborted = true;
            break;
        }

        let board = Board::new(settings, answer.clone())?;
        let mut game = Game::new(board, &mut *strategy);
        let state = game.play_out()?;
        result.record(game.board().guesses().len(), state);

        if let Some(bar) = progress {
            bar.inc(1);
            bar.set_message(format!(
                "avg {:.2} guesses, {} failed",
                result.average_guesses, result.failures
            ));
        }
    }

    result.finish(start.elapsed());
    tracing::debug!(
        games = result.total_games,
        average = result.average_guesses,
        failures = result.failures,
        "benchmark finished"
    );
    Ok(result)
}
