//! Single game command
//!
//! Plays one game against a known answer and records every turn.

use crate::core::{Board, BoardSettings, ColorSequence, Feedback, GameState};
use crate::error::GameError;
use crate::solver::{Game, Strategy};
use rand::Rng;
use std::time::{Duration, Instant};

/// Configuration for solving one game
pub struct SolveConfig {
    pub settings: BoardSettings,
    pub answer: ColorSequence,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(settings: BoardSettings, answer: ColorSequence) -> Self {
        Self { settings, answer }
    }

    /// A game against a uniformly random answer
    #[must_use]
    pub fn random<R: Rng + ?Sized>(settings: BoardSettings, rng: &mut R) -> Self {
        let answer = ColorSequence::random(rng, settings.colors, settings.columns);
        Self { settings, answer }
    }
}

/// Result of solving one game
pub struct SolveResult {
    pub state: GameState,
    pub steps: Vec<GuessStep>,
    pub answer: ColorSequence,
    pub duration: Duration,
}

impl SolveResult {
    #[must_use]
    pub fn success(&self) -> bool {
        self.state == GameState::Won
    }
}

/// A single turn of the game
pub struct GuessStep {
    pub guess: ColorSequence,
    pub feedback: Feedback,
    /// Last status line the strategy published for this turn, if any
    pub status: Option<String>,
    pub duration: Duration,
}

/// Play a full game with `strategy`
///
/// # Errors
///
/// Returns an error if:
/// - The answer does not fit the board settings
/// - The strategy cannot search (e.g. the candidate pool exceeds its budget)
pub fn solve_game<S: Strategy>(config: SolveConfig, strategy: S) -> Result<SolveResult, GameError> {
    let board = Board::new(config.settings, config.answer.clone())?;
    let mut game = Game::new(board, strategy);
    let (subscription, status) = game.strategy().status().channel();

    let start = Instant::now();
    let mut steps = Vec::new();

    loop {
        let turn_start = Instant::now();
        let Some(row) = game.generate_guess()? else {
            break;
        };

        steps.push(GuessStep {
            guess: row.guess().clone(),
            feedback: row.feedback(),
            status: status.try_iter().last().filter(|line| !line.is_empty()),
            duration: turn_start.elapsed(),
        });
    }

    game.strategy().status().unsubscribe(subscription);

    Ok(SolveResult {
        state: game.state(),
        steps,
        answer: config.answer,
        duration: start.elapsed(),
    })
}
