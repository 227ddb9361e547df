//! Game driver pairing a board with a strategy

use super::strategy::Strategy;
use crate::core::{Board, GameState, PlayedRow};
use crate::error::GameError;

/// Plays a strategy's guesses onto a board
///
/// The strategy only ever sees a [`BoardView`](crate::core::BoardView), so it
/// cannot read the answer.
pub struct Game<S: Strategy> {
    board: Board,
    strategy: S,
}

impl<S: Strategy> Game<S> {
    /// Create a new game; the strategy is reset so no state leaks in
    #[must_use]
    pub fn new(board: Board, mut strategy: S) -> Self {
        strategy.reset();
        Self { board, strategy }
    }

    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the board, e.g. to subscribe observers
    #[inline]
    pub const fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline]
    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> GameState {
        self.board.state()
    }

    /// Ask the strategy for a guess and play it
    ///
    /// Returns `Ok(None)` once the game is won or lost.
    ///
    /// # Errors
    /// Returns `GameError::Solver` if the strategy could not search, or
    /// `GameError::Board` if it produced a guess that does not fit the board.
    pub fn generate_guess(&mut self) -> Result<Option<PlayedRow>, GameError> {
        if self.board.state() != GameState::InProgress {
            return Ok(None);
        }

        let guess = self.strategy.next_guess(self.board.view())?;
        let row = self.board.add_guess(guess)?.clone();
        tracing::debug!(
            turn = self.board.guesses().len(),
            guess = %row.guess(),
            feedback = %row.feedback(),
            "guess played"
        );
        Ok(Some(row))
    }

    /// Keep guessing until the game ends
    ///
    /// Terminates because the board refuses guesses after its last row.
    ///
    /// # Errors
    /// Propagates the first error from [`Game::generate_guess`].
    pub fn play_out(&mut self) -> Result<GameState, GameError> {
        while self.generate_guess()?.is_some() {}
        Ok(self.board.state())
    }

    /// Clear the board and the strategy's search state
    pub fn reset(&mut self) {
        self.board.reset();
        self.strategy.reset();
    }

    /// Take back the strategy, e.g. to reuse it for another board
    #[must_use]
    pub fn into_strategy(self) -> S {
        self.strategy
    }
}
