//! Game board: hidden answer, played rows and game state

use super::{ColorSequence, Feedback, MAX_COLORS, MAX_COLUMNS};
use crate::error::{BoardError, ConfigError};
use serde::{Deserialize, Serialize};

/// Shape of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Number of guesses allowed before the game is lost
    pub rows: usize,
    /// Pegs per row
    pub columns: usize,
    /// Distinct colors in play
    pub colors: u8,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 4,
            colors: 7,
        }
    }
}

impl BoardSettings {
    #[must_use]
    pub const fn new(rows: usize, columns: usize, colors: u8) -> Self {
        Self {
            rows,
            columns,
            colors,
        }
    }

    /// Validate the board shape.
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` describing the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be >= 1".into()));
        }
        if self.columns == 0 || self.columns > MAX_COLUMNS {
            return Err(ConfigError::Validation(format!(
                "board.columns must be in 1..={MAX_COLUMNS}"
            )));
        }
        if self.colors == 0 || self.colors > MAX_COLORS {
            return Err(ConfigError::Validation(format!(
                "board.colors must be in 1..={MAX_COLORS}"
            )));
        }
        Ok(())
    }
}

/// State of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

/// A guess together with the feedback the board gave it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayedRow {
    guess: ColorSequence,
    feedback: Feedback,
}

impl PlayedRow {
    pub(crate) const fn new(guess: ColorSequence, feedback: Feedback) -> Self {
        Self { guess, feedback }
    }

    #[inline]
    #[must_use]
    pub const fn guess(&self) -> &ColorSequence {
        &self.guess
    }

    #[inline]
    #[must_use]
    pub const fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// Check if `candidate` could be the answer given this row
    ///
    /// True when scoring the candidate against this row's guess reproduces the
    /// recorded feedback exactly.
    #[inline]
    #[must_use]
    pub fn is_consistent(&self, candidate: &ColorSequence) -> bool {
        self.admits(candidate.colors())
    }

    /// [`PlayedRow::is_consistent`] on a raw color slice
    #[inline]
    #[must_use]
    pub fn admits(&self, candidate: &[u8]) -> bool {
        Feedback::score_colors(candidate, self.guess.colors()) == self.feedback
    }
}

/// Notification sent to board observers
#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// A guess was scored and appended
    GuessAdded(PlayedRow),
    /// The game state changed (win, loss, or reset back to in progress)
    StateChanged(GameState),
    /// All rows were cleared
    Cleared,
}

type Observer = Box<dyn FnMut(&BoardEvent) + Send>;

/// Read-only view of a board handed to strategies
///
/// Deliberately has no access to the answer.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    columns: usize,
    colors: u8,
    guesses: &'a [PlayedRow],
}

impl<'a> BoardView<'a> {
    #[must_use]
    pub const fn new(columns: usize, colors: u8, guesses: &'a [PlayedRow]) -> Self {
        Self {
            columns,
            colors,
            guesses,
        }
    }

    #[inline]
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    #[must_use]
    pub const fn colors(&self) -> u8 {
        self.colors
    }

    #[inline]
    #[must_use]
    pub const fn guesses(&self) -> &'a [PlayedRow] {
        self.guesses
    }

    /// The most recently played row, if any
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&'a PlayedRow> {
        self.guesses.last()
    }

    /// Check if a sequence has already been played
    #[must_use]
    pub fn was_played(&self, candidate: &ColorSequence) -> bool {
        self.guesses.iter().any(|row| row.guess() == candidate)
    }
}

/// A Mastermind board
pub struct Board {
    settings: BoardSettings,
    answer: ColorSequence,
    guesses: Vec<PlayedRow>,
    state: GameState,
    observers: Vec<Observer>,
}

impl Board {
    /// Create a new board for the given answer
    ///
    /// # Errors
    /// Returns `BoardError` if the answer does not fit the board shape.
    pub fn new(settings: BoardSettings, answer: ColorSequence) -> Result<Self, BoardError> {
        if answer.len() != settings.columns {
            return Err(BoardError::ShapeMismatch {
                expected: settings.columns,
                got: answer.len(),
            });
        }
        answer.check_colors(settings.colors)?;

        Ok(Self {
            settings,
            answer,
            guesses: Vec::with_capacity(settings.rows),
            state: GameState::InProgress,
            observers: Vec::new(),
        })
    }

    /// Register a callback for board changes
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&BoardEvent) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    #[inline]
    #[must_use]
    pub const fn settings(&self) -> BoardSettings {
        self.settings
    }

    #[inline]
    #[must_use]
    pub const fn answer(&self) -> &ColorSequence {
        &self.answer
    }

    #[inline]
    #[must_use]
    pub fn guesses(&self) -> &[PlayedRow] {
        &self.guesses
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// A view of the board without the answer
    #[must_use]
    pub fn view(&self) -> BoardView<'_> {
        BoardView::new(self.settings.columns, self.settings.colors, &self.guesses)
    }

    /// Score a guess and append it to the board
    ///
    /// # Errors
    /// Returns `BoardError::GameOver` if the game is already won or lost, or a
    /// shape error if the guess does not fit the board. Nothing is recorded
    /// in either case.
    pub fn add_guess(&mut self, guess: ColorSequence) -> Result<&PlayedRow, BoardError> {
        if self.state != GameState::InProgress {
            return Err(BoardError::GameOver(self.state));
        }
        if guess.len() != self.settings.columns {
            return Err(BoardError::ShapeMismatch {
                expected: self.settings.columns,
                got: guess.len(),
            });
        }
        guess.check_colors(self.settings.colors)?;

        let feedback = Feedback::score(&guess, &self.answer);
        let row = PlayedRow::new(guess, feedback);
        self.notify(&BoardEvent::GuessAdded(row.clone()));
        self.guesses.push(row);

        if feedback.is_win(self.settings.columns) {
            self.set_state(GameState::Won);
        } else if self.guesses.len() >= self.settings.rows {
            self.set_state(GameState::Lost);
        }

        Ok(&self.guesses[self.guesses.len() - 1])
    }

    /// Clear all rows and return to in progress, keeping the answer
    pub fn reset(&mut self) {
        self.guesses.clear();
        self.notify(&BoardEvent::Cleared);
        self.set_state(GameState::InProgress);
    }

    fn set_state(&mut self, state: GameState) {
        self.state = state;
        self.notify(&BoardEvent::StateChanged(state));
    }

    fn notify(&mut self, event: &BoardEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn row(colors: &[u8]) -> ColorSequence {
        ColorSequence::new(colors).unwrap()
    }

    fn board(rows: usize) -> Board {
        Board::new(BoardSettings::new(rows, 4, 6), row(&[0, 1, 2, 3])).unwrap()
    }

    #[test]
    fn board_rejects_bad_answer() {
        let settings = BoardSettings::new(10, 4, 6);
        assert!(matches!(
            Board::new(settings, row(&[0, 1, 2])),
            Err(BoardError::ShapeMismatch {
                expected: 4,
                got: 3
            })
        ));
        assert!(matches!(
            Board::new(settings, row(&[0, 1, 2, 6])),
            Err(BoardError::Sequence(_))
        ));
    }

    #[test]
    fn add_guess_scores_and_records() {
        let mut board = board(10);
        let played = board.add_guess(row(&[1, 1, 1, 1])).unwrap();
        assert_eq!(played.feedback(), Feedback::new(1, 0));
        assert_eq!(board.guesses().len(), 1);
        assert_eq!(board.state(), GameState::InProgress);
    }

    #[test]
    fn add_guess_wins() {
        let mut board = board(10);
        board.add_guess(row(&[0, 1, 2, 3])).unwrap();
        assert_eq!(board.state(), GameState::Won);

        // Terminal: nothing more is accepted
        assert_eq!(
            board.add_guess(row(&[0, 0, 0, 0])).unwrap_err(),
            BoardError::GameOver(GameState::Won)
        );
        assert_eq!(board.guesses().len(), 1);
    }

    #[test]
    fn add_guess_loses_at_row_limit() {
        let mut board = board(2);
        board.add_guess(row(&[0, 0, 0, 0])).unwrap();
        assert_eq!(board.state(), GameState::InProgress);
        board.add_guess(row(&[1, 1, 1, 1])).unwrap();
        assert_eq!(board.state(), GameState::Lost);
        assert!(board.add_guess(row(&[0, 1, 2, 3])).is_err());
        assert_eq!(board.guesses().len(), 2);
    }

    #[test]
    fn win_on_last_row_is_a_win() {
        let mut board = board(1);
        board.add_guess(row(&[0, 1, 2, 3])).unwrap();
        assert_eq!(board.state(), GameState::Won);
    }

    #[test]
    fn add_guess_rejects_wrong_shape() {
        let mut board = board(10);
        assert!(board.add_guess(row(&[0, 1, 2])).is_err());
        assert!(board.add_guess(row(&[0, 1, 2, 9])).is_err());
        assert!(board.guesses().is_empty());
    }

    #[test]
    fn observers_see_adds_and_transitions() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);

        let mut board = board(10);
        board.subscribe(move |event| {
            let label = match event {
                BoardEvent::GuessAdded(_) => "added",
                BoardEvent::StateChanged(GameState::Won) => "won",
                BoardEvent::StateChanged(_) => "state",
                BoardEvent::Cleared => "cleared",
            };
            sink.lock().unwrap().push(label);
        });

        board.add_guess(row(&[1, 1, 1, 1])).unwrap();
        board.add_guess(row(&[0, 1, 2, 3])).unwrap();
        board.reset();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["added", "added", "won", "cleared", "state"]
        );
        assert_eq!(board.state(), GameState::InProgress);
        assert!(board.guesses().is_empty());
    }

    #[test]
    fn played_rows_are_consistent_with_answer() {
        let mut board = board(10);
        for guess in [&[0u8, 0, 1, 1][..], &[2, 3, 3, 2], &[4, 5, 0, 1]] {
            board.add_guess(row(guess)).unwrap();
        }

        let answer = board.answer().clone();
        assert!(board.guesses().iter().all(|r| r.is_consistent(&answer)));
    }

    #[test]
    fn view_hides_answer_but_exposes_history() {
        let mut board = board(10);
        board.add_guess(row(&[5, 5, 5, 5])).unwrap();

        let view = board.view();
        assert_eq!(view.columns(), 4);
        assert_eq!(view.colors(), 6);
        assert_eq!(view.guesses().len(), 1);
        assert!(view.was_played(&row(&[5, 5, 5, 5])));
        assert!(!view.was_played(&row(&[0, 1, 2, 3])));
        assert_eq!(view.last().unwrap().feedback(), Feedback::new(0, 0));
    }

    #[test]
    fn settings_validation() {
        assert!(BoardSettings::default().validate().is_ok());
        assert!(BoardSettings::new(0, 4, 6).validate().is_err());
        assert!(BoardSettings::new(10, 0, 6).validate().is_err());
        assert!(BoardSettings::new(10, 17, 6).validate().is_err());
        assert!(BoardSettings::new(10, 4, 0).validate().is_err());
        assert!(BoardSettings::new(10, 4, 21).validate().is_err());
    }
}
