//! Fixed opening guesses
//!
//! The first rounds of a game carry little information for a search to work
//! with, so the opening guesses are built deterministically: guess `k` paints
//! the row with color `2k` and then the right half with color `2k + 1`. Two
//! or three such guesses probe four to six colors before any search runs.

use crate::core::{BoardView, ColorSequence};

/// Check if the next guess should be a seed guess
///
/// Seeds are used for the first two guesses, plus a third on boards wide and
/// colorful enough (`columns > 6 && colors > 5`) that two probes leave too
/// much unexplored.
#[must_use]
pub fn use_seed(board: &BoardView<'_>) -> bool {
    let played = board.guesses().len();
    played < 2 || (played == 2 && board.columns() > 6 && board.colors() > 5)
}

/// Build the seed guess for the round after `board`'s last played row
///
/// Colors that do not exist on the board are skipped, so on small boards the
/// later seeds degrade to all-zero rows.
///
/// # Examples
/// ```
/// use mastermind_solver::core::BoardView;
/// use mastermind_solver::solver::seed_guess;
///
/// let board = BoardView::new(4, 6, &[]);
/// assert_eq!(seed_guess(&board).colors(), &[0, 0, 1, 1]);
/// ```
#[must_use]
pub fn seed_guess(board: &BoardView<'_>) -> ColorSequence {
    let columns = board.columns();
    let colors = usize::from(board.colors());
    let index = 2 * board.guesses().len();

    let mut row = vec![0u8; columns];
    if index < colors {
        row.fill(index as u8);
    }
    if index + 1 < colors {
        row[columns / 2..].fill((index + 1) as u8);
    }

    ColorSequence::from_slice(&row)
}
