//! Mastermind feedback calculation and representation
//!
//! Feedback is a pair of peg counts:
//! - exact: right color in the right column
//! - color: right color in the wrong column, never reusing a peg that was
//!   already counted

use super::{ColorSequence, MAX_COLUMNS};
use std::fmt;

/// Score of a guess against an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Feedback {
    exact: u8,
    color: u8,
}

impl Feedback {
    /// Create feedback from raw counts
    #[inline]
    #[must_use]
    pub const fn new(exact: u8, color: u8) -> Self {
        Self { exact, color }
    }

    /// Pegs with correct color and position
    #[inline]
    #[must_use]
    pub const fn exact(self) -> u8 {
        self.exact
    }

    /// Pegs with correct color in the wrong position
    #[inline]
    #[must_use]
    pub const fn color(self) -> u8 {
        self.color
    }

    /// Check if this feedback wins a board with `columns` columns
    #[inline]
    #[must_use]
    pub const fn is_win(self, columns: usize) -> bool {
        self.exact as usize == columns
    }

    /// Calculate the feedback when `guess` is played against `answer`
    ///
    /// # Algorithm
    /// 1. First pass: every column where the colors agree is an exact match;
    ///    that column is consumed on both sides
    /// 2. Second pass: for each unconsumed guess column, scan the unconsumed
    ///    answer columns left to right and take the first one with the same
    ///    color
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::{ColorSequence, Feedback};
    ///
    /// let answer = ColorSequence::new(&[0, 1, 2, 3]).unwrap();
    /// let guess = ColorSequence::new(&[1, 1, 1, 1]).unwrap();
    ///
    /// assert_eq!(Feedback::score(&guess, &answer), Feedback::new(1, 0));
    /// ```
    #[must_use]
    pub fn score(guess: &ColorSequence, answer: &ColorSequence) -> Self {
        Self::score_colors(guess.colors(), answer.colors())
    }

    /// [`Feedback::score`] on raw color slices of equal length
    #[must_use]
    pub fn score_colors(guess: &[u8], answer: &[u8]) -> Self {
        debug_assert_eq!(guess.len(), answer.len());

        let mut answer_used = [false; MAX_COLUMNS];
        let mut guess_used = [false; MAX_COLUMNS];
        let mut exact = 0u8;
        let mut color = 0u8;

        for i in 0..guess.len() {
            if guess[i] == answer[i] {
                exact += 1;
                answer_used[i] = true;
                guess_used[i] = true;
            }
        }

        for i in 0..guess.len() {
            if guess_used[i] {
                continue;
            }
            for j in 0..answer.len() {
                if !answer_used[j] && guess[i] == answer[j] {
                    color += 1;
                    answer_used[j] = true;
                    break;
                }
            }
        }

        Self { exact, color }
    }

    /// Count exact matches in the first `prefix` columns only
    #[inline]
    #[must_use]
    pub fn prefix_exact(candidate: &[u8], guess: &ColorSequence, prefix: usize) -> u8 {
        candidate[..prefix]
            .iter()
            .zip(guess.colors())
            .filter(|(a, b)| a == b)
            .count() as u8
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} exact, {} color", self.exact, self.color)
    }
}
