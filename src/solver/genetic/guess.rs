//! Mastermind candidates for the genetic engine
//!
//! A candidate's fitness is how far it is from being consistent with the
//! board: for every played row, the candidate is scored against that row's
//! guess and the result compared with the recorded feedback. A candidate that
//! could still be the answer scores exactly 0.

use super::CrossoverKind;
use super::engine::GeneticFactory;
use crate::core::{ColorSequence, Feedback, PlayedRow};
use rand::Rng;
use rand::seq::{SliceRandom, index};

/// Creates, scores and recombines candidate guesses for one board
#[derive(Debug, Clone)]
pub struct GuessFactory {
    columns: usize,
    colors: u8,
    match_weight: i32,
    partial_weight: i32,
    crossover: CrossoverKind,
    history: Vec<PlayedRow>,
}

impl GuessFactory {
    #[must_use]
    pub const fn new(
        columns: usize,
        colors: u8,
        match_weight: i32,
        partial_weight: i32,
        crossover: CrossoverKind,
    ) -> Self {
        Self {
            columns,
            colors,
            match_weight,
            partial_weight,
            crossover,
            history: Vec::new(),
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

    /// Replace the rows candidates are scored against
    pub fn set_history(&mut self, rows: &[PlayedRow]) {
        self.history.clear();
        self.history.extend_from_slice(rows);
    }

    /// Penalty of `candidate` against a single played row
    ///
    /// `-match_weight * |exact difference| - partial_weight * |color difference|`
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::{Board, BoardSettings, ColorSequence};
    /// use mastermind_solver::solver::{CrossoverKind, GuessFactory};
    ///
    /// let answer = ColorSequence::new(&[0, 1, 2, 3]).unwrap();
    /// let mut board = Board::new(BoardSettings::new(10, 4, 6), answer).unwrap();
    /// let row = board.add_guess(ColorSequence::new(&[1, 1, 1, 1]).unwrap()).unwrap();
    ///
    /// let factory = GuessFactory::new(4, 6, 50, 20, CrossoverKind::SinglePoint);
    /// let candidate = ColorSequence::new(&[1, 1, 2, 2]).unwrap();
    /// assert_eq!(factory.penalty(&candidate, row), -50);
    /// ```
    #[must_use]
    pub fn penalty(&self, candidate: &ColorSequence, row: &PlayedRow) -> i32 {
        let observed = Feedback::score(candidate, row.guess());
        let recorded = row.feedback();

        let exact_diff = i32::from(observed.exact().abs_diff(recorded.exact()));
        let color_diff = i32::from(observed.color().abs_diff(recorded.color()));

        self.match_weight
            .saturating_mul(exact_diff)
            .saturating_add(self.partial_weight.saturating_mul(color_diff))
            .saturating_neg()
    }

    fn cross_single_point<R: Rng + ?Sized>(
        &self,
        a: &ColorSequence,
        b: &ColorSequence,
        rng: &mut R,
    ) -> (ColorSequence, ColorSequence) {
        let split = rng.random_range(0..self.columns);

        let mut child_a = Vec::with_capacity(self.columns);
        child_a.extend_from_slice(&a.colors()[..split]);
        child_a.extend_from_slice(&b.colors()[split..]);

        let mut child_b = Vec::with_capacity(self.columns);
        child_b.extend_from_slice(&b.colors()[..split]);
        child_b.extend_from_slice(&a.colors()[split..]);

        (
            ColorSequence::from_slice(&child_a),
            ColorSequence::from_slice(&child_b),
        )
    }

    /// Pool both parents' colors, shuffle, and deal them back out
    fn cross_shuffle<R: Rng + ?Sized>(
        &self,
        a: &ColorSequence,
        b: &ColorSequence,
        rng: &mut R,
    ) -> (ColorSequence, ColorSequence) {
        let mut genes = Vec::with_capacity(self.columns * 2);
        genes.extend_from_slice(a.colors());
        genes.extend_from_slice(b.colors());
        genes.shuffle(rng);

        let (left, right) = genes.split_at(self.columns);
        (ColorSequence::from_slice(left), ColorSequence::from_slice(right))
    }
}

impl GeneticFactory for GuessFactory {
    type Item = ColorSequence;

    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> ColorSequence {
        ColorSequence::random(rng, self.colors, self.columns)
    }

    fn score(&self, item: &ColorSequence) -> i32 {
        self.history
            .iter()
            .fold(0i32, |total, row| total.saturating_add(self.penalty(item, row)))
    }

    fn cross<R: Rng + ?Sized>(
        &self,
        a: &ColorSequence,
        b: &ColorSequence,
        rng: &mut R,
    ) -> (ColorSequence, ColorSequence) {
        match self.crossover {
            CrossoverKind::SinglePoint => self.cross_single_point(a, b, rng),
            CrossoverKind::Shuffle => self.cross_shuffle(a, b, rng),
        }
    }

    /// Recolor between 1 and `columns / 2` distinct columns
    fn mutate<R: Rng + ?Sized>(&self, item: &ColorSequence, rng: &mut R) -> ColorSequence {
        let max_changes = (self.columns / 2).max(1);
        let changes = rng.random_range(1..=max_changes);

        let mut colors = item.colors().to_vec();
        for column in index::sample(rng, self.columns, changes) {
            colors[column] = rng.random_range(0..self.colors);
        }

        ColorSequence::from_slice(&colors)
    }
}
