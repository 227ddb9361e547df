//! Enumeration of every candidate consistent with the played rows
//!
//! The search space is `colors^columns`. One rayon task is spawned per color
//! of the first column; each walks the remaining columns depth-first and keeps
//! only complete rows that reproduce every recorded feedback.

use crate::core::{ColorSequence, Feedback, PlayedRow};
use crate::solver::status::AbortSignal;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Accepted candidates between two memory estimates
pub const MEMORY_CHECK_INTERVAL: usize = 20_000;

const BYTES_PER_MB: usize = 1024 * 1024;

const SLOT_BYTES: usize = std::mem::size_of::<ColorSequence>();

/// Result of an enumeration
#[derive(Debug)]
pub enum Enumeration {
    /// Every consistent candidate
    Complete(Vec<ColorSequence>),
    /// Stopped by the abort signal; holds whatever was found so far
    Aborted(Vec<ColorSequence>),
    /// The candidates found would exceed the memory budget
    OverBudget,
}

struct Search<'a> {
    columns: usize,
    colors: u8,
    midpoint: usize,
    history: &'a [PlayedRow],
    footprint: usize,
    budget_bytes: usize,
    accepted: AtomicUsize,
    /// Slots allocated across all branch buffers, spare capacity included
    reserved: AtomicUsize,
    over_budget: AtomicBool,
    abort: &'a AbortSignal,
}

impl Search<'_> {
    #[inline]
    fn stopped(&self) -> bool {
        self.abort.is_raised() || self.over_budget.load(Ordering::Relaxed)
    }

    /// Cheap early exit: too many exact matches in the assigned prefix
    ///
    /// Only exact-match overcount is checked; color overcount is left to the
    /// full consistency test at the leaves.
    fn prefix_possible(&self, prefix: &[u8]) -> bool {
        self.history.iter().all(|row| {
            Feedback::prefix_exact(prefix, row.guess(), prefix.len()) <= row.feedback().exact()
        })
    }

    fn descend(&self, row: &mut [u8], depth: usize, out: &mut Vec<ColorSequence>) {
        if self.stopped() {
            return;
        }

        if depth == self.columns {
            self.accept(row, out);
            return;
        }

        if depth == self.midpoint && !self.prefix_possible(&row[..depth]) {
            return;
        }

        for color in 0..self.colors {
            row[depth] = color;
            self.descend(row, depth + 1, out);
            if self.stopped() {
                return;
            }
        }
    }

    fn accept(&self, row: &[u8], out: &mut Vec<ColorSequence>) {
        if !self.history.iter().all(|played| played.admits(row)) {
            return;
        }
        let capacity = out.capacity();
        out.push(ColorSequence::from_slice(row));
        if out.capacity() > capacity {
            self.reserved
                .fetch_add(out.capacity() - capacity, Ordering::Relaxed);
        }

        let accepted = self.accepted.fetch_add(1, Ordering::Relaxed) + 1;
        if accepted % MEMORY_CHECK_INTERVAL == 0 && self.estimate(accepted) > self.budget_bytes {
            self.over_budget.store(true, Ordering::Relaxed);
        }
    }

    /// Bytes held once the branches are merged into one pool
    ///
    /// Every accepted row plus its handle lives in a branch buffer, the
    /// buffers also hold spare capacity, and the merged pool needs one more
    /// handle per row.
    fn estimate(&self, accepted: usize) -> usize {
        let spare = self
            .reserved
            .load(Ordering::Relaxed)
            .saturating_sub(accepted);
        accepted
            .saturating_mul(self.footprint)
            .saturating_add(spare.saturating_mul(SLOT_BYTES))
            .saturating_add(accepted.saturating_mul(SLOT_BYTES))
    }
}

/// Enumerate all `colors^columns` rows, keeping those consistent with `history`
///
/// The memory estimate covers the accepted rows, the spare capacity of the
/// per-branch buffers and the merged pool. It is sampled every
/// [`MEMORY_CHECK_INTERVAL`] acceptances and compared against `budget_mb`.
#[must_use]
pub fn enumerate(
    columns: usize,
    colors: u8,
    history: &[PlayedRow],
    budget_mb: usize,
    abort: &AbortSignal,
) -> Enumeration {
    let search = Search {
        columns,
        colors,
        midpoint: columns / 2,
        history,
        footprint: ColorSequence::footprint(columns),
        budget_bytes: budget_mb.saturating_mul(BYTES_PER_MB),
        accepted: AtomicUsize::new(0),
        reserved: AtomicUsize::new(0),
        over_budget: AtomicBool::new(false),
        abort,
    };

    let branches: Vec<Vec<ColorSequence>> = (0..colors)
        .into_par_iter()
        .map(|first| {
            let mut row = vec![0u8; columns];
            row[0] = first;
            let mut found = Vec::new();
            search.descend(&mut row, 1, &mut found);
            found
        })
        .collect();

    if search.over_budget.load(Ordering::Relaxed) {
        return Enumeration::OverBudget;
    }

    let pool = branches.concat();
    if abort.is_raised() {
        Enumeration::Aborted(pool)
    } else {
        Enumeration::Complete(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, BoardSettings};

    fn row(colors: &[u8]) -> ColorSequence {
        ColorSequence::new(colors).unwrap()
    }

    fn complete(result: Enumeration) -> Vec<ColorSequence> {
        match result {
            Enumeration::Complete(pool) => pool,
            other => panic!("expected a complete enumeration, got {other:?}"),
        }
    }

    fn played(settings: BoardSettings, answer: &[u8], guesses: &[&[u8]]) -> Vec<PlayedRow> {
        let mut board = Board::new(settings, row(answer)).unwrap();
        for guess in guesses {
            board.add_guess(row(guess)).unwrap();
        }
        board.guesses().to_vec()
    }

    #[test]
    fn unconstrained_enumeration_is_full_product() {
        let pool = complete(enumerate(3, 2, &[], 64, &AbortSignal::new()));
        assert_eq!(pool.len(), 8);

        let unique: rustc_hash::FxHashSet<_> = pool.iter().collect();
        assert_eq!(unique.len(), 8);

        let pool = complete(enumerate(4, 5, &[], 64, &AbortSignal::new()));
        assert_eq!(pool.len(), 625);

        let pool = complete(enumerate(1, 3, &[], 64, &AbortSignal::new()));
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn enumeration_matches_brute_force_filter() {
        let settings = BoardSettings::new(10, 4, 4);
        let history = played(settings, &[3, 0, 0, 2], &[&[0, 0, 1, 1], &[2, 2, 3, 3]]);

        let mut pool = complete(enumerate(4, 4, &history, 64, &AbortSignal::new()));
        pool.sort();

        let mut expected: Vec<ColorSequence> = complete(enumerate(4, 4, &[], 64, &AbortSignal::new()))
            .into_iter()
            .filter(|c| history.iter().all(|r| r.is_consistent(c)))
            .collect();
        expected.sort();

        assert_eq!(pool, expected);
        assert!(pool.contains(&row(&[3, 0, 0, 2])));
    }

    #[test]
    fn answer_survives_enumeration() {
        let settings = BoardSettings::new(10, 5, 6);
        let answer = [5, 1, 1, 0, 4];
        let history = played(
            settings,
            &answer,
            &[&[0, 0, 1, 1, 1], &[2, 2, 3, 3, 3], &[5, 1, 0, 4, 4]],
        );

        let pool = complete(enumerate(5, 6, &history, 64, &AbortSignal::new()));
        assert!(pool.contains(&row(&answer)));
        assert!(pool.iter().all(|c| history.iter().all(|r| r.is_consistent(c))));
    }

    #[test]
    fn tiny_budget_aborts() {
        // 7^6 = 117,649 unconstrained candidates, far over a 1 MB budget
        assert!(matches!(
            enumerate(6, 7, &[], 1, &AbortSignal::new()),
            Enumeration::OverBudget
        ));
    }

    #[test]
    fn budget_covers_spare_capacity_and_merge() {
        // 8^6 = 262,144 rows take about 5.8 MB as stored sequences alone,
        // but more than 8 MB once buffers and the merged pool are counted
        assert!(matches!(
            enumerate(6, 8, &[], 8, &AbortSignal::new()),
            Enumeration::OverBudget
        ));
        assert!(matches!(
            enumerate(6, 8, &[], 32, &AbortSignal::new()),
            Enumeration::Complete(pool) if pool.len() == 262_144
        ));
    }

    #[test]
    fn raised_abort_stops_early() {
        let abort = AbortSignal::new();
        abort.raise();
        match enumerate(6, 7, &[], 4096, &abort) {
            Enumeration::Aborted(pool) => assert!(pool.is_empty()),
            other => panic!("expected an aborted enumeration, got {other:?}"),
        }
    }
}
