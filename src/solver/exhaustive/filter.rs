//! Incremental pruning of an existing candidate pool

use crate::core::{ColorSequence, PlayedRow};
use crate::solver::status::AbortSignal;
use rayon::prelude::*;

/// Pools larger than this are filtered on the rayon pool
pub const PARALLEL_FILTER_THRESHOLD: usize = 50_000;

/// Keep the candidates consistent with every row in `rows`
///
/// `rows` only needs the rows played since the pool was last filtered: the
/// pool already satisfies everything older. Consumes the pool and returns a
/// new one.
///
/// If `abort` is raised mid-pass, the remaining candidates are kept
/// unchecked, so the result is still a superset of the consistent set.
#[must_use]
pub fn filter_pool(
    pool: Vec<ColorSequence>,
    rows: &[PlayedRow],
    abort: &AbortSignal,
) -> Vec<ColorSequence> {
    if rows.is_empty() {
        return pool;
    }

    let keep = |candidate: &ColorSequence| {
        abort.is_raised() || rows.iter().all(|row| row.is_consistent(candidate))
    };

    if pool.len() > PARALLEL_FILTER_THRESHOLD {
        pool.into_par_iter().filter(keep).collect()
    } else {
        pool.into_iter().filter(keep).collect()
    }
}
