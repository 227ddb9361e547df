//! Parallel in-place sorting
//!
//! Small slices are sorted on the calling thread; rayon's work-stealing sort
//! only pays off once there is enough data to split.

use rayon::prelude::*;
use std::cmp::Ordering;

/// Below this length the sequential sort is used
pub const PARALLEL_THRESHOLD: usize = 2048;

/// Sort `items` in place by `compare`, in parallel when the slice is large
///
/// The sort is unstable: elements that compare equal may end up in any
/// relative order.
///
/// # Examples
/// ```
/// use mastermind_solver::solver::par_sort_by;
///
/// let mut values = vec![3, 1, 2];
/// par_sort_by(&mut values, |a, b| b.cmp(a));
/// assert_eq!(values, [3, 2, 1]);
/// ```
pub fn par_sort_by<T, F>(items: &mut [T], compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if items.len() < PARALLEL_THRESHOLD {
        items.sort_unstable_by(compare);
    } else {
        items.par_sort_unstable_by(compare);
    }
}
