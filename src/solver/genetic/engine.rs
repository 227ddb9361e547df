//! Generic evolutionary search
//!
//! A fixed-size pool of candidates is scored, sorted best-first and evolved
//! one generation at a time. The problem-specific parts (what a candidate is,
//! how it is scored, crossed and mutated) come from a [`GeneticFactory`].
//!
//! Each generation is written into a second buffer and swapped in whole, so
//! every parent selection in a generation reads the previous pool.

use crate::solver::sort::par_sort_by;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Problem-specific operations plugged into [`GeneticAlgorithm`]
///
/// Fitness is an integer where larger is better. Scoring runs on rayon
/// workers, so it must only read the factory.
pub trait GeneticFactory: Sync {
    type Item: Clone + Send + Sync;

    /// A uniformly random candidate
    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Item;

    /// Fitness of a candidate
    fn score(&self, item: &Self::Item) -> i32;

    /// Recombine two parents into two children
    fn cross<R: Rng + ?Sized>(
        &self,
        a: &Self::Item,
        b: &Self::Item,
        rng: &mut R,
    ) -> (Self::Item, Self::Item);

    /// A randomly altered copy of `item`
    fn mutate<R: Rng + ?Sized>(&self, item: &Self::Item, rng: &mut R) -> Self::Item;
}

/// A candidate and its fitness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolMember<T> {
    pub item: T,
    pub score: i32,
}

impl<T> PoolMember<T> {
    /// Score of a member that has not been evaluated yet
    pub const UNSCORED: i32 = i32::MIN;

    #[inline]
    #[must_use]
    pub const fn unscored(item: T) -> Self {
        Self {
            item,
            score: Self::UNSCORED,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.score != Self::UNSCORED
    }
}

/// Pool-based optimizer over the items of a [`GeneticFactory`]
pub struct GeneticAlgorithm<F: GeneticFactory> {
    factory: F,
    pool: Vec<PoolMember<F::Item>>,
    next_pool: Vec<PoolMember<F::Item>>,
    rng: StdRng,
}

impl<F: GeneticFactory> GeneticAlgorithm<F> {
    /// Create an engine with an empty pool and an entropy-seeded generator
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self::with_rng(factory, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create an engine whose random choices are reproducible
    #[must_use]
    pub fn with_seed(factory: F, seed: u64) -> Self {
        Self::with_rng(factory, StdRng::seed_from_u64(seed))
    }

    fn with_rng(factory: F, rng: StdRng) -> Self {
        Self {
            factory,
            pool: Vec::new(),
            next_pool: Vec::new(),
            rng,
        }
    }

    #[inline]
    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    #[inline]
    pub const fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// The current pool, best first after [`Self::score_and_sort_pool`]
    #[inline]
    #[must_use]
    pub fn pool(&self) -> &[PoolMember<F::Item>] {
        &self.pool
    }

    /// The highest-scoring member, if the pool has been sorted
    #[inline]
    #[must_use]
    pub fn best(&self) -> Option<&PoolMember<F::Item>> {
        self.pool.first()
    }

    /// Replace the pool with `size` random, unscored members
    pub fn generate_pool(&mut self, size: usize) {
        self.pool.clear();
        self.pool.reserve(size);
        for _ in 0..size {
            let item = self.factory.random(&mut self.rng);
            self.pool.push(PoolMember::unscored(item));
        }
        self.next_pool = Vec::with_capacity(size);
    }

    /// Score every member in parallel, then sort by descending fitness
    pub fn score_and_sort_pool(&mut self) {
        let factory = &self.factory;
        self.pool
            .par_iter_mut()
            .for_each(|member| member.score = factory.score(&member.item));

        par_sort_by(&mut self.pool, |a, b| b.score.cmp(&a.score));
    }

    /// Draw an index in `[0, max]` biased toward 0
    ///
    /// Samples the density `p(x) = 1 - x` on `[0, 1)` by inverting its CDF:
    /// with `y` uniform on `[0, 0.5)`, `x = 1 - sqrt(1 - 2y)`. The result is
    /// scaled onto the `max + 1` available indices. Index 0 is about twice as
    /// likely as the middle of the range and the far end is almost never
    /// drawn.
    pub fn select_index_weighted(&mut self, max: usize) -> usize {
        let y = self.rng.random::<f64>() * 0.5;
        let x = 1.0 - (1.0 - 2.0 * y).sqrt();
        let index = (x * (max + 1) as f64).floor() as usize;
        index.min(max)
    }

    /// Draw an index in `[min, max]` biased toward `min`
    pub fn select_index_weighted_from(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        min + self.select_index_weighted(max - min)
    }

    /// Build the next generation
    ///
    /// 1. The first `elitism_cutoff` members are copied unchanged
    /// 2. `floor((size - elitism_cutoff) * crossover_fraction / 2)` pairs of
    ///    parents are drawn from the whole pool, each parent mutated first
    ///    with probability `mutation_probability`, and crossed into two
    ///    children
    /// 3. The remaining slots are filled with mutated copies of parents drawn
    ///    from outside the elite band
    ///
    /// New members are unscored; call [`Self::score_and_sort_pool`] next.
    pub fn evolve(
        &mut self,
        elitism_cutoff: usize,
        crossover_fraction: f64,
        mutation_probability: f64,
    ) {
        let size = self.pool.len();
        if size == 0 {
            return;
        }
        let last = size - 1;
        let elite = elitism_cutoff.min(size);

        self.next_pool.clear();
        self.next_pool.extend(self.pool[..elite].iter().cloned());

        let pairs = ((size - elite) as f64 * crossover_fraction / 2.0).floor() as usize;
        for _ in 0..pairs {
            if self.next_pool.len() + 2 > size {
                break;
            }
            let a = self.select_parent(0, last, mutation_probability);
            let b = self.select_parent(0, last, mutation_probability);
            let (child_a, child_b) = self.factory.cross(&a, &b, &mut self.rng);
            self.next_pool.push(PoolMember::unscored(child_a));
            self.next_pool.push(PoolMember::unscored(child_b));
        }

        let mutation_floor = elite.min(last);
        while self.next_pool.len() < size {
            let index = self.select_index_weighted_from(mutation_floor, last);
            let child = self.factory.mutate(&self.pool[index].item, &mut self.rng);
            self.next_pool.push(PoolMember::unscored(child));
        }

        std::mem::swap(&mut self.pool, &mut self.next_pool);
    }

    /// Clone a weighted-selected parent, mutating it with probability `p`
    fn select_parent(&mut self, min: usize, max: usize, p: f64) -> F::Item {
        let index = self.select_index_weighted_from(min, max);
        let parent = &self.pool[index].item;
        if self.rng.random::<f64>() < p {
            self.factory.mutate(parent, &mut self.rng)
        } else {
            parent.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Maximize the number of set bits in a 16-bit word
    struct BitFactory;

    impl GeneticFactory for BitFactory {
        type Item = u16;

        fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> u16 {
            rng.random()
        }

        fn score(&self, item: &u16) -> i32 {
            item.count_ones() as i32 - 16
        }

        fn cross<R: Rng + ?Sized>(&self, a: &u16, b: &u16, rng: &mut R) -> (u16, u16) {
            let split = rng.random_range(0..16);
            let mask = (1u16 << split).wrapping_sub(1);
            ((a & mask) | (b & !mask), (b & mask) | (a & !mask))
        }

        fn mutate<R: Rng + ?Sized>(&self, item: &u16, rng: &mut R) -> u16 {
            item ^ (1 << rng.random_range(0..16))
        }
    }

    fn engine(size: usize) -> GeneticAlgorithm<BitFactory> {
        let mut engine = GeneticAlgorithm::with_seed(BitFactory, 42);
        engine.generate_pool(size);
        engine
    }

    #[test]
    fn generate_pool_is_unscored() {
        let engine = engine(50);
        assert_eq!(engine.pool().len(), 50);
        assert!(engine.pool().iter().all(|m| !m.is_scored()));
    }

    #[test]
    fn score_and_sort_orders_descending() {
        let mut engine = engine(300);
        engine.score_and_sort_pool();

        assert!(engine.pool().iter().all(PoolMember::is_scored));
        assert!(engine.pool().windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(
            engine.best().unwrap().score,
            engine.pool().iter().map(|m| m.score).max().unwrap()
        );
    }

    #[test]
    fn weighted_selection_favours_low_indices() {
        let mut engine = engine(1);
        let max = 9;
        let mut counts = [0usize; 10];
        for _ in 0..200_000 {
            let index = engine.select_index_weighted(max);
            assert!(index <= max);
            counts[index] += 1;
        }

        // Expected shares fall from ~19% at index 0 to ~1% at index 9
        assert!(counts.windows(2).all(|w| w[0] >= w[1]), "{counts:?}");
        assert!(counts[0] > 5 * counts[9], "{counts:?}");
    }

    #[test]
    fn weighted_selection_reaches_inclusive_max() {
        let mut engine = engine(1);
        let mut seen = [false; 4];
        for _ in 0..10_000 {
            seen[engine.select_index_weighted(3)] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn weighted_selection_with_floor() {
        let mut engine = engine(1);
        for _ in 0..1000 {
            let index = engine.select_index_weighted_from(5, 8);
            assert!((5..=8).contains(&index));
        }
        assert_eq!(engine.select_index_weighted(0), 0);
        assert_eq!(engine.select_index_weighted_from(3, 3), 3);
    }

    #[test]
    fn evolve_keeps_size_and_elites() {
        let mut engine = engine(100);
        engine.score_and_sort_pool();

        for _ in 0..10 {
            let elites: Vec<u16> = engine.pool()[..10].iter().map(|m| m.item).collect();
            let best = engine.best().unwrap().score;

            engine.evolve(10, 0.7, 0.25);
            assert_eq!(engine.pool().len(), 100);
            assert_eq!(
                engine.pool()[..10].iter().map(|m| m.item).collect::<Vec<_>>(),
                elites
            );

            engine.score_and_sort_pool();
            assert!(engine.best().unwrap().score >= best);
            assert!(elites.iter().all(|e| engine.pool().iter().any(|m| m.item == *e)));
        }
    }

    #[test]
    fn evolve_converges_on_easy_problem() {
        let mut engine = engine(200);
        engine.score_and_sort_pool();
        for _ in 0..100 {
            if engine.best().unwrap().score == 0 {
                break;
            }
            engine.evolve(10, 0.7, 0.25);
            engine.score_and_sort_pool();
        }
        assert_eq!(engine.best().unwrap().score, 0);
    }

    #[test]
    fn evolve_handles_degenerate_settings() {
        // Elitism covering the whole pool copies it verbatim
        let mut engine = engine(20);
        engine.score_and_sort_pool();
        let before: Vec<u16> = engine.pool().iter().map(|m| m.item).collect();
        engine.evolve(50, 1.0, 1.0);
        assert_eq!(
            engine.pool().iter().map(|m| m.item).collect::<Vec<_>>(),
            before
        );

        // No crossover, no elites: every slot comes from mutation
        engine.evolve(0, 0.0, 0.0);
        assert_eq!(engine.pool().len(), 20);

        let mut empty = GeneticAlgorithm::with_seed(BitFactory, 1);
        empty.evolve(2, 0.7, 0.25);
        assert!(empty.pool().is_empty());
    }
}
