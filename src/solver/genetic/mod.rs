//! Genetic search for consistent guesses
//!
//! A generic pool optimizer ([`GeneticAlgorithm`]) driven by a Mastermind
//! fitness function ([`GuessFactory`]) and wrapped as a [`GeneticStrategy`].

mod engine;
mod guess;
mod strategy;

pub use engine::{GeneticAlgorithm, GeneticFactory, PoolMember};
pub use guess::GuessFactory;
pub use strategy::GeneticStrategy;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How two parents are recombined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossoverKind {
    /// Split both parents at one random column and swap the tails
    #[default]
    SinglePoint,
    /// Shuffle the colors of both parents together and deal them out again
    Shuffle,
}

/// Largest accepted `match_weight` or `partial_weight`
pub const MAX_WEIGHT: i32 = 100_000;

/// Tuning parameters for [`GeneticStrategy`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticSettings {
    /// Candidates per generation
    pub pool_size: usize,
    /// Share of non-elite slots filled by crossover
    pub crossover_fraction: f64,
    /// Chance that a crossover parent is mutated first
    pub mutation_probability: f64,
    /// Top members copied unchanged into the next generation
    pub elitism_cutoff: usize,
    /// Penalty per unit of exact-match discrepancy
    pub match_weight: i32,
    /// Penalty per unit of color-match discrepancy
    pub partial_weight: i32,
    /// Generations to run before settling for the best candidate
    pub max_generations: usize,
    pub crossover: CrossoverKind,
    /// Raise the mutation probability as the last guess nears a win
    pub dynamic_mutation: bool,
}

impl Default for GeneticSettings {
    fn default() -> Self {
        Self {
            pool_size: 500,
            crossover_fraction: 0.7,
            mutation_probability: 0.25,
            elitism_cutoff: 20,
            match_weight: 50,
            partial_weight: 20,
            max_generations: 200,
            crossover: CrossoverKind::SinglePoint,
            dynamic_mutation: false,
        }
    }
}

impl GeneticSettings {
    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size < 2 {
            return Err(ConfigError::Validation(
                "genetic.pool_size must be >= 2".into(),
            ));
        }
        if self.elitism_cutoff >= self.pool_size {
            return Err(ConfigError::Validation(
                "genetic.elitism_cutoff must be < genetic.pool_size".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_fraction) {
            return Err(ConfigError::Validation(
                "genetic.crossover_fraction must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ConfigError::Validation(
                "genetic.mutation_probability must be in [0, 1]".into(),
            ));
        }
        if !(0..=MAX_WEIGHT).contains(&self.match_weight)
            || !(0..=MAX_WEIGHT).contains(&self.partial_weight)
        {
            return Err(ConfigError::Validation(format!(
                "genetic.match_weight and genetic.partial_weight must be in [0, {MAX_WEIGHT}]"
            )));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::Validation(
                "genetic.max_generations must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Mutation probability for the next search given the latest feedback
    ///
    /// With `dynamic_mutation` on, once the last guess has at least 80% of the
    /// columns exact, the probability becomes the share of columns still wrong.
    #[must_use]
    pub fn effective_mutation(&self, last_exact: Option<u8>, columns: usize) -> f64 {
        if !self.dynamic_mutation {
            return self.mutation_probability;
        }

        let tipping_point = (columns as f64 * 0.8).floor() as usize;
        match last_exact.map(usize::from) {
            Some(exact) if exact >= tipping_point => {
                columns.saturating_sub(exact) as f64 / columns as f64
            }
            _ => self.mutation_probability,
        }
    }
}
