//! Mastermind color sequence representation
//!
//! A `ColorSequence` is one row of pegs: a fixed-length list of color ids.

use crate::error::SequenceError;
use rand::Rng;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Largest supported number of columns on a board
pub const MAX_COLUMNS: usize = 16;

/// Largest supported number of colors on a board
pub const MAX_COLORS: u8 = 20;

/// An immutable row of color ids
///
/// Equality and hashing are element-wise. Cloning copies the colors, so two
/// sequences never alias each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorSequence {
    colors: Box<[u8]>,
}

impl ColorSequence {
    /// Create a sequence from explicit colors
    ///
    /// # Errors
    /// Returns `SequenceError::InvalidLength` if the slice is empty or longer
    /// than [`MAX_COLUMNS`].
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::ColorSequence;
    ///
    /// let row = ColorSequence::new(&[0, 1, 2, 3]).unwrap();
    /// assert_eq!(row.len(), 4);
    /// assert_eq!(row[2], 2);
    ///
    /// assert!(ColorSequence::new(&[]).is_err());
    /// ```
    pub fn new(colors: &[u8]) -> Result<Self, SequenceError> {
        if colors.is_empty() || colors.len() > MAX_COLUMNS {
            return Err(SequenceError::InvalidLength {
                len: colors.len(),
                max: MAX_COLUMNS,
            });
        }

        Ok(Self {
            colors: colors.into(),
        })
    }

    /// Create a sequence without validating its length
    #[inline]
    #[must_use]
    pub(crate) fn from_slice(colors: &[u8]) -> Self {
        debug_assert!(!colors.is_empty() && colors.len() <= MAX_COLUMNS);
        Self {
            colors: colors.into(),
        }
    }

    /// The all-zero sequence for a board with `columns` columns
    ///
    /// Used as the deterministic fallback guess.
    #[must_use]
    pub fn zeros(columns: usize) -> Self {
        Self::from_slice(&vec![0; columns])
    }

    /// Sample every column uniformly from `[0, colors)`
    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, colors: u8, columns: usize) -> Self {
        let colors: Vec<u8> = (0..columns).map(|_| rng.random_range(0..colors)).collect();
        Self::from_slice(&colors)
    }

    /// Check that every color lies in `[0, colors)`
    ///
    /// # Errors
    /// Returns the first out-of-range color.
    pub fn check_colors(&self, colors: u8) -> Result<(), SequenceError> {
        match self.colors.iter().find(|&&c| c >= colors) {
            Some(&color) => Err(SequenceError::ColorOutOfRange { color, colors }),
            None => Ok(()),
        }
    }

    /// Number of columns
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a validated sequence; provided for API completeness
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colors as a slice
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    /// Heap and inline bytes held by one sequence of `columns` columns
    ///
    /// Used to estimate the memory footprint of large candidate pools.
    #[must_use]
    pub const fn footprint(columns: usize) -> usize {
        std::mem::size_of::<Self>() + columns
    }
}

impl Index<usize> for ColorSequence {
    type Output = u8;

    #[inline]
    fn index(&self, index: usize) -> &u8 {
        &self.colors[index]
    }
}

impl fmt::Display for ColorSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.colors.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{color}")?;
        }
        Ok(())
    }
}

impl FromStr for ColorSequence {
    type Err = SequenceError;

    /// Parse whitespace- or comma-separated color ids, e.g. `"0 1 2 3"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colors = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u8>()
                    .map_err(|_| SequenceError::Parse(part.to_string()))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Self::new(&colors)
    }
}
