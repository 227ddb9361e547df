//! Formatting utilities for terminal output

use crate::core::{ColorSequence, Feedback};

const EXACT_PEG: char = '●';
const COLOR_PEG: char = '○';
const EMPTY_PEG: char = '·';

/// Format feedback as key pegs: exact matches first, then color matches
#[must_use]
pub fn feedback_pegs(feedback: Feedback, columns: usize) -> String {
    let exact = usize::from(feedback.exact());
    let color = usize::from(feedback.color());
    let empty = columns.saturating_sub(exact + color);

    let mut result = String::with_capacity(columns * EXACT_PEG.len_utf8());
    result.extend(std::iter::repeat_n(EXACT_PEG, exact));
    result.extend(std::iter::repeat_n(COLOR_PEG, color));
    result.extend(std::iter::repeat_n(EMPTY_PEG, empty));
    result
}

/// Format a sequence with fixed-width color indices
#[must_use]
pub fn sequence_cells(sequence: &ColorSequence) -> String {
    sequence
        .colors()
        .iter()
        .map(|color| format!("{color:>2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
