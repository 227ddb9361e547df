//! Display functions for command results

use super::formatters::{create_progress_bar, feedback_pegs, sequence_cells};
use crate::commands::{BenchmarkResult, SolveResult};
use colored::Colorize;

/// Print the result of solving one game
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    let columns = result.answer.len();

    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Answer: {}",
        sequence_cells(&result.answer).bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.steps.iter().enumerate() {
        let turn = i + 1;
        println!(
            "\nTurn {turn:>2}: {}  {}  ({})",
            sequence_cells(&step.guess),
            feedback_pegs(step.feedback, columns).bright_white(),
            step.feedback
        );

        if verbose {
            if let Some(status) = &step.status {
                println!("  Status: {}", status.bright_black());
            }
            println!("  Time:   {:.3}s", step.duration.as_secs_f64());
        }
    }

    println!();
    if result.success() {
        println!(
            "{}",
            format!(
                "✅ Solved in {} guesses ({:.2}s)",
                result.steps.len(),
                result.duration.as_secs_f64()
            )
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Failed to solve in {} guesses", result.steps.len())
                .red()
                .bold()
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    if result.aborted {
        println!("\n{}", "⚠️  Run aborted before all games finished".yellow());
    }

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.total_games);
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_guesses).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_guesses).yellow()
    );
    let failures = format!("{}", result.failures);
    println!(
        "   Failures:         {}",
        if result.failures == 0 {
            failures.green()
        } else {
            failures.red()
        }
    );
    println!(
        "   Time per game:    {:.3}s",
        result.average_time.as_secs_f64()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    if result.total_games == 0 {
        return;
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let mut counts: Vec<_> = result.distribution.iter().collect();
    counts.sort_unstable();
    for (guess_count, &count) in counts {
        let pct = (count as f64 / result.total_games as f64) * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {guess_count:>2}: {} {count:4} ({pct:5.1}%)", bar.green());
    }
}
