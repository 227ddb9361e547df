//! Mastermind Solver - CLI
//!
//! Plays Mastermind against a known answer with exhaustive, genetic, hybrid or
//! random guessing, one game at a time or in benchmark batches.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use mastermind_solver::{
    commands::{SolveConfig, progress_bar, random_answers, run_benchmark, solve_game},
    config::AppConfig,
    core::ColorSequence,
    output::{print_benchmark_result, print_solve_result},
    solver::{AbortSignal, StrategyType},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mastermind_solver",
    about = "Mastermind solver using exhaustive constraint filtering and genetic search",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Strategy: hybrid (default), genetic, exhaustive, random
    #[arg(short, long, global = true, default_value = "hybrid")]
    strategy: String,

    /// TOML configuration file; missing sections use defaults
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Override the number of rows (guesses allowed)
    #[arg(long, global = true)]
    rows: Option<usize>,

    /// Override the number of columns
    #[arg(long, global = true)]
    columns: Option<usize>,

    /// Override the number of colors
    #[arg(long, global = true)]
    colors: Option<u8>,

    /// Seed for answers and strategy randomness
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Show per-turn status and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game
    Solve {
        /// Answer as color ids, e.g. "0 1 2 3" (random if omitted)
        #[arg(short, long)]
        answer: Option<String>,
    },

    /// Play many games against random answers
    Benchmark {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the configuration file if given, then apply CLI overrides
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(columns) = cli.columns {
        config.board.columns = columns;
    }
    if let Some(colors) = cli.colors {
        config.board.colors = colors;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    tracing::debug!(?config, strategy = %cli.strategy, "configuration loaded");

    match &cli.command {
        Commands::Solve { answer } => run_solve_command(&cli, &config, answer.as_deref()),
        Commands::Benchmark { count } => run_benchmark_command(&cli, &config, *count),
    }
}

fn run_solve_command(cli: &Cli, config: &AppConfig, answer: Option<&str>) -> Result<()> {
    let settings = config.board;
    let solve_config = match answer {
        Some(text) => {
            let answer: ColorSequence = text
                .parse()
                .with_context(|| format!("invalid answer '{text}'"))?;
            SolveConfig::new(settings, answer)
        }
        None => SolveConfig::random(settings, &mut rng(cli.seed)),
    };

    let strategy = StrategyType::from_config(&cli.strategy, config, cli.seed);
    println!(
        "Solving a {}x{} board with {} colors using the {} strategy",
        settings.rows,
        settings.columns,
        settings.colors,
        strategy.name().bright_cyan()
    );

    let result = solve_game(solve_config, strategy)?;
    print_solve_result(&result, cli.verbose);
    Ok(())
}

fn run_benchmark_command(cli: &Cli, config: &AppConfig, count: usize) -> Result<()> {
    let settings = config.board;
    let mut strategy = StrategyType::from_config(&cli.strategy, config, cli.seed);
    let answers = random_answers(&mut rng(cli.seed), settings, count);

    println!(
        "Running benchmark on {count} random answers with the {} strategy...",
        strategy.name().bright_cyan()
    );

    let bar = progress_bar(count);
    let result = run_benchmark(
        &mut strategy,
        settings,
        &answers,
        &AbortSignal::new(),
        Some(&bar),
    )?;
    bar.finish_and_clear();

    print_benchmark_result(&result);
    Ok(())
}
