//! Bit puzzle checker CLI
//!
//! Usage:
//!   btest                          # check every puzzle
//!   btest bitAnd                   # check one puzzle
//!   btest rotateLeft 0x80000001    # pin the first argument
//!   btest rotateLeft 1 4           # pin both arguments, one case
//!   btest -o json rotateLeft -0x10 # options go before the puzzle name
//!   btest --output junit > junit.xml
//!   btest --list

use anyhow::{bail, Context, Result};
use bit_puzzles::registry;
use clap::Parser;
use puzzle_harness::prelude::*;
use puzzle_harness::reports::{OutputFormat, SuiteReport};
use puzzle_harness::runner::DEFAULT_BASE_BUDGET;
use puzzle_harness::MAX_ARITY;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "btest",
    about = "Check bit puzzle solutions against their reference implementations"
)]
struct Args {
    /// Only check this puzzle
    puzzle: Option<String>,

    /// Fix the leading arguments (decimal, 0x hex, 0 octal, or a float literal)
    #[arg(allow_hyphen_values = true, requires = "puzzle")]
    values: Vec<String>,

    /// Base sample budget for one-argument puzzles
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_BASE_BUDGET,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    budget: u32,

    /// Seed for the random interior samples
    #[arg(short, long)]
    seed: Option<u64>,

    /// Report format: text, json, junit, markdown
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// List registered puzzles and exit
    #[arg(short, long)]
    list: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "btest=debug,puzzle_harness=debug"
    } else {
        "btest=info,puzzle_harness=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Returns whether every checked puzzle passed.
fn run(args: &Args) -> Result<bool> {
    let registry = registry();
    registry.validate().context("puzzle registry is inconsistent")?;

    if args.list {
        for puzzle in registry.iter() {
            println!("{}", puzzle.describe());
        }
        return Ok(true);
    }

    let pinned = parse_pinned(&args.values)?;

    let mut config = HarnessConfig::new().base_budget(args.budget);
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }
    debug!(?config, "harness configuration");
    let mut runner = PuzzleRunner::new(config);

    let results = match args.puzzle {
        Some(ref name) => vec![runner.run_named(&registry, name, &pinned)?],
        None => runner.run_all(&registry)?,
    };

    let report = SuiteReport::new(results);
    print!("{}", report.render(args.output));
    Ok(report.all_passed())
}

fn parse_pinned(values: &[String]) -> Result<Vec<Option<u32>>> {
    if values.len() > MAX_ARITY {
        bail!(
            "at most {} argument values may be given, got {}",
            MAX_ARITY,
            values.len()
        );
    }

    values
        .iter()
        .enumerate()
        .map(|(i, token)| {
            parse_literal(token)
                .map(Some)
                .with_context(|| format!("Invalid input for function argument {}", i + 1))
        })
        .collect()
}
