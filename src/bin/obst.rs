use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use optimal_bst::dynamic::{clrs_instance, random_instance, ObstInstance, TraversalOrder};
use optimal_bst::{report, ObstConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

const MAX_KEYS: usize = 100_000;

#[derive(Parser, Debug)]
#[command(name = "obst", about = "Optimal binary search tree by interval dynamic programming")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Traversal printed after the tables.
    #[arg(long, value_enum, default_value_t = Traversal::None, global = true)]
    traversal: Traversal,

    /// Append the full report (timing, tables, traversal) to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Allowed distance of the probability total from 1.
    #[arg(long, default_value_t = 1e-6, global = true)]
    tolerance: f64,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// The five-key example of CLRS 15.5.
    Clrs,
    /// Random distinct keys with normalized random probabilities.
    Random {
        /// Number of keys.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_KEYS as u64))]
        keys: u64,
        /// Seed for the generator; drawn at random when omitted.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Explicit keys and probabilities, comma separated.
    Custom {
        /// Ascending keys.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        keys: Vec<i64>,
        /// Key probabilities p[0..=n], with p[0] = 0.
        #[arg(long, value_delimiter = ',', required = true)]
        p: Vec<f64>,
        /// Gap probabilities q[0..=n].
        #[arg(long, value_delimiter = ',', required = true)]
        q: Vec<f64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Traversal {
    Pre,
    In,
    None,
}

impl Traversal {
    fn order(self) -> Option<TraversalOrder> {
        match self {
            Traversal::Pre => Some(TraversalOrder::PreOrder),
            Traversal::In => Some(TraversalOrder::InOrder),
            Traversal::None => None,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ObstConfig {
        tolerance: cli.tolerance,
        max_keys: Some(MAX_KEYS),
    };

    let instance = match cli.command {
        Commands::Clrs => clrs_instance(),
        Commands::Random { keys, seed } => {
            let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
            info!("generating {keys} random keys with seed {seed}");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            random_instance(keys as usize, &mut rng)
        }
        Commands::Custom { keys, p, q } => ObstInstance { keys, p, q },
    };

    let solution = instance
        .solve_with(&config)
        .context("failed to build the optimal binary search tree")?;

    let order = cli.traversal.order();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_tables(&mut out, &solution)?;
    writeln!(out, "\nexpected search cost: {:.6}", solution.expected_cost())?;
    if let Some(order) = order {
        report::write_traversal(&mut out, solution.tree(), order)?;
    }
    out.flush()?;

    if let Some(path) = &cli.log_file {
        report::append_report(path, &solution, order)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    Ok(())
}
