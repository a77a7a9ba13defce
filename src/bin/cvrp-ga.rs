use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cvrp_genetic::ga::{CrossoverKind, GaConfig, GaRunner, SelectionKind, Strategy};
use cvrp_genetic::io::{read_locations, write_history, write_routes};
use cvrp_genetic::models::Problem;

#[derive(Clone, Copy, ValueEnum)]
enum CrossoverArg {
    Hgrex,
    Ox,
}

#[derive(Clone, Copy, ValueEnum)]
enum SelectionArg {
    Tournament,
    Roulette,
}

/// Evolutionary solver for the capacitated vehicle routing problem.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Location file: header line, then `id;x;y;demand` rows (id 0 = depot)
    #[arg(short, long)]
    input: PathBuf,

    /// Vehicle capacity
    #[arg(short, long)]
    capacity: u32,

    /// JSON run configuration; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of generations
    #[arg(short, long)]
    generations: Option<usize>,

    /// Population size
    #[arg(short, long)]
    population: Option<usize>,

    /// Mutation probability per generation
    #[arg(short, long)]
    mutation: Option<f64>,

    /// Relative cost gap under which two individuals count as similar
    #[arg(long)]
    diff_rate: Option<f64>,

    #[arg(long, value_enum)]
    crossover: Option<CrossoverArg>,

    #[arg(long, value_enum)]
    selection: Option<SelectionArg>,

    /// Tournament size; applies whenever selection is a tournament
    #[arg(long)]
    tournament_size: Option<usize>,

    /// Probability that the better contestant wins a tournament round;
    /// applies whenever selection is a tournament
    #[arg(long)]
    win_probability: Option<f64>,

    /// Use the generational scheme, keeping this many elite individuals
    #[arg(long, value_name = "ELITE")]
    generational: Option<usize>,

    /// Skip local-search descent on offspring
    #[arg(long)]
    no_descent: bool,

    /// Score descent neighborhoods on all cores
    #[arg(long)]
    parallel: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// Write the best-cost history as CSV
    #[arg(long)]
    history: Option<PathBuf>,

    /// Write the best routes as CSV
    #[arg(long)]
    routes: Option<PathBuf>,

    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn build_config(&self) -> anyhow::Result<GaConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GaConfig::default(),
        };

        if let Some(g) = self.generations {
            config.generations = g;
        }
        if let Some(p) = self.population {
            config.population_size = p;
        }
        if let Some(m) = self.mutation {
            config.mutation_probability = m;
        }
        if let Some(r) = self.diff_rate {
            config.diff_rate = r;
        }
        if let Some(c) = self.crossover {
            config.crossover = match c {
                CrossoverArg::Hgrex => CrossoverKind::HGreX,
                CrossoverArg::Ox => CrossoverKind::Ox,
            };
        }
        let tournament = matches!(config.selection, SelectionKind::Tournament { .. });
        match self.selection {
            Some(SelectionArg::Roulette) => config.selection = SelectionKind::RouletteWheel,
            Some(SelectionArg::Tournament) if !tournament => {
                config.selection = SelectionKind::default();
            }
            _ => {}
        }
        if let SelectionKind::Tournament {
            size,
            win_probability,
        } = &mut config.selection
        {
            if let Some(k) = self.tournament_size {
                *size = k;
            }
            if let Some(p) = self.win_probability {
                *win_probability = p;
            }
        }
        if let Some(elite) = self.generational {
            config.strategy = Strategy::Generational { elite };
        }
        if self.no_descent {
            config.descent = false;
        }
        if self.parallel {
            config.parallel_descent = true;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.debug { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.build_config()?;
    let locations = read_locations(&cli.input)
        .with_context(|| format!("reading locations from {}", cli.input.display()))?;
    let problem = Problem::new(locations, cli.capacity)?;
    info!(
        customers = problem.num_customers(),
        capacity = problem.capacity(),
        "instance loaded"
    );

    let result = GaRunner::run(&problem, &config)?;

    println!("{}", result.best.describe(problem.distances()));
    println!("{}", result.summary(&config));

    if let Some(path) = &cli.history {
        write_history(path, &result.history)
            .with_context(|| format!("writing history to {}", path.display()))?;
    }
    if let Some(path) = &cli.routes {
        write_routes(path, &result.best)
            .with_context(|| format!("writing routes to {}", path.display()))?;
    }
    Ok(())
}
