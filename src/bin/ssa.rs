use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::Path, path::PathBuf};
use u_ssa::benchmarks::{Benchmark, BenchmarkProblem};
use u_ssa::ssa::{SsaConfig, SsaRunner};

/// Run the Social Spider Algorithm on a benchmark function.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Benchmark function to minimize.
    #[arg(long, default_value = "sphere")]
    benchmark: Benchmark,

    /// Problem dimensionality.
    #[arg(long, default_value_t = 30)]
    dimension: usize,

    /// TOML file with an `SsaConfig`; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    population: Option<usize>,

    #[arg(long)]
    iterations: Option<usize>,

    #[arg(long)]
    attenuation_rate: Option<f64>,

    #[arg(long)]
    p_change: Option<f64>,

    #[arg(long)]
    p_mask: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate fitness in parallel (needs the `parallel` feature).
    #[arg(long)]
    parallel: bool,

    /// Number of independent runs.
    #[arg(long, default_value_t = 1)]
    runs: usize,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::info!("{args:#?}");

    let config = build_config(&args).context("failed to build config")?;
    let problem = BenchmarkProblem::new(args.benchmark, args.dimension);
    if problem.dimension != args.dimension {
        log::info!(
            "{} is defined in {} dimensions only; ignoring --dimension {}",
            args.benchmark,
            problem.dimension,
            args.dimension
        );
    }

    if args.runs > 1 {
        let summary = SsaRunner::repeat(&problem, &config, args.runs)
            .context("failed to perform runs")?;
        println!("benchmark:    {}", args.benchmark);
        println!("runs:         {}", summary.runs);
        println!("best fitness: {:.6e}", summary.best);
        println!("worst:        {:.6e}", summary.worst);
        println!("mean:         {:.6e}", summary.mean);
        println!("std dev:      {:.6e}", summary.std_dev);
    } else {
        let result = SsaRunner::run(&problem, &config).context("failed to perform run")?;
        println!("benchmark:    {}", args.benchmark);
        println!("iterations:   {}", result.iterations);
        println!("best fitness: {:.6e}", result.best_fitness);
        if let Some(optimum) = problem.optimum() {
            println!("optimum:      {optimum:.6e}");
        }
        println!("elapsed:      {:.3}s", result.final_snapshot.elapsed.as_secs_f64());
        println!("solution:     {:?}", result.best.solution());
    }

    Ok(())
}

fn build_config(args: &Cli) -> Result<SsaConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SsaConfig::default(),
    };
    if let Some(n) = args.population {
        config.population_size = n;
    }
    if let Some(n) = args.iterations {
        config.max_iterations = n;
    }
    if let Some(rate) = args.attenuation_rate {
        config.attenuation_rate = rate;
    }
    if let Some(p) = args.p_change {
        config.p_change = p;
    }
    if let Some(p) = args.p_mask {
        config.p_mask = p;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.parallel {
        config.parallel = true;
    }
    config.validate().context("failed to validate config")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<SsaConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"))?;
    let config: SsaConfig = toml::from_str(&contents).context("failed to deserialize config")?;
    Ok(config)
}
