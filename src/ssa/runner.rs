//! SSA run orchestration.
//!
//! [`SsaRunner`] wraps an [`SsaEngine`] with cancellation, history
//! tracking and multi-run statistics.

use super::config::SsaConfig;
use super::engine::{EngineState, SsaEngine};
use super::position::Position;
use super::report::SsaSnapshot;
use super::types::SsaProblem;
use crate::error::SsaError;
use crate::stats;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of an SSA optimization run.
#[derive(Debug, Clone)]
pub struct SsaResult {
    /// The best position found during the entire run.
    pub best: Position,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Global best fitness after each iteration.
    pub fitness_history: Vec<f64>,

    /// Snapshot after the last executed iteration.
    pub final_snapshot: SsaSnapshot,
}

/// Aggregate of several independent runs on the same problem.
#[derive(Debug, Clone)]
pub struct RepeatSummary {
    /// Number of runs performed.
    pub runs: usize,

    /// Best final fitness over all runs.
    pub best: f64,

    /// Worst final fitness over all runs.
    pub worst: f64,

    /// Mean final fitness.
    pub mean: f64,

    /// Population standard deviation of the final fitness.
    pub std_dev: f64,

    /// Per-run results, in run order.
    pub results: Vec<SsaResult>,
}

/// Executes the SSA search loop.
///
/// # Usage
///
/// ```
/// use u_ssa::ssa::{FnProblem, SsaConfig, SsaRunner};
///
/// let problem = FnProblem::new(2, |x: &[f64]| x.iter().map(|v| v * v).sum());
/// let config = SsaConfig::default()
///     .with_population_size(10)
///     .with_max_iterations(200)
///     .with_seed(42);
/// let result = SsaRunner::run(&problem, &config).unwrap();
/// assert!(result.best_fitness < 100.0);
/// ```
pub struct SsaRunner;

impl SsaRunner {
    /// Runs the SSA optimization for `config.max_iterations` iterations.
    pub fn run<P: SsaProblem>(problem: &P, config: &SsaConfig) -> Result<SsaResult, SsaError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs SSA with an optional cancellation token.
    ///
    /// The flag is checked before every iteration; when set, the best
    /// position found so far is returned.
    pub fn run_with_cancel<P: SsaProblem>(
        problem: &P,
        config: &SsaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SsaResult, SsaError> {
        let mut engine = SsaEngine::new(problem, config.clone())?;
        log::info!(
            "SSA starts: {} spiders, {} dimensions, {} iterations",
            config.population_size,
            problem.dimension(),
            config.max_iterations
        );

        let mut fitness_history = Vec::with_capacity(config.max_iterations.min(1 << 16));
        let mut snapshot = engine.snapshot();
        let mut cancelled = false;

        while engine.state() != EngineState::Finished {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            snapshot = engine.step()?;
            fitness_history.push(snapshot.global_best_fitness);
        }

        log::info!(
            "SSA finished after {} iterations: best {:.3e} ({:.3}s){}",
            snapshot.iteration,
            snapshot.global_best_fitness,
            snapshot.elapsed.as_secs_f64(),
            if cancelled { " [cancelled]" } else { "" }
        );

        let best = engine.global_best().clone();
        Ok(SsaResult {
            best_fitness: best.fitness(),
            best,
            iterations: engine.iteration(),
            cancelled,
            fitness_history,
            final_snapshot: snapshot,
        })
    }

    /// Performs `runs` independent runs and summarizes their final fitness.
    ///
    /// Run `k` is seeded with `seed + k`, where `seed` is `config.seed` or
    /// a random value.
    pub fn repeat<P: SsaProblem>(
        problem: &P,
        config: &SsaConfig,
        runs: usize,
    ) -> Result<RepeatSummary, SsaError> {
        if runs == 0 {
            return Err(SsaError::InvalidConfig("runs must be at least 1".into()));
        }
        config.validate()?;

        let base_seed = config.seed.unwrap_or_else(rand::random);
        let mut results = Vec::with_capacity(runs);
        for k in 0..runs {
            let run_config = config.clone().with_seed(base_seed.wrapping_add(k as u64));
            let result = Self::run(problem, &run_config)?;
            log::debug!("run {}/{runs}: best {:.6e}", k + 1, result.best_fitness);
            results.push(result);
        }

        let direction = config.direction;
        let finals: Vec<f64> = results.iter().map(|r| r.best_fitness).collect();
        let mut best = finals[0];
        let mut worst = finals[0];
        for &f in &finals[1..] {
            if direction.is_better(f, best) {
                best = f;
            }
            if direction.is_better(worst, f) {
                worst = f;
            }
        }
        let mean = stats::mean(&finals);
        let std_dev = stats::std_dev(&finals);

        log::info!("{runs} runs: best {best:.6e} worst {worst:.6e} mean {mean:.6e} std {std_dev:.6e}");

        Ok(RepeatSummary {
            runs,
            best,
            worst,
            mean,
            std_dev,
            results,
        })
    }
}
