//! The stateful SSA search engine.
//!
//! [`SsaEngine`] owns the population and everything derived from it each
//! iteration: the distance matrix, the vibration list, the global best and
//! the reporting statistics. One iteration is
//! fitness evaluation → vibration generation → per-spider mask change and
//! random walk, strictly in that order.

use super::config::SsaConfig;
use super::position::{IntensityScale, Position, Vibration};
use super::report::{log_snapshot, SsaSnapshot};
use super::spider::Spider;
use super::types::SsaProblem;
use crate::error::SsaError;
use crate::stats;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::time::Instant;

/// Lifecycle of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Population created, no iteration performed yet.
    Initialized,
    /// At least one iteration performed, budget not spent.
    Running,
    /// `max_iterations` iterations performed.
    Finished,
}

/// Symmetric `P x P` matrix of pairwise L1 distances, stored row-major.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Recomputes every pair and returns the mean off-diagonal distance
    /// (0 when fewer than two spiders exist).
    fn rebuild(&mut self, population: &[Spider]) -> f64 {
        assert_eq!(population.len(), self.size, "matrix sized to population");
        let n = self.size;
        let mut total = 0.0;
        for i in 0..n {
            self.data[i * n + i] = 0.0;
            for j in (i + 1)..n {
                let d = population[i].position().distance_to(population[j].position());
                self.data[i * n + j] = d;
                self.data[j * n + i] = d;
                total += d;
            }
        }
        let pairs = n * n.saturating_sub(1) / 2;
        if pairs == 0 {
            0.0
        } else {
            total / pairs as f64
        }
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance between spiders `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    /// Distances from spider `i` to every spider, in population order.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }
}

/// Stateful Social Spider Algorithm engine.
///
/// Most callers want [`SsaRunner`](super::SsaRunner). Use the engine
/// directly to drive iterations one at a time or to inspect the
/// population between them.
///
/// ```
/// use u_ssa::ssa::{FnProblem, SsaConfig, SsaEngine};
///
/// let problem = FnProblem::new(2, |x: &[f64]| x.iter().map(|v| v * v).sum());
/// let config = SsaConfig::default().with_population_size(5).with_max_iterations(10).with_seed(1);
/// let mut engine = SsaEngine::new(&problem, config).unwrap();
/// let snapshot = engine.step().unwrap();
/// assert_eq!(snapshot.iteration, 1);
/// ```
pub struct SsaEngine<'a, P: SsaProblem> {
    problem: &'a P,
    config: SsaConfig,
    scale: IntensityScale,
    rng: ChaCha12Rng,
    dimension: usize,
    population: Vec<Spider>,
    distances: DistanceMatrix,
    vibrations: Vec<Vibration>,
    global_best: Position,
    population_best_fitness: f64,
    attenuation_base: f64,
    mean_distance: f64,
    iteration: usize,
    state: EngineState,
    started: Instant,
    floor_anchored: bool,
}

impl<'a, P: SsaProblem> SsaEngine<'a, P> {
    /// Validates the inputs and creates a random population.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, a zero dimension, or bounds that
    /// are malformed or do not match the dimension. Nothing is allocated
    /// for the population before these checks pass.
    pub fn new(problem: &'a P, config: SsaConfig) -> Result<Self, SsaError> {
        config.validate()?;
        let dimension = problem.dimension();
        if dimension == 0 {
            return Err(SsaError::InvalidDimension);
        }
        let bounds = problem.bounds()?;
        if bounds.dimension() != dimension {
            return Err(SsaError::BoundsLengthMismatch {
                expected: dimension,
                actual: bounds.dimension(),
            });
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha12Rng::seed_from_u64(seed);

        let pop_size = config.population_size;
        let population: Vec<Spider> = (0..pop_size)
            .map(|_| Spider::new(Position::random(&bounds, &mut rng)))
            .collect();

        let mut global_best = population[0].position().clone();
        global_best.set_fitness(config.direction.worst());

        log::debug!(
            "initialized SSA with {pop_size} spiders in {dimension} dimensions (seed {seed})"
        );

        Ok(Self {
            problem,
            scale: IntensityScale::new(config.direction, config.intensity_floor),
            population_best_fitness: config.direction.worst(),
            config,
            rng,
            dimension,
            population,
            distances: DistanceMatrix::new(pop_size),
            vibrations: Vec::with_capacity(pop_size),
            global_best,
            attenuation_base: 0.0,
            mean_distance: 0.0,
            iteration: 0,
            state: EngineState::Initialized,
            started: Instant::now(),
            floor_anchored: false,
        })
    }

    /// Evaluates every spider, updates the population and global best,
    /// then rebuilds the distance matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SsaError::NonFiniteFitness`] if the objective yields NaN
    /// or an infinitely good value; neither best is touched in that case.
    /// Infinite values in the worse direction are kept as penalties.
    pub fn fitness_calculation(&mut self) -> Result<(), SsaError> {
        evaluate_population(self.problem, &mut self.population, self.config.parallel);

        let direction = self.config.direction;
        if let Some((agent, spider)) = self.population.iter().enumerate().find(|(_, s)| {
            let fitness = s.position().fitness();
            fitness.is_nan() || direction.cost(fitness) == f64::NEG_INFINITY
        }) {
            return Err(SsaError::NonFiniteFitness {
                agent,
                value: spider.position().fitness(),
            });
        }

        self.population_best_fitness = direction.worst();
        for spider in &self.population {
            let fitness = spider.position().fitness();
            if direction.is_better(fitness, self.global_best.fitness()) {
                self.global_best = spider.position().clone();
            }
            if direction.is_better(fitness, self.population_best_fitness) {
                self.population_best_fitness = fitness;
            }
        }

        self.mean_distance = self.distances.rebuild(&self.population);
        Ok(())
    }

    /// Rebuilds the vibration list from the current positions, derives the
    /// attenuation factor, and lets every spider choose its target.
    ///
    /// Intensities are scored against the configured floor, moved under the
    /// global best cost once the objective reaches it.
    pub fn vibration_generation(&mut self) {
        let scale = self.scale.anchored(self.global_best.fitness());
        if scale.floor != self.scale.floor && !self.floor_anchored {
            log::info!(
                "best fitness {:.6e} reached the intensity floor {:e}; anchoring the floor below the best cost",
                self.global_best.fitness(),
                self.scale.floor
            );
            self.floor_anchored = true;
        }
        self.vibrations.clear();
        self.vibrations.extend(
            self.population
                .iter()
                .map(|s| Vibration::emitted_by(s.position(), &scale)),
        );

        self.attenuation_base = attenuation_base(&self.population, self.dimension);
        let factor = self.attenuation_base * self.config.attenuation_rate;

        for (i, spider) in self.population.iter_mut().enumerate() {
            spider.choose_vibration(&self.vibrations, self.distances.row(i), factor);
        }
    }

    /// Performs one full iteration and returns the resulting snapshot.
    ///
    /// # Errors
    ///
    /// [`SsaError::Finished`] once the iteration budget is spent, or any
    /// error from [`fitness_calculation`](Self::fitness_calculation).
    pub fn step(&mut self) -> Result<SsaSnapshot, SsaError> {
        if self.state == EngineState::Finished {
            return Err(SsaError::Finished);
        }

        self.fitness_calculation()?;
        self.vibration_generation();

        let (p_change, p_mask) = (self.config.p_change, self.config.p_mask);
        for spider in self.population.iter_mut() {
            spider.mask_changing(p_change, p_mask, &mut self.rng);
            spider.random_walk(&self.vibrations, &mut self.rng);
        }

        self.iteration += 1;
        self.state = if self.iteration >= self.config.max_iterations {
            EngineState::Finished
        } else {
            EngineState::Running
        };

        let snapshot = self.snapshot();
        log_snapshot(&snapshot);
        self.problem.on_iteration(&snapshot);
        Ok(snapshot)
    }

    /// Runs the remaining iteration budget and returns the last snapshot.
    ///
    /// # Errors
    ///
    /// Stops at the first error from [`step`](Self::step). An engine that
    /// is already finished returns its current snapshot.
    pub fn run(&mut self) -> Result<SsaSnapshot, SsaError> {
        let mut snapshot = self.snapshot();
        while self.state != EngineState::Finished {
            snapshot = self.step()?;
        }
        Ok(snapshot)
    }

    /// Current reporting snapshot.
    pub fn snapshot(&self) -> SsaSnapshot {
        SsaSnapshot {
            iteration: self.iteration,
            global_best_fitness: self.global_best.fitness(),
            population_best_fitness: self.population_best_fitness,
            attenuation_base: self.attenuation_base,
            mean_distance: self.mean_distance,
            elapsed: self.started.elapsed(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn config(&self) -> &SsaConfig {
        &self.config
    }

    pub fn population(&self) -> &[Spider] {
        &self.population
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Vibrations of the last generation phase, index-aligned with the
    /// population.
    pub fn vibrations(&self) -> &[Vibration] {
        &self.vibrations
    }

    /// Best position observed so far.
    pub fn global_best(&self) -> &Position {
        &self.global_best
    }
}

/// Evaluate all spiders in the population.
fn evaluate_population<P: SsaProblem>(problem: &P, population: &mut [Spider], parallel: bool) {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            population
                .par_iter_mut()
                .for_each(|spider| evaluate_spider(problem, spider));
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for spider in population.iter_mut() {
        evaluate_spider(problem, spider);
    }
}

fn evaluate_spider<P: SsaProblem>(problem: &P, spider: &mut Spider) {
    let fitness = problem.evaluate(spider.position().solution());
    spider.position_mut().set_fitness(fitness);
}

/// Mean over dimensions of the population's per-dimension standard deviation.
fn attenuation_base(population: &[Spider], dimension: usize) -> f64 {
    let mut column = vec![0.0; population.len()];
    let mut sum = 0.0;
    for d in 0..dimension {
        for (slot, spider) in column.iter_mut().zip(population) {
            *slot = spider.position().solution()[d];
        }
        sum += stats::std_dev(&column);
    }
    sum / dimension as f64
}
