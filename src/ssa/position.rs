//! Candidate positions and the vibrations they emit.

use super::types::{Bounds, ObjectiveDirection, UNEVALUATED_FITNESS};
use crate::error::SsaError;
use rand::Rng;

/// A candidate solution vector together with its fitness.
#[derive(Debug, Clone)]
pub struct Position {
    solution: Vec<f64>,
    fitness: f64,
}

impl Position {
    /// Wraps an already evaluated (or not) solution vector.
    pub fn new(solution: Vec<f64>, fitness: f64) -> Self {
        Self { solution, fitness }
    }

    /// Draws every coordinate uniformly from its `[lower, upper]` interval.
    ///
    /// The fitness is set to [`UNEVALUATED_FITNESS`].
    pub fn random<R: Rng>(bounds: &Bounds, rng: &mut R) -> Self {
        let solution = bounds
            .lower()
            .iter()
            .zip(bounds.upper())
            .map(|(&lo, &hi)| rng.random_range(lo..=hi))
            .collect();
        Self::new(solution, UNEVALUATED_FITNESS)
    }

    /// Draws a random position inside the same interval on every dimension.
    ///
    /// # Errors
    ///
    /// Fails if `dimension == 0` or `upper < lower`.
    pub fn init_random<R: Rng>(
        lower: f64,
        upper: f64,
        dimension: usize,
        rng: &mut R,
    ) -> Result<Self, SsaError> {
        let bounds = Bounds::uniform(lower, upper, dimension)?;
        Ok(Self::random(&bounds, rng))
    }

    pub fn solution(&self) -> &[f64] {
        &self.solution
    }

    pub(crate) fn solution_mut(&mut self) -> &mut [f64] {
        &mut self.solution
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Number of coordinates.
    pub fn len(&self) -> usize {
        self.solution.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solution.is_empty()
    }

    /// Exact coordinate-wise equality. Fitness is ignored.
    pub fn equals(&self, other: &Position) -> bool {
        self.solution.len() == other.solution.len()
            && self
                .solution
                .iter()
                .zip(other.solution.iter())
                .all(|(a, b)| a == b)
    }

    /// Manhattan (L1) distance between the two solution vectors.
    pub fn distance_to(&self, other: &Position) -> f64 {
        debug_assert_eq!(self.solution.len(), other.solution.len());
        self.solution
            .iter()
            .zip(other.solution.iter())
            .map(|(a, b)| (a - b).abs())
            .sum()
    }
}

/// Fitness-to-intensity transform.
///
/// `intensity = ln(1 / (cost - floor) + 1)`, where `cost` is the fitness
/// oriented so that lower is better. The floor `C` has to lie strictly
/// below every cost being scored; [`anchored`](Self::anchored) moves it
/// under the best cost seen so far when the objective reaches it. A cost
/// at or under the floor scores `+inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityScale {
    pub direction: ObjectiveDirection,
    pub floor: f64,
}

impl IntensityScale {
    pub fn new(direction: ObjectiveDirection, floor: f64) -> Self {
        Self { direction, floor }
    }

    /// Source intensity of a position with the given fitness.
    pub fn intensity(&self, fitness: f64) -> f64 {
        let gap = self.direction.cost(fitness) - self.floor;
        if gap <= 0.0 {
            return f64::INFINITY;
        }
        (1.0 / gap).ln_1p()
    }

    /// A scale whose floor sits strictly below the cost of `best_fitness`.
    ///
    /// The configured floor is kept while the best cost stays above it.
    /// Otherwise the floor drops to just under the best cost, by the larger
    /// of `|floor|` and a few ulps of the cost, so every fitness no better
    /// than `best_fitness` keeps a finite, correctly ordered intensity.
    pub fn anchored(&self, best_fitness: f64) -> Self {
        let best_cost = self.direction.cost(best_fitness);
        if best_cost > self.floor || !best_cost.is_finite() {
            return *self;
        }
        let margin = self
            .floor
            .abs()
            .max(best_cost.abs() * 4.0 * f64::EPSILON)
            .max(f64::MIN_POSITIVE);
        Self {
            direction: self.direction,
            floor: best_cost - margin,
        }
    }
}

/// Exponential decay of an intensity over a distance.
///
/// `intensity * exp(-distance / attenuation_factor)`. A non-positive factor
/// (collapsed population) takes the limit: no decay at distance zero,
/// complete decay elsewhere.
pub fn attenuate(intensity: f64, attenuation_factor: f64, distance: f64) -> f64 {
    if attenuation_factor <= 0.0 {
        return if distance <= 0.0 { intensity } else { 0.0 };
    }
    intensity * (-distance / attenuation_factor).exp()
}

/// A signal carrying an intensity and the position it came from.
#[derive(Debug, Clone)]
pub struct Vibration {
    intensity: f64,
    position: Position,
}

impl Vibration {
    /// The vibration a spider emits at its own position.
    pub fn emitted_by(position: &Position, scale: &IntensityScale) -> Self {
        Self {
            intensity: scale.intensity(position.fitness()),
            position: position.clone(),
        }
    }

    /// A vibration with an explicit intensity, e.g. one perceived after
    /// attenuation.
    pub fn with_intensity(intensity: f64, position: Position) -> Self {
        Self {
            intensity,
            position,
        }
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Intensity as perceived `distance` away from the source.
    pub fn attenuated(&self, attenuation_factor: f64, distance: f64) -> f64 {
        attenuate(self.intensity, attenuation_factor, distance)
    }
}
