//! Problem contract and search-space descriptors.

use super::report::SsaSnapshot;
use crate::error::SsaError;

/// Fitness assigned to a position that has not been evaluated yet.
pub const UNEVALUATED_FITNESS: f64 = 1e100;

/// Whether lower or higher fitness is better.
///
/// The intensity transform and the global-best bookkeeping both follow
/// this direction, so a vibration is always stronger for a better
/// solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ObjectiveDirection {
    /// Lower fitness is better.
    #[default]
    Minimize,
    /// Higher fitness is better.
    Maximize,
}

impl ObjectiveDirection {
    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            ObjectiveDirection::Minimize => candidate < incumbent,
            ObjectiveDirection::Maximize => candidate > incumbent,
        }
    }

    /// The sentinel "worst possible" fitness for this direction.
    pub fn worst(self) -> f64 {
        match self {
            ObjectiveDirection::Minimize => UNEVALUATED_FITNESS,
            ObjectiveDirection::Maximize => -UNEVALUATED_FITNESS,
        }
    }

    /// Maps a fitness to a cost where lower is always better.
    pub fn cost(self, fitness: f64) -> f64 {
        match self {
            ObjectiveDirection::Minimize => fitness,
            ObjectiveDirection::Maximize => -fitness,
        }
    }
}

/// Box bounds used to draw the initial population.
///
/// The random walk itself is unbounded; bounds only shape where the
/// spiders start.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates per-dimension bounds.
    ///
    /// # Errors
    ///
    /// Fails if the vectors are empty, differ in length, or any pair has
    /// `upper < lower` or a non-finite value.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, SsaError> {
        if lower.is_empty() {
            return Err(SsaError::InvalidDimension);
        }
        if lower.len() != upper.len() {
            return Err(SsaError::BoundsLengthMismatch {
                expected: lower.len(),
                actual: upper.len(),
            });
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if !lo.is_finite() || !hi.is_finite() || hi < lo {
                return Err(SsaError::InvalidBounds {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Creates the same `[lower, upper]` interval for every dimension.
    pub fn uniform(lower: f64, upper: f64, dimension: usize) -> Result<Self, SsaError> {
        if dimension == 0 {
            return Err(SsaError::InvalidDimension);
        }
        Self::new(vec![lower; dimension], vec![upper; dimension])
    }

    /// Number of dimensions.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }
}

/// Defines an SSA optimization problem.
///
/// The user supplies the dimensionality and the objective; the engine
/// handles the population, vibration propagation, masking and walks.
/// For quick experiments, wrap a closure in [`FnProblem`].
///
/// # Examples
///
/// ```
/// use u_ssa::ssa::SsaProblem;
///
/// struct Sphere { dim: usize }
///
/// impl SsaProblem for Sphere {
///     fn dimension(&self) -> usize { self.dim }
///     fn evaluate(&self, x: &[f64]) -> f64 { x.iter().map(|v| v * v).sum() }
/// }
/// ```
///
/// # Out-of-bounds inputs
///
/// Walks are not clamped, so `evaluate` receives points outside
/// [`bounds`](SsaProblem::bounds). It must still return a value; penalize
/// rather than panic.
pub trait SsaProblem: Send + Sync {
    /// Number of decision variables. Fixed for the run.
    fn dimension(&self) -> usize;

    /// Bounds for the initial population. Defaults to `[-100, 100]` on
    /// every dimension.
    fn bounds(&self) -> Result<Bounds, SsaError> {
        Bounds::uniform(-100.0, 100.0, self.dimension())
    }

    /// Evaluates a candidate solution.
    ///
    /// May be called from several threads when parallel evaluation is on.
    fn evaluate(&self, solution: &[f64]) -> f64;

    /// Called after every iteration with the reporting snapshot.
    ///
    /// The default implementation is a no-op.
    fn on_iteration(&self, _snapshot: &SsaSnapshot) {}
}

/// Adapts a plain function or closure into an [`SsaProblem`].
///
/// ```
/// use u_ssa::ssa::{Bounds, FnProblem};
///
/// let problem = FnProblem::new(2, |x: &[f64]| x[0].abs() + x[1].abs())
///     .with_bounds(Bounds::uniform(-5.0, 5.0, 2).unwrap());
/// ```
pub struct FnProblem<F> {
    dimension: usize,
    bounds: Option<Bounds>,
    objective: F,
}

impl<F> FnProblem<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    pub fn new(dimension: usize, objective: F) -> Self {
        Self {
            dimension,
            bounds: None,
            objective,
        }
    }

    /// Overrides the default `[-100, 100]` initialization box.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

impl<F> SsaProblem for FnProblem<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn bounds(&self) -> Result<Bounds, SsaError> {
        match &self.bounds {
            Some(bounds) => Ok(bounds.clone()),
            None => Bounds::uniform(-100.0, 100.0, self.dimension),
        }
    }

    fn evaluate(&self, solution: &[f64]) -> f64 {
        (self.objective)(solution)
    }
}
