//! Closed-form benchmark objectives.
//!
//! Standard test functions for continuous optimizers, each with its
//! conventional search domain and known optimum. Several are negative
//! valued at and around their optimum. [`BenchmarkProblem`] adapts any of
//! them to [`SsaProblem`].

use crate::error::SsaError;
use crate::ssa::{Bounds, SsaProblem};
use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

/// Catalogue of benchmark functions. All are minimization problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Benchmark {
    /// `sum x_i^2`. Unimodal, separable.
    Sphere,
    /// `sum i * x_i^2` (1-based `i`).
    SumOfSquares,
    /// Many regularly spaced local minima.
    Rastrigin,
    /// Narrow curved valley, optimum at `(1, ..., 1)`.
    Rosenbrock,
    Ackley,
    Griewank,
    /// `sum |x_i| + prod |x_i|`.
    #[cfg_attr(feature = "serde", serde(rename = "schwefel-2-22"))]
    Schwefel222,
    /// `max |x_i|`.
    #[cfg_attr(feature = "serde", serde(rename = "schwefel-2-21"))]
    Schwefel221,
    /// `sum floor(x_i + 0.5)^2`. Plateaus everywhere.
    Step,
    /// `sum_i (sum_{j<=i} x_j)^2`.
    RotatedHyperEllipsoid,
    /// Optimum at `(1, ..., 1)`.
    Levy,
    /// Bowl with a dimension-dependent minimum `-d(d+4)(d-1)/6`.
    Trid,
    /// Steep ridges; `m = 10`. Minimum known for `d` in {2, 5, 10}.
    Michalewicz,
    /// Needle of depth -1 at `(pi, pi)` on a flat plateau. 2-D.
    Easom,
    /// Deep rugged 2-D surface, minimum near `(512, 404.23)`.
    EggHolder,
    /// Four symmetric minima near `(+-1.349, +-1.349)`. 2-D.
    CrossInTray,
    /// Four symmetric minima near `(+-8.055, +-9.665)`. 2-D.
    HolderTable,
    /// Minimum 3 at `(0, -1)`. 2-D.
    GoldsteinPrice,
    /// Bukin N.6: non-differentiable ridge, minimum at `(-10, 1)`. 2-D.
    Bukin,
    Mccormick,
    /// MATLAB `peaks` surface. 2-D.
    Peaks,
    /// `1 - cos x_1 cos x_2`. 2-D.
    Hole,
    /// Four minima of value 0, one at `(3, 2)`. 2-D.
    Himmelblau,
    Matyas,
    /// Two global minima near `(+-0.0898, -+0.7126)`. 2-D.
    SixHumpCamel,
}

impl Benchmark {
    /// Every benchmark, in catalogue order.
    pub const ALL: [Benchmark; 25] = [
        Benchmark::Sphere,
        Benchmark::SumOfSquares,
        Benchmark::Rastrigin,
        Benchmark::Rosenbrock,
        Benchmark::Ackley,
        Benchmark::Griewank,
        Benchmark::Schwefel222,
        Benchmark::Schwefel221,
        Benchmark::Step,
        Benchmark::RotatedHyperEllipsoid,
        Benchmark::Levy,
        Benchmark::Trid,
        Benchmark::Michalewicz,
        Benchmark::Easom,
        Benchmark::EggHolder,
        Benchmark::CrossInTray,
        Benchmark::HolderTable,
        Benchmark::GoldsteinPrice,
        Benchmark::Bukin,
        Benchmark::Mccormick,
        Benchmark::Peaks,
        Benchmark::Hole,
        Benchmark::Himmelblau,
        Benchmark::Matyas,
        Benchmark::SixHumpCamel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Benchmark::Sphere => "sphere",
            Benchmark::SumOfSquares => "sum-of-squares",
            Benchmark::Rastrigin => "rastrigin",
            Benchmark::Rosenbrock => "rosenbrock",
            Benchmark::Ackley => "ackley",
            Benchmark::Griewank => "griewank",
            Benchmark::Schwefel222 => "schwefel-2-22",
            Benchmark::Schwefel221 => "schwefel-2-21",
            Benchmark::Step => "step",
            Benchmark::RotatedHyperEllipsoid => "rotated-hyper-ellipsoid",
            Benchmark::Levy => "levy",
            Benchmark::Trid => "trid",
            Benchmark::Michalewicz => "michalewicz",
            Benchmark::Easom => "easom",
            Benchmark::EggHolder => "egg-holder",
            Benchmark::CrossInTray => "cross-in-tray",
            Benchmark::HolderTable => "holder-table",
            Benchmark::GoldsteinPrice => "goldstein-price",
            Benchmark::Bukin => "bukin",
            Benchmark::Mccormick => "mccormick",
            Benchmark::Peaks => "peaks",
            Benchmark::Hole => "hole",
            Benchmark::Himmelblau => "himmelblau",
            Benchmark::Matyas => "matyas",
            Benchmark::SixHumpCamel => "six-hump-camel",
        }
    }

    /// Dimensionality the function is defined for, if it is not scalable.
    pub fn fixed_dimension(self) -> Option<usize> {
        match self {
            Benchmark::Easom
            | Benchmark::EggHolder
            | Benchmark::CrossInTray
            | Benchmark::HolderTable
            | Benchmark::GoldsteinPrice
            | Benchmark::Bukin
            | Benchmark::Mccormick
            | Benchmark::Peaks
            | Benchmark::Hole
            | Benchmark::Himmelblau
            | Benchmark::Matyas
            | Benchmark::SixHumpCamel => Some(2),
            _ => None,
        }
    }

    /// Conventional search domain in `dimension` dimensions.
    ///
    /// # Errors
    ///
    /// Fails for a zero dimension, or a dimension other than 2 for the
    /// functions with per-axis domains.
    pub fn bounds(self, dimension: usize) -> Result<Bounds, SsaError> {
        let per_axis = |lower: [f64; 2], upper: [f64; 2]| {
            if dimension != 2 {
                return Err(SsaError::BoundsLengthMismatch {
                    expected: dimension,
                    actual: 2,
                });
            }
            Bounds::new(lower.to_vec(), upper.to_vec())
        };
        let r = match self {
            Benchmark::Bukin => return per_axis([-15.0, -3.0], [-5.0, 3.0]),
            Benchmark::Mccormick => return per_axis([-1.5, -3.0], [4.0, 4.0]),
            Benchmark::SixHumpCamel => return per_axis([-3.0, -2.0], [3.0, 2.0]),
            Benchmark::Michalewicz => return Bounds::uniform(0.0, PI, dimension),
            Benchmark::Trid => {
                let d = dimension as f64;
                d * d
            }
            Benchmark::Sphere
            | Benchmark::SumOfSquares
            | Benchmark::Step
            | Benchmark::Schwefel221
            | Benchmark::Easom => 100.0,
            Benchmark::Rastrigin => 5.12,
            Benchmark::Rosenbrock => 30.0,
            Benchmark::Ackley => 32.768,
            Benchmark::Griewank => 600.0,
            Benchmark::RotatedHyperEllipsoid => 65.536,
            Benchmark::EggHolder => 512.0,
            Benchmark::GoldsteinPrice => 2.0,
            Benchmark::Peaks => 3.0,
            Benchmark::Himmelblau => 5.0,
            Benchmark::Schwefel222
            | Benchmark::Levy
            | Benchmark::CrossInTray
            | Benchmark::HolderTable
            | Benchmark::Hole
            | Benchmark::Matyas => 10.0,
        };
        Bounds::uniform(-r, r, dimension)
    }

    /// Global minimum value in `dimension` dimensions, when known.
    pub fn optimum(self, dimension: usize) -> Option<f64> {
        if let Some(fixed) = self.fixed_dimension() {
            if fixed != dimension {
                return None;
            }
        }
        match self {
            Benchmark::Trid => {
                let d = dimension as f64;
                Some(-d * (d + 4.0) * (d - 1.0) / 6.0)
            }
            Benchmark::Michalewicz => match dimension {
                2 => Some(-1.801_303_4),
                5 => Some(-4.687_658),
                10 => Some(-9.660_152),
                _ => None,
            },
            Benchmark::Easom => Some(-1.0),
            Benchmark::EggHolder => Some(-959.640_662_7),
            Benchmark::CrossInTray => Some(-2.062_611_87),
            Benchmark::HolderTable => Some(-19.208_502_57),
            Benchmark::GoldsteinPrice => Some(3.0),
            Benchmark::Mccormick => Some(-1.913_222_95),
            Benchmark::Peaks => Some(-6.551_133_33),
            Benchmark::SixHumpCamel => Some(-1.031_628_45),
            _ => Some(0.0),
        }
    }

    /// Evaluates the function at `x`.
    ///
    /// The fixed-dimension functions read `x[0]` and `x[1]` only.
    pub fn evaluate(self, x: &[f64]) -> f64 {
        match self {
            Benchmark::Sphere => x.iter().map(|v| v * v).sum(),
            Benchmark::SumOfSquares => x
                .iter()
                .enumerate()
                .map(|(i, v)| (i + 1) as f64 * v * v)
                .sum(),
            Benchmark::Rastrigin => {
                10.0 * x.len() as f64
                    + x.iter()
                        .map(|v| v * v - 10.0 * (2.0 * PI * v).cos())
                        .sum::<f64>()
            }
            Benchmark::Rosenbrock => x
                .windows(2)
                .map(|w| {
                    let a = w[1] - w[0] * w[0];
                    let b = 1.0 - w[0];
                    100.0 * a * a + b * b
                })
                .sum(),
            Benchmark::Ackley => {
                let n = x.len() as f64;
                let sum_sq: f64 = x.iter().map(|v| v * v).sum();
                let sum_cos: f64 = x.iter().map(|v| (2.0 * PI * v).cos()).sum();
                -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
            }
            Benchmark::Griewank => {
                let sum: f64 = x.iter().map(|v| v * v).sum::<f64>() / 4000.0;
                let prod: f64 = x
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (v / ((i + 1) as f64).sqrt()).cos())
                    .product();
                sum - prod + 1.0
            }
            Benchmark::Schwefel222 => {
                let sum: f64 = x.iter().map(|v| v.abs()).sum();
                let prod: f64 = x.iter().map(|v| v.abs()).product();
                sum + prod
            }
            Benchmark::Schwefel221 => x.iter().fold(0.0, |m, v| m.max(v.abs())),
            Benchmark::Step => x
                .iter()
                .map(|v| {
                    let s = (v + 0.5).floor();
                    s * s
                })
                .sum(),
            Benchmark::RotatedHyperEllipsoid => {
                let mut prefix = 0.0;
                x.iter()
                    .map(|v| {
                        prefix += v;
                        prefix * prefix
                    })
                    .sum()
            }
            Benchmark::Levy => levy(x),
            Benchmark::Trid => {
                let squares: f64 = x.iter().map(|v| (v - 1.0).powi(2)).sum();
                let products: f64 = x.windows(2).map(|w| w[0] * w[1]).sum();
                squares - products
            }
            Benchmark::Michalewicz => -x
                .iter()
                .enumerate()
                .map(|(i, v)| v.sin() * ((i + 1) as f64 * v * v / PI).sin().powi(20))
                .sum::<f64>(),
            Benchmark::Easom => {
                let (a, b) = (x[0], x[1]);
                -a.cos() * b.cos() * (-((a - PI).powi(2) + (b - PI).powi(2))).exp()
            }
            Benchmark::EggHolder => {
                let (a, b) = (x[0], x[1]);
                -(b + 47.0) * (b + a / 2.0 + 47.0).abs().sqrt().sin()
                    - a * (a - (b + 47.0)).abs().sqrt().sin()
            }
            Benchmark::CrossInTray => {
                let (a, b) = (x[0], x[1]);
                let r = (a * a + b * b).sqrt();
                let inner = (a.sin() * b.sin() * (100.0 - r / PI).abs().exp()).abs() + 1.0;
                -1e-4 * inner.powf(0.1)
            }
            Benchmark::HolderTable => {
                let (a, b) = (x[0], x[1]);
                let r = (a * a + b * b).sqrt();
                -(a.sin() * b.cos() * (1.0 - r / PI).abs().exp()).abs()
            }
            Benchmark::GoldsteinPrice => {
                let (a, b) = (x[0], x[1]);
                let f1 = 1.0
                    + (a + b + 1.0).powi(2)
                        * (19.0 - 14.0 * a + 3.0 * a * a - 14.0 * b + 6.0 * a * b + 3.0 * b * b);
                let f2 = 30.0
                    + (2.0 * a - 3.0 * b).powi(2)
                        * (18.0 - 32.0 * a + 12.0 * a * a + 48.0 * b - 36.0 * a * b
                            + 27.0 * b * b);
                f1 * f2
            }
            Benchmark::Bukin => {
                let (a, b) = (x[0], x[1]);
                100.0 * (b - 0.01 * a * a).abs().sqrt() + 0.01 * (a + 10.0).abs()
            }
            Benchmark::Mccormick => {
                let (a, b) = (x[0], x[1]);
                (a + b).sin() + (a - b).powi(2) - 1.5 * a + 2.5 * b + 1.0
            }
            Benchmark::Peaks => {
                let (a, b) = (x[0], x[1]);
                3.0 * (1.0 - a).powi(2) * (-a * a - (b + 1.0).powi(2)).exp()
                    - 10.0 * (a / 5.0 - a.powi(3) - b.powi(5)) * (-a * a - b * b).exp()
                    - (-(a + 1.0).powi(2) - b * b).exp() / 3.0
            }
            Benchmark::Hole => 1.0 - x[0].cos() * x[1].cos(),
            Benchmark::Himmelblau => {
                let (a, b) = (x[0], x[1]);
                (a * a + b - 11.0).powi(2) + (a + b * b - 7.0).powi(2)
            }
            Benchmark::Matyas => {
                let (a, b) = (x[0], x[1]);
                0.26 * (a * a + b * b) - 0.48 * a * b
            }
            Benchmark::SixHumpCamel => {
                let (a, b) = (x[0], x[1]);
                (4.0 - 2.1 * a * a + a.powi(4) / 3.0) * a * a + a * b + (-4.0 + 4.0 * b * b) * b * b
            }
        }
    }
}

fn levy(x: &[f64]) -> f64 {
    let w: Vec<f64> = x.iter().map(|v| 1.0 + (v - 1.0) / 4.0).collect();
    let Some((&last, _)) = w.split_last() else {
        return 0.0;
    };
    let head = (PI * w[0]).sin().powi(2);
    let middle: f64 = w[..w.len() - 1]
        .iter()
        .map(|wi| (wi - 1.0).powi(2) * (1.0 + 10.0 * (PI * wi + 1.0).sin().powi(2)))
        .sum();
    let tail = (last - 1.0).powi(2) * (1.0 + (2.0 * PI * last).sin().powi(2));
    head + middle + tail
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Benchmark {
    type Err = SsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Benchmark::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SsaError::InvalidConfig(format!("unknown benchmark '{s}'")))
    }
}

/// A benchmark function fixed to a dimensionality.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkProblem {
    pub benchmark: Benchmark,
    pub dimension: usize,
}

impl BenchmarkProblem {
    /// Binds `benchmark` to `dimension`. Two-dimensional functions ignore
    /// the requested dimension and use 2.
    pub fn new(benchmark: Benchmark, dimension: usize) -> Self {
        Self {
            benchmark,
            dimension: benchmark.fixed_dimension().unwrap_or(dimension),
        }
    }

    /// Known global minimum for this dimensionality.
    pub fn optimum(&self) -> Option<f64> {
        self.benchmark.optimum(self.dimension)
    }
}

impl SsaProblem for BenchmarkProblem {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn bounds(&self) -> Result<Bounds, SsaError> {
        self.benchmark.bounds(self.dimension)
    }

    fn evaluate(&self, solution: &[f64]) -> f64 {
        self.benchmark.evaluate(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssa::{SsaConfig, SsaRunner};

    /// A global minimizer of `b` in `dim` dimensions (2 for fixed ones).
    fn minimizer(b: Benchmark, dim: usize) -> Vec<f64> {
        match b {
            Benchmark::Rosenbrock | Benchmark::Levy => vec![1.0; dim],
            Benchmark::Trid => (1..=dim).map(|i| (i * (dim + 1 - i)) as f64).collect(),
            Benchmark::Michalewicz => vec![2.202_905_5, 1.570_796_3],
            Benchmark::Easom => vec![PI, PI],
            Benchmark::EggHolder => vec![512.0, 404.231_8],
            Benchmark::CrossInTray => vec![1.349_406_6, 1.349_406_6],
            Benchmark::HolderTable => vec![8.055_023_5, 9.664_590_0],
            Benchmark::GoldsteinPrice => vec![0.0, -1.0],
            Benchmark::Bukin => vec![-10.0, 1.0],
            Benchmark::Mccormick => vec![-0.547_197_6, -1.547_197_6],
            Benchmark::Peaks => vec![0.228_28, -1.625_53],
            Benchmark::Himmelblau => vec![3.0, 2.0],
            Benchmark::SixHumpCamel => vec![0.089_842, -0.712_656],
            Benchmark::Hole | Benchmark::Matyas => vec![0.0, 0.0],
            _ => vec![0.0; dim],
        }
    }

    fn dimension_for(b: Benchmark) -> usize {
        match b {
            Benchmark::Michalewicz => 2,
            _ => b.fixed_dimension().unwrap_or(4),
        }
    }

    #[test]
    fn test_all_reach_optimum_at_known_point() {
        for b in Benchmark::ALL {
            let dim = dimension_for(b);
            let x = minimizer(b, dim);
            let f = b.evaluate(&x);
            let optimum = b.optimum(dim).unwrap();
            assert!(
                (f - optimum).abs() < 1e-4 * (1.0 + optimum.abs()),
                "{b} at its minimizer gave {f}, expected {optimum}"
            );
        }
    }

    #[test]
    fn test_all_above_optimum_away_from_it() {
        for b in Benchmark::ALL {
            let dim = dimension_for(b);
            let x = vec![2.5; dim];
            let optimum = b.optimum(dim).unwrap();
            assert!(b.evaluate(&x) > optimum, "{b} should exceed {optimum} off-optimum");
        }
    }

    #[test]
    fn test_minimizers_inside_bounds() {
        for b in Benchmark::ALL {
            let dim = dimension_for(b);
            let bounds = b.bounds(dim).unwrap();
            for (i, v) in minimizer(b, dim).iter().enumerate() {
                assert!(
                    (bounds.lower()[i]..=bounds.upper()[i]).contains(v),
                    "{b} minimizer outside its domain"
                );
            }
        }
    }

    #[test]
    fn test_known_values() {
        assert!((Benchmark::Sphere.evaluate(&[1.0, 2.0]) - 5.0).abs() < 1e-12);
        assert!((Benchmark::SumOfSquares.evaluate(&[1.0, 2.0]) - 9.0).abs() < 1e-12);
        assert!((Benchmark::RotatedHyperEllipsoid.evaluate(&[1.0, 2.0]) - 10.0).abs() < 1e-12);
        assert!((Benchmark::Schwefel222.evaluate(&[-1.0, 2.0]) - 5.0).abs() < 1e-12);
        assert!((Benchmark::Schwefel221.evaluate(&[-3.0, 2.0]) - 3.0).abs() < 1e-12);
        assert!((Benchmark::Step.evaluate(&[0.4, 1.6]) - 4.0).abs() < 1e-12);
        assert!((Benchmark::Rosenbrock.evaluate(&[0.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!((Benchmark::Trid.evaluate(&[2.5; 4]) + 9.75).abs() < 1e-12);
    }

    #[test]
    fn test_optimum_unknown_cases() {
        assert_eq!(Benchmark::Michalewicz.optimum(3), None);
        assert_eq!(Benchmark::Easom.optimum(3), None);
        assert_eq!(Benchmark::Trid.optimum(6), Some(-50.0));
    }

    #[test]
    fn test_name_round_trip() {
        for b in Benchmark::ALL {
            assert_eq!(b.name().parse::<Benchmark>().unwrap(), b);
        }
        assert_eq!("SPHERE".parse::<Benchmark>().unwrap(), Benchmark::Sphere);
        assert!("nope".parse::<Benchmark>().is_err());
    }

    #[test]
    fn test_problem_bounds() {
        let p = BenchmarkProblem::new(Benchmark::Rastrigin, 3);
        let b = p.bounds().unwrap();
        assert_eq!(b.lower(), &[-5.12; 3]);
        assert_eq!(b.upper(), &[5.12; 3]);
        assert!(BenchmarkProblem::new(Benchmark::Sphere, 0).bounds().is_err());

        let b = BenchmarkProblem::new(Benchmark::Bukin, 2).bounds().unwrap();
        assert_eq!(b.lower(), &[-15.0, -3.0]);
        assert_eq!(b.upper(), &[-5.0, 3.0]);
        assert!(Benchmark::Bukin.bounds(3).is_err());
    }

    #[test]
    fn test_fixed_dimension_overrides_request() {
        let p = BenchmarkProblem::new(Benchmark::EggHolder, 30);
        assert_eq!(p.dimension(), 2);
        assert_eq!(p.optimum(), Some(-959.640_662_7));
        assert_eq!(BenchmarkProblem::new(Benchmark::Sphere, 30).dimension(), 30);
    }

    #[test]
    fn test_ssa_on_sum_of_squares() {
        let problem = BenchmarkProblem::new(Benchmark::SumOfSquares, 3);
        let config = SsaConfig::fast().with_seed(42);
        let result = SsaRunner::run(&problem, &config).unwrap();
        assert!(result.best_fitness < 1.0, "got {}", result.best_fitness);
    }

    #[test]
    fn test_ssa_on_negative_valued_benchmarks() {
        for b in [Benchmark::SixHumpCamel, Benchmark::Mccormick] {
            let problem = BenchmarkProblem::new(b, 2);
            let config = SsaConfig::default()
                .with_population_size(20)
                .with_max_iterations(500)
                .with_seed(5);
            let result = SsaRunner::run(&problem, &config).unwrap();
            let optimum = problem.optimum().unwrap();
            assert!(
                result.best_fitness - optimum < 1e-2,
                "{b}: got {}, optimum {optimum}",
                result.best_fitness
            );
        }
    }
}
