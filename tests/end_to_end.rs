use proptest::prelude::*;
use u_ssa::benchmarks::{Benchmark, BenchmarkProblem};
use u_ssa::ssa::{Bounds, EngineState, FnProblem, SsaConfig, SsaEngine, SsaRunner};

fn norm(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}

fn reference_config() -> SsaConfig {
    SsaConfig::default()
        .with_population_size(5)
        .with_max_iterations(100)
        .with_attenuation_rate(1.0)
        .with_p_change(0.7)
        .with_p_mask(0.1)
        .with_seed(2024)
}

#[test]
fn sum_of_squares_two_dimensions() {
    let problem = FnProblem::new(2, |x: &[f64]| x.iter().map(|v| v * v).sum())
        .with_bounds(Bounds::uniform(-100.0, 100.0, 2).unwrap());
    let mut engine = SsaEngine::new(&problem, reference_config()).unwrap();

    let initial_mean_norm = engine
        .population()
        .iter()
        .map(|s| norm(s.position().solution()))
        .sum::<f64>()
        / engine.population().len() as f64;

    let mut history = Vec::new();
    while engine.state() != EngineState::Finished {
        history.push(engine.step().unwrap().global_best_fitness);
    }

    assert_eq!(history.len(), 100);
    for window in history.windows(2) {
        assert!(window[1] <= window[0], "{} > {}", window[1], window[0]);
    }

    let best = engine.global_best();
    assert!((best.fitness() - norm(best.solution()).powi(2)).abs() < 1e-9 * (1.0 + best.fitness()));
    assert!(
        norm(best.solution()) < initial_mean_norm,
        "best norm {} not below initial mean norm {}",
        norm(best.solution()),
        initial_mean_norm
    );
}

#[test]
fn benchmark_problem_improves_on_initial_population() {
    let problem = BenchmarkProblem::new(Benchmark::Rastrigin, 5);
    let config = SsaConfig::default()
        .with_population_size(20)
        .with_max_iterations(300)
        .with_seed(9);

    let result = SsaRunner::run(&problem, &config).unwrap();
    assert!(result.best_fitness < result.fitness_history[0]);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_evaluation_matches_sequential() {
    let problem = BenchmarkProblem::new(Benchmark::Ackley, 4);
    let config = reference_config().with_population_size(16);

    let sequential = SsaRunner::run(&problem, &config.clone().with_parallel(false)).unwrap();
    let parallel = SsaRunner::run(&problem, &config.with_parallel(true)).unwrap();
    assert_eq!(sequential.fitness_history, parallel.fitness_history);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn same_seed_same_trajectory(seed in any::<u64>()) {
        let problem = BenchmarkProblem::new(Benchmark::Sphere, 3);
        let config = reference_config().with_max_iterations(30).with_seed(seed);

        let a = SsaRunner::run(&problem, &config).unwrap();
        let b = SsaRunner::run(&problem, &config).unwrap();
        prop_assert_eq!(a.fitness_history, b.fitness_history);
        prop_assert_eq!(a.best.solution(), b.best.solution());
    }

    #[test]
    fn global_best_never_regresses(seed in any::<u64>(), pop in 1usize..8) {
        let problem = BenchmarkProblem::new(Benchmark::Griewank, 2);
        let config = reference_config()
            .with_population_size(pop)
            .with_max_iterations(40)
            .with_seed(seed);

        let result = SsaRunner::run(&problem, &config).unwrap();
        for window in result.fitness_history.windows(2) {
            prop_assert!(window[1] <= window[0]);
        }
    }
}
