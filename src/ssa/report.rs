//! Read-only progress snapshot and the logging schedule.

use std::time::Duration;

/// Per-iteration progress exposed to observers and logs.
///
/// Nothing in the engine reads it back; it exists for drivers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SsaSnapshot {
    /// Completed iterations (0 right after initialization).
    pub iteration: usize,
    /// Best fitness seen over the whole run.
    pub global_best_fitness: f64,
    /// Best fitness in the last evaluated population.
    pub population_best_fitness: f64,
    /// Mean per-dimension standard deviation of the population.
    pub attenuation_base: f64,
    /// Mean pairwise L1 distance between spiders.
    pub mean_distance: f64,
    /// Wall-clock time since the engine was created.
    pub elapsed: Duration,
}

/// Whether `iteration` is on the sparse reporting schedule:
/// 1, 10, every 100 up to 1 000, every 1 000 up to 10 000 and every
/// 10 000 up to 100 000.
pub fn is_report_iteration(iteration: usize) -> bool {
    if iteration == 0 {
        return false;
    }
    iteration == 1
        || iteration == 10
        || (iteration <= 1_000 && iteration.is_multiple_of(100))
        || (iteration <= 10_000 && iteration.is_multiple_of(1_000))
        || (iteration <= 100_000 && iteration.is_multiple_of(10_000))
}

/// Emits the snapshot at `info` when on schedule, `debug` otherwise.
pub(crate) fn log_snapshot(snapshot: &SsaSnapshot) {
    let level = if is_report_iteration(snapshot.iteration) {
        log::Level::Info
    } else {
        log::Level::Debug
    };
    log::log!(
        level,
        "iter {:>5} best {:.3e} pop {:.3e} base {:.3e} mean_dist {:.3e} ({:.3}s)",
        snapshot.iteration,
        snapshot.global_best_fitness,
        snapshot.population_best_fitness,
        snapshot.attenuation_base,
        snapshot.mean_distance,
        snapshot.elapsed.as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_schedule() {
        let scheduled: Vec<usize> = (1..=3_000).filter(|&k| is_report_iteration(k)).collect();
        assert_eq!(
            scheduled,
            vec![1, 10, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000, 2000, 3000]
        );
    }

    #[test]
    fn test_report_schedule_sparse_tail() {
        assert!(is_report_iteration(20_000));
        assert!(!is_report_iteration(21_000));
        assert!(is_report_iteration(100_000));
        assert!(!is_report_iteration(200_000));
        assert!(!is_report_iteration(0));
    }
}
