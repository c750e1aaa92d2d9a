//! Small descriptive-statistics helpers.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation (divides by `n`, not `n - 1`).
///
/// Returns 0.0 for an empty slice.
pub fn std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let sum_sq: f64 = data.iter().map(|&x| (m - x) * (m - x)).sum();
    (sum_sq / data.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_std_dev_population() {
        // Population std dev of {2,4,4,4,5,5,7,9} is exactly 2.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_dev(&data) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_constant_is_zero() {
        assert_eq!(std_dev(&[3.0, 3.0, 3.0]), 0.0);
        assert_eq!(std_dev(&[7.0]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
    }
}
