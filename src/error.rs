//! Error type shared by every SSA entry point.

use thiserror::Error;

/// Errors raised while constructing or running an SSA search.
///
/// Configuration errors are reported before any population state is
/// allocated. The only run-time error is a NaN fitness, which would
/// otherwise poison the global best.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SsaError {
    /// Problem dimensionality is zero.
    #[error("dimension must be at least 1")]
    InvalidDimension,

    /// Population size is zero.
    #[error("population_size must be at least 1")]
    InvalidPopulationSize,

    /// A bound pair is inverted or not finite.
    #[error("invalid bounds at dimension {index}: [{lower}, {upper}]")]
    InvalidBounds {
        index: usize,
        lower: f64,
        upper: f64,
    },

    /// Lower and upper bound vectors (or bounds and dimension) disagree in length.
    #[error("bounds length mismatch: expected {expected}, got {actual}")]
    BoundsLengthMismatch { expected: usize, actual: usize },

    /// Any other out-of-range configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The objective returned NaN, or an infinitely good value, for an agent.
    #[error("objective returned non-finite fitness {value} for agent {agent}")]
    NonFiniteFitness { agent: usize, value: f64 },

    /// `step` was called after the iteration budget was spent.
    #[error("iteration budget exhausted")]
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SsaError::InvalidBounds {
            index: 2,
            lower: 5.0,
            upper: 1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("dimension 2"));
        assert!(msg.contains("[5, 1]"));

        let err = SsaError::InvalidConfig("p_mask out of range".into());
        assert!(err.to_string().contains("p_mask out of range"));
    }

    #[test]
    fn test_non_finite_fitness_message() {
        let err = SsaError::NonFiniteFitness {
            agent: 3,
            value: f64::NAN,
        };
        assert!(err.to_string().contains("agent 3"));
    }
}
