//! Social Spider Algorithm for continuous black-box optimization.
//!
//! - **SSA**: a population of spiders shares information through
//!   vibrations whose intensity reflects solution quality and fades with
//!   distance. Each spider follows the strongest vibration it perceives,
//!   diversified by a per-dimension mask that re-rolls more often the
//!   longer the spider stagnates.
//! - **Benchmarks**: standard closed-form test functions with their
//!   conventional domains.
//!
//! # Architecture
//!
//! The objective is a plain trait ([`ssa::SsaProblem`]) or closure
//! ([`ssa::FnProblem`]); the crate contains no domain-specific concepts.
//! Randomness comes from one seeded ChaCha stream per run, so a fixed
//! seed reproduces a run bit for bit.
//!
//! # Features
//!
//! - `parallel`: evaluate fitness with rayon.
//! - `serde`: serialize configuration and snapshots.
//! - `cli`: the `ssa` command-line driver.

pub mod benchmarks;
pub mod error;
pub mod ssa;
pub mod stats;

pub use error::SsaError;
