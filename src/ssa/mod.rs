//! Social Spider Algorithm (SSA).
//!
//! A population-based metaheuristic for continuous optimization. Each
//! spider emits a vibration whose intensity grows with its solution
//! quality and decays exponentially with distance. Spiders follow the
//! strongest vibration they perceive, and a per-dimension mask randomly
//! redirects some coordinates toward other population members, with
//! stagnating spiders re-rolling their mask more often.
//!
//! # Core Types
//!
//! - [`SsaProblem`]: Objective and search-space descriptor
//! - [`SsaConfig`]: Algorithm parameters
//! - [`SsaEngine`]: Stateful iteration-by-iteration engine
//! - [`SsaRunner`]: Complete runs, cancellation and repeated runs
//!
//! # References
//!
//! - Yu & Li (2015), "A social spider algorithm for global optimization",
//!   *Applied Soft Computing* 30, 614-627.

mod config;
mod engine;
mod position;
mod report;
mod runner;
mod spider;
mod types;

pub use config::SsaConfig;
pub use engine::{DistanceMatrix, EngineState, SsaEngine};
pub use position::{attenuate, IntensityScale, Position, Vibration};
pub use report::{is_report_iteration, SsaSnapshot};
pub use runner::{RepeatSummary, SsaResult, SsaRunner};
pub use spider::Spider;
pub use types::{Bounds, FnProblem, ObjectiveDirection, SsaProblem, UNEVALUATED_FITNESS};
