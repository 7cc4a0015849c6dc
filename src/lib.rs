#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Initialization of a surrogate-assisted, constrained, multi-objective
//! optimizer. Given a black-box objective returning an objective vector and a
//! constraint vector, this crate samples an initial design, evaluates it
//! (sequentially or on a worker pool), tracks the feasible Pareto front and
//! its hypervolume, derives standardized views of every response channel and
//! assembles everything into a [`CobraContext`] for an iterative refinement
//! loop to consume.
//!
//! # Getting Started
//!
//! ```
//! use samo_cobra::prelude::*;
//!
//! // Two objectives, one constraint (x0 + x1 <= 12), native box [0, 10]^2.
//! let problem = ProblemSpec::new(vec![0.0, 0.0], vec![10.0, 10.0], vec![100.0, 100.0], 1)?;
//! let config = CobraConfig::builder()
//!     .sampling(SamplingStrategy::Random)
//!     .init_design_points(5)
//!     .max_evaluations(50)
//!     .sequential()
//!     .seed(1)
//!     .build()?;
//!
//! let context = CobraContext::initialize(problem, &config, |x: &[f64]| {
//!     Ok::<_, String>((vec![x[0], x[1] * x[1]], vec![x[0] + x[1] - 12.0]))
//! })?;
//!
//! assert_eq!(context.design.design.len(), 5);
//! assert_eq!(context.pareto.hypervolume_progress.len(), 5);
//! # Ok::<(), samo_cobra::Error>(())
//! ```
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Coordinate mapping | [`bounds`] | [`MappedObjective`](bounds::MappedObjective) evaluating normalized points in native bounds |
//! | Initial design | [`sampler`] | design matrix in the normalized box |
//! | Evaluation | [`evaluator`] | objective and constraint matrices, row-aligned with the design |
//! | Pareto tracking | [`tracker`] | feasible Pareto indicator, front, hypervolume per prefix |
//! | Standardization | [`standardize`] | linear and log-modulus views of every channel |
//! | Epsilon schedule | [`epsilon`] | initial / max constraint relaxation |
//! | Aggregation | [`context`] | the [`CobraContext`] |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on configuration and numeric state | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) during initialization | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod bounds;
pub mod config;
pub mod context;
pub mod epsilon;
mod error;
pub mod evaluator;
mod init;
pub mod objective;
pub mod pareto;
pub mod problem;
mod rng_util;
pub mod sampler;
pub mod standardize;
pub mod tracker;
mod types;

pub use config::{CobraBuilder, CobraConfig, Settings};
pub use context::CobraContext;
pub use error::{Error, Result};
pub use objective::{Evaluation, Objective};
pub use problem::ProblemSpec;
pub use types::{ExecutionMode, InfillCriterion, Kernel, Phase, ResponseView, SamplingStrategy};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use samo_cobra::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bounds::{MappedObjective, NormalizedBox};
    pub use crate::config::{CobraBuilder, CobraConfig, Settings};
    pub use crate::context::{
        BestPredictor, Channel, CobraContext, DesignState, RunBookkeeping, SurrogateErrors,
        SurrogateKey,
    };
    pub use crate::epsilon::EpsilonState;
    pub use crate::error::{Error, Result};
    pub use crate::evaluator::WorkerPool;
    pub use crate::objective::{Evaluation, Objective};
    pub use crate::problem::ProblemSpec;
    pub use crate::standardize::StandardizationState;
    pub use crate::tracker::ParetoState;
    pub use crate::types::{
        ExecutionMode, InfillCriterion, Kernel, Phase, ResponseView, SamplingStrategy,
    };
}
