//! Run configuration and the derivation of its defaults.
//!
//! [`CobraConfig`] holds what the user asked for; several options default to
//! values derived from the problem (the evaluation budget scales with the
//! dimension, for instance). [`CobraConfig::resolve`] turns it into the fully
//! determined [`Settings`] stored in the context, validating everything that
//! can be checked before the first evaluation.
//!
//! # Examples
//!
//! ```
//! use samo_cobra::prelude::*;
//!
//! let problem = ProblemSpec::new(vec![0.0; 4], vec![1.0; 4], vec![1.0, 1.0], 2)?;
//! let settings = CobraConfig::default().resolve(&problem)?;
//!
//! assert_eq!(settings.max_evaluations, 160); // 40 x dimension
//! assert_eq!(settings.init_design_points, 5); // max(batch, dimension + 1)
//! assert_eq!(settings.sampling, SamplingStrategy::Halton);
//! # Ok::<(), samo_cobra::Error>(())
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::epsilon;
use crate::error::{Error, Result};
use crate::problem::ProblemSpec;
use crate::sampler::boundary;
use crate::types::{ExecutionMode, InfillCriterion, SamplingStrategy};

/// Evaluations per dimension in the default budget.
pub const EVALUATIONS_PER_DIMENSION: usize = 40;

/// Options for initializing a run.
///
/// Fields left `None` are derived from the problem by
/// [`resolve`](CobraConfig::resolve). Build one with
/// [`CobraConfig::builder`] or start from [`Default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CobraConfig {
    /// Total evaluation budget; defaults to 40 × dimension.
    pub max_evaluations: Option<usize>,
    /// Points evaluated concurrently per refinement iteration.
    pub batch: usize,
    /// Sequential or all-cores evaluation.
    pub execution: ExecutionMode,
    /// Spend half the budget on one large initial design and skip refinement.
    pub one_shot: bool,
    /// Initial design strategy.
    pub sampling: SamplingStrategy,
    /// Initial design size; defaults to `max(batch, dimension + 1)`.
    pub init_design_points: Option<usize>,
    /// Tolerance of the sequential local search in the refinement loop.
    pub seq_tolerance: f64,
    /// Per-constraint initial epsilon override.
    pub epsilon_init: Option<Vec<f64>>,
    /// Per-constraint maximum epsilon override.
    pub epsilon_max: Option<Vec<f64>>,
    /// Epsilon adaptation rate.
    pub epsilon_learning_rate: f64,
    /// Surrogate update rate.
    pub surrogate_learning_rate: f64,
    /// Lower bound of every axis of the normalized box.
    pub normalized_lower: f64,
    /// Upper bound of every axis of the normalized box.
    pub normalized_upper: f64,
    /// Infill criterion of the refinement loop.
    pub infill: InfillCriterion,
    /// Seed of the design generator.
    pub seed: u64,
}

impl Default for CobraConfig {
    fn default() -> Self {
        Self {
            max_evaluations: None,
            batch: 1,
            execution: ExecutionMode::AllCores,
            one_shot: false,
            sampling: SamplingStrategy::Halton,
            init_design_points: None,
            seq_tolerance: 1e-6,
            epsilon_init: None,
            epsilon_max: None,
            epsilon_learning_rate: 0.1,
            surrogate_learning_rate: 0.1,
            normalized_lower: -1.0,
            normalized_upper: 1.0,
            infill: InfillCriterion::Phv,
            seed: 1,
        }
    }
}

/// Fully resolved run settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    /// Total evaluation budget.
    pub max_evaluations: usize,
    /// Points evaluated concurrently per refinement iteration.
    pub batch: usize,
    /// Initial design size.
    pub init_design_points: usize,
    /// Whether the run is a single large batch.
    pub one_shot: bool,
    /// Sequential or all-cores evaluation.
    pub execution: ExecutionMode,
    /// Initial design strategy.
    pub sampling: SamplingStrategy,
    /// Infill criterion of the refinement loop.
    pub infill: InfillCriterion,
    /// Tolerance of the sequential local search.
    pub seq_tolerance: f64,
    /// Evaluation budget of the sequential local search: dimension × batch × 50.
    pub seq_max_evaluations: usize,
    /// Number of multistart points for the infill search.
    pub compute_starting_points: usize,
    /// How infill start points are drawn.
    pub start_point_strategy: String,
    /// Whether the surrogates get a polynomial tail.
    pub ptail: bool,
    /// Whether the refinement loop plots each iteration.
    pub plot: bool,
    /// Epsilon adaptation rate.
    pub epsilon_learning_rate: f64,
    /// Surrogate update rate.
    pub surrogate_learning_rate: f64,
    /// Seed of the design generator.
    pub seed: u64,
}

impl CobraConfig {
    /// Start a [`CobraBuilder`] with default options.
    #[must_use]
    pub fn builder() -> CobraBuilder {
        CobraBuilder::new()
    }

    /// Derive every default from `problem` and validate the result.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroBatch`] if `batch` is zero.
    /// - [`Error::InvalidNormalizedBox`] if the normalized bounds are not ordered.
    /// - [`Error::ZeroInitDesignPoints`] if the initial design would be empty.
    /// - [`Error::BudgetTooSmall`] unless the budget exceeds the initial design size.
    /// - [`Error::TooManyCorners`] if a boundary design asks for more corners than exist.
    /// - [`Error::InvalidEpsilon`] if an epsilon override has the wrong length.
    #[allow(clippy::cast_possible_truncation)]
    pub fn resolve(&self, problem: &ProblemSpec) -> Result<Settings> {
        let dimension = problem.dimension();
        if self.batch == 0 {
            return Err(Error::ZeroBatch);
        }
        if !(self.normalized_lower.is_finite()
            && self.normalized_upper.is_finite()
            && self.normalized_lower < self.normalized_upper)
        {
            return Err(Error::InvalidNormalizedBox {
                low: self.normalized_lower,
                high: self.normalized_upper,
            });
        }

        let max_evaluations = self
            .max_evaluations
            .unwrap_or(dimension * EVALUATIONS_PER_DIMENSION);
        let (init_design_points, batch) = if self.one_shot {
            let n = max_evaluations.div_ceil(2);
            (n, n)
        } else {
            let n = self
                .init_design_points
                .unwrap_or_else(|| self.batch.max(dimension + 1));
            (n, self.batch)
        };

        if init_design_points == 0 {
            return Err(Error::ZeroInitDesignPoints);
        }
        if init_design_points >= max_evaluations {
            return Err(Error::BudgetTooSmall {
                max_evaluations,
                init_design_points,
            });
        }
        if self.sampling == SamplingStrategy::BoundarySubset {
            let available = boundary::corner_count(dimension);
            if init_design_points > available {
                return Err(Error::TooManyCorners {
                    requested: init_design_points,
                    available,
                });
            }
        }
        epsilon::check_overrides(
            problem.n_constraints(),
            self.epsilon_init.as_deref(),
            self.epsilon_max.as_deref(),
        )?;

        let channels = dimension + problem.n_constraints() + problem.n_obj();
        Ok(Settings {
            max_evaluations,
            batch,
            init_design_points,
            one_shot: self.one_shot,
            execution: self.execution,
            sampling: self.sampling,
            infill: self.infill,
            seq_tolerance: self.seq_tolerance,
            seq_max_evaluations: dimension * batch * 50,
            compute_starting_points: channels * 2 * (1 + usize::from(self.one_shot)),
            start_point_strategy: "multirandom".to_string(),
            ptail: true,
            plot: false,
            epsilon_learning_rate: self.epsilon_learning_rate,
            surrogate_learning_rate: self.surrogate_learning_rate,
            seed: self.seed,
        })
    }
}

/// A builder for [`CobraConfig`] with a fluent API.
///
/// Sampling strategy and infill criterion may be given as tags
/// (`"LHS"`, `"SMS"`, ...); unknown tags are reported by
/// [`build`](CobraBuilder::build).
///
/// # Examples
///
/// ```
/// use samo_cobra::prelude::*;
///
/// let config = CobraConfig::builder()
///     .sampling_tag("LHS")
///     .infill_tag("SMS")
///     .batch(4)
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(config.sampling, SamplingStrategy::LatinHypercube);
/// assert_eq!(config.infill, InfillCriterion::Sms);
///
/// let err = CobraConfig::builder().sampling_tag("SOBOL").build().unwrap_err();
/// assert!(matches!(err, Error::UnknownSamplingStrategy(_)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CobraBuilder {
    config: CobraConfig,
    /// Raw tags for deferred validation (Some if a `*_tag` setter was called).
    raw_sampling: Option<String>,
    raw_infill: Option<String>,
}

impl CobraBuilder {
    /// Create a builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total evaluation budget.
    #[must_use]
    pub fn max_evaluations(mut self, n: usize) -> Self {
        self.config.max_evaluations = Some(n);
        self
    }

    /// Set the refinement batch size.
    #[must_use]
    pub fn batch(mut self, batch: usize) -> Self {
        self.config.batch = batch;
        self
    }

    /// Set the execution mode explicitly.
    #[must_use]
    pub fn execution(mut self, mode: ExecutionMode) -> Self {
        self.config.execution = mode;
        self
    }

    /// Evaluate the initial design on the calling thread.
    #[must_use]
    pub fn sequential(self) -> Self {
        self.execution(ExecutionMode::Sequential)
    }

    /// Evaluate the initial design on one worker per core (the default).
    #[must_use]
    pub fn all_cores(self) -> Self {
        self.execution(ExecutionMode::AllCores)
    }

    /// Enable or disable one-shot mode.
    #[must_use]
    pub fn one_shot(mut self, one_shot: bool) -> Self {
        self.config.one_shot = one_shot;
        self
    }

    /// Set the initial design strategy.
    #[must_use]
    pub fn sampling(mut self, strategy: SamplingStrategy) -> Self {
        self.config.sampling = strategy;
        self.raw_sampling = None;
        self
    }

    /// Set the initial design strategy by tag, validated in [`build`](Self::build).
    #[must_use]
    pub fn sampling_tag(mut self, tag: impl Into<String>) -> Self {
        self.raw_sampling = Some(tag.into());
        self
    }

    /// Set the initial design size.
    #[must_use]
    pub fn init_design_points(mut self, n: usize) -> Self {
        self.config.init_design_points = Some(n);
        self
    }

    /// Set the sequential search tolerance.
    #[must_use]
    pub fn seq_tolerance(mut self, tol: f64) -> Self {
        self.config.seq_tolerance = tol;
        self
    }

    /// Override the initial epsilon of every constraint.
    #[must_use]
    pub fn epsilon_init(mut self, eps: Vec<f64>) -> Self {
        self.config.epsilon_init = Some(eps);
        self
    }

    /// Override the maximum epsilon of every constraint.
    #[must_use]
    pub fn epsilon_max(mut self, eps: Vec<f64>) -> Self {
        self.config.epsilon_max = Some(eps);
        self
    }

    /// Set the epsilon adaptation rate.
    #[must_use]
    pub fn epsilon_learning_rate(mut self, rate: f64) -> Self {
        self.config.epsilon_learning_rate = rate;
        self
    }

    /// Set the surrogate update rate.
    #[must_use]
    pub fn surrogate_learning_rate(mut self, rate: f64) -> Self {
        self.config.surrogate_learning_rate = rate;
        self
    }

    /// Set the normalized box `[low, high]` shared by every axis.
    #[must_use]
    pub fn normalized_bounds(mut self, low: f64, high: f64) -> Self {
        self.config.normalized_lower = low;
        self.config.normalized_upper = high;
        self
    }

    /// Set the infill criterion.
    #[must_use]
    pub fn infill(mut self, criterion: InfillCriterion) -> Self {
        self.config.infill = criterion;
        self.raw_infill = None;
        self
    }

    /// Set the infill criterion by tag, validated in [`build`](Self::build).
    #[must_use]
    pub fn infill_tag(mut self, tag: impl Into<String>) -> Self {
        self.raw_infill = Some(tag.into());
        self
    }

    /// Set the seed of the design generator.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownSamplingStrategy`] for an unknown sampling tag.
    /// - [`Error::UnknownInfillCriterion`] for an unknown infill tag.
    pub fn build(self) -> Result<CobraConfig> {
        let mut config = self.config;
        if let Some(tag) = self.raw_sampling {
            config.sampling = tag.parse()?;
        }
        if let Some(tag) = self.raw_infill {
            config.infill = tag.parse()?;
        }
        Ok(config)
    }
}
