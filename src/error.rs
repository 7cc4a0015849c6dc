/// Errors raised while initializing an optimization run.
///
/// Configuration errors are raised before any design point is sampled or
/// evaluated. Evaluation errors abort initialization as soon as any design
/// point fails; no partial context is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a native lower bound is not below its upper bound.
    #[error("invalid bounds on axis {axis}: lower ({low}) must be less than upper ({high})")]
    InvalidBounds {
        /// The offending axis.
        axis: usize,
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when the normalized box is empty or inverted.
    #[error("invalid normalized box: lower ({low}) must be less than upper ({high})")]
    InvalidNormalizedBox {
        /// The normalized lower bound.
        low: f64,
        /// The normalized upper bound.
        high: f64,
    },

    /// Returned when two vectors that must agree in length do not.
    #[error("dimension mismatch for {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// What was being compared.
        what: &'static str,
        /// The expected length.
        expected: usize,
        /// The actual length.
        got: usize,
    },

    /// Returned when the problem has no decision variables.
    #[error("problem must have at least one decision variable")]
    ZeroDimension,

    /// Returned when the hypervolume reference point is empty.
    #[error("reference point must have at least one objective")]
    EmptyReferencePoint,

    /// Returned when a sampling strategy tag is not recognized.
    #[error("unknown sampling strategy: {0}")]
    UnknownSamplingStrategy(String),

    /// Returned when an infill criterion tag is not recognized.
    #[error("unknown infill criterion: {0}")]
    UnknownInfillCriterion(String),

    /// Returned when the evaluation budget does not exceed the initial design size.
    #[error(
        "evaluation budget ({max_evaluations}) must be larger than the initial sample size ({init_design_points})"
    )]
    BudgetTooSmall {
        /// The total evaluation budget.
        max_evaluations: usize,
        /// The number of initial design points.
        init_design_points: usize,
    },

    /// Returned when a boundary design asks for more corners than the box has.
    #[error("boundary design requested {requested} points but the box has only {available} corners")]
    TooManyCorners {
        /// The requested number of design points.
        requested: usize,
        /// The number of corners of the normalized box.
        available: usize,
    },

    /// Returned when the initial design would be empty.
    #[error("initial design must contain at least one point")]
    ZeroInitDesignPoints,

    /// Returned when the batch size is zero.
    #[error("batch size must be at least 1")]
    ZeroBatch,

    /// Returned when an epsilon override does not have one entry per constraint.
    #[error("{what} must have one entry per constraint: expected {expected}, got {got}")]
    InvalidEpsilon {
        /// Which override was rejected.
        what: &'static str,
        /// The number of constraints.
        expected: usize,
        /// The length of the override.
        got: usize,
    },

    /// Returned when the user objective reports a failure.
    #[error("objective failed: {0}")]
    Objective(String),

    /// Returned when the objective returns the wrong number of objective values.
    #[error("objective dimension mismatch: expected {expected} values, got {got}")]
    ObjectiveDimensionMismatch {
        /// The expected number of objective values.
        expected: usize,
        /// The actual number of objective values returned.
        got: usize,
    },

    /// Returned when the objective returns the wrong number of constraint values.
    #[error("constraint dimension mismatch: expected {expected} values, got {got}")]
    ConstraintDimensionMismatch {
        /// The expected number of constraint values.
        expected: usize,
        /// The actual number of constraint values returned.
        got: usize,
    },

    /// Returned when the objective produces NaN or infinite values.
    #[error("objective returned a non-finite value")]
    NonFiniteResponse,

    /// Wraps any failure while evaluating a specific design point.
    #[error("evaluation of design point {index} failed: {source}")]
    Evaluation {
        /// Row of the design matrix that failed.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// Returned when the worker pool cannot be created.
    #[error("worker pool error: {0}")]
    WorkerPool(String),

    /// Returned when an evaluation task panics or is cancelled.
    #[error("evaluation task error: {0}")]
    TaskError(String),

    /// Returned when an internal invariant is violated.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

impl Error {
    /// Whether this error comes from invalid configuration, as opposed to a
    /// failure while evaluating the objective.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidBounds { .. }
                | Error::InvalidNormalizedBox { .. }
                | Error::DimensionMismatch { .. }
                | Error::ZeroDimension
                | Error::EmptyReferencePoint
                | Error::UnknownSamplingStrategy(_)
                | Error::UnknownInfillCriterion(_)
                | Error::BudgetTooSmall { .. }
                | Error::TooManyCorners { .. }
                | Error::ZeroInitDesignPoints
                | Error::ZeroBatch
                | Error::InvalidEpsilon { .. }
        )
    }

    pub(crate) fn at_point(self, index: usize) -> Self {
        Error::Evaluation {
            index,
            source: Box::new(self),
        }
    }
}

/// A convenience alias for `core::result::Result<T, samo_cobra::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
