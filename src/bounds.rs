//! Mapping between the normalized box and the problem's native bounds.
//!
//! Every point the sampler produces, and every point the refinement loop
//! later proposes, lives in a [`NormalizedBox`] such as `[-1, 1]^d`. The
//! [`MappedObjective`] wraps the user objective so that callers work in
//! normalized coordinates while the objective itself still sees native ones.
//!
//! ```
//! use samo_cobra::bounds::scale_rescale;
//!
//! // [-1, 1] -> [0, 10]
//! let native = scale_rescale(&[-1.0, 0.0, 1.0], &[-1.0; 3], &[1.0; 3], &[0.0; 3], &[10.0; 3]).unwrap();
//! assert_eq!(native, vec![0.0, 5.0, 10.0]);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::objective::{Evaluation, Objective};
use crate::problem::ProblemSpec;

/// Affinely map `x` from the box `[from_low, from_high]` to `[to_low, to_high]`,
/// axis by axis.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if any of the bound vectors does not
/// have the same length as `x`.
pub fn scale_rescale(
    x: &[f64],
    from_low: &[f64],
    from_high: &[f64],
    to_low: &[f64],
    to_high: &[f64],
) -> Result<Vec<f64>> {
    let d = x.len();
    for (what, bound) in [
        ("source lower bounds", from_low),
        ("source upper bounds", from_high),
        ("target lower bounds", to_low),
        ("target upper bounds", to_high),
    ] {
        if bound.len() != d {
            return Err(Error::DimensionMismatch {
                what,
                expected: d,
                got: bound.len(),
            });
        }
    }

    Ok((0..d)
        .map(|i| {
            to_low[i] + (x[i] - from_low[i]) * (to_high[i] - to_low[i]) / (from_high[i] - from_low[i])
        })
        .collect())
}

/// The fixed, symmetric box all internal sampling happens in.
///
/// Every axis shares the same `[low, high]` range.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalizedBox {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl NormalizedBox {
    /// Create `[low, high]^dimension`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNormalizedBox`] unless `low < high` and both are finite.
    pub fn new(low: f64, high: f64, dimension: usize) -> Result<Self> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(Error::InvalidNormalizedBox { low, high });
        }
        Ok(Self {
            lower: vec![low; dimension],
            upper: vec![high; dimension],
        })
    }

    /// Number of axes.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Per-axis lower bounds.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Per-axis upper bounds.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Lower bound minus upper bound of a single axis.
    ///
    /// This is the signed width the epsilon schedule scales, so it is
    /// negative for any valid box.
    #[must_use]
    pub fn domain_width(&self) -> f64 {
        match (self.lower.first(), self.upper.first()) {
            (Some(low), Some(high)) => low - high,
            _ => 0.0,
        }
    }

    /// Whether `x` lies inside the box, allowing `tol` slack on every side.
    #[must_use]
    pub fn contains(&self, x: &[f64], tol: f64) -> bool {
        x.len() == self.dimension()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&v, (&low, &high))| v >= low - tol && v <= high + tol)
    }

    /// Map a normalized point into the problem's native bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `x` or the problem has a
    /// different dimension than this box.
    pub fn to_native(&self, x: &[f64], problem: &ProblemSpec) -> Result<Vec<f64>> {
        scale_rescale(x, &self.lower, &self.upper, problem.lower(), problem.upper())
    }

    /// Map a native point into the normalized box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `x` or the problem has a
    /// different dimension than this box.
    pub fn from_native(&self, x: &[f64], problem: &ProblemSpec) -> Result<Vec<f64>> {
        scale_rescale(x, problem.lower(), problem.upper(), &self.lower, &self.upper)
    }

    /// Map a point of the unit cube `[0, 1]^d` into the box.
    pub(crate) fn from_unit(&self, u: &[f64]) -> Result<Vec<f64>> {
        let d = u.len();
        scale_rescale(u, &vec![0.0; d], &vec![1.0; d], &self.lower, &self.upper)
    }
}

/// The user objective, evaluated at normalized coordinates.
///
/// [`evaluate`](MappedObjective::evaluate) rescales its argument from the
/// normalized box to the native bounds, calls the wrapped objective and
/// returns its response unmodified.
pub struct MappedObjective<F> {
    objective: F,
    normalized: NormalizedBox,
    native_lower: Vec<f64>,
    native_upper: Vec<f64>,
}

impl<F: Objective> MappedObjective<F> {
    /// Wrap `objective` so it accepts points of `normalized`.
    #[must_use]
    pub fn new(objective: F, normalized: NormalizedBox, problem: &ProblemSpec) -> Self {
        Self {
            objective,
            normalized,
            native_lower: problem.lower().to_vec(),
            native_upper: problem.upper().to_vec(),
        }
    }

    /// Evaluate the objective at the normalized point `x`.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] if `x` does not have the problem's dimension.
    /// - [`Error::Objective`] if the wrapped objective fails.
    pub fn evaluate(&self, x: &[f64]) -> Result<Evaluation> {
        let native = scale_rescale(
            x,
            &self.normalized.lower,
            &self.normalized.upper,
            &self.native_lower,
            &self.native_upper,
        )?;
        self.objective
            .evaluate(&native)
            .map_err(|e| Error::Objective(e.to_string()))
    }

    /// The normalized box this objective accepts.
    #[must_use]
    pub fn normalized_box(&self) -> &NormalizedBox {
        &self.normalized
    }

    /// The wrapped objective.
    #[must_use]
    pub fn inner(&self) -> &F {
        &self.objective
    }
}

impl<F> core::fmt::Debug for MappedObjective<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MappedObjective")
            .field("normalized", &self.normalized)
            .field("native_lower", &self.native_lower)
            .field("native_upper", &self.native_upper)
            .finish_non_exhaustive()
    }
}
