//! The immutable description of the problem being optimized.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dimensions, native bounds and hypervolume reference point of a problem.
///
/// The number of objectives is the length of the reference point. Objectives
/// are minimized and a constraint value `> 0` is a violation.
///
/// # Examples
///
/// ```
/// use samo_cobra::ProblemSpec;
///
/// let problem = ProblemSpec::new(vec![0.0, -5.0], vec![10.0, 5.0], vec![1.0, 1.0], 3).unwrap();
/// assert_eq!(problem.dimension(), 2);
/// assert_eq!(problem.n_obj(), 2);
/// assert_eq!(problem.n_constraints(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProblemSpec {
    lower: Vec<f64>,
    upper: Vec<f64>,
    reference: Vec<f64>,
    n_constraints: usize,
}

impl ProblemSpec {
    /// Create a problem description.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroDimension`] if `lower` is empty.
    /// - [`Error::DimensionMismatch`] if `lower` and `upper` differ in length.
    /// - [`Error::InvalidBounds`] if any `lower[i] >= upper[i]` or a bound is not finite.
    /// - [`Error::EmptyReferencePoint`] if `reference` is empty.
    pub fn new(
        lower: Vec<f64>,
        upper: Vec<f64>,
        reference: Vec<f64>,
        n_constraints: usize,
    ) -> Result<Self> {
        if lower.is_empty() {
            return Err(Error::ZeroDimension);
        }
        if lower.len() != upper.len() {
            return Err(Error::DimensionMismatch {
                what: "upper bounds",
                expected: lower.len(),
                got: upper.len(),
            });
        }
        for (axis, (&low, &high)) in lower.iter().zip(&upper).enumerate() {
            if !(low.is_finite() && high.is_finite() && low < high) {
                return Err(Error::InvalidBounds { axis, low, high });
            }
        }
        if reference.is_empty() {
            return Err(Error::EmptyReferencePoint);
        }
        Ok(Self {
            lower,
            upper,
            reference,
            n_constraints,
        })
    }

    /// Number of decision variables.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Number of objectives.
    #[must_use]
    pub fn n_obj(&self) -> usize {
        self.reference.len()
    }

    /// Number of constraints.
    #[must_use]
    pub fn n_constraints(&self) -> usize {
        self.n_constraints
    }

    /// Native lower bounds.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Native upper bounds.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Hypervolume reference point.
    #[must_use]
    pub fn reference(&self) -> &[f64] {
        &self.reference
    }
}
