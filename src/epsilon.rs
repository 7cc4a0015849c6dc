//! Initial constraint-relaxation thresholds.
//!
//! The refinement loop tolerates constraint violations up to a per-constraint
//! epsilon that it adapts between an initial and a maximum value. Both are
//! derived from the normalized domain width unless overridden. One-shot runs
//! have no refinement phase, so every threshold is zero.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Factor applied to the domain width for the initial epsilon.
pub const INIT_FACTOR: f64 = 0.02;
/// Factor applied to the domain width for the maximum epsilon.
pub const MAX_FACTOR: f64 = 0.04;

/// Per-constraint epsilon thresholds.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpsilonState {
    /// Initial threshold per constraint.
    pub init: Vec<f64>,
    /// Maximum threshold per constraint.
    pub max: Vec<f64>,
    /// Threshold the refinement loop starts from.
    pub current: Vec<f64>,
    /// Adaptation rate of the threshold.
    pub learning_rate: f64,
}

impl EpsilonState {
    /// Derive the thresholds for `n_constraints` constraints.
    ///
    /// `init` defaults to [`INIT_FACTOR`] × `domain_width` and `max` to
    /// [`MAX_FACTOR`] × `domain_width`, replicated across constraints. In
    /// one-shot mode all thresholds are zero; overrides are still checked but
    /// otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEpsilon`] if an override does not have exactly
    /// one entry per constraint.
    ///
    /// # Examples
    ///
    /// ```
    /// use samo_cobra::epsilon::EpsilonState;
    ///
    /// let eps = EpsilonState::schedule(-2.0, 2, None, None, false, 0.1).unwrap();
    /// assert_eq!(eps.init, vec![-0.04, -0.04]);
    /// assert_eq!(eps.max, vec![-0.08, -0.08]);
    /// assert_eq!(eps.current, eps.init);
    ///
    /// let one_shot = EpsilonState::schedule(-2.0, 2, None, None, true, 0.1).unwrap();
    /// assert_eq!(one_shot.current, vec![0.0, 0.0]);
    /// ```
    pub fn schedule(
        domain_width: f64,
        n_constraints: usize,
        init: Option<&[f64]>,
        max: Option<&[f64]>,
        one_shot: bool,
        learning_rate: f64,
    ) -> Result<Self> {
        check_overrides(n_constraints, init, max)?;

        if one_shot {
            let zeros = vec![0.0; n_constraints];
            return Ok(Self {
                init: zeros.clone(),
                max: zeros.clone(),
                current: zeros,
                learning_rate,
            });
        }

        let init = init.map_or_else(
            || vec![INIT_FACTOR * domain_width; n_constraints],
            <[f64]>::to_vec,
        );
        let max = max.map_or_else(
            || vec![MAX_FACTOR * domain_width; n_constraints],
            <[f64]>::to_vec,
        );
        Ok(Self {
            current: init.clone(),
            init,
            max,
            learning_rate,
        })
    }
}

/// Reject overrides that do not have one entry per constraint, `init` first.
pub(crate) fn check_overrides(
    n_constraints: usize,
    init: Option<&[f64]>,
    max: Option<&[f64]>,
) -> Result<()> {
    for (what, value) in [("epsilon_init", init), ("epsilon_max", max)] {
        match value {
            Some(v) if v.len() != n_constraints => {
                return Err(Error::InvalidEpsilon {
                    what,
                    expected: n_constraints,
                    got: v.len(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_scale_with_width() {
        let eps = EpsilonState::schedule(-4.0, 3, None, None, false, 0.1).unwrap();
        for (&i, &m) in eps.init.iter().zip(&eps.max) {
            assert!((i - (-0.08)).abs() < 1e-15);
            assert!((m - (-0.16)).abs() < 1e-15);
        }
        assert!((eps.learning_rate - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overrides_are_kept() {
        let eps = EpsilonState::schedule(-2.0, 2, Some(&[0.1, 0.2]), Some(&[0.3, 0.4]), false, 0.1)
            .unwrap();
        assert_eq!(eps.init, vec![0.1, 0.2]);
        assert_eq!(eps.max, vec![0.3, 0.4]);
        assert_eq!(eps.current, vec![0.1, 0.2]);
    }

    #[test]
    fn test_override_length_checked() {
        let err = EpsilonState::schedule(-2.0, 2, Some(&[0.1]), None, false, 0.1).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEpsilon {
                what: "epsilon_init",
                expected: 2,
                got: 1
            }
        ));
        // Even in one-shot mode a malformed override is rejected.
        assert!(EpsilonState::schedule(-2.0, 2, None, Some(&[0.1; 3]), true, 0.1).is_err());
    }

    #[test]
    fn test_check_overrides_reports_init_first() {
        assert!(check_overrides(2, Some(&[0.1, 0.2]), None).is_ok());
        let err = check_overrides(2, Some(&[0.1]), Some(&[0.1])).unwrap_err();
        assert!(matches!(err, Error::InvalidEpsilon { what: "epsilon_init", .. }));
    }

    #[test]
    fn test_one_shot_zeroes_everything() {
        let eps = EpsilonState::schedule(-2.0, 3, Some(&[0.5; 3]), None, true, 0.1).unwrap();
        assert_eq!(eps.init, vec![0.0; 3]);
        assert_eq!(eps.max, vec![0.0; 3]);
        assert_eq!(eps.current, vec![0.0; 3]);
    }

    #[test]
    fn test_no_constraints() {
        let eps = EpsilonState::schedule(-2.0, 0, None, None, false, 0.1).unwrap();
        assert!(eps.init.is_empty() && eps.max.is_empty() && eps.current.is_empty());
    }
}
