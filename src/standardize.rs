//! Standardized views of the raw responses.
//!
//! Surrogates are never fitted on raw responses. Each objective column gets
//! two views, mean/std standardized and log-modulus ([`plog`]) transformed
//! then standardized. Each constraint column gets two views, divided by its
//! spread and log-modulus transformed then divided by its spread. Every view
//! keeps the parameters needed to map a value back to the raw scale.
//!
//! A column with zero spread is not an error: its standardized values are all
//! zero and the stored standard deviation is `0`, which consumers must check
//! before dividing by it.
//!
//! ```
//! use samo_cobra::standardize::{plog, plog_inverse, standardize};
//!
//! let column = [1.0, 2.0, 3.0, 4.0];
//! let z = standardize(&column);
//! let restored: Vec<f64> = z.values.iter().map(|&v| z.restore(v)).collect();
//! assert!(restored.iter().zip(&column).all(|(a, b)| (a - b).abs() < 1e-12));
//!
//! assert!((plog_inverse(plog(-42.0)) + 42.0).abs() < 1e-12);
//! ```

use core::convert::identity;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sign-preserving log transform: `ln(1 + y)` for `y >= 0`, `-ln(1 - y)` otherwise.
#[must_use]
pub fn plog(y: f64) -> f64 {
    if y >= 0.0 { y.ln_1p() } else { -(-y).ln_1p() }
}

/// Inverse of [`plog`].
#[must_use]
pub fn plog_inverse(z: f64) -> f64 {
    if z >= 0.0 { z.exp_m1() } else { -(-z).exp_m1() }
}

/// A column shifted by its mean and divided by its standard deviation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Standardized {
    /// Standardized values; all zero when `std == 0`.
    pub values: Vec<f64>,
    /// Column mean.
    pub mean: f64,
    /// Population standard deviation; `0` for a constant column.
    pub std: f64,
}

impl Standardized {
    /// Map a standardized value back to the column's scale.
    ///
    /// With `std == 0` every value restores to the mean.
    #[must_use]
    pub fn restore(&self, z: f64) -> f64 {
        z * self.std + self.mean
    }
}

/// Standardize `column` to zero mean and unit (population) standard deviation.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn standardize(column: &[f64]) -> Standardized {
    if column.is_empty() {
        return Standardized {
            values: Vec::new(),
            mean: 0.0,
            std: 0.0,
        };
    }
    let n = column.len() as f64;
    let mean = column.iter().sum::<f64>() / n;
    let std = (column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    let values = if std > 0.0 {
        column.iter().map(|v| (v - mean) / std).collect()
    } else {
        vec![0.0; column.len()]
    };
    Standardized { values, mean, std }
}

/// A constraint column divided by its spread.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rescaled {
    /// Rescaled values.
    pub values: Vec<f64>,
    /// `max - min` of the column, or `1` when that is zero.
    pub divider: f64,
}

impl Rescaled {
    /// Map a rescaled value back to the column's scale.
    #[must_use]
    pub fn restore(&self, z: f64) -> f64 {
        z * self.divider
    }
}

/// Divide `column` by its spread `max - min`, keeping the sign of every entry.
///
/// A constant (or empty) column is divided by `1`.
#[must_use]
pub fn rescale_constraint(column: &[f64]) -> Rescaled {
    let (min, max) = column
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let spread = max - min;
    let divider = if spread > 0.0 { spread } else { 1.0 };
    Rescaled {
        values: column.iter().map(|v| v / divider).collect(),
        divider,
    }
}

/// A matrix standardized column by column.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StandardizedMatrix {
    /// Standardized values, row-aligned with the raw matrix.
    pub values: Vec<Vec<f64>>,
    /// Per-column mean.
    pub mean: Vec<f64>,
    /// Per-column standard deviation.
    pub std: Vec<f64>,
}

impl StandardizedMatrix {
    fn from_columns(raw: &[Vec<f64>], n_cols: usize, transform: fn(f64) -> f64) -> Self {
        let mut out = Self {
            values: vec![vec![0.0; n_cols]; raw.len()],
            mean: vec![0.0; n_cols],
            std: vec![0.0; n_cols],
        };
        for j in 0..n_cols {
            let column: Vec<f64> = raw.iter().map(|row| transform(row[j])).collect();
            let s = standardize(&column);
            set_column(&mut out.values, j, &s.values);
            out.mean[j] = s.mean;
            out.std[j] = s.std;
        }
        out
    }

    /// Map entry `z` of column `j` back to the (transformed) column scale.
    #[must_use]
    pub fn restore(&self, j: usize, z: f64) -> f64 {
        z * self.std[j] + self.mean[j]
    }
}

/// A matrix rescaled column by column.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RescaledMatrix {
    /// Rescaled values, row-aligned with the raw matrix.
    pub values: Vec<Vec<f64>>,
    /// Per-column divider.
    pub divider: Vec<f64>,
}

impl RescaledMatrix {
    fn from_columns(raw: &[Vec<f64>], n_cols: usize, transform: fn(f64) -> f64) -> Self {
        let mut out = Self {
            values: vec![vec![0.0; n_cols]; raw.len()],
            divider: vec![0.0; n_cols],
        };
        for j in 0..n_cols {
            let column: Vec<f64> = raw.iter().map(|row| transform(row[j])).collect();
            let r = rescale_constraint(&column);
            set_column(&mut out.values, j, &r.values);
            out.divider[j] = r.divider;
        }
        out
    }

    /// Map entry `z` of column `j` back to the (transformed) column scale.
    #[must_use]
    pub fn restore(&self, j: usize, z: f64) -> f64 {
        z * self.divider[j]
    }
}

/// The four eagerly computed views of the raw objective and constraint matrices.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StandardizationState {
    /// Objectives, mean/std standardized.
    pub objectives: StandardizedMatrix,
    /// Objectives, [`plog`] transformed then standardized.
    pub plog_objectives: StandardizedMatrix,
    /// Constraints divided by their spread.
    pub constraints: RescaledMatrix,
    /// Constraints, [`plog`] transformed then divided by their spread.
    pub plog_constraints: RescaledMatrix,
}

impl StandardizationState {
    /// Compute all four views. `objectives` rows have `n_obj` entries and
    /// `constraints` rows have `n_constraints` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use samo_cobra::standardize::StandardizationState;
    ///
    /// let objectives = vec![vec![1.0, 7.0], vec![3.0, 7.0]];
    /// let constraints = vec![vec![-2.0], vec![2.0]];
    /// let views = StandardizationState::compute(&objectives, &constraints, 2, 1);
    ///
    /// assert_eq!(views.objectives.values, vec![vec![-1.0, 0.0], vec![1.0, 0.0]]);
    /// assert_eq!(views.objectives.std, vec![1.0, 0.0]);
    /// assert_eq!(views.constraints.values, vec![vec![-0.5], vec![0.5]]);
    /// assert_eq!(views.constraints.divider, vec![4.0]);
    /// ```
    #[must_use]
    pub fn compute(
        objectives: &[Vec<f64>],
        constraints: &[Vec<f64>],
        n_obj: usize,
        n_constraints: usize,
    ) -> Self {
        Self {
            objectives: StandardizedMatrix::from_columns(objectives, n_obj, identity),
            plog_objectives: StandardizedMatrix::from_columns(objectives, n_obj, plog),
            constraints: RescaledMatrix::from_columns(constraints, n_constraints, identity),
            plog_constraints: RescaledMatrix::from_columns(constraints, n_constraints, plog),
        }
    }

    /// Recover the raw objective value of column `j` from its value `z` in
    /// the plog-standardized view.
    #[must_use]
    pub fn restore_plog_objective(&self, j: usize, z: f64) -> f64 {
        plog_inverse(self.plog_objectives.restore(j, z))
    }

    /// Recover the raw constraint value of column `j` from its value `z` in
    /// the plog-rescaled view.
    #[must_use]
    pub fn restore_plog_constraint(&self, j: usize, z: f64) -> f64 {
        plog_inverse(self.plog_constraints.restore(j, z))
    }
}

fn set_column(matrix: &mut [Vec<f64>], j: usize, column: &[f64]) {
    for (row, &v) in matrix.iter_mut().zip(column) {
        row[j] = v;
    }
}
