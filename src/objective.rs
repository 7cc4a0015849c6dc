//! The [`Objective`] trait defines the black box being optimized.
//!
//! An objective takes a point in the problem's **native** coordinates and
//! returns an [`Evaluation`]: the objective vector (minimized) and the
//! constraint vector (`> 0` means violated). Plain closures work through the
//! blanket impl, returning anything convertible into an [`Evaluation`]:
//!
//! ```
//! use samo_cobra::Objective;
//!
//! let f = |x: &[f64]| Ok::<_, String>((vec![x[0], 1.0 - x[0]], vec![x[0] - 0.5]));
//! let eval = f.evaluate(&[0.25]).unwrap();
//! assert_eq!(eval.objectives, vec![0.25, 0.75]);
//! assert_eq!(eval.constraints, vec![-0.25]);
//! ```
//!
//! For objectives with state, implement the trait on a struct:
//!
//! ```
//! use samo_cobra::{Evaluation, Objective};
//!
//! struct Shifted {
//!     offset: f64,
//! }
//!
//! impl Objective for Shifted {
//!     type Error = String;
//!
//!     fn evaluate(&self, x: &[f64]) -> Result<Evaluation, String> {
//!         let s: f64 = x.iter().map(|v| (v - self.offset).powi(2)).sum();
//!         Ok(Evaluation::new(vec![s, -s], Vec::new()))
//!     }
//! }
//!
//! let eval = Shifted { offset: 1.0 }.evaluate(&[2.0, 3.0]).unwrap();
//! assert_eq!(eval.objectives, vec![5.0, -5.0]);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw response of one evaluation: objective values and constraint values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluation {
    /// Objective values, all minimized.
    pub objectives: Vec<f64>,
    /// Constraint values; `<= 0` is feasible.
    pub constraints: Vec<f64>,
}

impl Evaluation {
    /// Pair an objective vector with a constraint vector.
    #[must_use]
    pub fn new(objectives: Vec<f64>, constraints: Vec<f64>) -> Self {
        Self {
            objectives,
            constraints,
        }
    }

    /// Whether every constraint is satisfied.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.constraints.iter().all(|&c| c <= 0.0)
    }
}

impl From<(Vec<f64>, Vec<f64>)> for Evaluation {
    fn from((objectives, constraints): (Vec<f64>, Vec<f64>)) -> Self {
        Self::new(objectives, constraints)
    }
}

/// A black-box, possibly constrained, multi-objective function.
///
/// # Thread safety
///
/// Parallel evaluation ([`ExecutionMode::AllCores`](crate::ExecutionMode::AllCores))
/// calls the objective from several worker threads at once, which is why
/// [`CobraContext::initialize`](crate::CobraContext::initialize) requires
/// `Send + Sync + 'static`.
pub trait Objective {
    /// The error type returned by [`evaluate`](Objective::evaluate).
    type Error: ToString + 'static;

    /// Evaluate the function at `x`, given in native coordinates.
    ///
    /// # Errors
    ///
    /// Any error whose type implements `ToString`. A failing evaluation
    /// aborts initialization.
    fn evaluate(&self, x: &[f64]) -> Result<Evaluation, Self::Error>;
}

impl<F, R, E> Objective for F
where
    F: Fn(&[f64]) -> Result<R, E>,
    R: Into<Evaluation>,
    E: ToString + 'static,
{
    type Error = E;

    fn evaluate(&self, x: &[f64]) -> Result<Evaluation, E> {
        self(x).map(Into::into)
    }
}
