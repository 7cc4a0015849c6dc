//! Hypervolume progress over the evaluated design.
//!
//! For every prefix length `k = 1..=N` the feasible Pareto front of the first
//! `k` evaluated rows is recomputed from scratch and its hypervolume against
//! the fixed reference point recorded. The sequence is non-decreasing: adding
//! a row can only grow the dominated region. Only the indicator and front of
//! the full set (`k = N`) are exposed.
//!
//! Full recomputation costs O(N³ × M) for the dominance tests alone. An
//! incrementally maintained non-dominated set would give identical values;
//! initial designs are small enough that the plain form is kept.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pareto;

/// Feasible Pareto front of the evaluated design and its hypervolume history.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParetoState {
    /// `true` for rows that are feasible and non-dominated (full set).
    pub indicator: Vec<bool>,
    /// Objective rows selected by `indicator`, in row order.
    pub front: Vec<Vec<f64>>,
    /// Hypervolume of the feasible front of each prefix of the design.
    pub hypervolume_progress: Vec<f64>,
    /// Hypervolume of the full set; the last entry of `hypervolume_progress`.
    pub current_hv: f64,
}

impl ParetoState {
    /// Track the feasible front of `objectives`/`constraints` (row-aligned)
    /// against `reference`.
    ///
    /// # Examples
    ///
    /// ```
    /// use samo_cobra::tracker::ParetoState;
    ///
    /// let objectives = vec![vec![2.0, 2.0], vec![0.5, 0.5], vec![1.0, 3.0]];
    /// let constraints = vec![vec![-1.0], vec![1.0], vec![-1.0]];
    /// let state = ParetoState::track(&objectives, &constraints, &[4.0, 4.0]);
    ///
    /// // Row 1 would dominate everything but violates its constraint.
    /// assert_eq!(state.indicator, vec![true, false, true]);
    /// assert_eq!(state.hypervolume_progress, vec![4.0, 4.0, 5.0]);
    /// assert_eq!(state.current_hv, 5.0);
    /// ```
    #[must_use]
    pub fn track(objectives: &[Vec<f64>], constraints: &[Vec<f64>], reference: &[f64]) -> Self {
        let hypervolume_progress = hypervolume_progress(objectives, constraints, reference);
        let indicator = pareto::feasible_pareto_indicator(objectives, constraints);
        let front = pareto::pareto_front(objectives, &indicator);
        let current_hv = hypervolume_progress.last().copied().unwrap_or(0.0);

        trace_debug!(
            front_size = front.len(),
            current_hv,
            "feasible pareto front tracked"
        );

        Self {
            indicator,
            front,
            hypervolume_progress,
            current_hv,
        }
    }

    /// Number of rows on the feasible front.
    #[must_use]
    pub fn front_size(&self) -> usize {
        self.front.len()
    }
}

/// Hypervolume of the feasible Pareto front of every prefix of the rows.
///
/// Entry `k - 1` is the hypervolume of the first `k` rows. A prefix without
/// any feasible row has hypervolume 0.
#[must_use]
pub fn hypervolume_progress(
    objectives: &[Vec<f64>],
    constraints: &[Vec<f64>],
    reference: &[f64],
) -> Vec<f64> {
    (1..=objectives.len())
        .map(|k| {
            let indicator =
                pareto::feasible_pareto_indicator(&objectives[..k], &constraints[..k]);
            let front = pareto::pareto_front(&objectives[..k], &indicator);
            pareto::hypervolume(&front, reference)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_non_decreasing() {
        let mut rng = fastrand::Rng::with_seed(17);
        let objectives: Vec<Vec<f64>> = (0..30).map(|_| vec![rng.f64(), rng.f64()]).collect();
        let constraints: Vec<Vec<f64>> = (0..30).map(|_| vec![rng.f64() - 0.3]).collect();
        let progress = hypervolume_progress(&objectives, &constraints, &[1.0, 1.0]);
        assert_eq!(progress.len(), 30);
        assert!(progress.windows(2).all(|w| w[1] >= w[0]), "{progress:?}");
    }

    #[test]
    fn test_progress_zero_until_first_feasible() {
        let objectives = vec![vec![0.0, 0.0], vec![0.1, 0.1], vec![1.0, 1.0]];
        let constraints = vec![vec![1.0], vec![0.5], vec![0.0]];
        let progress = hypervolume_progress(&objectives, &constraints, &[2.0, 2.0]);
        assert_eq!(progress, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_matches_naive_recomputation() {
        let objectives = vec![
            vec![3.0, 1.0],
            vec![1.0, 3.0],
            vec![2.0, 2.0],
            vec![2.5, 2.5],
            vec![0.5, 3.5],
        ];
        let constraints = vec![vec![]; 5];
        let reference = [4.0, 4.0];
        let state = ParetoState::track(&objectives, &constraints, &reference);
        for k in 1..=objectives.len() {
            let front: Vec<Vec<f64>> = objectives[..k]
                .iter()
                .filter(|a| !objectives[..k].iter().any(|b| pareto::dominates(b, a)))
                .cloned()
                .collect();
            let expected = pareto::hypervolume(&front, &reference);
            assert!((state.hypervolume_progress[k - 1] - expected).abs() < 1e-12);
        }
        assert_eq!(state.indicator, vec![true, true, true, false, true]);
        assert_eq!(state.front_size(), 4);
    }

    #[test]
    fn test_empty_design() {
        let state = ParetoState::track(&[], &[], &[1.0]);
        assert!(state.hypervolume_progress.is_empty());
        assert!(state.indicator.is_empty());
        assert!(state.current_hv.abs() < f64::EPSILON);
    }
}
