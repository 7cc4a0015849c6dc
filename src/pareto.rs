//! Feasibility-aware Pareto dominance and the hypervolume indicator.
//!
//! All objectives are minimized. A row is **feasible** when every constraint
//! value is `<= 0`. The feasible Pareto front is the set of feasible rows
//! that no other feasible row dominates; infeasible rows never enter it and
//! never dominate anything.
//!
//! # Available functions
//!
//! | Function | Purpose |
//! |---|---|
//! | [`dominates`] | Pareto dominance between two objective vectors |
//! | [`feasible_pareto_indicator`] | Mark the feasible, non-dominated rows |
//! | [`pareto_front`] | Collect the objective rows selected by an indicator |
//! | [`hypervolume`] | Volume dominated by a front and bounded by a reference point |
//!
//! # Example
//!
//! ```
//! use samo_cobra::pareto::{feasible_pareto_indicator, hypervolume, pareto_front};
//!
//! let objectives = vec![
//!     vec![1.0, 5.0], // Pareto-optimal
//!     vec![5.0, 1.0], // Pareto-optimal
//!     vec![3.0, 3.0], // Pareto-optimal
//!     vec![4.0, 4.0], // dominated by (3, 3)
//!     vec![0.0, 0.0], // would dominate everything, but is infeasible
//! ];
//! let constraints = vec![vec![-1.0], vec![0.0], vec![-2.0], vec![-1.0], vec![0.5]];
//!
//! let pff = feasible_pareto_indicator(&objectives, &constraints);
//! assert_eq!(pff, vec![true, true, true, false, false]);
//!
//! let front = pareto_front(&objectives, &pff);
//! let hv = hypervolume(&front, &[6.0, 6.0]);
//! assert!((hv - 13.0).abs() < 1e-10);
//! ```

/// Returns `true` if objective vector `a` Pareto-dominates `b` (minimization).
///
/// `a` dominates `b` if it is no worse in every objective and strictly
/// better in at least one.
#[must_use]
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());

    let mut strictly_better = false;
    for (&av, &bv) in a.iter().zip(b) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Whether every constraint value is `<= 0`.
#[must_use]
pub fn is_feasible(constraints: &[f64]) -> bool {
    constraints.iter().all(|&c| c <= 0.0)
}

/// Mark the rows that are feasible and not dominated by any other feasible row.
///
/// `constraints` is row-aligned with `objectives`. Identical feasible rows do
/// not dominate each other, so duplicates on the front are all marked.
///
/// Complexity: O(M × N²) where M = objectives, N = rows.
#[must_use]
pub fn feasible_pareto_indicator(objectives: &[Vec<f64>], constraints: &[Vec<f64>]) -> Vec<bool> {
    debug_assert_eq!(objectives.len(), constraints.len());

    let feasible: Vec<bool> = constraints.iter().map(|c| is_feasible(c)).collect();
    (0..objectives.len())
        .map(|i| {
            feasible[i]
                && !(0..objectives.len())
                    .any(|j| j != i && feasible[j] && dominates(&objectives[j], &objectives[i]))
        })
        .collect()
}

/// Collect the objective rows marked by `indicator`.
#[must_use]
pub fn pareto_front(objectives: &[Vec<f64>], indicator: &[bool]) -> Vec<Vec<f64>> {
    objectives
        .iter()
        .zip(indicator)
        .filter(|&(_, &on_front)| on_front)
        .map(|(row, _)| row.clone())
        .collect()
}

/// Compute the hypervolume indicator of a front (minimization).
///
/// The hypervolume is the volume of the objective space dominated by the
/// front and bounded by `reference`. Points that do not strictly dominate the
/// reference point contribute nothing. An empty front has hypervolume 0.
///
/// Uses recursive slicing on the last objective. Dominated points in `front`
/// are tolerated and do not change the result.
///
/// # Panics
///
/// Panics (in debug) if a point's length differs from the reference point's.
#[must_use]
pub fn hypervolume(front: &[Vec<f64>], reference: &[f64]) -> f64 {
    let d = reference.len();
    debug_assert!(front.iter().all(|p| p.len() == d));

    // Keep only points strictly dominated by the reference point.
    let filtered: Vec<Vec<f64>> = front
        .iter()
        .filter(|p| p.iter().zip(reference).all(|(&pv, &rv)| pv < rv))
        .cloned()
        .collect();

    if d == 0 || filtered.is_empty() {
        return 0.0;
    }

    hv_recursive(&filtered, reference)
}

/// Recursive hypervolume via slicing on the last objective.
///
/// This is the hypervolume-by-slicing-objectives (HSO) scheme, for
/// minimization only: sort by the last objective, and for each slab add its
/// height times the `d - 1` hypervolume of the projected non-dominated
/// points below it. All points are dominated by `reference`.
fn hv_recursive(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let d = reference.len();

    // Base case: 1-D hypervolume is just the gap from the best point to ref.
    if d == 1 {
        let min_val = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
        return (reference[0] - min_val).max(0.0);
    }

    // Single point: hypervolume is the product of gaps.
    if points.len() == 1 {
        return points[0]
            .iter()
            .zip(reference)
            .map(|(&p, &r)| (r - p).max(0.0))
            .product();
    }

    let mut sorted: Vec<&Vec<f64>> = points.iter().collect();
    sorted.sort_by(|a, b| a[d - 1].total_cmp(&b[d - 1]));

    let sub_ref = &reference[..d - 1];
    let mut result = 0.0;

    for i in 0..sorted.len() {
        let height = if i + 1 < sorted.len() {
            sorted[i + 1][d - 1] - sorted[i][d - 1]
        } else {
            reference[d - 1] - sorted[i][d - 1]
        };

        if height <= 0.0 {
            continue;
        }

        // Project points[0..=i] onto the first d-1 objectives and keep the
        // non-dominated subset.
        let projected: Vec<Vec<f64>> = sorted[..=i].iter().map(|p| p[..d - 1].to_vec()).collect();
        let non_dom = non_dominated(&projected);

        if !non_dom.is_empty() {
            result += height * hv_recursive(&non_dom, sub_ref);
        }
    }

    result
}

/// Return the non-dominated subset of `points`.
fn non_dominated(points: &[Vec<f64>]) -> Vec<Vec<f64>> {
    points
        .iter()
        .enumerate()
        .filter(|&(i, p)| {
            !points
                .iter()
                .enumerate()
                .any(|(j, q)| i != j && dominates(q, p))
        })
        .map(|(_, p)| p.clone())
        .collect()
}
