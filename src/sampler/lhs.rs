//! Centered Latin hypercube design in the unit cube.
//!
//! Each axis is split into `n` equal strata and every stratum is hit exactly
//! once, at its center. Several random candidates are drawn and the one
//! whose closest pair of points is farthest apart (maximin) is kept.

/// Build a centered Latin hypercube of `n` points in `[0, 1]^dimension`,
/// keeping the best of `iterations` candidates by minimum pairwise distance.
///
/// # Examples
///
/// ```
/// use samo_cobra::sampler::lhs::centered_maximin;
///
/// let design = centered_maximin(2, 4, 5, &mut fastrand::Rng::with_seed(1));
/// let mut first: Vec<f64> = design.iter().map(|x| x[0]).collect();
/// first.sort_by(f64::total_cmp);
/// assert_eq!(first, vec![0.125, 0.375, 0.625, 0.875]);
/// ```
#[must_use]
pub fn centered_maximin(
    dimension: usize,
    n: usize,
    iterations: usize,
    rng: &mut fastrand::Rng,
) -> Vec<Vec<f64>> {
    let mut best = Vec::new();
    let mut best_score = f64::NEG_INFINITY;
    for _ in 0..iterations.max(1) {
        let candidate = centered(dimension, n, rng);
        let score = min_pairwise_distance(&candidate);
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }
    best
}

#[allow(clippy::cast_precision_loss)]
fn centered(dimension: usize, n: usize, rng: &mut fastrand::Rng) -> Vec<Vec<f64>> {
    let mut design = vec![vec![0.0; dimension]; n];
    let mut strata: Vec<usize> = (0..n).collect();
    for axis in 0..dimension {
        rng.shuffle(&mut strata);
        for (point, &s) in design.iter_mut().zip(&strata) {
            point[axis] = (s as f64 + 0.5) / n as f64;
        }
    }
    design
}

/// Smallest Euclidean distance between any two points; infinite for fewer than two.
fn min_pairwise_distance(points: &[Vec<f64>]) -> f64 {
    let mut min = f64::INFINITY;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d2: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
            min = min.min(d2.sqrt());
        }
    }
    min
}
