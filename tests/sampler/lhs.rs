use samo_cobra::sampler::LHS_ITERATIONS;
use samo_cobra::sampler::lhs::centered_maximin;

#[test]
fn each_axis_hits_every_stratum_center_once() {
    let n = 12;
    let points = centered_maximin(4, n, LHS_ITERATIONS, &mut fastrand::Rng::with_seed(7));
    assert_eq!(points.len(), n);

    for axis in 0..4 {
        let mut strata: Vec<usize> = points
            .iter()
            .map(|p| {
                let scaled = p[axis] * n as f64 - 0.5;
                assert!((scaled - scaled.round()).abs() < 1e-9, "{} is not centered", p[axis]);
                scaled.round() as usize
            })
            .collect();
        strata.sort_unstable();
        assert_eq!(strata, (0..n).collect::<Vec<_>>(), "axis {axis}");
    }
}

#[test]
fn more_candidates_never_reduce_the_minimum_distance() {
    fn min_distance(points: &[Vec<f64>]) -> f64 {
        let mut best = f64::INFINITY;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                let d: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
                best = best.min(d.sqrt());
            }
        }
        best
    }

    // With the same generator state the first candidate is shared, so
    // keeping the best of several can only match or beat a single draw.
    let single = centered_maximin(3, 10, 1, &mut fastrand::Rng::with_seed(11));
    let several = centered_maximin(3, 10, 8, &mut fastrand::Rng::with_seed(11));
    assert!(min_distance(&several) >= min_distance(&single));
}
