use samo_cobra::bounds::NormalizedBox;
use samo_cobra::sampler::random::uniform;

#[test]
fn uniform_draws_cover_each_axis_evenly() {
    let bounds = NormalizedBox::new(-1.0, 1.0, 2).unwrap();
    let mut rng = fastrand::Rng::with_seed(42);
    let n = 2000;
    let points = uniform(n, &bounds, &mut rng);

    for axis in 0..2 {
        let mut values: Vec<f64> = points.iter().map(|p| p[axis]).collect();
        values.sort_by(f64::total_cmp);
        let q1 = values[n / 4];
        let q2 = values[n / 2];
        let q3 = values[3 * n / 4];
        assert!((q1 + 0.5).abs() < 0.1, "Q1 {q1} should be close to -0.5");
        assert!(q2.abs() < 0.1, "median {q2} should be close to 0");
        assert!((q3 - 0.5).abs() < 0.1, "Q3 {q3} should be close to 0.5");
    }
}

#[test]
fn zero_points() {
    let bounds = NormalizedBox::new(-1.0, 1.0, 3).unwrap();
    assert!(uniform(0, &bounds, &mut fastrand::Rng::with_seed(0)).is_empty());
}
