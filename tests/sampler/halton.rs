use samo_cobra::SamplingStrategy;
use samo_cobra::bounds::NormalizedBox;
use samo_cobra::sampler::halton::sequence;
use samo_cobra::sampler::initial_design;

#[test]
fn first_axes_use_bases_two_three_five() {
    let points = sequence(3, 4);
    let expected = [
        [0.5, 1.0 / 3.0, 0.2],
        [0.25, 2.0 / 3.0, 0.4],
        [0.75, 1.0 / 9.0, 0.6],
        [0.125, 4.0 / 9.0, 0.8],
    ];
    for (p, e) in points.iter().zip(&expected) {
        for (a, b) in p.iter().zip(e) {
            assert!((a - b).abs() < 1e-12, "{p:?} vs {e:?}");
        }
    }
}

#[test]
fn origin_is_skipped_and_points_are_distinct() {
    let points = sequence(5, 64);
    assert!(points.iter().all(|p| p.iter().all(|&v| v > 0.0 && v < 1.0)));
    for (i, a) in points.iter().enumerate() {
        assert!(points[i + 1..].iter().all(|b| a != b));
    }
}

#[test]
fn halton_design_ignores_the_seed() {
    let bounds = NormalizedBox::new(-1.0, 1.0, 2).unwrap();
    let draw = |seed| {
        initial_design(SamplingStrategy::Halton, 5, &bounds, &mut fastrand::Rng::with_seed(seed))
            .unwrap()
    };
    let (a, b) = (draw(1), draw(2));
    assert_eq!(a, b);
    assert!(a[0][0].abs() < 1e-15);
    assert!((a[0][1] + 1.0 / 3.0).abs() < 1e-15);
}
