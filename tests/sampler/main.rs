#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

mod boundary;
mod halton;
mod lhs;
mod random;

use samo_cobra::SamplingStrategy;
use samo_cobra::bounds::NormalizedBox;
use samo_cobra::sampler::initial_design;

const STRATEGIES: [SamplingStrategy; 4] = [
    SamplingStrategy::Random,
    SamplingStrategy::LatinHypercube,
    SamplingStrategy::Halton,
    SamplingStrategy::BoundarySubset,
];

#[test]
fn every_strategy_stays_in_asymmetric_box() {
    let bounds = NormalizedBox::new(-0.5, 2.0, 5).unwrap();
    for strategy in STRATEGIES {
        let mut rng = fastrand::Rng::with_seed(9);
        let design = initial_design(strategy, 20, &bounds, &mut rng).unwrap();
        assert_eq!(design.len(), 20, "{strategy}");
        for x in &design {
            assert!(bounds.contains(x, 1e-12), "{strategy}: {x:?}");
        }
    }
}

#[test]
fn seeds_control_stochastic_strategies() {
    let bounds = NormalizedBox::new(-1.0, 1.0, 4).unwrap();
    for strategy in [
        SamplingStrategy::Random,
        SamplingStrategy::LatinHypercube,
        SamplingStrategy::BoundarySubset,
    ] {
        let draw = |seed| {
            initial_design(strategy, 6, &bounds, &mut fastrand::Rng::with_seed(seed)).unwrap()
        };
        assert_eq!(draw(3), draw(3), "{strategy}");
        assert_ne!(draw(3), draw(4), "{strategy}");
    }
}

#[test]
fn tags_round_trip_through_display() {
    for strategy in STRATEGIES {
        let parsed: SamplingStrategy = strategy.to_string().parse().unwrap();
        assert_eq!(parsed, strategy);
    }
}
