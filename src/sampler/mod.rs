//! Initial design strategies.
//!
//! [`initial_design`] draws the first `n` points of a run in the
//! [`NormalizedBox`] using one of four [`SamplingStrategy`] variants:
//!
//! | Strategy | Module | Notes |
//! |----------|--------|-------|
//! | [`Random`](SamplingStrategy::Random) | [`random`] | independent uniform draws |
//! | [`LatinHypercube`](SamplingStrategy::LatinHypercube) | [`lhs`] | centered LHS, best of several by maximin distance |
//! | [`Halton`](SamplingStrategy::Halton) | [`halton`] | deterministic low-discrepancy sequence |
//! | [`BoundarySubset`](SamplingStrategy::BoundarySubset) | [`boundary`] | `n` distinct corners of the box |
//!
//! All stochastic strategies draw from the generator passed in, so the same
//! seed and strategy always reproduce the same design.
//!
//! # Example
//!
//! ```
//! use samo_cobra::SamplingStrategy;
//! use samo_cobra::bounds::NormalizedBox;
//! use samo_cobra::sampler::initial_design;
//!
//! let bounds = NormalizedBox::new(-1.0, 1.0, 3).unwrap();
//! let mut rng = fastrand::Rng::with_seed(1);
//! let design = initial_design(SamplingStrategy::LatinHypercube, 8, &bounds, &mut rng).unwrap();
//! assert_eq!(design.len(), 8);
//! assert!(design.iter().all(|x| bounds.contains(x, 1e-12)));
//! ```

pub mod boundary;
pub mod halton;
pub mod lhs;
pub mod random;

use crate::bounds::NormalizedBox;
use crate::error::Result;
use crate::types::SamplingStrategy;

/// Candidate designs generated by the Latin hypercube strategy.
pub const LHS_ITERATIONS: usize = 5;

/// Draw `n` design points in `bounds` with the given strategy.
///
/// # Errors
///
/// Returns [`Error::TooManyCorners`](crate::Error::TooManyCorners) if a
/// boundary design asks for more points than the box has corners.
pub fn initial_design(
    strategy: SamplingStrategy,
    n: usize,
    bounds: &NormalizedBox,
    rng: &mut fastrand::Rng,
) -> Result<Vec<Vec<f64>>> {
    let d = bounds.dimension();
    match strategy {
        SamplingStrategy::Random => Ok(random::uniform(n, bounds, rng)),
        SamplingStrategy::LatinHypercube => lhs::centered_maximin(d, n, LHS_ITERATIONS, rng)
            .iter()
            .map(|u| bounds.from_unit(u))
            .collect(),
        SamplingStrategy::Halton => halton::sequence(d, n)
            .iter()
            .map(|u| bounds.from_unit(u))
            .collect(),
        SamplingStrategy::BoundarySubset => boundary::corner_subset(n, bounds, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [SamplingStrategy; 4] = [
        SamplingStrategy::Random,
        SamplingStrategy::LatinHypercube,
        SamplingStrategy::Halton,
        SamplingStrategy::BoundarySubset,
    ];

    #[test]
    fn test_every_strategy_stays_in_box() {
        let bounds = NormalizedBox::new(-1.0, 1.0, 4).unwrap();
        for strategy in STRATEGIES {
            let mut rng = fastrand::Rng::with_seed(3);
            let design = initial_design(strategy, 9, &bounds, &mut rng).unwrap();
            assert_eq!(design.len(), 9, "{strategy}");
            for x in &design {
                assert_eq!(x.len(), 4);
                assert!(bounds.contains(x, 1e-12), "{strategy}: {x:?}");
            }
        }
    }

    #[test]
    fn test_same_seed_same_design() {
        let bounds = NormalizedBox::new(-2.0, 3.0, 3).unwrap();
        for strategy in STRATEGIES {
            let a = initial_design(strategy, 6, &bounds, &mut fastrand::Rng::with_seed(11)).unwrap();
            let b = initial_design(strategy, 6, &bounds, &mut fastrand::Rng::with_seed(11)).unwrap();
            assert_eq!(a, b, "{strategy}");
        }
    }
}
