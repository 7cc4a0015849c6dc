//! Uniform random design.

use crate::bounds::NormalizedBox;
use crate::rng_util;

/// Draw `n` independent points uniformly from `bounds`.
///
/// # Examples
///
/// ```
/// use samo_cobra::bounds::NormalizedBox;
/// use samo_cobra::sampler::random::uniform;
///
/// let bounds = NormalizedBox::new(-1.0, 1.0, 2).unwrap();
/// let design = uniform(5, &bounds, &mut fastrand::Rng::with_seed(1));
/// assert_eq!(design.len(), 5);
/// ```
#[must_use]
pub fn uniform(n: usize, bounds: &NormalizedBox, rng: &mut fastrand::Rng) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| {
            bounds
                .lower()
                .iter()
                .zip(bounds.upper())
                .map(|(&low, &high)| rng_util::f64_range(rng, low, high))
                .collect()
        })
        .collect()
}
