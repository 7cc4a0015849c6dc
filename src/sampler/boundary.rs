//! Random subset of the corners of the normalized box.
//!
//! The `2^d` corners are ordered lexicographically, lower bound before upper
//! bound, first axis most significant. A uniform subset of exactly `n`
//! distinct corners is drawn and returned in that order. Only the chosen
//! corners are materialized, so large dimensions are fine.
//!
//! While corner indices fit in a `usize`, they are drawn with Floyd's
//! algorithm. From `usize::BITS` axes on, each corner is drawn as `d` fair
//! coin flips and duplicates are redrawn.

use std::collections::BTreeSet;

use crate::bounds::NormalizedBox;
use crate::error::{Error, Result};
use crate::rng_util;

/// Number of corners of a `dimension`-dimensional box, saturating at `usize::MAX`.
#[must_use]
pub fn corner_count(dimension: usize) -> usize {
    u32::try_from(dimension)
        .ok()
        .and_then(|d| 1usize.checked_shl(d))
        .unwrap_or(usize::MAX)
}

/// Draw `n` distinct corners of `bounds` uniformly without replacement.
///
/// # Errors
///
/// Returns [`Error::TooManyCorners`] if `n` exceeds the number of corners.
///
/// # Examples
///
/// ```
/// use samo_cobra::bounds::NormalizedBox;
/// use samo_cobra::sampler::boundary::corner_subset;
///
/// let bounds = NormalizedBox::new(-1.0, 1.0, 2).unwrap();
/// let corners = corner_subset(4, &bounds, &mut fastrand::Rng::with_seed(1)).unwrap();
/// assert_eq!(
///     corners,
///     vec![vec![-1.0, -1.0], vec![-1.0, 1.0], vec![1.0, -1.0], vec![1.0, 1.0]]
/// );
/// ```
pub fn corner_subset(
    n: usize,
    bounds: &NormalizedBox,
    rng: &mut fastrand::Rng,
) -> Result<Vec<Vec<f64>>> {
    let d = bounds.dimension();
    let available = corner_count(d);
    if n > available {
        return Err(Error::TooManyCorners {
            requested: n,
            available,
        });
    }

    let chosen: Vec<Vec<bool>> = if indexable(d) {
        rng_util::distinct_indices(rng, available, n)
            .into_iter()
            .map(|index| index_bits(index, d))
            .collect()
    } else {
        random_bits(rng, n, d)
    };
    Ok(chosen.iter().map(|bits| corner(bits, bounds)).collect())
}

/// Whether every corner of a `d`-dimensional box has a `usize` index.
fn indexable(d: usize) -> bool {
    u32::try_from(d).is_ok_and(|d| d < usize::BITS)
}

/// Axis bits of the corner at lexicographic position `index`, first axis
/// first. Requires `indexable(d)`.
fn index_bits(index: usize, d: usize) -> Vec<bool> {
    (0..d).map(|axis| (index >> (d - 1 - axis)) & 1 == 1).collect()
}

/// `n` distinct uniform corners of a `d`-cube in lexicographic order.
fn random_bits(rng: &mut fastrand::Rng, n: usize, d: usize) -> Vec<Vec<bool>> {
    let mut chosen = BTreeSet::new();
    while chosen.len() < n {
        chosen.insert((0..d).map(|_| rng.bool()).collect::<Vec<bool>>());
    }
    chosen.into_iter().collect()
}

fn corner(bits: &[bool], bounds: &NormalizedBox) -> Vec<f64> {
    bits.iter()
        .enumerate()
        .map(|(axis, &high)| {
            if high {
                bounds.upper()[axis]
            } else {
                bounds.lower()[axis]
            }
        })
        .collect()
}
