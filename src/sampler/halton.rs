//! Halton low-discrepancy sequence in the unit cube.
//!
//! Axis `k` uses the radical inverse in the `k`-th prime base. The sequence
//! starts at index 1, skipping the origin.

/// The first `n` points of the `dimension`-dimensional Halton sequence.
///
/// # Examples
///
/// ```
/// use samo_cobra::sampler::halton::sequence;
///
/// let points = sequence(2, 3);
/// let expected = [[0.5, 1.0 / 3.0], [0.25, 2.0 / 3.0], [0.75, 1.0 / 9.0]];
/// for (p, e) in points.iter().zip(&expected) {
///     assert!(p.iter().zip(e).all(|(a, b)| (a - b).abs() < 1e-15));
/// }
/// ```
#[must_use]
pub fn sequence(dimension: usize, n: usize) -> Vec<Vec<f64>> {
    let bases = first_primes(dimension);
    (1..=n)
        .map(|index| bases.iter().map(|&b| radical_inverse(index, b)).collect())
        .collect()
}

/// Van der Corput radical inverse of `index` in `base`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn radical_inverse(mut index: usize, base: usize) -> f64 {
    let mut result = 0.0;
    let mut f = 1.0 / base as f64;
    while index > 0 {
        result += (index % base) as f64 * f;
        index /= base;
        f /= base as f64;
    }
    result
}

fn first_primes(count: usize) -> Vec<usize> {
    let mut primes: Vec<usize> = Vec::with_capacity(count);
    let mut candidate = 2;
    while primes.len() < count {
        if primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0)
        {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_primes() {
        assert_eq!(first_primes(8), vec![2, 3, 5, 7, 11, 13, 17, 19]);
        assert!(first_primes(0).is_empty());
    }

    #[test]
    fn test_radical_inverse_base_two() {
        let values: Vec<f64> = (1..=4).map(|i| radical_inverse(i, 2)).collect();
        assert_eq!(values, vec![0.5, 0.25, 0.75, 0.125]);
    }

    #[test]
    fn test_sequence_in_open_unit_cube() {
        let points = sequence(6, 200);
        assert_eq!(points.len(), 200);
        for p in &points {
            assert_eq!(p.len(), 6);
            assert!(p.iter().all(|&v| v > 0.0 && v < 1.0));
        }
    }

    #[test]
    fn test_sequence_is_prefix_stable() {
        let short = sequence(3, 5);
        let long = sequence(3, 20);
        assert_eq!(short[..], long[..5]);
    }
}
