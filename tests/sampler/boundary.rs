use samo_cobra::Error;
use samo_cobra::bounds::NormalizedBox;
use samo_cobra::sampler::boundary::{corner_count, corner_subset};

#[test]
fn corners_are_distinct_vertices_in_lexicographic_order() {
    let bounds = NormalizedBox::new(-1.0, 1.0, 6).unwrap();
    let corners = corner_subset(20, &bounds, &mut fastrand::Rng::with_seed(3)).unwrap();
    assert_eq!(corners.len(), 20);
    for c in &corners {
        assert!(c.iter().all(|&v| v == -1.0 || v == 1.0), "{c:?} is not a vertex");
    }
    // Lexicographic order with -1 before 1 is plain ordering of the rows.
    assert!(
        corners
            .windows(2)
            .all(|w| w[0].partial_cmp(&w[1]) == Some(core::cmp::Ordering::Less))
    );
}

#[test]
fn full_subset_enumerates_every_corner() {
    let bounds = NormalizedBox::new(0.0, 1.0, 3).unwrap();
    let corners = corner_subset(8, &bounds, &mut fastrand::Rng::with_seed(5)).unwrap();
    assert_eq!(corners.len(), corner_count(3));
    assert_eq!(corners[0], vec![0.0, 0.0, 0.0]);
    assert_eq!(corners[1], vec![0.0, 0.0, 1.0]);
    assert_eq!(corners[4], vec![1.0, 0.0, 0.0]);
    assert_eq!(corners[7], vec![1.0, 1.0, 1.0]);
}

#[test]
fn too_many_corners() {
    let bounds = NormalizedBox::new(-1.0, 1.0, 3).unwrap();
    let err = corner_subset(10, &bounds, &mut fastrand::Rng::with_seed(1)).unwrap_err();
    assert!(matches!(
        err,
        Error::TooManyCorners {
            requested: 10,
            available: 8
        }
    ));
}

#[test]
fn high_dimensions_do_not_enumerate() {
    let bounds = NormalizedBox::new(-1.0, 1.0, 80).unwrap();
    assert_eq!(corner_count(80), usize::MAX);
    let corners = corner_subset(4, &bounds, &mut fastrand::Rng::with_seed(1)).unwrap();
    assert_eq!(corners.len(), 4);
    assert!(corners.iter().all(|c| c.len() == 80));
}
