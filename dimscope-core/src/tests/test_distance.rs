// dimscope-core/src/tests/test_distance.rs

use crate::distance::*;
use crate::error::DimError;
use approx::assert_relative_eq;
use proptest::prelude::*;

#[test]
fn test_radius_three_four_five() {
    crate::init();
    let r = radius(&[3.0, 4.0]).unwrap();
    assert_relative_eq!(r, 5.0, epsilon = 1e-12);
}

#[test]
fn test_radius_origin_is_zero() {
    crate::init();
    assert_eq!(radius(&[0.0, 0.0, 0.0]).unwrap(), 0.0);
}

#[test]
fn test_radius_empty_rejected() {
    crate::init();
    match radius(&[]) {
        Err(DimError::InvalidInput(msg)) => assert!(msg.contains("empty")),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_radius_non_finite_rejected() {
    crate::init();
    assert!(matches!(
        radius(&[1.0, f64::NAN]),
        Err(DimError::InvalidInput(_))
    ));
    assert!(matches!(
        radius(&[f64::INFINITY]),
        Err(DimError::InvalidInput(_))
    ));
}

#[test]
fn test_euclidean_distances() {
    let a = [0.0, 0.0];
    let b = [3.0, 4.0];
    assert_relative_eq!(euclidean_distance_slice(&a, &b), 5.0, epsilon = 1e-12);
    assert_eq!(euclidean_distance_slice(&[2.0], &[-1.0]), 3.0);
}

#[test]
#[should_panic]
fn test_euclidean_length_mismatch_panics() {
    euclidean_distance_slice(&[1.0, 2.0], &[1.0]);
}

#[test]
fn test_radius_large_components_stay_finite() {
    crate::init();
    let r = radius(&[1e200, 1e200]).unwrap();
    assert!(r.is_finite(), "radius overflowed: {}", r);
    assert_relative_eq!(r, 1e200 * 2f64.sqrt(), max_relative = 1e-12);

    let near_max = radius(&[1e308, 1e308]).unwrap();
    assert!(near_max.is_finite());
    assert_relative_eq!(near_max, 1e308 * 2f64.sqrt(), max_relative = 1e-12);
}

#[test]
fn test_radius_tiny_components_do_not_underflow() {
    let r = radius(&[3e-200, 4e-200]).unwrap();
    assert_relative_eq!(r, 5e-200, max_relative = 1e-12);
}

#[test]
fn test_euclidean_large_opposite_coordinates() {
    let d = euclidean_distance_slice(&[1e200, -1e200], &[-1e200, 1e200]);
    assert!(d.is_finite());
    assert_relative_eq!(d, 2e200 * 2f64.sqrt(), max_relative = 1e-12);

    let d = euclidean_distance_slice(&[1e308], &[-5e307]);
    assert_relative_eq!(d, 1.5e308, max_relative = 1e-12);
}

proptest! {
    #[test]
    fn radius_is_non_negative(v in proptest::collection::vec(-1e6f64..1e6, 1..64)) {
        let r = radius(&v).unwrap();
        prop_assert!(r >= 0.0);
    }

    #[test]
    fn radius_of_origin_is_zero(d in 1usize..256) {
        prop_assert_eq!(radius(&vec![0.0; d]).unwrap(), 0.0);
    }

    #[test]
    fn radius_scales_linearly(v in proptest::collection::vec(-1e3f64..1e3, 1..32), s in 0.0f64..10.0) {
        let scaled: Vec<f64> = v.iter().map(|x| x * s).collect();
        let expected = radius(&v).unwrap() * s;
        let actual = radius(&scaled).unwrap();
        prop_assert!((expected - actual).abs() <= 1e-9 * (1.0 + expected));
    }
}
