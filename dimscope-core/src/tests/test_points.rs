use crate::error::DimError;
use crate::points::PointSet;
use approx::assert_relative_eq;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

#[test]
fn test_from_rows_shape() {
    crate::init();
    let ps = PointSet::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
    assert_eq!(ps.shape(), (3, 2));
    assert_eq!(ps.row(1), &[3.0, 4.0]);
    assert_eq!(ps.rows().count(), 3);
}

#[test]
fn test_ragged_rows_rejected() {
    let err = PointSet::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
    match err {
        DimError::InvalidInput(msg) => assert!(msg.contains("row 1")),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_zero_dimension_rejected() {
    assert!(PointSet::from_rows(vec![vec![], vec![]]).is_err());
    assert!(PointSet::empty(0).is_err());
}

#[test]
fn test_no_rows_rejected_but_empty_allowed() {
    assert!(PointSet::from_rows(Vec::new()).is_err());
    let empty = PointSet::empty(4).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.ncols(), 4);
    assert!(empty.radii().is_empty());
}

#[test]
fn test_non_finite_rejected() {
    let err = PointSet::from_vec(vec![1.0, f64::NAN, 0.0, 0.0], 2, 2).unwrap_err();
    match err {
        DimError::InvalidInput(msg) => assert!(msg.contains("row 0 column 1")),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_buffer_shape_mismatch_rejected() {
    assert!(PointSet::from_vec(vec![1.0; 5], 2, 2).is_err());
}

#[test]
fn test_radii_in_row_order() {
    crate::init();
    let ps = PointSet::from_rows(vec![vec![3.0, 4.0], vec![0.0, 0.0], vec![6.0, 8.0]]).unwrap();
    let radii = ps.radii();
    assert_eq!(radii.len(), 3);
    assert_relative_eq!(radii[0], 5.0, epsilon = 1e-12);
    assert_eq!(radii[1], 0.0);
    assert_relative_eq!(radii[2], 10.0, epsilon = 1e-12);
}

#[test]
fn test_column_means() {
    let ps = PointSet::from_rows(vec![vec![1.0, 10.0], vec![3.0, 20.0]]).unwrap();
    assert_eq!(ps.column_means(), vec![2.0, 15.0]);
}

#[test]
fn test_dense_roundtrip_keeps_layout() {
    let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
    let dense = DenseMatrix::from_2d_vec(&rows).unwrap();
    assert_eq!(*dense.get((1, 0)), 4.0);

    let ps = PointSet::from_dense(&dense).unwrap();
    assert_eq!(ps.to_rows(), rows);

    let back = ps.to_dense().unwrap();
    assert_eq!(back.shape(), (2, 3));
    assert_eq!(*back.get((0, 2)), 3.0);
}

#[test]
fn test_overflowing_shape_rejected() {
    match PointSet::from_vec(vec![1.0; 4], usize::MAX, 2) {
        Err(DimError::InvalidInput(msg)) => assert!(msg.contains("overflows")),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}
