#![allow(non_snake_case)]
use crate::algebra::*;

fn test_matrix_3x2() -> Matrix<f64> {
    // A =
    //[ 1.0   2.0 ]
    //[ 0.0  -1.0 ]
    //[ 3.0   1.0 ]
    Matrix::from(&[[1., 2.], [0., -1.], [3., 1.]])
}

#[test]
fn test_matrix_from_rows_is_column_major() {
    let A = test_matrix_3x2();
    assert_eq!(A.size(), (3, 2));
    assert_eq!(A.data(), &[1., 0., 3., 2., -1., 1.]);
    assert_eq!(A.col_slice(1), &[2., -1., 1.]);
    assert_eq!(A[(2, 0)], 3.);
}

#[test]
fn test_adjoint_indexing() {
    let A = test_matrix_3x2();
    let At = A.t();
    assert_eq!(At.size(), (2, 3));
    assert_eq!(At.shape(), MatrixShape::T);
    assert_eq!(At[(1, 0)], 2.);
    assert_eq!(At[(0, 2)], 3.);
}

#[test]
fn test_empty_matrix() {
    let A = Matrix::<f64>::zeros((0, 3));
    assert_eq!(A.size(), (0, 3));
    assert!(A.data().is_empty());

    // products with an empty matrix are well defined
    let mut y = vec![1., 2., 3.];
    A.t().gemv(&[], &mut y, 1.0, 0.0);
    assert_eq!(y, [0., 0., 0.]);
}

#[test]
fn test_set_block() {
    let A = test_matrix_3x2();
    let mut K = Matrix::<f64>::zeros((5, 5));
    K.set_block(2, 0, &A);
    K.set_block_t(0, 2, &A);

    assert!(K.is_symmetric(0.0));
    assert_eq!(K[(3, 1)], -1.);
    assert_eq!(K[(1, 3)], -1.);
    assert_eq!(K[(4, 0)], 3.);
    assert_eq!(K[(0, 4)], 3.);
    assert_eq!(K[(0, 0)], 0.);
}

#[test]
fn test_is_symmetric() {
    let mut P = Matrix::from(&[[4., 1.], [1., 2.]]);
    assert!(P.is_symmetric(0.0));
    P[(0, 1)] = 1.0 + 1e-10;
    assert!(!P.is_symmetric(0.0));
    assert!(P.is_symmetric(1e-8));
    assert!(!test_matrix_3x2().is_symmetric(1.0));
}

#[test]
fn test_matrix_scale_negate() {
    let mut A = test_matrix_3x2();
    A.scale(2.);
    A.negate();
    assert_eq!(A.col_slice(0), &[-2., 0., -6.]);
    assert_eq!(A.diag_norm_inf(), 2.);
}
