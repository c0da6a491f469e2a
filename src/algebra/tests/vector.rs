use crate::algebra::*;

#[test]
fn test_copy_from() {
    let x = vec![3., 0., 2., 1.];
    let mut y = vec![0.; 4];
    y.copy_from(&x);
    assert_eq!(x, y);
}

#[test]
fn test_scalarop() {
    let mut x = vec![3., 0., 2., 1.];
    x.scalarop(|x| -2. * x);
    assert_eq!(x, vec![-6., 0., -4., -2.]);
}

#[test]
fn test_scalarop_from() {
    let x: Vec<f64> = vec![3., 0., 2., 1.];
    let mut y: Vec<f64> = vec![0.; 4];
    y.scalarop_from(|x| -2. * x, &x);
    assert_eq!(y, vec![-6., 0., -4., -2.]);
}

#[test]
fn test_translate_and_scale() {
    let mut x = [3., 0., 2., 1.];
    x.translate(-4.);
    assert_eq!(x, [-1., -4., -2., -3.]);
    x.scale(-2.);
    assert_eq!(x, [2., 8., 4., 6.]);
}

#[test]
fn test_recip() {
    let mut x = [3., 10., 2., 1.];
    x.recip();
    assert!(x.norm_inf_diff(&[1. / 3., 1. / 10., 1. / 2., 1.]) < 1e-15);
}

#[test]
fn test_hadamard_and_negate() {
    let mut x = vec![1., 2., 3., 4.];
    let s = vec![-1., -2., -4., 8.];
    x.hadamard(&s).negate();
    assert_eq!(x, vec![1., 4., 12., -32.]);
}

#[test]
fn test_op_chaining() {
    let x = vec![5., 1., 3., 7.];
    let mut y = vec![1.; 4];
    y.axpby(1., &x, 3.).recip().hadamard(&[1., 2., 3., 4.]);
    assert_eq!(y, vec![0.125, 0.5, 0.5, 0.4]);
}

#[test]
fn test_dot_and_dist() {
    let x = vec![3., 0., 2., 1.];
    let y = vec![-1., -2., 3., 4.];

    assert_eq!(x.dot(&y), 7.);
    assert_eq!(y.dot(&x), 7.);
    assert_eq!(x.dist(&y), f64::sqrt(30.));
}

#[test]
fn test_norms() {
    let x = [-3., 4., -12.];
    assert_eq!(x.sumsq(), 169.);
    assert_eq!(x.norm(), 13.);
    assert_eq!(x.norm_inf(), 12.);
    assert_eq!(x.norm_one(), 19.);

    let x = [-3., f64::NAN, -12.];
    assert!(x.norm_inf().is_nan());
    assert!(!x.is_finite());
}

#[test]
fn test_empty_reductions() {
    let x: [f64; 0] = [];
    assert_eq!(x.sum(), 0.);
    assert_eq!(x.norm(), 0.);
    assert_eq!(x.norm_inf(), 0.);
    assert!(x.is_finite());
}

#[test]
fn test_minimum_maximum() {
    let x = [-3., 4., -12.];
    assert_eq!(x.minimum(), -12.);
    assert_eq!(x.maximum(), 4.);
}

#[test]
fn test_axpby() {
    let x = vec![3., 0., 2., 1.];
    let mut y = vec![-1., -2., -1., 0.];

    //y = ax + by
    y.axpby(2., &x, 3.);

    assert_eq!(y, [3., -6., 1., 2.]);
}

#[test]
fn test_waxpby() {
    let x = vec![3., 0., 2., 1.];
    let y = vec![-1., -2., -1., 0.];
    let mut w = vec![0f64; 4];

    //w = ax + by
    w.waxpby(2., &x, 3., &y);

    assert_eq!(w, [3., -6., 1., 2.]);
}
