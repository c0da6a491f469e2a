#![allow(non_snake_case)]

use crate::algebra::{Adjoint, FloatT, Matrix, MatrixMath, MultiplyGEMV, VectorMath};
use std::iter::zip;

impl<T> MultiplyGEMV for Matrix<T>
where
    T: FloatT,
{
    type T = T;
    // implements y = αA*x + βy
    fn gemv(&self, x: &[T], y: &mut [T], α: T, β: T) {
        assert!(self.n == x.len() && self.m == y.len());

        // BLAS convention : β = 0 overwrites y, even if it holds NaNs
        if β == T::zero() {
            y.set(T::zero());
        } else if β != T::one() {
            y.scale(β);
        }

        for (j, &xj) in x.iter().enumerate() {
            let αxj = α * xj;
            if αxj == T::zero() {
                continue;
            }
            zip(&mut *y, self.col_slice(j)).for_each(|(y, &a)| *y += αxj * a);
        }
    }
}

impl<T> MultiplyGEMV for Adjoint<'_, Matrix<T>>
where
    T: FloatT,
{
    type T = T;
    // implements y = αA'*x + βy
    fn gemv(&self, x: &[T], y: &mut [T], α: T, β: T) {
        let A = self.src;
        assert!(A.m == x.len() && A.n == y.len());

        for (j, yj) in y.iter_mut().enumerate() {
            let dot = A.col_slice(j).dot(x);
            *yj = if β == T::zero() {
                α * dot
            } else {
                α * dot + β * (*yj)
            };
        }
    }
}

impl<T> MatrixMath for Matrix<T>
where
    T: FloatT,
{
    type T = T;

    fn scale(&mut self, c: T) {
        self.data.scale(c);
    }

    fn negate(&mut self) {
        self.data.negate();
    }

    fn diag_norm_inf(&self) -> T {
        (0..usize::min(self.m, self.n)).fold(T::zero(), |acc, i| T::max(acc, self[(i, i)].abs()))
    }

    fn quad_form(&self, y: &[T], x: &[T]) -> T {
        assert!(self.m == y.len() && self.n == x.len());
        let mut out = T::zero();
        for (j, &xj) in x.iter().enumerate() {
            out += xj * self.col_slice(j).dot(y);
        }
        out
    }

    fn add_gram_scaled(&mut self, B: &Matrix<T>, d: &[T]) {
        // self += B'*Diagonal(d)*B
        assert!(self.m == B.n && self.n == B.n);
        assert_eq!(B.m, d.len());

        let mut work = vec![T::zero(); B.m];
        for j in 0..B.n {
            work.copy_from(B.col_slice(j));
            work.hadamard(d);
            for i in 0..=j {
                let v = B.col_slice(i).dot(&work);
                self[(i, j)] += v;
                if i != j {
                    self[(j, i)] += v;
                }
            }
        }
    }
}

#[test]
fn test_gemv() {
    let (m, n) = (2, 3);
    let a = vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
    let A = Matrix::new_from_slice((m, n), &a);

    let x = vec![1., 2., 3.];
    let mut y = vec![-1., -2.];
    A.gemv(&x, &mut y, 2.0, 3.0);
    assert!(y == [25.0, 58.0]);

    let x = vec![1., 2.];
    let mut y = vec![-1., -2., -3.];
    A.t().gemv(&x, &mut y, 2.0, 3.0);
    assert!(y == [15.0, 18.0, 21.0]);
}

#[test]
fn test_gemv_beta_zero_clears_nan() {
    let A = Matrix::<f64>::identity(2);
    let mut y = vec![f64::NAN, f64::NAN];
    A.gemv(&[1., 2.], &mut y, 1.0, 0.0);
    assert_eq!(y, [1., 2.]);
}

#[test]
fn test_quad_form() {
    let P = Matrix::from(&[[4., 1.], [1., 2.]]);
    let x = [1., -2.];
    // 4 - 2 - 2 + 8
    assert_eq!(P.quad_form(&x, &x), 8.);
}

#[test]
fn test_add_gram_scaled() {
    let B = Matrix::from(&[[1., 2.], [0., -1.], [3., 1.]]);
    let d = [1., 2., 0.5];
    let mut M = Matrix::<f64>::identity(2);
    M.add_gram_scaled(&B, &d);

    // B'*D*B = [1*1 + 0 + 0.5*9,  1*2 + 0 + 0.5*3;
    //           ...            ,  4 + 2 + 0.5   ]
    let expected = Matrix::from(&[[1. + 5.5, 3.5], [3.5, 1. + 6.5]]);
    assert!(M.data().norm_inf_diff(expected.data()) < 1e-14);
}
