#![allow(non_snake_case)]

use crate::algebra::*;
use derive_builder::Builder;

/// Required settings for [`LdlEngine`](LdlEngine)

#[derive(Builder, Debug, Clone)]
pub struct LdlSettings<T: FloatT> {
    /// expected signs of the pivots.  Used only for dynamic regularization
    #[builder(default = "None", setter(strip_option))]
    Dsigns: Option<Vec<i8>>,
    #[builder(default = "true")]
    regularize_enable: bool,
    #[builder(default = "(1e-12).as_T()")]
    regularize_eps: T,
    #[builder(default = "(1e-7).as_T()")]
    regularize_delta: T,
}

impl<T> Default for LdlSettings<T>
where
    T: FloatT,
{
    fn default() -> LdlSettings<T> {
        LdlSettingsBuilder::<T>::default().build().unwrap()
    }
}

/// Performs a dense $LDL^T$ factorization of a symmetric quasidefinite matrix.
///
/// No pivoting is performed.  A pivot whose value falls below `regularize_eps`
/// in the direction of its expected sign is replaced with `regularize_delta`
/// times that sign, which guarantees a finite factorization for any
/// symmetric input when dynamic regularization is enabled.

#[derive(Debug)]
pub struct LdlEngine<T: FloatT = f64> {
    /// unit lower triangular factor
    pub L: Matrix<T>,
    /// D and its inverse for A = LDL^T
    pub D: Vec<T>,
    pub Dinv: Vec<T>,
    settings: LdlSettings<T>,
    work: Vec<T>,
    positive_inertia: usize,
    regularize_count: usize,
}

impl<T> LdlEngine<T>
where
    T: FloatT,
{
    pub fn new(n: usize, settings: LdlSettings<T>) -> Result<Self, DenseFactorizationError> {
        if let Some(ref signs) = settings.Dsigns {
            if signs.len() != n {
                return Err(DenseFactorizationError::IncompatibleDimension);
            }
        }
        Ok(Self {
            L: Matrix::identity(n),
            D: vec![T::zero(); n],
            Dinv: vec![T::zero(); n],
            settings,
            work: vec![T::zero(); n],
            positive_inertia: 0,
            regularize_count: 0,
        })
    }

    /// number of strictly positive pivots in the last factorization
    pub fn positive_inertia(&self) -> usize {
        self.positive_inertia
    }

    /// number of pivots replaced by dynamic regularization in the last factorization
    pub fn regularize_count(&self) -> usize {
        self.regularize_count
    }

    /// Factor the symmetric matrix `A`.  Only the lower triangle of `A` is read.
    pub fn factor(&mut self, A: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        let n = self.D.len();
        if A.size() != (n, n) {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        let L = &mut self.L;
        let D = &mut self.D;
        let v = &mut self.work;
        let opts = &self.settings;

        L.set_identity();
        self.positive_inertia = 0;
        self.regularize_count = 0;

        for j in 0..n {
            // v[k] = L[j,k]*D[k] for the already computed columns
            for k in 0..j {
                v[k] = L[(j, k)] * D[k];
            }

            let mut d = A[(j, j)];
            for k in 0..j {
                d -= L[(j, k)] * v[k];
            }

            if opts.regularize_enable {
                let sign = match opts.Dsigns {
                    Some(ref s) => T::from_i8(s[j]).unwrap(),
                    None => T::one(),
                };
                if d * sign < opts.regularize_eps {
                    d = opts.regularize_delta * sign;
                    self.regularize_count += 1;
                }
            } else if d == T::zero() {
                return Err(DenseFactorizationError::ZeroPivot(j));
            }

            if !d.is_finite() {
                return Err(DenseFactorizationError::NonFinite);
            }
            if d > T::zero() {
                self.positive_inertia += 1;
            }
            D[j] = d;

            for i in (j + 1)..n {
                let mut lij = A[(i, j)];
                for k in 0..j {
                    lij -= L[(i, k)] * v[k];
                }
                L[(i, j)] = lij / d;
            }
        }

        self.Dinv.scalarop_from(T::recip, &D[..]);
        Ok(())
    }

    /// Solves Ax = b using the LDL factors of A.
    /// Solves in place (x replaces b)
    pub fn solve(&self, b: &mut [T]) {
        let n = self.D.len();
        assert_eq!(b.len(), n);
        let L = &self.L;

        // L \ b
        for j in 0..n {
            let bj = b[j];
            for i in (j + 1)..n {
                b[i] -= L[(i, j)] * bj;
            }
        }

        b.hadamard(&self.Dinv);

        // L' \ b
        for j in (0..n).rev() {
            let col = L.col_slice(j);
            let mut bj = b[j];
            for i in (j + 1)..n {
                bj -= col[i] * b[i];
            }
            b[j] = bj;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ldl_positive_definite() {
        #[rustfmt::skip]
        let A = Matrix::from(
            &[[ 8., -2., 4.],
              [-2., 12., 2.],
              [ 4.,  2., 6.]]);

        let mut eng = LdlEngine::<f64>::new(3, LdlSettings::default()).unwrap();
        eng.factor(&A).unwrap();
        assert_eq!(eng.positive_inertia(), 3);
        assert_eq!(eng.regularize_count(), 0);

        let xref = [1., -2., 3.];
        let mut b = vec![0.; 3];
        A.gemv(&xref, &mut b, 1.0, 0.0);
        eng.solve(&mut b);
        assert!(b.norm_inf_diff(&xref) < 1e-12);
    }

    #[test]
    fn test_ldl_quasidefinite() {
        // [H A'; A -δI] with H PD and A full row rank
        #[rustfmt::skip]
        let K = Matrix::from(
            &[[ 4., 1., 1.],
              [ 1., 2., 1.],
              [ 1., 1., -1e-8]]);

        let settings = LdlSettingsBuilder::default()
            .Dsigns(vec![1, 1, -1])
            .build()
            .unwrap();
        let mut eng = LdlEngine::<f64>::new(3, settings).unwrap();
        eng.factor(&K).unwrap();
        assert_eq!(eng.positive_inertia(), 2);

        let xref = [0.5, -1., 2.];
        let mut b = vec![0.; 3];
        K.gemv(&xref, &mut b, 1.0, 0.0);
        eng.solve(&mut b);
        assert!(b.norm_inf_diff(&xref) < 1e-8);
    }

    #[test]
    fn test_ldl_dynamic_regularization() {
        // singular matrix.  The second pivot vanishes and must
        // be bumped to the regularization value
        let A = Matrix::from(&[[1., 1.], [1., 1.]]);
        let mut eng = LdlEngine::<f64>::new(2, LdlSettings::default()).unwrap();
        assert!(eng.factor(&A).is_ok());
        assert_eq!(eng.regularize_count(), 1);
        assert!(eng.D.is_finite());

        let settings = LdlSettingsBuilder::default()
            .regularize_enable(false)
            .build()
            .unwrap();
        let mut eng = LdlEngine::<f64>::new(2, settings).unwrap();
        assert_eq!(
            eng.factor(&A),
            Err(DenseFactorizationError::ZeroPivot(1))
        );
    }

    #[test]
    fn test_ldl_bad_dimensions() {
        let settings = LdlSettingsBuilder::default()
            .Dsigns(vec![1, -1])
            .build()
            .unwrap();
        assert!(LdlEngine::<f64>::new(3, settings).is_err());

        let mut eng = LdlEngine::<f64>::new(3, LdlSettings::default()).unwrap();
        assert_eq!(
            eng.factor(&Matrix::identity(2)),
            Err(DenseFactorizationError::IncompatibleDimension)
        );
    }
}
