#![allow(non_snake_case)]

use crate::algebra::*;
use crate::solver::traits::{ConvexProgram, ProblemDims};

/// A convex quadratic program
///
/// $$
/// \begin{array}{rl}
/// \text{minimize} & \frac{1}{2}x^T P x + q^T x + r\\\\\[2ex\]
///  \text{subject to} & Gx \preceq h \\\\\[1ex\]
///         & Ax = b
///  \end{array}
/// $$
///
/// expressed as a [`ConvexProgram`] in the variables $(x, s)$.  The scalar
/// slack $s$ relaxes the inequalities to $Gx - h - s\mathbf{1} \preceq 0$ and
/// is driven to zero by an additional equality constraint $s = 0$, so any
/// $x$ is an acceptable starting point.
///
/// The problem data and `x` are borrowed for the lifetime of the program.
/// `x` supplies the starting point and receives the final iterate.

pub struct QuadraticProgram<'a, T: FloatT = f64> {
    x: &'a mut [T],
    P: &'a Matrix<T>,
    q: &'a [T],
    r: T,
    G: &'a Matrix<T>,
    h: &'a [T],
    A: &'a Matrix<T>,
    b: &'a [T],

    // initial margin for the slack
    margin: T,

    // objective Hessian in the variables (x,s)
    dd_objective: Matrix<T>,

    converged: bool,
}

impl<'a, T> QuadraticProgram<'a, T>
where
    T: FloatT,
{
    /// Make a new program.  Dimensions are assumed consistent, as
    /// checked by [`QPSolver::solve`](crate::solver::qp::QPSolver::solve).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x: &'a mut [T],
        P: &'a Matrix<T>,
        q: &'a [T],
        r: T,
        G: &'a Matrix<T>,
        h: &'a [T],
        A: &'a Matrix<T>,
        b: &'a [T],
        margin: T,
    ) -> Self {
        let n = x.len();

        // [P 0; 0 0]
        let mut dd_objective = Matrix::zeros((n + 1, n + 1));
        dd_objective.set_block(0, 0, P);

        Self {
            x,
            P,
            q,
            r,
            G,
            h,
            A,
            b,
            margin,
            dd_objective,
            converged: false,
        }
    }

    /// `true` if the final iterate met the convergence tolerances
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    fn n(&self) -> usize {
        self.x.len()
    }
}

impl<T> ConvexProgram<T> for QuadraticProgram<'_, T>
where
    T: FloatT,
{
    fn dims(&self) -> ProblemDims {
        ProblemDims {
            n: self.n() + 1,
            m: self.G.m,
            p: self.A.m + 1,
        }
    }

    fn initial_point(&mut self, y: &mut [T]) {
        let n = self.n();
        let (x, s) = y.split_at_mut(n);
        x.copy_from(&*self.x);

        // largest violation of Gx ⪯ h at the caller's starting point
        let mut viol = self.h.to_vec();
        self.G.gemv(x, &mut viol, T::one(), -T::one());
        let base = T::max(T::zero(), viol.maximum());

        // the margin must survive the addition so
        // that every inequality holds strictly
        let mut margin = self.margin;
        if base.is_finite() {
            while base + margin == base {
                margin *= (2.).as_T();
            }
        }
        s[0] = base + margin;
    }

    fn objective(&self, y: &[T]) -> T {
        let x = &y[0..self.n()];
        let half: T = (0.5).as_T();
        half * self.P.quad_form(x, x) + self.q.dot(x) + self.r
    }

    fn d_objective(&self, y: &[T], df: &mut [T]) {
        let n = self.n();
        let x = &y[0..n];

        // Px + q
        df[0..n].copy_from(self.q);
        self.P.gemv(x, &mut df[0..n], T::one(), T::one());
        df[n] = T::zero();
    }

    fn dd_objective(&self, _y: &[T], ddf: &mut Matrix<T>) {
        ddf.copy_from(&self.dd_objective);
    }

    fn inequality(&self, y: &[T], f: &mut [T]) {
        let n = self.n();
        let (x, s) = (&y[0..n], y[n]);

        // Gx - h - s𝟏
        f.copy_from(self.h);
        self.G.gemv(x, f, T::one(), -T::one());
        f.translate(-s);
    }

    fn d_inequality(&self, _y: &[T], df: &mut Matrix<T>) {
        // [G  -𝟏]
        let n = self.n();
        df.set_block(0, 0, self.G);
        df.col_slice_mut(n).set(-T::one());
    }

    fn dd_inequality(&self, _y: &[T], _ddf: &mut Matrix<T>, _i: usize) {
        // affine
    }

    fn equality(&self, A: &mut Matrix<T>, b: &mut [T]) {
        // [A 0; 0 1] [x; s] = [b; 0]
        let (n, p) = (self.n(), self.A.m);
        A.set_block(0, 0, self.A);
        A[(p, n)] = T::one();
        b[0..p].copy_from(self.b);
        b[p] = T::zero();
    }

    fn final_point(&mut self, y: &[T], _λ: &[T], _ν: &[T], converged: bool) {
        let n = self.n();
        self.x.copy_from(&y[0..n]);
        self.converged = converged;
    }

    fn is_dd_objective_constant(&self) -> bool {
        true
    }

    fn is_affine_inequality(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_point_slack() {
        // x ≤ 1 and -x ≤ 0, starting from the infeasible x = 3
        let P = Matrix::from(&[[2.]]);
        let G = Matrix::from(&[[1.], [-1.]]);
        let h = [1., 0.];
        let A = Matrix::zeros((0, 1));
        let mut x = [3.];

        let mut qp = QuadraticProgram::new(&mut x, &P, &[-4.], 4., &G, &h, &A, &[], 1.0);
        assert_eq!(qp.dims(), ProblemDims { n: 2, m: 2, p: 1 });

        let mut y = [0.; 2];
        qp.initial_point(&mut y);
        assert_eq!(y, [3., 3.]);

        let mut f = [0.; 2];
        qp.inequality(&y, &mut f);
        assert_eq!(f, [-1., -6.]);
        assert_eq!(qp.objective(&y), 1.);
    }

    #[test]
    fn test_initial_point_margin_absorbed() {
        // a violation so large that the unit margin is lost to rounding
        let P = Matrix::from(&[[1.]]);
        let G = Matrix::from(&[[1.]]);
        let A = Matrix::zeros((0, 1));
        let mut x = [1e20];

        let mut qp = QuadraticProgram::new(&mut x, &P, &[0.], 0., &G, &[0.], &A, &[], 1.0);
        let mut y = [0.; 2];
        qp.initial_point(&mut y);
        assert!(y[1] > 1e20);

        let mut f = [0.; 1];
        qp.inequality(&y, &mut f);
        assert!(f[0] < 0.);
    }

    #[test]
    fn test_equality_and_jacobian() {
        let P = Matrix::<f64>::identity(2);
        let G = Matrix::from(&[[1., 2.]]);
        let A = Matrix::from(&[[3., 4.]]);
        let mut x = [0.; 2];
        let qp = QuadraticProgram::new(&mut x, &P, &[0., 0.], 0., &G, &[1.], &A, &[5.], 1.0);

        let mut Aeq = Matrix::zeros((2, 3));
        let mut beq = [0.; 2];
        qp.equality(&mut Aeq, &mut beq);
        assert_eq!(Aeq, Matrix::from(&[[3., 4., 0.], [0., 0., 1.]]));
        assert_eq!(beq, [5., 0.]);

        let mut Df = Matrix::zeros((1, 3));
        qp.d_inequality(&[0.; 3], &mut Df);
        assert_eq!(Df, Matrix::from(&[[1., 2., -1.]]));

        let mut df = [0.; 3];
        qp.d_objective(&[1., -1., 7.], &mut df);
        assert_eq!(df, [1., -1., 0.]);
    }
}
