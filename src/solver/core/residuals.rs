#![allow(non_snake_case)]

use super::traits::{ConvexProgram, ProblemDims};
use super::variables::Variables;
use crate::algebra::*;
use itertools::izip;

// ---------------
// Residuals of the modified KKT conditions
//
//   r_dual = ∇f₀(x) + Df(x)ᵀλ + Aᵀν
//   r_cent = -diag(λ)f(x) - (1/t)𝟏
//   r_pri  = Ax - b
//
// along with the problem values they are built from.
// ---------------

#[derive(Debug)]
pub(crate) struct Residuals<T> {
    // inequality values and Jacobian
    pub f: Vec<T>,
    pub Df: Matrix<T>,
    // objective gradient
    pub df0: Vec<T>,

    pub r_dual: Vec<T>,
    pub r_cent: Vec<T>,
    pub r_pri: Vec<T>,

    // surrogate duality gap -fᵀλ
    pub η: T,
}

impl<T> Residuals<T>
where
    T: FloatT,
{
    pub fn new(dims: &ProblemDims) -> Self {
        let (n, m, p) = (dims.n, dims.m, dims.p);
        Self {
            f: vec![T::zero(); m],
            Df: Matrix::zeros((m, n)),
            df0: vec![T::zero(); n],
            r_dual: vec![T::zero(); n],
            r_cent: vec![T::zero(); m],
            r_pri: vec![T::zero(); p],
            η: T::zero(),
        }
    }

    /// Evaluate the problem functions at `x` and fill in the dual and
    /// primal residuals and the surrogate gap.  The centrality residual
    /// is left for [`update_centrality`](Self::update_centrality).
    pub fn update<P>(&mut self, problem: &P, vars: &Variables<T>, A: &Matrix<T>, b: &[T])
    where
        P: ConvexProgram<T>,
    {
        let x = &vars.x;

        self.eval_inequality(problem, x);
        self.Df.data.set(T::zero());
        problem.d_inequality(x, &mut self.Df);
        self.df0.set(T::zero());
        problem.d_objective(x, &mut self.df0);

        // r_dual = ∇f₀ + Dfᵀλ + Aᵀν
        self.r_dual.copy_from(&self.df0);
        self.Df.t().gemv(&vars.λ, &mut self.r_dual, T::one(), T::one());
        A.t().gemv(&vars.ν, &mut self.r_dual, T::one(), T::one());

        // r_pri = Ax - b
        self.r_pri.copy_from(b);
        A.gemv(x, &mut self.r_pri, T::one(), -T::one());

        self.η = -self.f.dot(&vars.λ);
    }

    /// Inequality values only.  Used to test trial points
    /// for strict feasibility.
    pub fn eval_inequality<P>(&mut self, problem: &P, x: &[T])
    where
        P: ConvexProgram<T>,
    {
        self.f.set(T::zero());
        problem.inequality(x, &mut self.f);
    }

    /// `true` if every inequality holds strictly
    pub fn is_strictly_feasible(&self) -> bool {
        self.f.iter().all(|&fi| fi < T::zero())
    }

    pub fn update_centrality(&mut self, λ: &[T], t: T) {
        let tinv = T::recip(t);
        for (r, &λi, &fi) in izip!(&mut self.r_cent, λ, &self.f) {
            *r = -λi * fi - tinv;
        }
    }

    /// 2-norm of the stacked residual (r_dual, r_cent, r_pri)
    pub fn norm(&self) -> T {
        T::sqrt(self.r_dual.sumsq() + self.r_cent.sumsq() + self.r_pri.sumsq())
    }

    /// ‖r_pri‖ + ‖r_dual‖
    pub fn feasibility_norm(&self) -> T {
        self.r_pri.norm() + self.r_dual.norm()
    }

    pub fn is_finite(&self) -> bool {
        self.r_dual.is_finite()
            && self.r_cent.is_finite()
            && self.r_pri.is_finite()
            && self.η.is_finite()
    }
}
