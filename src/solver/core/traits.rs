//! Required traits for problems solved by the interior point engine.
//!
//! The [`PrimalDualIPM`](crate::solver::PrimalDualIPM) engine solves
//! problems of the form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & f_0(x)\\\\\[2ex\]
//!  \text{subject to} & f_i(x) \le 0, \quad i = 1,\dots,m \\\\\[1ex\]
//!         & Ax = b
//!  \end{array}
//! $$
//!
//! with $f_0, \dots, f_m$ convex and twice differentiable.  The engine
//! knows nothing about the structure of a particular problem and accesses
//! it only through the [`ConvexProgram`] trait.
//!
//! In nearly all cases there is no need for a user to implement this trait.
//! Instead, use the [QP solver](crate::solver::implementations::qp), which
//! implements it for quadratic programs with affine constraints.

use crate::algebra::*;

/// Dimensions of a [`ConvexProgram`]

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProblemDims {
    /// number of variables
    pub n: usize,
    /// number of inequality constraints
    pub m: usize,
    /// number of equality constraints
    pub p: usize,
}

/// A convex program with twice differentiable objective and inequality
/// functions and affine equality constraints.
///
/// All dense matrix arguments are passed at their full size and zeroed
/// by the engine before each call, so implementations need only write
/// the nonzero entries.

#[allow(non_snake_case)]
pub trait ConvexProgram<T: FloatT> {
    /// Problem dimensions.  Must not change during a solve.
    fn dims(&self) -> ProblemDims;

    /// Write a starting point to `x`.  On entry `x` is zero.  The point
    /// must satisfy $f_i(x) < 0$ for every inequality, but need not
    /// satisfy the equality constraints.
    fn initial_point(&mut self, x: &mut [T]);

    /// Objective value $f_0(x)$
    fn objective(&self, x: &[T]) -> T;

    /// Objective gradient $\nabla f_0(x)$
    fn d_objective(&self, x: &[T], df: &mut [T]);

    /// Objective Hessian $\nabla^2 f_0(x)$ (n × n)
    fn dd_objective(&self, x: &[T], ddf: &mut Matrix<T>);

    /// Inequality values $f_i(x)$ for all i
    fn inequality(&self, x: &[T], f: &mut [T]);

    /// Inequality Jacobian, with row i the gradient of $f_i$ (m × n)
    fn d_inequality(&self, x: &[T], df: &mut Matrix<T>);

    /// Hessian of the single inequality $f_i$ (n × n)
    fn dd_inequality(&self, x: &[T], ddf: &mut Matrix<T>, i: usize);

    /// Equality constraint data, with `A` of size p × n
    fn equality(&self, A: &mut Matrix<T>, b: &mut [T]);

    /// Receives the final iterate on termination.  `converged` is true
    /// only if the engine met its convergence tolerances.
    fn final_point(&mut self, x: &[T], λ: &[T], ν: &[T], converged: bool);

    /// The objective Hessian does not depend on `x`, so the engine
    /// may evaluate it once per solve.
    fn is_dd_objective_constant(&self) -> bool {
        false
    }

    /// Every inequality is affine, so the engine may skip the
    /// inequality Hessians entirely.
    fn is_affine_inequality(&self) -> bool {
        false
    }
}
