#![allow(non_snake_case)]

use super::residuals::Residuals;
use super::traits::{ConvexProgram, ProblemDims};
use super::variables::Variables;
use super::{CoreSettings, SolverError};
use crate::algebra::*;
use itertools::izip;

// -------------------------------------
// KKT solver for the Newton step using a dense LDL factorisation
// -------------------------------------
//
// The full Newton system in (Δx, Δλ, Δν) is reduced by eliminating Δλ,
// leaving the symmetric quasidefinite system
//
//   [ H + Dfᵀdiag(λ/-f)Df   Aᵀ ] [Δx]   [ -r_dual - Dfᵀdiag(1/f)r_cent ]
//   [ A                      0 ] [Δν] = [ -r_pri                        ]
//
// with H = ∇²f₀ + Σλᵢ∇²fᵢ.  Δλ is then recovered as
//
//   Δλ = diag(1/f)(r_cent - diag(λ)DfΔx)

pub(crate) struct DenseKKTSolver<T: FloatT> {
    // problem dimensions
    n: usize,
    p: usize,

    // Left and right hand sides for solves
    x: Vec<T>,
    b: Vec<T>,

    // internal workspace for IR scheme
    // and static offsetting of KKT
    work1: Vec<T>,
    work2: Vec<T>,

    // inequality sized workspace
    workm: Vec<T>,

    // objective Hessian, retained across iterations
    // when the problem reports it as constant
    dd_objective: Matrix<T>,
    dd_objective_is_set: bool,

    // Hessian of a single inequality
    dd_inequality: Matrix<T>,

    // unregularized KKT matrix
    KKT: Matrix<T>,

    // the dense LDL solver
    ldlsolver: LdlEngine<T>,

    // the diagonal regularizer currently applied
    diagonal_regularizer: T,
}

impl<T> DenseKKTSolver<T>
where
    T: FloatT,
{
    pub fn new(dims: &ProblemDims, settings: &CoreSettings<T>) -> Result<Self, SolverError> {
        let (n, m, p) = (dims.n, dims.m, dims.p);

        // the expected signs of D in LDL
        let mut dsigns = vec![1_i8; n + p];
        dsigns[n..].fill(-1);

        let opts = LdlSettingsBuilder::default()
            .Dsigns(dsigns)
            .regularize_enable(settings.dynamic_regularization_enable)
            .regularize_eps(settings.dynamic_regularization_eps)
            .regularize_delta(settings.dynamic_regularization_delta)
            .build()
            .unwrap();

        let ldlsolver =
            LdlEngine::<T>::new(n + p, opts).map_err(|_| SolverError::SingularKKT)?;

        Ok(Self {
            n,
            p,
            x: vec![T::zero(); n + p],
            b: vec![T::zero(); n + p],
            work1: vec![T::zero(); n + p],
            work2: vec![T::zero(); n + p],
            workm: vec![T::zero(); m],
            dd_objective: Matrix::zeros((n, n)),
            dd_objective_is_set: false,
            dd_inequality: Matrix::zeros((n, n)),
            KKT: Matrix::zeros((n + p, n + p)),
            ldlsolver,
            diagonal_regularizer: T::zero(),
        })
    }

    /// Assemble the KKT matrix at the current iterate and factor it.
    pub fn update<P>(
        &mut self,
        problem: &P,
        vars: &Variables<T>,
        residuals: &Residuals<T>,
        A: &Matrix<T>,
        settings: &CoreSettings<T>,
    ) -> Result<(), SolverError>
    where
        P: ConvexProgram<T>,
    {
        let n = self.n;
        let x = &vars.x;

        if !(self.dd_objective_is_set && problem.is_dd_objective_constant()) {
            self.dd_objective.data.set(T::zero());
            problem.dd_objective(x, &mut self.dd_objective);
            self.dd_objective_is_set = true;
        }

        // H = ∇²f₀ + Σλᵢ∇²fᵢ, held in the top left block of KKT
        let mut H = self.dd_objective.clone();

        if !problem.is_affine_inequality() {
            for (i, &λi) in vars.λ.iter().enumerate() {
                self.dd_inequality.data.set(T::zero());
                problem.dd_inequality(x, &mut self.dd_inequality, i);
                H.data.axpby(λi, &self.dd_inequality.data, T::one());
            }
        }

        // H += Dfᵀdiag(λ/-f)Df
        for (d, &λi, &fi) in izip!(&mut self.workm, &vars.λ, &residuals.f) {
            *d = -λi / fi;
        }
        H.add_gram_scaled(&residuals.Df, &self.workm);

        let KKT = &mut self.KKT;
        KKT.data.set(T::zero());
        KKT.set_block(0, 0, &H);
        KKT.set_block(n, 0, A);
        KKT.set_block_t(0, n, A);

        self.regularize_and_refactor(settings)
    }

    /// Solve for the Newton step at the current iterate using the
    /// most recent factorization.
    pub fn solve(
        &mut self,
        step: &mut Variables<T>,
        vars: &Variables<T>,
        residuals: &Residuals<T>,
        settings: &CoreSettings<T>,
    ) -> Result<(), SolverError> {
        let (n, p) = (self.n, self.p);
        let Df = &residuals.Df;
        let f = &residuals.f;

        // w = diag(1/f)r_cent
        for (w, &rc, &fi) in izip!(&mut self.workm, &residuals.r_cent, f) {
            *w = rc / fi;
        }

        // rhs = [-r_dual - Dfᵀw; -r_pri]
        let (bx, bν) = self.b.split_at_mut(n);
        Df.t().gemv(&self.workm, bx, -T::one(), T::zero());
        bx.axpby(-T::one(), &residuals.r_dual, T::one());
        bν.scalarop_from(|r| -r, &residuals.r_pri);

        self.x.copy_from(&self.b);
        self.ldlsolver.solve(&mut self.x);

        let is_success = {
            if settings.iterative_refinement_enable {
                self.iterative_refinement(settings)
            } else {
                self.x.is_finite()
            }
        };
        if !is_success {
            return Err(SolverError::SingularKKT);
        }

        step.x.copy_from(&self.x[0..n]);
        step.ν.copy_from(&self.x[n..(n + p)]);

        // Δλ = diag(1/f)(r_cent - diag(λ)DfΔx)
        Df.gemv(&step.x, &mut step.λ, T::one(), T::zero());
        for (dλ, &λi, &rc, &fi) in izip!(&mut step.λ, &vars.λ, &residuals.r_cent, f) {
            *dλ = (rc - λi * (*dλ)) / fi;
        }

        if step.λ.is_finite() {
            Ok(())
        } else {
            Err(SolverError::SingularKKT)
        }
    }

    fn regularize_and_refactor(&mut self, settings: &CoreSettings<T>) -> Result<(), SolverError> {
        let n = self.n;
        let KKT = &mut self.KKT;
        let diag_kkt = &mut self.work1;

        for (i, d) in diag_kkt.iter_mut().enumerate() {
            *d = KKT[(i, i)];
        }

        if settings.static_regularization_enable {
            let eps = _compute_regularizer(diag_kkt, settings);

            // shift the diagonal, accounting for signs
            for (i, &d) in diag_kkt.iter().enumerate() {
                KKT[(i, i)] = if i < n { d + eps } else { d - eps };
            }
            self.diagonal_regularizer = eps;
        }

        let result = self.ldlsolver.factor(KKT);

        if settings.static_regularization_enable {
            // put the KKT matrix back the way it was.  It is
            // needed unregularized for iterative refinement
            for (i, &d) in diag_kkt.iter().enumerate() {
                KKT[(i, i)] = d;
            }
        }

        match result {
            Ok(()) if self.ldlsolver.Dinv.is_finite() => Ok(()),
            _ => Err(SolverError::SingularKKT),
        }
    }

    fn iterative_refinement(&mut self, settings: &CoreSettings<T>) -> bool {
        let (x, b) = (&mut self.x, &self.b);
        let (e, dx) = (&mut self.work1, &mut self.work2);

        // iterative refinement params
        let reltol = settings.iterative_refinement_reltol;
        let abstol = settings.iterative_refinement_abstol;
        let maxiter = settings.iterative_refinement_max_iter;
        let stopratio = settings.iterative_refinement_stop_ratio;

        let K = &self.KKT;
        let normb = b.norm_inf();

        //compute the initial error
        let mut norme = _get_refine_error(e, b, K, x);

        for _ in 0..maxiter {
            // bail on numerical error
            if !norme.is_finite() {
                return false;
            }

            if norme <= (abstol + reltol * normb) {
                //within tolerance.  Exit
                break;
            }

            let lastnorme = norme;

            //make a refinement
            dx.copy_from(e);
            self.ldlsolver.solve(dx);

            //prospective solution is x + dx.  Use dx space to
            // hold it for a check before applying to x
            dx.axpby(T::one(), x, T::one());
            norme = _get_refine_error(e, b, K, dx);

            let improved_ratio = lastnorme / norme;
            if improved_ratio < stopratio {
                //insufficient improvement.  Exit
                if improved_ratio > T::one() {
                    std::mem::swap(x, dx);
                }
                break;
            } else {
                std::mem::swap(x, dx);
            }
        }

        // "success" means only that we have a finite valued result
        x.is_finite()
    }

    #[cfg(test)]
    pub fn diagonal_regularizer(&self) -> T {
        self.diagonal_regularizer
    }
}

fn _compute_regularizer<T: FloatT>(diag_kkt: &[T], settings: &CoreSettings<T>) -> T {
    let maxdiag = diag_kkt.norm_inf();

    settings.static_regularization_constant + settings.static_regularization_proportional * maxdiag
}

//  computes e = b - Kξ, overwriting the first argument
//  and returning its norm

fn _get_refine_error<T: FloatT>(e: &mut [T], b: &[T], K: &Matrix<T>, ξ: &[T]) -> T {
    e.copy_from(b);
    K.gemv(ξ, e, -T::one(), T::one());
    e.norm_inf()
}

#[cfg(test)]
mod tests {
    use super::*;

    // min ½‖x‖² + x₁  s.t.  x₁ + x₂ = 1,  x₁ ≤ 2
    struct TinyProblem;

    impl ConvexProgram<f64> for TinyProblem {
        fn dims(&self) -> ProblemDims {
            ProblemDims { n: 2, m: 1, p: 1 }
        }
        fn initial_point(&mut self, _x: &mut [f64]) {}
        fn objective(&self, x: &[f64]) -> f64 {
            0.5 * x.sumsq() + x[0]
        }
        fn d_objective(&self, x: &[f64], df: &mut [f64]) {
            df.copy_from(x);
            df[0] += 1.;
        }
        fn dd_objective(&self, _x: &[f64], ddf: &mut Matrix<f64>) {
            ddf.set_identity();
        }
        fn inequality(&self, x: &[f64], f: &mut [f64]) {
            f[0] = x[0] - 2.;
        }
        fn d_inequality(&self, _x: &[f64], df: &mut Matrix<f64>) {
            df[(0, 0)] = 1.;
        }
        fn dd_inequality(&self, _x: &[f64], _ddf: &mut Matrix<f64>, _i: usize) {}
        fn equality(&self, A: &mut Matrix<f64>, b: &mut [f64]) {
            A.data_mut().copy_from(&[1., 1.]);
            b[0] = 1.;
        }
        fn final_point(&mut self, _x: &[f64], _λ: &[f64], _ν: &[f64], _converged: bool) {}
    }

    #[test]
    fn test_newton_step_solves_full_system() {
        let problem = TinyProblem;
        let dims = problem.dims();
        let settings = CoreSettings::<f64>::default();

        let mut A = Matrix::zeros((1, 2));
        let mut b = vec![0.; 1];
        problem.equality(&mut A, &mut b);

        let mut vars = Variables::new(&dims);
        vars.initialize_duals();
        vars.x.copy_from(&[0.5, -1.]);

        let mut residuals = Residuals::new(&dims);
        residuals.update(&problem, &vars, &A, &b);
        residuals.update_centrality(&vars.λ, 10.);

        let mut kkt = DenseKKTSolver::new(&dims, &settings).unwrap();
        kkt.update(&problem, &vars, &residuals, &A, &settings).unwrap();
        let mut step = Variables::new(&dims);
        kkt.solve(&mut step, &vars, &residuals, &settings).unwrap();

        // check each block row of the unreduced Newton system
        //  H Δx + DfᵀΔλ + AᵀΔν = -r_dual
        //  -diag(λ)DfΔx - diag(f)Δλ = -r_cent
        //  AΔx = -r_pri
        let (dx, dλ, dν) = (&step.x, step.λ[0], step.ν[0]);
        let (λ, f) = (vars.λ[0], residuals.f[0]);
        let row1 = [dx[0] + dλ + dν, dx[1] + dν];
        let row1_rhs = [-residuals.r_dual[0], -residuals.r_dual[1]];
        assert!(row1.norm_inf_diff(&row1_rhs) < 1e-7);
        assert!(f64::abs(-λ * dx[0] - f * dλ + residuals.r_cent[0]) < 1e-7);
        assert!(f64::abs(dx[0] + dx[1] + residuals.r_pri[0]) < 1e-7);
        assert!(kkt.diagonal_regularizer() > 0.);
    }
}
