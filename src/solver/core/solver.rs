#![allow(non_snake_case)]

use super::info::IPMInfo;
use super::kktsolver::DenseKKTSolver;
use super::residuals::Residuals;
use super::traits::ConvexProgram;
use super::variables::Variables;
use super::CoreSettings;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::timers::*;
use std::io::Write;
use thiserror::Error;

// ---------------------------------
// Solver status type
// ---------------------------------

/// Status of solver at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run).
    #[default]
    Unsolved,
    /// Solver terminated with a solution.
    Solved,
    /// Iteration limit reached before a solution was found.
    MaxIterations,
    /// Time limit reached before a solution was found.
    MaxTime,
    /// Solver terminated with a numerical error
    NumericalError,
    /// Solver terminated due to lack of progress.
    InsufficientProgress,
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error type returned by the solvers.
///
/// Failure to converge is not an error.  It is reported through the
/// [`SolverStatus`] returned from a successful solve.
#[derive(Error, Debug)]
pub enum SolverError {
    /// An input argument has a size inconsistent with the others
    #[error("Incompatible dimension: {0}")]
    IncompatibleDimension(&'static str),
    /// The KKT system could not be factored or solved to finite values
    #[error("KKT system is singular or produced non-finite values")]
    SingularKKT,
    /// A residual of the optimality conditions became NaN or infinite
    #[error("Residual evaluation produced non-finite values")]
    NonFiniteResidual,
    /// Writing progress output failed
    #[error("Failed to write solver output: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------
// the interior point engine
// ---------------------------------

/// A primal-dual interior point method for smooth convex programs.
///
/// Given a problem implementing [`ConvexProgram`], the engine iterates
/// on $(x, λ, ν)$ using Newton steps on the modified KKT conditions
///
/// $$
/// \begin{array}{rl}
/// r_{dual} &= \nabla f_0(x) + Df(x)^T λ + A^T ν \\\\\[1ex\]
/// r_{cent} &= -\text{diag}(λ) f(x) - (1/t) \mathbf{1} \\\\\[1ex\]
/// r_{pri}  &= Ax - b
/// \end{array}
/// $$
///
/// with the barrier parameter $t = μ m / η$ driven by the surrogate
/// duality gap $η = -f(x)^T λ$.  Steps are limited to keep $λ > 0$ and
/// $f(x) < 0$, then backtracked until the residual norm decreases
/// sufficiently.  Iterates need not satisfy the equality constraints.

pub struct PrimalDualIPM<T: FloatT = f64> {
    pub settings: CoreSettings<T>,
    pub info: IPMInfo<T>,
    pub timers: Option<Timers>,
}

impl<T> PrimalDualIPM<T>
where
    T: FloatT,
{
    pub fn new(settings: CoreSettings<T>) -> Self {
        Self {
            settings,
            info: IPMInfo::new(),
            timers: Some(Timers::default()),
        }
    }

    /// Run the solver on `problem`.
    ///
    /// On any `Ok` return the final iterate is reported through
    /// [`ConvexProgram::final_point`].  On `Err` it is not reported.
    pub fn solve<P>(&mut self, problem: &mut P) -> Result<SolverStatus, SolverError>
    where
        P: ConvexProgram<T>,
    {
        //timers is stored as an option so that
        //we can swap it out here and avoid
        //borrow conflicts with other fields.
        let mut timers = self.timers.take().unwrap_or_default();
        let result = self.solve_with_timers(problem, &mut timers);
        self.timers.replace(timers);
        result
    }

    fn solve_with_timers<P>(
        &mut self,
        problem: &mut P,
        timers: &mut Timers,
    ) -> Result<SolverStatus, SolverError>
    where
        P: ConvexProgram<T>,
    {
        let dims = problem.dims();
        let settings = &self.settings;

        // equality data is fixed for the whole solve
        let mut A = Matrix::zeros((dims.p, dims.n));
        let mut b = vec![T::zero(); dims.p];
        problem.equality(&mut A, &mut b);

        notimeit! {timers; {
            self.info.print_banner(settings)?;
            self.info.print_configuration(settings, &dims)?;
            self.info.print_status_header(settings)?;
        }}

        self.info.reset(timers);

        let mut variables = Variables::new(&dims);
        let mut step = Variables::new(&dims);
        let mut trial = Variables::new(&dims);
        let mut residuals = Residuals::new(&dims);
        let mut trial_residuals = Residuals::new(&dims);
        let mut kktsolver = DenseKKTSolver::new(&dims, settings)?;

        let m: T = dims.m.as_T();
        let mut iter: u32 = 0;
        let mut α = T::zero();
        let mut error: Option<SolverError> = None;

        timeit! {timers => "solve"; {

        problem.initial_point(&mut variables.x);
        variables.initialize_duals();

        // ----------
        // main loop
        // ----------

        loop {
            //update the residuals
            //--------------
            residuals.update(&*problem, &variables, &A, &b);
            let t = barrier_parameter(
                settings.barrier_mu,
                m,
                residuals.η,
                residuals.feasibility_norm(),
            );
            residuals.update_centrality(&variables.λ, t);

            if !residuals.is_finite() {
                error = Some(SolverError::NonFiniteResidual);
                break;
            }

            // convergence check and printing
            // --------------
            self.info.save_scalars(α, iter);
            self.info.update(problem.objective(&variables.x), &residuals, t, timers);

            let print_result;
            notimeit!{timers; {
                print_result = self.info.print_status(settings);
            }}
            if let Err(e) = print_result {
                error = Some(e.into());
                break;
            }

            if self.info.check_termination(settings) {
                break;
            }

            iter += 1;

            // Newton step
            // --------------
            let mut kkt_result;
            timeit!{timers => "kkt update"; {
                kkt_result = kktsolver.update(&*problem, &variables, &residuals, &A, settings);
            }}

            timeit!{timers => "kkt solve"; {
                kkt_result = kkt_result.and_then(|_| {
                    kktsolver.solve(&mut step, &variables, &residuals, settings)
                });
            }}

            if let Err(e) = kkt_result {
                error = Some(e);
                break;
            }

            // step length by backtracking line search
            // --------------
            let step_length;
            timeit!{timers => "line search"; {
                step_length = line_search(
                    &*problem,
                    settings,
                    &variables,
                    &step,
                    &mut trial,
                    &residuals,
                    &mut trial_residuals,
                    &A,
                    &b,
                    t,
                );
            }}

            match step_length {
                Some(s) => α = s,
                None => {
                    self.info.status = SolverStatus::InsufficientProgress;
                    break;
                }
            }

            variables.add_step(&step, α);
        } //end loop
        // ----------

        }} // end "solve" timer

        self.info.finalize(timers);

        if let Some(e) = error {
            self.info.status = SolverStatus::NumericalError;
            // the solver failure takes precedence over an output error
            let _ = self.info.print_footer(settings);
            return Err(e);
        }

        let status = self.info.status;
        problem.final_point(
            &variables.x,
            &variables.λ,
            &variables.ν,
            status == SolverStatus::Solved,
        );

        self.info.print_footer(settings)?;

        Ok(status)
    }

    /// Write the timing breakdown of the most recent solve to the
    /// current print target.
    pub fn print_timers(&mut self) -> std::io::Result<()> {
        if let Some(ref timers) = self.timers {
            timers.print(&mut self.info.stream)?;
            self.info.stream.flush()?;
        }
        Ok(())
    }
}

impl<T> ConfigurablePrintTarget for PrimalDualIPM<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.info.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.info.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.info.print_to_stream(stream)
    }
    fn print_to_buffer(&mut self) {
        self.info.print_to_buffer()
    }
    fn print_to_sink(&mut self) {
        self.info.print_to_sink()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.info.get_print_buffer()
    }
}

// t = μm/max(η, ‖r_pri‖ + ‖r_dual‖).  Centering is kept while the
// iterate is infeasible, even once the surrogate gap is small.
// Without inequalities there is no centrality condition to enforce.
fn barrier_parameter<T: FloatT>(μ: T, m: T, η: T, infeas: T) -> T {
    let scale = T::max(η, infeas);
    if m == T::zero() || scale <= T::zero() {
        T::infinity()
    } else {
        μ * m / scale
    }
}

// Find a step length along `step` that keeps λ > 0 and f(x) < 0, then
// backtrack until the residual norm decreases sufficiently.  Returns
// None if the line search fails or the step becomes too short.
#[allow(clippy::too_many_arguments)]
fn line_search<T, P>(
    problem: &P,
    settings: &CoreSettings<T>,
    variables: &Variables<T>,
    step: &Variables<T>,
    trial: &mut Variables<T>,
    residuals: &Residuals<T>,
    trial_residuals: &mut Residuals<T>,
    A: &Matrix<T>,
    b: &[T],
    t: T,
) -> Option<T>
where
    T: FloatT,
    P: ConvexProgram<T>,
{
    let β = settings.linesearch_backtrack_step;
    let max_backtracks = settings.linesearch_max_iter;
    let mut backtracks = 0u32;

    let mut α = T::min(
        T::one(),
        settings.max_step_fraction * variables.max_step_to_boundary(step),
    );

    // strict feasibility of the inequalities
    loop {
        trial.x.waxpby(T::one(), &variables.x, α, &step.x);
        trial_residuals.eval_inequality(problem, &trial.x);
        if trial_residuals.is_strictly_feasible() {
            break;
        }
        if backtracks == max_backtracks {
            return None;
        }
        α *= β;
        backtracks += 1;
    }

    // sufficient decrease of the residual norm
    let norm0 = residuals.norm();
    loop {
        trial.set_trial(variables, step, α);
        trial_residuals.update(problem, trial, A, b);
        trial_residuals.update_centrality(&trial.λ, t);
        if trial_residuals.norm() <= (T::one() - settings.linesearch_alpha * α) * norm0 {
            break;
        }
        if backtracks == max_backtracks {
            return None;
        }
        α *= β;
        backtracks += 1;
    }

    if α < settings.min_terminate_step_length {
        None
    } else {
        Some(α)
    }
}

#[test]
fn test_barrier_parameter() {
    assert_eq!(barrier_parameter(10., 4., 2., 0.), 20.);
    assert!(barrier_parameter(10f64, 0., 0., 0.).is_infinite());

    // a small gap does not end centering while infeasible
    assert_eq!(barrier_parameter(10., 4., 1e-13, 4.), 10.);
    assert!(barrier_parameter(10f64, 4., 0., 0.).is_infinite());
}
