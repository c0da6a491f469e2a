#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::solver::{IPMInfo, PrimalDualIPM, SolverError, SolverStatus};
use std::io::Write;

/// Solver for convex quadratic programs
///
/// $$
/// \begin{array}{rl}
/// \text{minimize} & \frac{1}{2}x^T P x + q^T x + r\\\\\[2ex\]
///  \text{subject to} & Gx \preceq h \\\\\[1ex\]
///         & Ax = b
///  \end{array}
/// $$
///
/// The solver holds only its settings and the results of the most
/// recent solve, so a single instance can be reused for any number of
/// problems of any size.

pub struct QPSolver<T: FloatT = f64> {
    engine: PrimalDualIPM<T>,
    converged: bool,
    /// summary of the most recent solve
    pub solution: QPSolution<T>,
}

impl<T> QPSolver<T>
where
    T: FloatT,
{
    pub fn new(settings: DefaultSettings<T>) -> Self {
        Self {
            engine: PrimalDualIPM::new(settings),
            converged: false,
            solution: QPSolution::new(),
        }
    }

    /// Solve a quadratic program.
    ///
    /// `x` supplies the starting point and receives the final iterate.
    /// It need not satisfy any constraint.  `P` must be symmetric
    /// positive semidefinite, which is not checked.  Any of `G` and `A`
    /// may have zero rows.
    ///
    /// Returns the termination status, or an error for inconsistent
    /// dimensions or a numerical failure.  `x` is left unchanged on error.
    #[allow(clippy::too_many_arguments)]
    pub fn solve(
        &mut self,
        x: &mut [T],
        P: &Matrix<T>,
        q: &[T],
        r: T,
        G: &Matrix<T>,
        h: &[T],
        A: &Matrix<T>,
        b: &[T],
    ) -> Result<SolverStatus, SolverError> {
        self.converged = false;
        self.solution = QPSolution::new();

        check_dimensions(x.len(), P, q, G, h, A, b)?;

        let margin = self.engine.settings.slack_margin;
        let mut problem = QuadraticProgram::new(x, P, q, r, G, h, A, b, margin);

        let result = self.engine.solve(&mut problem);
        self.converged = problem.is_converged();
        drop(problem);

        let status = result
            .as_ref()
            .map_or(SolverStatus::NumericalError, |&status| status);
        self.solution.finalize(x, status, &self.engine.info);

        result
    }

    /// `true` if the most recent call to [`solve`](Self::solve) converged.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    pub fn settings(&self) -> &DefaultSettings<T> {
        &self.engine.settings
    }

    /// Progress information from the most recent solve
    pub fn info(&self) -> &IPMInfo<T> {
        &self.engine.info
    }

    /// Write the timing breakdown of the most recent solve to the
    /// current print target.
    pub fn print_timers(&mut self) -> std::io::Result<()> {
        self.engine.print_timers()
    }
}

fn check_dimensions<T: FloatT>(
    n: usize,
    P: &Matrix<T>,
    q: &[T],
    G: &Matrix<T>,
    h: &[T],
    A: &Matrix<T>,
    b: &[T],
) -> Result<(), SolverError> {
    if P.size() != (n, n) {
        return Err(SolverError::IncompatibleDimension("P"));
    }
    if q.len() != n {
        return Err(SolverError::IncompatibleDimension("q"));
    }
    if G.ncols() != n {
        return Err(SolverError::IncompatibleDimension("G"));
    }
    if h.len() != G.nrows() {
        return Err(SolverError::IncompatibleDimension("h"));
    }
    if A.ncols() != n {
        return Err(SolverError::IncompatibleDimension("A"));
    }
    if b.len() != A.nrows() {
        return Err(SolverError::IncompatibleDimension("b"));
    }
    Ok(())
}

impl<T> ConfigurablePrintTarget for QPSolver<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.engine.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.engine.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.engine.print_to_stream(stream)
    }
    fn print_to_buffer(&mut self) {
        self.engine.print_to_buffer()
    }
    fn print_to_sink(&mut self) {
        self.engine.print_to_sink()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.engine.get_print_buffer()
    }
}
