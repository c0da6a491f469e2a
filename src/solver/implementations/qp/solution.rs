use crate::algebra::*;
use crate::solver::{IPMInfo, SolverStatus};

/// Summary of the most recent solve of a [`QPSolver`](super::QPSolver)
#[derive(Debug, Clone)]
pub struct QPSolution<T> {
    /// primal solution
    pub x: Vec<T>,
    /// final solver status
    pub status: SolverStatus,
    /// primal objective value
    pub obj_val: T,
    /// solve time in seconds
    pub solve_time: f64,
    /// number of iterations
    pub iterations: u32,
    /// primal residual norm
    pub r_prim: T,
    /// dual residual norm
    pub r_dual: T,
    /// surrogate duality gap
    pub gap: T,
}

impl<T> QPSolution<T>
where
    T: FloatT,
{
    /// Create a new `QPSolution` object
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            status: SolverStatus::Unsolved,
            obj_val: T::nan(),
            solve_time: 0f64,
            iterations: 0,
            r_prim: T::nan(),
            r_dual: T::nan(),
            gap: T::nan(),
        }
    }

    pub(crate) fn finalize(&mut self, x: &[T], status: SolverStatus, info: &IPMInfo<T>) {
        self.x.clear();
        self.x.extend_from_slice(x);
        self.status = status;
        self.obj_val = info.cost_primal;
        self.solve_time = info.solve_time;
        self.iterations = info.iterations;
        self.r_prim = info.res_primal;
        self.r_dual = info.res_dual;
        self.gap = info.gap;
    }
}

impl<T> Default for QPSolution<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new()
    }
}
