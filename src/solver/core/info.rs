use super::residuals::Residuals;
use super::{CoreSettings, SolverStatus};
use crate::algebra::*;
use crate::io::PrintTarget;
use crate::timers::*;

/// Progress information for the [`PrimalDualIPM`](crate::solver::PrimalDualIPM)
/// engine, updated at every iteration.

#[derive(Default, Debug)]
pub struct IPMInfo<T> {
    /// barrier parameter t
    pub t: T,
    pub step_length: T,
    pub iterations: u32,
    /// objective value at the current iterate
    pub cost_primal: T,
    /// 2-norm of the primal residual Ax - b
    pub res_primal: T,
    /// 2-norm of the dual residual
    pub res_dual: T,
    /// surrogate duality gap -f(x)ᵀλ
    pub gap: T,

    pub solve_time: f64,
    pub status: SolverStatus,

    // target for progress printing
    pub(crate) stream: PrintTarget,
}

impl<T> IPMInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self, timers: &mut Timers) {
        self.status = SolverStatus::Unsolved;
        self.iterations = 0;
        self.step_length = T::zero();
        self.solve_time = 0f64;

        timers.reset_timer("solve");
    }

    pub(crate) fn update(&mut self, cost: T, residuals: &Residuals<T>, t: T, timers: &Timers) {
        self.cost_primal = cost;
        self.res_primal = residuals.r_pri.norm();
        self.res_dual = residuals.r_dual.norm();
        self.gap = residuals.η;
        self.t = t;

        // solve time so far
        self.solve_time = timers.elapsed_live("solve").as_secs_f64();
    }

    pub(crate) fn save_scalars(&mut self, α: T, iter: u32) {
        self.step_length = α;
        self.iterations = iter;
    }

    pub(crate) fn check_termination(&mut self, settings: &CoreSettings<T>) -> bool {
        if self.is_solved(settings) {
            self.status = SolverStatus::Solved;
        }

        // time or iteration limits
        // ----------------------
        if self.status == SolverStatus::Unsolved {
            if settings.max_iter == self.iterations {
                self.status = SolverStatus::MaxIterations;
            } else if self.solve_time > settings.time_limit {
                self.status = SolverStatus::MaxTime;
            }
        }

        // return TRUE if we settled on a final status
        self.status != SolverStatus::Unsolved
    }

    pub(crate) fn finalize(&mut self, timers: &Timers) {
        self.solve_time = timers.elapsed("solve").as_secs_f64();
    }

    fn is_solved(&self, settings: &CoreSettings<T>) -> bool {
        self.res_primal <= settings.tol_feas
            && self.res_dual <= settings.tol_feas
            && self.gap <= settings.tol_gap
    }
}

#[test]
fn test_check_termination() {
    let settings = crate::solver::DefaultSettingsBuilder::<f64>::default()
        .max_iter(5)
        .build()
        .unwrap();

    let mut info = IPMInfo::<f64>::new();
    info.res_primal = 1e-9;
    info.res_dual = 1e-9;
    info.gap = 1e-3;
    info.save_scalars(1.0, 4);
    assert!(!info.check_termination(&settings));
    assert_eq!(info.status, SolverStatus::Unsolved);

    info.save_scalars(1.0, 5);
    assert!(info.check_termination(&settings));
    assert_eq!(info.status, SolverStatus::MaxIterations);

    // convergence takes priority over the iteration limit
    info.status = SolverStatus::Unsolved;
    info.gap = 1e-9;
    assert!(info.check_termination(&settings));
    assert_eq!(info.status, SolverStatus::Solved);
}
