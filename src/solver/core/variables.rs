use super::traits::ProblemDims;
use crate::algebra::*;
use itertools::izip;

// ---------------
// Variables type for the primal-dual iterate y = (x, λ, ν)
// ---------------

#[derive(Debug, Clone)]
pub(crate) struct Variables<T> {
    pub x: Vec<T>,
    pub λ: Vec<T>,
    pub ν: Vec<T>,
}

impl<T> Variables<T>
where
    T: FloatT,
{
    pub fn new(dims: &ProblemDims) -> Self {
        Self {
            x: vec![T::zero(); dims.n],
            λ: vec![T::zero(); dims.m],
            ν: vec![T::zero(); dims.p],
        }
    }

    // starting multipliers.  The primal part
    // comes from the problem itself.
    pub fn initialize_duals(&mut self) {
        self.λ.set(T::one());
        self.ν.set(T::zero());
    }

    // self = base + α*step
    pub fn set_trial(&mut self, base: &Self, step: &Self, α: T) {
        self.x.waxpby(T::one(), &base.x, α, &step.x);
        self.λ.waxpby(T::one(), &base.λ, α, &step.λ);
        self.ν.waxpby(T::one(), &base.ν, α, &step.ν);
    }

    pub fn add_step(&mut self, step: &Self, α: T) {
        self.x.axpby(α, &step.x, T::one());
        self.λ.axpby(α, &step.λ, T::one());
        self.ν.axpby(α, &step.ν, T::one());
    }

    /// Largest α ∈ (0,1] with λ + α⋅Δλ ≥ 0
    pub fn max_step_to_boundary(&self, step: &Self) -> T {
        izip!(&self.λ, &step.λ).fold(T::one(), |α, (&λ, &dλ)| {
            if dλ < T::zero() {
                T::min(α, -λ / dλ)
            } else {
                α
            }
        })
    }
}

#[test]
fn test_max_step_to_boundary() {
    let dims = ProblemDims { n: 1, m: 3, p: 0 };
    let mut vars = Variables::<f64>::new(&dims);
    vars.initialize_duals();
    let mut step = Variables::<f64>::new(&dims);

    // no decreasing multipliers admits a full step
    step.λ.copy_from(&[1., 0., 2.]);
    assert_eq!(vars.max_step_to_boundary(&step), 1.);

    step.λ.copy_from(&[-4., 0., -2.]);
    assert_eq!(vars.max_step_to_boundary(&step), 0.25);

    let mut trial = Variables::<f64>::new(&dims);
    trial.set_trial(&vars, &step, 0.25);
    assert_eq!(trial.λ, [0., 1., 0.5]);
}
