//! Solver for convex quadratic programs with affine constraints.
//!
//! The [`QPSolver`] reformulates the problem with a single slack variable
//! so that any starting point is admissible, then solves it with the
//! [`PrimalDualIPM`](crate::solver::PrimalDualIPM) engine.

#![allow(non_snake_case)]

#[cfg(feature = "serde")]
mod json;
mod problem;
mod settings;
mod solution;
mod solver;

//export flattened
pub use problem::*;
pub use settings::*;
pub use solution::*;
pub use solver::*;
