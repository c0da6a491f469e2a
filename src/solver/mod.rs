//! Solver main module.
//!
//! This module contains the interior point engine and the problem
//! specific solvers built on it.
//!
//! The [QP solver](crate::solver::implementations::qp) solves convex
//! quadratic programs in the form described in the top level
//! [API page](crate).  It is the most appropriate choice for nearly
//! all users.
//!
//! It is also possible to solve other smooth convex programs by
//! implementing the [`ConvexProgram`](crate::solver::traits::ConvexProgram)
//! trait and passing the problem to a
//! [`PrimalDualIPM`](crate::solver::PrimalDualIPM) directly.

// internal module structure
pub(crate) mod core;
pub mod implementations;

//user facing types required to interact with solver
pub use crate::solver::core::{IPMInfo, PrimalDualIPM, SolverError, SolverStatus};

//user facing traits required to define new problems
pub use crate::solver::core::traits;
pub use crate::solver::core::{CoreSettings, SettingsError};

pub use crate::solver::implementations::qp;
pub use crate::solver::implementations::qp::*;
