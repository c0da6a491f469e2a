//! Solver implementations for specific problem formats.
//!
//! Each implementation supplies a [`ConvexProgram`](crate::solver::traits::ConvexProgram)
//! for its problem class along with a user facing solver type.

pub mod qp;
