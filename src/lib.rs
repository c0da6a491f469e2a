//! __pdipm__ is a Rust implementation of a primal-dual interior point
//! method for convex optimization.  It solves quadratic programs of the form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & \frac{1}{2}x^T P x + q^T x + r\\\\\[2ex\]
//!  \text{subject to} & Gx \preceq h \\\\\[1ex\]
//!         & Ax = b
//!  \end{array}
//! $$
//!
//! with decision variable $x \in \mathbb{R}^n$ and data matrices
//! $P=P^\top \succeq 0$,
//! $G \in \mathbb{R}^{m \times n}$ and
//! $A \in \mathbb{R}^{p \times n}$.
//!
//! ## Features
//!
//! * __Infeasible start__: The initial guess for $x$ need not satisfy any
//!   constraint.  A single slack variable relaxes the inequalities at the
//!   start and is driven to zero as the solver progresses.
//!
//! * __Robust linear algebra__: Newton steps are computed from a reduced
//!   symmetric quasidefinite KKT system using a dense $LDL^T$ factorization
//!   with static and dynamic regularization and iterative refinement, so
//!   rank deficient equality constraints do not cause a failure.
//!
//! * __Extensible__: The interior point engine operates on any smooth convex
//!   program implementing the [`ConvexProgram`](crate::solver::traits::ConvexProgram)
//!   trait.
//!
//! ## Example
//!
//! ```
//! use pdipm::algebra::*;
//! use pdipm::solver::*;
//!
//! // minimize x₁² + x₂²  subject to  x₁ + x₂ = 1
//! let P = Matrix::from(&[[2., 0.], [0., 2.]]);
//! let q = [0., 0.];
//! let G = Matrix::zeros((0, 2));
//! let A = Matrix::from(&[[1., 1.]]);
//!
//! let mut x = [0f64, 0.];
//! let mut solver = QPSolver::new(DefaultSettings::default());
//! let status = solver.solve(&mut x, &P, &q, 0., &G, &[], &A, &[1.]).unwrap();
//!
//! assert_eq!(status, SolverStatus::Solved);
//! assert!(solver.is_converged());
//! assert!((x[0] - 0.5).abs() < 1e-6 && (x[1] - 0.5).abs() < 1e-6);
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod io;
pub mod solver;
pub mod timers;
