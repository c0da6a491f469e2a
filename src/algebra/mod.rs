//! Native dense linear algebra for the solver.
//!
//! Provides the [`FloatT`] numeric trait, elementwise and reduction
//! operations on slices through [`VectorMath`], a dense column major
//! [`Matrix`] type with matrix-vector products, and a dense $LDL^T$
//! factorization engine for symmetric quasidefinite systems.

mod error_types;
mod floats;
mod math_traits;
mod matrix_types;
mod vecmath;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_types::*;

mod dense;
pub use dense::*;

#[cfg(test)]
mod tests;
