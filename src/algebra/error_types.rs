use thiserror::Error;

/// Error type returned by dense factorization routines.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DenseFactorizationError {
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Pivot `k` vanished with dynamic regularization disabled
    #[error("Matrix factorization produced a zero pivot at index {0}")]
    ZeroPivot(usize),
    #[error("Matrix factorization produced non-finite values")]
    NonFinite,
}
