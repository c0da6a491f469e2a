use crate::solver::implementations::qp::DefaultSettings;
use thiserror::Error;

/// Solver general core settings are the same as for the QP solver.
///
/// Go [here](crate::solver::implementations::qp::DefaultSettings)
/// to view the complete list.
///
pub type CoreSettings<T> = DefaultSettings<T>;

#[derive(Error, Debug, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// A field holds a value outside of its legal range
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}
