// package together all of the following and re-export
// in a partially flattened structure :
// : the problem interface trait
// : the dense KKT solver
// : user settings
// : main solver implementation

pub mod traits;

mod info;
mod info_print;
mod kktsolver;
mod residuals;
mod variables;

//partially flatten top level pieces

mod settings;
mod solver;
pub use info::*;
pub use settings::*;
pub use solver::*;
