mod core;
mod ldl;
mod matrix_math;
pub use ldl::*;
