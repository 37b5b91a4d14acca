pub mod aggregate;
pub mod temporal;

pub use aggregate::*;
pub use temporal::*;
