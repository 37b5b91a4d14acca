pub mod analysis;
pub mod slices;
pub mod summary;

pub use analysis::*;
pub use summary::*;
