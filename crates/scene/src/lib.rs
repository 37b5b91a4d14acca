pub mod node;
pub mod selection;
pub mod svg;
pub mod viewport;

pub use node::*;
pub use selection::*;
pub use viewport::*;
