pub mod data_package;
pub mod dataset_loader;
pub mod manifest;
pub mod records;
pub mod table;
pub mod topology;

pub use data_package::*;
pub use dataset_loader::*;
pub use manifest::*;
pub use records::*;
pub use table::{ParseError, Record, parse_table, parse_table_str};
pub use topology::*;
