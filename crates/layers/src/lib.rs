pub mod arc;
pub mod axis;
pub mod beeswarm;
pub mod bubbles;
pub mod country;
pub mod labels;
pub mod layer;
pub mod map;
pub mod motives;
pub mod pack;
pub mod scale;
pub mod shape;
pub mod status;
pub mod symbology;
pub mod timeline;
pub mod treemap;

#[cfg(test)]
pub(crate) mod fixtures;

pub use layer::*;
