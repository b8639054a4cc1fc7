pub mod edges;
pub mod extraction;

pub use edges::*;
pub use extraction::*;
