pub mod curve;
pub mod structs;

pub use curve::*;
pub use structs::*;
