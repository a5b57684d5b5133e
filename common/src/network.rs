pub mod interface;
pub mod probe;
pub mod range;
