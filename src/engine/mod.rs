pub mod generator;
pub mod selector;
pub mod tracker;

pub use generator::*;
pub use selector::*;
pub use tracker::*;
