pub mod catalog;
pub mod evaluate;

pub use catalog::*;
pub use evaluate::*;
