pub mod assembler;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod evaluator;
pub mod traits;
pub mod validator;

pub use assembler::*;
pub use catalog::*;
pub use domain::*;
pub use error::*;
pub use estimator::*;
pub use evaluator::*;
pub use traits::*;
