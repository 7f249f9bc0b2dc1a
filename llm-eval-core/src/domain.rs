pub mod estimate;
pub mod request;
pub mod result;

pub use estimate::*;
pub use request::*;
pub use result::*;
