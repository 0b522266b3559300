pub mod classify;
pub mod segment;
pub mod validate;

pub use classify::*;
pub use segment::*;
pub use validate::*;
