pub mod analyze;
pub mod assemble;
pub mod info;
pub mod split;

pub use analyze::*;
pub use assemble::*;
pub use info::*;
pub use split::*;
