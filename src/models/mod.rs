pub mod artifact;
pub mod options;

pub use artifact::*;
pub use options::*;
