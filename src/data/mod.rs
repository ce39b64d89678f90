//! Data types and definitions.

mod color;
mod path;

pub use self::color::*;
pub use self::path::*;
