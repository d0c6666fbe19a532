//! Typed models

mod range;
mod value;

pub use range::*;
pub use value::*;
