//! Money handling: fixed-point amounts, grouped formatting, and amounts in words.
mod format;
mod types;
mod words;

pub use format::*;
pub use types::*;
pub use words::*;
