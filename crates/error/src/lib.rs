//! Module for custom error-handling of fatal simulation errors in Mmusim crates.
mod error;
mod macros;

pub use error::{Error, Result};
#[allow(unused_imports)]
pub use macros::*;
