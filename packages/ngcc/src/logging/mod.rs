//! Logging
//!
//! Logger abstraction used for all pass-level diagnostics.

pub mod src;


pub use src::*;
