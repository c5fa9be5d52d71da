//! Analysis
//!
//! The collaborator interface through which class-level analysis results
//! flow into rendering. Deciding what is a directive, module or pipe is the
//! provider's business, not this crate's.

pub mod src;


pub use src::*;
