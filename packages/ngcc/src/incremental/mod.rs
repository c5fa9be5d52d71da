//! Incremental State
//!
//! Tracks which files are provably unaffected between two compilation
//! passes, so their analysis metadata can be reused unchanged.

pub mod src;


pub use src::*;
