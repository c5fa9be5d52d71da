//! Source Maps
//!
//! Loading, flattening and re-rendering of v3 source maps so that rewritten
//! bundles keep pointing at the library author's original sources.

pub mod src;


pub use src::*;
