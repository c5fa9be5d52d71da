//! Reflection Hosts
//!
//! Syntactic analysis of distributed bundles. All oxc interaction lives
//! here: the hosts parse a file once and return plain span records that the
//! rendering formatters splice against, so no arena lifetimes escape.

pub mod src;

#[cfg(test)]
mod test;

pub use src::*;
