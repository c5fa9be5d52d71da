//! Packages
//!
//! Entry-point discovery and description: reading `package.json` manifests,
//! mapping format properties to concrete bundle formats, build markers and
//! the transformer that drives one entry-point rewrite.

pub mod src;

#[cfg(test)]
mod test;

pub use src::*;
