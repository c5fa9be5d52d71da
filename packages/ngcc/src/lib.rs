#![deny(clippy::all)]

/**
 * Angular Compatibility Compiler (ngcc) - Rust Implementation
 *
 * Rewrites pre-built Angular package distributions (compiled with the
 * View Engine code generation scheme) in place so they can be consumed
 * by the Ivy runtime, working only from the distributed JavaScript
 * bundles, their typings and their source maps.
 */
pub mod analysis;
pub mod dependencies;
pub mod file_system;
pub mod host;
pub mod incremental;
pub mod logging;
pub mod main_ngcc;
pub mod packages;
pub mod rendering;
pub mod sourcemaps;

pub use main_ngcc::{main_ngcc, NgccOptions};

/// ngcc version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
