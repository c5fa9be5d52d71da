pub mod api;
pub mod state;

pub use api::{DirectiveMeta, FileSnapshot, NgModuleMeta, PipeMeta};
pub use state::{FileMetadata, IncrementalState};
