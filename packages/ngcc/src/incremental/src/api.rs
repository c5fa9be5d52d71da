// Incremental API
//
// Snapshots and the per-class metadata records other analysis phases
// register to participate in incremental reuse.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};

/// A point-in-time view of a file set: path to content digest.
#[derive(Debug, Clone, Default)]
pub struct FileSnapshot {
    digests: HashMap<AbsoluteFsPath, String>,
}

impl FileSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture digests for `files`, skipping any that cannot be read.
    pub fn capture(fs: &dyn FileSystem, files: &[AbsoluteFsPath]) -> Self {
        let mut snapshot = Self::new();
        for file in files {
            if let Ok(contents) = fs.read_file(file) {
                snapshot.add(file.clone(), &contents);
            }
        }
        snapshot
    }

    pub fn add(&mut self, path: AbsoluteFsPath, contents: &str) {
        self.digests.insert(path, compute_digest(contents));
    }

    pub fn contains(&self, path: &AbsoluteFsPath) -> bool {
        self.digests.contains_key(path)
    }

    pub fn digest_of(&self, path: &AbsoluteFsPath) -> Option<&str> {
        self.digests.get(path).map(|digest| digest.as_str())
    }

    pub fn files(&self) -> impl Iterator<Item = &AbsoluteFsPath> {
        self.digests.keys()
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

fn compute_digest(contents: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Analysis result recorded for a directive or component class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveMeta {
    pub name: String,
    pub selector: Option<String>,
    pub is_component: bool,
}

/// Analysis result recorded for an NgModule class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NgModuleMeta {
    pub name: String,
    pub declarations: Vec<String>,
    pub exports: Vec<String>,
}

/// Analysis result recorded for a pipe class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeMeta {
    pub name: String,
    pub pipe_name: Option<String>,
}
