// File System Types
//
// Branded absolute paths and the file-system trait ngcc is written against.

use std::io;

use super::util::clean_path;

/// A fully qualified path in the file system, in POSIX form.
///
/// All path manipulation inside ngcc happens on these normalized strings,
/// so the same logic drives the real file system and the mock used in tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsoluteFsPath(String);

impl AbsoluteFsPath {
    pub fn new(path: impl Into<String>) -> Self {
        AbsoluteFsPath(clean_path(&path.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Join a segment onto this path, collapsing `.` and `..` components.
    ///
    /// A rooted segment replaces the path entirely, matching `path.resolve`.
    pub fn join(&self, segment: &str) -> AbsoluteFsPath {
        if segment.starts_with('/') {
            AbsoluteFsPath::new(segment)
        } else {
            AbsoluteFsPath::new(format!("{}/{}", self.0, segment))
        }
    }

    /// The parent directory of this path; the root is its own parent.
    pub fn dirname(&self) -> AbsoluteFsPath {
        match self.0.rfind('/') {
            Some(0) | None => AbsoluteFsPath("/".to_string()),
            Some(idx) => AbsoluteFsPath(self.0[..idx].to_string()),
        }
    }

    /// The final segment of this path.
    pub fn basename(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.0.ends_with(suffix)
    }

    /// Whether `other` is this path or lies underneath it.
    pub fn contains(&self, other: &AbsoluteFsPath) -> bool {
        if self.is_root() {
            return true;
        }
        other.0 == self.0 || other.0.starts_with(&format!("{}/", self.0))
    }

    /// The portion of `self` below `base`, when `base` contains it.
    pub fn relative_to(&self, base: &AbsoluteFsPath) -> Option<&str> {
        if base.is_root() {
            return self.0.strip_prefix('/');
        }
        if self.0 == base.0 {
            return Some("");
        }
        self.0
            .strip_prefix(base.0.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
    }
}

impl AsRef<str> for AbsoluteFsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AbsoluteFsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The file-system operations ngcc performs.
///
/// Package processing only ever reads text, writes text and inspects
/// directory structure, so the trait surface stays deliberately small.
pub trait FileSystem {
    fn exists(&self, path: &AbsoluteFsPath) -> bool;
    fn is_file(&self, path: &AbsoluteFsPath) -> bool;
    fn is_directory(&self, path: &AbsoluteFsPath) -> bool;
    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String>;
    fn write_file(&self, path: &AbsoluteFsPath, contents: &str) -> io::Result<()>;
    fn readdir(&self, path: &AbsoluteFsPath) -> io::Result<Vec<String>>;
}
