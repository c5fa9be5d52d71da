// Mock File System
//
// In-memory file system used by tests. Files are stored in a sorted map of
// POSIX paths; directories exist implicitly whenever a file lies below them.

use std::collections::BTreeMap;
use std::io;
use std::sync::Mutex;

use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};

pub struct MockFileSystem {
    files: Mutex<BTreeMap<String, String>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
        }
    }

    /// Build a file system from `(path, contents)` pairs.
    pub fn from_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::new();
        for (path, contents) in files {
            fs.add_file(path, contents);
        }
        fs
    }

    pub fn add_file(&self, path: &str, contents: &str) {
        let path = AbsoluteFsPath::new(path);
        self.files
            .lock()
            .unwrap()
            .insert(path.into_string(), contents.to_string());
    }

    fn dir_prefix(path: &AbsoluteFsPath) -> String {
        if path.is_root() {
            "/".to_string()
        } else {
            format!("{}/", path.as_str())
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        self.is_file(path) || self.is_directory(path)
    }

    fn is_file(&self, path: &AbsoluteFsPath) -> bool {
        self.files.lock().unwrap().contains_key(path.as_str())
    }

    fn is_directory(&self, path: &AbsoluteFsPath) -> bool {
        let prefix = Self::dir_prefix(path);
        self.files
            .lock()
            .unwrap()
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(key, _)| key.starts_with(&prefix))
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("File not found: {}", path))
            })
    }

    fn write_file(&self, path: &AbsoluteFsPath, contents: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), contents.to_string());
        Ok(())
    }

    fn readdir(&self, path: &AbsoluteFsPath) -> io::Result<Vec<String>> {
        let prefix = Self::dir_prefix(path);
        let files = self.files.lock().unwrap();
        let mut names: Vec<String> = Vec::new();
        for key in files.keys() {
            if let Some(rest) = key.strip_prefix(&prefix) {
                let name = rest.split('/').next().unwrap_or(rest).to_string();
                if !name.is_empty() && !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        if names.is_empty() && !self.is_directory(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", path),
            ));
        }
        Ok(names)
    }
}
