// Node JS File System
//
// Real file-system implementation backed by std::fs.

use std::fs;
use std::io;
use std::path::Path;

use super::types::{AbsoluteFsPath, FileSystem};

pub struct NodeJsFileSystem;

impl NodeJsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NodeJsFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for NodeJsFileSystem {
    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        Path::new(path.as_str()).exists()
    }

    fn is_file(&self, path: &AbsoluteFsPath) -> bool {
        Path::new(path.as_str()).is_file()
    }

    fn is_directory(&self, path: &AbsoluteFsPath) -> bool {
        Path::new(path.as_str()).is_dir()
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        fs::read_to_string(path.as_str())
    }

    fn write_file(&self, path: &AbsoluteFsPath, contents: &str) -> io::Result<()> {
        fs::write(path.as_str(), contents)
    }

    fn readdir(&self, path: &AbsoluteFsPath) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path.as_str())? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        names.sort();
        Ok(names)
    }
}
