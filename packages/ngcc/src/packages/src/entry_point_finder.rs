// Entry Point Finder
//
// Walks an installed-packages tree collecting entry points, including
// secondary entry points nested inside a package.

use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};
use crate::logging::src::logger::Logger;

use super::entry_point::{get_entry_point_info, EntryPoint};

pub struct EntryPointFinder<'a> {
    fs: &'a dyn FileSystem,
    logger: &'a dyn Logger,
}

impl<'a> EntryPointFinder<'a> {
    pub fn new(fs: &'a dyn FileSystem, logger: &'a dyn Logger) -> Self {
        Self { fs, logger }
    }

    /// Find all entry points in the packages installed under `base_path`
    /// (typically a `node_modules` directory).
    pub fn find_entry_points(&self, base_path: &AbsoluteFsPath) -> Vec<EntryPoint> {
        let mut entry_points = Vec::new();
        for name in self.subdirectories(base_path) {
            let child = base_path.join(&name);
            if name.starts_with('@') {
                // Scoped packages sit one level deeper.
                for scoped in self.subdirectories(&child) {
                    self.collect_package_entry_points(&child.join(&scoped), &mut entry_points);
                }
            } else {
                self.collect_package_entry_points(&child, &mut entry_points);
            }
        }
        entry_points
    }

    /// Find the entry points belonging to a single package directory: the
    /// primary one at its root plus any nested secondary entry points.
    pub fn collect_package_entry_points(
        &self,
        package_path: &AbsoluteFsPath,
        entry_points: &mut Vec<EntryPoint>,
    ) {
        self.walk_directory(package_path, package_path, entry_points);
    }

    fn walk_directory(
        &self,
        package_path: &AbsoluteFsPath,
        directory: &AbsoluteFsPath,
        entry_points: &mut Vec<EntryPoint>,
    ) {
        if let Some(entry_point) =
            get_entry_point_info(self.fs, self.logger, package_path, directory)
        {
            self.logger
                .debug(&format!("Found entry point {} at {}", entry_point.name, directory));
            entry_points.push(entry_point);
        }
        for name in self.subdirectories(directory) {
            if name == "node_modules" || name.starts_with('.') {
                continue;
            }
            self.walk_directory(package_path, &directory.join(&name), entry_points);
        }
    }

    fn subdirectories(&self, directory: &AbsoluteFsPath) -> Vec<String> {
        match self.fs.readdir(directory) {
            Ok(names) => names
                .into_iter()
                .filter(|name| self.fs.is_directory(&directory.join(name)))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
