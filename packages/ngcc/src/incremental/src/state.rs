// Incremental State
//
// A value carried between compilation passes. Reconciliation derives a new
// state from the previous one plus two file-set snapshots; it never mutates
// the previous state. Registration methods mutate metadata during a pass,
// before the next reconciliation.

use std::collections::{HashMap, HashSet};

use crate::file_system::src::types::AbsoluteFsPath;

use super::api::{DirectiveMeta, FileSnapshot, NgModuleMeta, PipeMeta};

/// Metadata accumulated for one source file during a pass.
///
/// Class-level records are keyed by class name; class identity by tree node
/// does not survive reparsing, the (file, name) pair does.
#[derive(Debug, Clone, Default)]
pub struct FileMetadata {
    file_dependencies: HashSet<AbsoluteFsPath>,
    directive_meta: HashMap<String, DirectiveMeta>,
    ng_module_meta: HashMap<String, NgModuleMeta>,
    pipe_meta: HashMap<String, PipeMeta>,
}

#[derive(Debug, Clone, Default)]
pub struct IncrementalState {
    unchanged_files: HashSet<AbsoluteFsPath>,
    metadata: HashMap<AbsoluteFsPath, FileMetadata>,
}

impl IncrementalState {
    /// A state with no reusable information; every file gets re-analyzed.
    pub fn fresh() -> Self {
        Self::default()
    }

    /// Derive the state for a new pass.
    ///
    /// A file is unchanged iff its content digest survived between the
    /// snapshots and every one of its recorded dependencies did too. The
    /// dependency lists are already transitive, so one level of checking
    /// suffices. A newly appeared declaration file invalidates everything:
    /// declaration files are not dependency-tracked individually, so reuse
    /// cannot be proven safe.
    pub fn reconcile(
        previous: &IncrementalState,
        old_files: &FileSnapshot,
        new_files: &FileSnapshot,
    ) -> IncrementalState {
        for file in new_files.files() {
            if file.ends_with(".d.ts") && !old_files.contains(file) {
                return IncrementalState::fresh();
            }
        }

        let survived = |file: &AbsoluteFsPath| -> bool {
            match (old_files.digest_of(file), new_files.digest_of(file)) {
                (Some(old), Some(new)) => old == new,
                _ => false,
            }
        };

        let mut state = IncrementalState::fresh();
        for file in new_files.files() {
            if !survived(file) {
                continue;
            }
            let dependencies_survived = previous
                .get_file_dependencies(file)
                .iter()
                .all(|dependency| survived(dependency));
            if !dependencies_survived {
                continue;
            }
            state.unchanged_files.insert(file.clone());
            if let Some(metadata) = previous.metadata.get(file) {
                state.metadata.insert(file.clone(), metadata.clone());
            }
        }
        state
    }

    /// Whether `file`'s analysis from the previous pass can be reused.
    pub fn safe_to_skip(&self, file: &AbsoluteFsPath) -> bool {
        self.unchanged_files.contains(file)
    }

    /// Record that analyzing `dependent` observed a dependency on
    /// `dependency`. Idempotent.
    pub fn track_file_dependency(
        &mut self,
        dependency: &AbsoluteFsPath,
        dependent: &AbsoluteFsPath,
    ) {
        self.metadata
            .entry(dependent.clone())
            .or_default()
            .file_dependencies
            .insert(dependency.clone());
    }

    pub fn get_file_dependencies(&self, file: &AbsoluteFsPath) -> Vec<AbsoluteFsPath> {
        self.metadata
            .get(file)
            .map(|metadata| metadata.file_dependencies.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn register_directive_metadata(
        &mut self,
        file: &AbsoluteFsPath,
        class_name: &str,
        meta: DirectiveMeta,
    ) {
        self.metadata
            .entry(file.clone())
            .or_default()
            .directive_meta
            .insert(class_name.to_string(), meta);
    }

    pub fn get_directive_metadata(
        &self,
        file: &AbsoluteFsPath,
        class_name: &str,
    ) -> Option<&DirectiveMeta> {
        self.metadata.get(file)?.directive_meta.get(class_name)
    }

    pub fn register_ng_module_metadata(
        &mut self,
        file: &AbsoluteFsPath,
        class_name: &str,
        meta: NgModuleMeta,
    ) {
        self.metadata
            .entry(file.clone())
            .or_default()
            .ng_module_meta
            .insert(class_name.to_string(), meta);
    }

    pub fn get_ng_module_metadata(
        &self,
        file: &AbsoluteFsPath,
        class_name: &str,
    ) -> Option<&NgModuleMeta> {
        self.metadata.get(file)?.ng_module_meta.get(class_name)
    }

    pub fn register_pipe_metadata(
        &mut self,
        file: &AbsoluteFsPath,
        class_name: &str,
        meta: PipeMeta,
    ) {
        self.metadata
            .entry(file.clone())
            .or_default()
            .pipe_meta
            .insert(class_name.to_string(), meta);
    }

    pub fn get_pipe_metadata(&self, file: &AbsoluteFsPath, class_name: &str) -> Option<&PipeMeta> {
        self.metadata.get(file)?.pipe_meta.get(class_name)
    }

    pub fn unchanged_files(&self) -> &HashSet<AbsoluteFsPath> {
        &self.unchanged_files
    }
}
