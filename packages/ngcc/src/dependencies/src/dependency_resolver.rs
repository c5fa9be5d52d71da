// Dependency Resolver
//
// Orders entry points so that dependencies are always processed before their
// dependents. Entry points with missing dependencies are dropped from the
// ordering (transitively); a dependency cycle between packages is an error.

use std::collections::HashMap;

use thiserror::Error;

use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};
use crate::logging::src::logger::Logger;
use crate::packages::src::entry_point::{
    resolve_file_with_postfixes, EntryPoint, SUPPORTED_FORMAT_PROPERTIES,
};

use super::dependency_host::EsmDependencyHost;

#[derive(Debug, Error)]
#[error("Cyclic dependency between packages: {chain}")]
pub struct DependencyCycleError {
    pub chain: String,
}

/// An entry point removed from the ordering, with the reason.
#[derive(Debug)]
pub struct InvalidEntryPoint {
    pub entry_point: EntryPoint,
    pub missing_dependencies: Vec<String>,
}

/// The result of sorting: processable entry points in dependency order,
/// plus the ones that had to be dropped.
pub struct SortedEntryPointsInfo {
    pub entry_points: Vec<EntryPoint>,
    pub invalid_entry_points: Vec<InvalidEntryPoint>,
}

pub struct DependencyResolver<'a> {
    fs: &'a dyn FileSystem,
    logger: &'a dyn Logger,
    host: &'a EsmDependencyHost<'a>,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        logger: &'a dyn Logger,
        host: &'a EsmDependencyHost<'a>,
    ) -> Self {
        Self { fs, logger, host }
    }

    /// Sort `entry_points` topologically by their import graphs.
    pub fn sort_entry_points_by_dependency(
        &self,
        entry_points: Vec<EntryPoint>,
    ) -> Result<SortedEntryPointsInfo, DependencyCycleError> {
        let mut invalid_entry_points = Vec::new();
        let mut edges: Vec<Vec<usize>> = vec![Vec::new(); entry_points.len()];
        let mut invalid: Vec<Option<Vec<String>>> = vec![None; entry_points.len()];

        let index_by_path: HashMap<AbsoluteFsPath, usize> = entry_points
            .iter()
            .enumerate()
            .map(|(idx, entry_point)| (entry_point.path.clone(), idx))
            .collect();

        for (idx, entry_point) in entry_points.iter().enumerate() {
            let bundle = match self.entry_point_bundle_path(entry_point) {
                Some(bundle) => bundle,
                None => {
                    self.logger.debug(&format!(
                        "Ignoring {}: no supported bundle format found",
                        entry_point.name
                    ));
                    invalid[idx] = Some(Vec::new());
                    continue;
                }
            };
            let dependency_info = match self.host.find_dependencies(&bundle) {
                Ok(info) => info,
                Err(e) => {
                    self.logger
                        .warn(&format!("Unable to analyze {}: {}", entry_point.name, e));
                    invalid[idx] = Some(Vec::new());
                    continue;
                }
            };

            for deep_import in &dependency_info.deep_imports {
                self.logger.warn(&format!(
                    "Entry point '{}' contains deep imports into '{}'. \
                     This is probably not a problem, but may cause the compilation \
                     of entry points to be out of order.",
                    entry_point.name, deep_import
                ));
            }

            if !dependency_info.missing.is_empty() {
                invalid[idx] = Some(
                    dependency_info
                        .missing
                        .iter()
                        .cloned()
                        .collect(),
                );
                continue;
            }

            for dependency in &dependency_info.dependencies {
                if let Some(&dep_idx) = index_by_path.get(dependency) {
                    edges[idx].push(dep_idx);
                }
                // Dependencies that are not among the entry points being
                // processed need no ordering here.
            }
        }

        // An entry point depending on an invalid one is itself invalid.
        loop {
            let mut changed = false;
            for idx in 0..entry_points.len() {
                if invalid[idx].is_some() {
                    continue;
                }
                if let Some(&bad) = edges[idx].iter().find(|&&dep| invalid[dep].is_some()) {
                    invalid[idx] = Some(vec![entry_points[bad].name.clone()]);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let order = topological_order(&entry_points, &edges, &invalid)?;

        let mut sorted = Vec::new();
        for idx in order {
            sorted.push(entry_points[idx].clone());
        }
        let mut invalid_entries = Vec::new();
        for (idx, entry_point) in entry_points.iter().enumerate() {
            if let Some(missing) = invalid[idx].take() {
                invalid_entries.push(InvalidEntryPoint {
                    entry_point: entry_point.clone(),
                    missing_dependencies: missing,
                });
            }
        }

        Ok(SortedEntryPointsInfo {
            entry_points: sorted,
            invalid_entry_points: invalid_entries,
        })
    }

    /// The file to scan for an entry point's dependencies: the first
    /// supported format property that resolves to a file on disk.
    fn entry_point_bundle_path(&self, entry_point: &EntryPoint) -> Option<AbsoluteFsPath> {
        SUPPORTED_FORMAT_PROPERTIES.iter().find_map(|property| {
            let path = entry_point.format_path(property)?;
            resolve_file_with_postfixes(self.fs, &path)
        })
    }
}

/// Depth-first topological sort emitting dependencies before dependents.
/// A gray-node hit is a cycle between packages, which is unsupported.
fn topological_order(
    entry_points: &[EntryPoint],
    edges: &[Vec<usize>],
    invalid: &[Option<Vec<String>>],
) -> Result<Vec<usize>, DependencyCycleError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        White,
        Gray,
        Black,
    }

    fn visit(
        idx: usize,
        entry_points: &[EntryPoint],
        edges: &[Vec<usize>],
        invalid: &[Option<Vec<String>>],
        marks: &mut [Mark],
        stack: &mut Vec<usize>,
        order: &mut Vec<usize>,
    ) -> Result<(), DependencyCycleError> {
        match marks[idx] {
            Mark::Black => return Ok(()),
            Mark::Gray => {
                let start = stack.iter().position(|&i| i == idx).unwrap_or(0);
                let chain: Vec<&str> = stack[start..]
                    .iter()
                    .chain(std::iter::once(&idx))
                    .map(|&i| entry_points[i].name.as_str())
                    .collect();
                return Err(DependencyCycleError {
                    chain: chain.join(" -> "),
                });
            }
            Mark::White => {}
        }
        marks[idx] = Mark::Gray;
        stack.push(idx);
        for &dep in &edges[idx] {
            if invalid[dep].is_none() {
                visit(dep, entry_points, edges, invalid, marks, stack, order)?;
            }
        }
        stack.pop();
        marks[idx] = Mark::Black;
        order.push(idx);
        Ok(())
    }

    let mut marks = vec![Mark::White; entry_points.len()];
    let mut order = Vec::new();
    let mut stack = Vec::new();
    for idx in 0..entry_points.len() {
        if invalid[idx].is_none() {
            visit(
                idx,
                entry_points,
                edges,
                invalid,
                &mut marks,
                &mut stack,
                &mut order,
            )?;
        }
    }
    Ok(order)
}
