// Main
//
// The top-level pass: discover entry points, order them so dependencies are
// compiled first, gate work on build markers and the incremental state, and
// transform every requested format bundle in place.

use anyhow::Result;

use crate::analysis::src::api::AnalysisProvider;
use crate::dependencies::src::dependency_host::EsmDependencyHost;
use crate::dependencies::src::dependency_resolver::DependencyResolver;
use crate::dependencies::src::module_resolver::{ModuleResolver, PathMappings};
use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};
use crate::incremental::src::state::IncrementalState;
use crate::logging::src::logger::Logger;
use crate::packages::src::build_marker::{has_been_processed, mark_as_processed};
use crate::packages::src::entry_point::SUPPORTED_FORMAT_PROPERTIES;
use crate::packages::src::entry_point_finder::EntryPointFinder;
use crate::packages::src::transformer::Transformer;

/// Options controlling one compatibility-compiler pass.
pub struct NgccOptions {
    /// The installed-packages directory to process.
    pub base_path: AbsoluteFsPath,
    /// Restrict processing to one package directory (plus whatever of its
    /// dependencies still need work).
    pub target_entry_point_path: Option<AbsoluteFsPath>,
    /// package.json properties to consider, in priority order; empty means
    /// all supported properties.
    pub properties_to_consider: Vec<String>,
    /// Process every matching format rather than stopping after the first.
    pub compile_all_formats: bool,
    /// Path-alias configuration consulted during specifier resolution.
    pub path_mappings: Option<PathMappings>,
}

impl NgccOptions {
    pub fn new(base_path: AbsoluteFsPath) -> Self {
        Self {
            base_path,
            target_entry_point_path: None,
            properties_to_consider: Vec::new(),
            compile_all_formats: true,
            path_mappings: None,
        }
    }
}

/// Run one compiler pass over the packages below `options.base_path`.
///
/// `state` carries the reconciled incremental state from the previous pass;
/// pass `None` (or a fresh state) to process everything.
pub fn main_ngcc(
    fs: &dyn FileSystem,
    logger: &dyn Logger,
    provider: &dyn AnalysisProvider,
    options: &NgccOptions,
    state: Option<&IncrementalState>,
) -> Result<()> {
    let finder = EntryPointFinder::new(fs, logger);
    let entry_points = match &options.target_entry_point_path {
        Some(target) => {
            let mut entry_points = Vec::new();
            finder.collect_package_entry_points(target, &mut entry_points);
            entry_points
        }
        None => finder.find_entry_points(&options.base_path),
    };

    let resolver = ModuleResolver::new(fs, options.path_mappings.as_ref());
    let host = EsmDependencyHost::new(fs, resolver);
    let dependency_resolver = DependencyResolver::new(fs, logger, &host);
    let sorted = dependency_resolver.sort_entry_points_by_dependency(entry_points)?;

    for invalid in &sorted.invalid_entry_points {
        logger.warn(&format!(
            "Invalid entry point {}: missing dependencies {:?}",
            invalid.entry_point.name, invalid.missing_dependencies
        ));
    }

    let properties: Vec<&str> = if options.properties_to_consider.is_empty() {
        SUPPORTED_FORMAT_PROPERTIES.to_vec()
    } else {
        options
            .properties_to_consider
            .iter()
            .map(String::as_str)
            .collect()
    };

    let transformer = Transformer::new(fs, logger);
    for mut entry_point in sorted.entry_points {
        if !entry_point.compiled_by_angular {
            logger.debug(&format!(
                "Skipping {}: not compiled by Angular",
                entry_point.name
            ));
            continue;
        }

        let mut processed: Vec<&str> = Vec::new();
        for &property in &properties {
            if entry_point.format_path(property).is_none() {
                continue;
            }
            if has_been_processed(&entry_point.package_json, property) {
                logger.debug(&format!(
                    "Skipping {} ({}): already processed",
                    entry_point.name, property
                ));
                continue;
            }
            match transformer.transform(&entry_point, property, provider, state) {
                Ok(files) => {
                    for file in files {
                        fs.write_file(&file.path, &file.contents)?;
                    }
                    processed.push(property);
                }
                Err(e) => {
                    logger.error(&format!(
                        "Unable to compile {} ({}): {}",
                        entry_point.name, property, e
                    ));
                }
            }
            if !options.compile_all_formats && !processed.is_empty() {
                break;
            }
        }

        if !processed.is_empty() {
            mark_as_processed(fs, &mut entry_point, &processed)?;
        }
    }

    Ok(())
}
