// Transformer
//
// Processes one format bundle of an entry point: detects the concrete
// format, collects the bundle's program files, and runs each through the
// renderer. The incremental state gates which files are actually rewritten.

use anyhow::{anyhow, Result};

use crate::analysis::src::api::AnalysisProvider;
use crate::dependencies::src::dependency_host::EsmDependencyHost;
use crate::dependencies::src::module_resolver::ModuleResolver;
use crate::file_system::src::types::FileSystem;
use crate::incremental::src::state::IncrementalState;
use crate::logging::src::logger::Logger;
use crate::rendering::src::renderer::{FileToWrite, Renderer};

use super::entry_point::{
    get_entry_point_format, resolve_file_with_postfixes, EntryPoint, EntryPointFormat,
};

pub struct Transformer<'a> {
    fs: &'a dyn FileSystem,
    logger: &'a dyn Logger,
}

impl<'a> Transformer<'a> {
    pub fn new(fs: &'a dyn FileSystem, logger: &'a dyn Logger) -> Self {
        Self { fs, logger }
    }

    /// Transform the bundle behind `property` of `entry_point`, returning
    /// the files that need writing. Files proven unchanged by the
    /// incremental state are skipped outright.
    pub fn transform(
        &self,
        entry_point: &EntryPoint,
        property: &str,
        provider: &dyn AnalysisProvider,
        state: Option<&IncrementalState>,
    ) -> Result<Vec<FileToWrite>> {
        let format = get_entry_point_format(self.fs, entry_point, property)
            .ok_or_else(|| anyhow!("No format for {} property {}", entry_point.name, property))?;
        let declared = entry_point
            .format_path(property)
            .ok_or_else(|| anyhow!("Missing property {} in {}", property, entry_point.name))?;
        let bundle_path = resolve_file_with_postfixes(self.fs, &declared)
            .ok_or_else(|| anyhow!("Missing bundle file for {}", declared))?;

        self.logger.debug(&format!(
            "Compiling {} ({}) as {}",
            entry_point.name, property, format
        ));

        let program_files = match format {
            EntryPointFormat::Esm2015 | EntryPointFormat::Esm5 => {
                let resolver = ModuleResolver::new(self.fs, None);
                let host = EsmDependencyHost::new(self.fs, resolver);
                host.find_program_files(&bundle_path)?
            }
            // Require-based bundles are distributed flat.
            EntryPointFormat::CommonJs | EntryPointFormat::Umd => vec![bundle_path],
        };

        let renderer = Renderer::new(self.fs, self.logger);
        let mut to_write = Vec::new();

        for file in program_files {
            if state.is_some_and(|state| state.safe_to_skip(&file)) {
                self.logger
                    .debug(&format!("Skipping unchanged file {}", file));
                continue;
            }
            let contents = self.fs.read_file(&file)?;
            for rendered in renderer.render_file(&file, &contents, format, provider) {
                if rendered.path == file && rendered.contents == contents {
                    continue;
                }
                to_write.push(rendered);
            }
        }

        if self.fs.is_file(&entry_point.typings) {
            let dts_contents = self.fs.read_file(&entry_point.typings)?;
            to_write.extend(renderer.render_dts(&entry_point.typings, &dts_contents, provider));
        }

        Ok(to_write)
    }
}
