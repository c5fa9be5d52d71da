// Dependency Host
//
// Scans a bundle's top-level import and re-export statements to compute the
// set of external entry points it depends on. Internal (same package)
// imports are recursed into; a visited set makes import cycles safe.

use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_parser::Parser;
use oxc_span::SourceType;
use regex::Regex;

use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};

use super::module_resolver::{ModuleResolver, ResolvedModule};

/// The dependencies discovered from one entry point.
///
/// Every resolved specifier lands in exactly one partition; sets keep the
/// insertion order of first discovery and deduplicate by path.
#[derive(Debug, Default)]
pub struct DependencySet {
    /// External entry-point roots this entry point imports from.
    pub dependencies: IndexSet<AbsoluteFsPath>,
    /// Specifiers that did not resolve at all.
    pub missing: IndexSet<String>,
    /// Imports that reach inside an external package, bypassing its
    /// entry point.
    pub deep_imports: IndexSet<AbsoluteFsPath>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }
}

static IMPORT_OR_REEXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:import|export)[\s\S]+?["'][^"']+["']"#).unwrap()
});

/// Cheap textual test for import-or-re-export-shaped statements, used to
/// avoid building a syntax tree for files that provably have none.
pub fn has_import_or_reexport_statements(source: &str) -> bool {
    IMPORT_OR_REEXPORT.is_match(source)
}

pub struct EsmDependencyHost<'a> {
    fs: &'a dyn FileSystem,
    resolver: ModuleResolver<'a>,
}

impl<'a> EsmDependencyHost<'a> {
    pub fn new(fs: &'a dyn FileSystem, resolver: ModuleResolver<'a>) -> Self {
        Self { fs, resolver }
    }

    /// Compute the dependency set of `entry_point_file`.
    pub fn find_dependencies(&self, entry_point_file: &AbsoluteFsPath) -> Result<DependencySet> {
        let mut dependencies = DependencySet::new();
        let mut visited = HashSet::new();
        let mut program_files = Vec::new();
        self.recursively_collect_dependencies(
            entry_point_file,
            &mut dependencies,
            &mut visited,
            &mut program_files,
        )?;
        Ok(dependencies)
    }

    /// The files making up a bundle's program: the entry-point file plus
    /// every internal file reachable through relative imports, in first
    /// visit order.
    pub fn find_program_files(
        &self,
        entry_point_file: &AbsoluteFsPath,
    ) -> Result<Vec<AbsoluteFsPath>> {
        let mut dependencies = DependencySet::new();
        let mut visited = HashSet::new();
        let mut program_files = Vec::new();
        self.recursively_collect_dependencies(
            entry_point_file,
            &mut dependencies,
            &mut visited,
            &mut program_files,
        )?;
        Ok(program_files)
    }

    fn recursively_collect_dependencies(
        &self,
        file: &AbsoluteFsPath,
        dependencies: &mut DependencySet,
        visited: &mut HashSet<AbsoluteFsPath>,
        program_files: &mut Vec<AbsoluteFsPath>,
    ) -> Result<()> {
        if !visited.insert(file.clone()) {
            return Ok(());
        }
        if file.ends_with(".d.ts") {
            // Typings have no runtime imports worth tracking.
            return Ok(());
        }
        program_files.push(file.clone());
        let contents = self
            .fs
            .read_file(file)
            .with_context(|| format!("Unable to read {}", file))?;
        if !has_import_or_reexport_statements(&contents) {
            return Ok(());
        }

        for specifier in extract_import_specifiers(file, &contents)? {
            match self.resolver.resolve_module_import(&specifier, file) {
                None => {
                    dependencies.missing.insert(specifier);
                }
                Some(ResolvedModule::Relative(path)) => {
                    self.recursively_collect_dependencies(
                        &path,
                        dependencies,
                        visited,
                        program_files,
                    )?;
                }
                Some(ResolvedModule::External(entry_point)) => {
                    dependencies.dependencies.insert(entry_point);
                }
                Some(ResolvedModule::DeepImport(path)) => {
                    dependencies.deep_imports.insert(path);
                }
            }
        }
        Ok(())
    }
}

/// Parse `contents` and collect the module specifiers of its top-level
/// static imports and re-exports. Nested scopes are never visited and
/// type-only imports are ignored.
fn extract_import_specifiers(file: &AbsoluteFsPath, contents: &str) -> Result<Vec<String>> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, contents, SourceType::mjs()).parse();
    if ret.panicked {
        bail!("Unable to parse {}", file);
    }

    let mut specifiers = Vec::new();
    for statement in &ret.program.body {
        match statement {
            Statement::ImportDeclaration(decl) => {
                if !decl.import_kind.is_type() {
                    specifiers.push(decl.source.value.to_string());
                }
            }
            Statement::ExportNamedDeclaration(decl) => {
                if !decl.export_kind.is_type() {
                    if let Some(source) = &decl.source {
                        specifiers.push(source.value.to_string());
                    }
                }
            }
            Statement::ExportAllDeclaration(decl) => {
                if !decl.export_kind.is_type() {
                    specifiers.push(decl.source.value.to_string());
                }
            }
            _ => {}
        }
    }
    Ok(specifiers)
}
