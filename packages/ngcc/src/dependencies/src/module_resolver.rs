// Module Resolver
//
// Maps an import specifier, plus optional path-mapping configuration, to a
// location on disk. Resolution failure is a first-class outcome (`None`),
// never an error: callers decide whether a missing module matters.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::file_system::src::types::{AbsoluteFsPath, FileSystem};
use crate::packages::src::entry_point::resolve_file_with_postfixes;

/// Path-alias configuration, in the shape of a tsconfig `paths` block:
/// single-`*` glob patterns mapping to candidate replacement templates,
/// all relative to `base_url`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMappings {
    pub base_url: String,
    pub paths: IndexMap<String, Vec<String>>,
}

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedModule {
    /// A file inside the importing package; recursed into, not reported.
    Relative(AbsoluteFsPath),
    /// The entry-point directory of an external package (or secondary
    /// entry point).
    External(AbsoluteFsPath),
    /// A file inside an external package that is not that package's
    /// declared entry point.
    DeepImport(AbsoluteFsPath),
}

#[derive(Debug, Clone)]
struct PathMappingPattern {
    prefix: String,
    postfix: String,
    has_star: bool,
}

impl PathMappingPattern {
    fn parse(pattern: &str) -> Self {
        match pattern.split_once('*') {
            Some((prefix, postfix)) => Self {
                prefix: prefix.to_string(),
                postfix: postfix.to_string(),
                has_star: true,
            },
            None => Self {
                prefix: pattern.to_string(),
                postfix: String::new(),
                has_star: false,
            },
        }
    }

    /// The text matched by `*`, when this pattern matches `specifier`.
    fn match_specifier(&self, specifier: &str) -> Option<String> {
        if !self.has_star {
            return (specifier == self.prefix).then(String::new);
        }
        if specifier.len() < self.prefix.len() + self.postfix.len() {
            return None;
        }
        specifier
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_suffix(self.postfix.as_str()))
            .map(|star| star.to_string())
    }

    fn instantiate(&self, star: &str) -> String {
        if self.has_star {
            format!("{}{}{}", self.prefix, star, self.postfix)
        } else {
            self.prefix.clone()
        }
    }
}

#[derive(Debug, Clone)]
struct ProcessedPathMapping {
    pattern: PathMappingPattern,
    templates: Vec<PathMappingPattern>,
    base: AbsoluteFsPath,
}

pub struct ModuleResolver<'a> {
    fs: &'a dyn FileSystem,
    path_mappings: Vec<ProcessedPathMapping>,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, path_mappings: Option<&PathMappings>) -> Self {
        let path_mappings = path_mappings
            .map(|mappings| {
                let base = AbsoluteFsPath::new(&mappings.base_url);
                mappings
                    .paths
                    .iter()
                    .map(|(pattern, templates)| ProcessedPathMapping {
                        pattern: PathMappingPattern::parse(pattern),
                        templates: templates
                            .iter()
                            .map(|t| PathMappingPattern::parse(t))
                            .collect(),
                        base: base.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { fs, path_mappings }
    }

    /// Resolve `specifier` as imported from `from_file`.
    pub fn resolve_module_import(
        &self,
        specifier: &str,
        from_file: &AbsoluteFsPath,
    ) -> Option<ResolvedModule> {
        if specifier.starts_with('.') {
            self.resolve_as_relative_path(specifier, from_file)
                .map(ResolvedModule::Relative)
        } else {
            self.resolve_by_path_mappings(specifier, from_file)
                .or_else(|| self.resolve_as_entry_point(specifier, from_file))
        }
    }

    fn resolve_as_relative_path(
        &self,
        specifier: &str,
        from_file: &AbsoluteFsPath,
    ) -> Option<AbsoluteFsPath> {
        resolve_file_with_postfixes(self.fs, &from_file.dirname().join(specifier))
    }

    /// Try the configured path mappings, most specific matching pattern
    /// first; each template is tried in order and the first candidate that
    /// exists on disk wins.
    fn resolve_by_path_mappings(
        &self,
        specifier: &str,
        from_file: &AbsoluteFsPath,
    ) -> Option<ResolvedModule> {
        let mut matches: Vec<(&ProcessedPathMapping, String)> = self
            .path_mappings
            .iter()
            .filter_map(|mapping| {
                mapping
                    .pattern
                    .match_specifier(specifier)
                    .map(|star| (mapping, star))
            })
            .collect();
        matches.sort_by_key(|(mapping, _)| std::cmp::Reverse(mapping.pattern.prefix.len()));

        for (mapping, star) in matches {
            for template in &mapping.templates {
                let candidate = mapping.base.join(&template.instantiate(&star));
                if self.is_entry_point(&candidate) {
                    return Some(ResolvedModule::External(candidate));
                }
                if let Some(file) = resolve_file_with_postfixes(self.fs, &candidate) {
                    let package = self.find_package_path(from_file);
                    return Some(match package {
                        Some(package) if package.contains(&file) => {
                            ResolvedModule::Relative(file)
                        }
                        _ => ResolvedModule::DeepImport(file),
                    });
                }
            }
        }
        None
    }

    /// Walk parent directories looking for `node_modules/<specifier>`.
    fn resolve_as_entry_point(
        &self,
        specifier: &str,
        from_file: &AbsoluteFsPath,
    ) -> Option<ResolvedModule> {
        let mut folder = from_file.dirname();
        loop {
            if folder.basename() == "node_modules" {
                folder = folder.dirname();
            }
            let candidate = folder.join("node_modules").join(specifier);
            if self.is_entry_point(&candidate) {
                return Some(ResolvedModule::External(candidate));
            }
            if let Some(file) = resolve_file_with_postfixes(self.fs, &candidate) {
                return Some(ResolvedModule::DeepImport(file));
            }
            if folder.is_root() {
                return None;
            }
            folder = folder.dirname();
        }
    }

    fn is_entry_point(&self, path: &AbsoluteFsPath) -> bool {
        self.fs.is_file(&path.join("package.json"))
    }

    /// The root of the package containing `file`: the nearest ancestor
    /// directory with a package.json.
    fn find_package_path(&self, file: &AbsoluteFsPath) -> Option<AbsoluteFsPath> {
        let mut folder = file.dirname();
        loop {
            if self.is_entry_point(&folder) {
                return Some(folder);
            }
            if folder.is_root() {
                return None;
            }
            folder = folder.dirname();
        }
    }
}
