// Analysis API
//
// The Analysis Provider contract: given a file and its syntactic analysis,
// produce the per-class descriptions and the text to inject. The rendering
// formatters consume these without interpreting them.

use crate::file_system::src::types::AbsoluteFsPath;
use crate::host::src::api::SourceAnalysis;
use crate::rendering::src::rendering_formatter::{
    ExportInfo, Import, ModuleWithProvidersInfo,
};

/// One decorator applied to a class: identifier plus raw argument texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    pub name: String,
    pub args: Vec<String>,
}

/// A class the provider analyzed, with the edits it requires.
#[derive(Debug, Clone, Default)]
pub struct CompiledClass {
    pub name: String,
    pub decorators: Vec<Decorator>,
    /// Names of decorator-array elements superseded by the injected
    /// definitions, to be stripped from the bundle.
    pub decorators_to_remove: Vec<String>,
    /// Definition text to splice in after the class.
    pub definitions: Option<String>,
    /// Statements to splice in next to the class, after all definitions.
    pub adjacent_statements: Option<String>,
}

/// Everything the provider wants injected into one file.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    pub classes: Vec<CompiledClass>,
    pub imports: Vec<Import>,
    pub exports: Vec<ExportInfo>,
    pub constants: Option<String>,
}

/// The collaborator that decides what the classes in a file are and what
/// must be injected for them.
pub trait AnalysisProvider {
    fn analyze_file(
        &self,
        path: &AbsoluteFsPath,
        contents: &str,
        analysis: &SourceAnalysis,
    ) -> FileAnalysis;

    /// Typings-file signatures that need a generic parameter added.
    fn module_with_providers(&self, _dts_contents: &str) -> Vec<ModuleWithProvidersInfo> {
        Vec::new()
    }
}
