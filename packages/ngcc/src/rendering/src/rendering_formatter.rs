// Rendering Formatter
//
// The capability set every module-format strategy implements. Each method
// locates a seam characteristic of its format and splices new text there,
// leaving all other code untouched. A formatter that cannot find its seam
// in a given file makes the edit a no-op rather than failing.

use crate::host::src::api::{ClassSymbol, DecoratorsArray, SourceAnalysis, SwitchableDeclaration};
use crate::packages::src::entry_point::EntryPointFormat;

use super::commonjs_rendering_formatter::CommonJsRenderingFormatter;
use super::esm5_rendering_formatter::Esm5RenderingFormatter;
use super::esm_rendering_formatter::EsmRenderingFormatter;
use super::magic_string::MagicString;
use super::umd_rendering_formatter::UmdRenderingFormatter;

/// A dependency to make available inside the rewritten file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub specifier: String,
    /// The namespace binding the injected code refers to, e.g. `ngcc0`.
    pub qualifier: String,
}

/// A declaration to (re-)export from the rewritten file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportInfo {
    pub identifier: String,
    pub from: Option<String>,
}

/// A typings-file signature whose return type needs its generic parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleWithProvidersInfo {
    /// Offset just after the `ModuleWithProviders` token.
    pub insert_offset: u32,
    /// The NgModule the signature resolves to.
    pub ng_module: String,
}

/// The format-specific rewriting strategies.
pub trait RenderingFormatter {
    fn add_imports(&self, output: &mut MagicString, imports: &[Import]);
    fn add_exports(&self, output: &mut MagicString, exports: &[ExportInfo]);
    fn add_constants(&self, output: &mut MagicString, constants: &str);
    fn add_definitions(&self, output: &mut MagicString, class: &ClassSymbol, definitions: &str);
    fn add_adjacent_statements(
        &self,
        output: &mut MagicString,
        class: &ClassSymbol,
        statements: &str,
    );
    fn remove_decorators(
        &self,
        output: &mut MagicString,
        decorators: &DecoratorsArray,
        to_remove: &[String],
    );
    fn rewrite_switchable_declarations(
        &self,
        output: &mut MagicString,
        declarations: &[SwitchableDeclaration],
    );
    fn add_module_with_providers_params(
        &self,
        output: &mut MagicString,
        declarations: &[ModuleWithProvidersInfo],
    );
}

/// Select the formatter for a bundle format.
pub fn formatter_for(
    format: EntryPointFormat,
    analysis: &SourceAnalysis,
) -> Box<dyn RenderingFormatter> {
    match format {
        EntryPointFormat::Esm2015 => Box::new(EsmRenderingFormatter::new(analysis.clone())),
        EntryPointFormat::Esm5 => Box::new(Esm5RenderingFormatter::new(analysis.clone())),
        EntryPointFormat::CommonJs => {
            Box::new(CommonJsRenderingFormatter::new(analysis.clone()))
        }
        EntryPointFormat::Umd => Box::new(UmdRenderingFormatter::new(analysis.clone())),
    }
}
