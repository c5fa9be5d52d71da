// ESM5 Rendering Formatter
//
// Transitional ES5-flavoured module shape: classes are emitted as
// `var X = (function() { ... return X; }());`, so definitions and adjacent
// statements must land inside the IIFE, before its return statement.
// Everything else matches the modern ESM shape and is delegated.

use crate::host::src::api::{
    ClassSymbol, DecoratorsArray, SourceAnalysis, SwitchableDeclaration,
};

use super::esm_rendering_formatter::EsmRenderingFormatter;
use super::magic_string::MagicString;
use super::rendering_formatter::{
    ExportInfo, Import, ModuleWithProvidersInfo, RenderingFormatter,
};

pub struct Esm5RenderingFormatter {
    pub(crate) base: EsmRenderingFormatter,
}

impl Esm5RenderingFormatter {
    pub fn new(analysis: SourceAnalysis) -> Self {
        Self {
            base: EsmRenderingFormatter::new(analysis),
        }
    }

    fn insert_before_return(
        output: &mut MagicString,
        class: &ClassSymbol,
        text: &str,
    ) -> bool {
        match class.iife_return_span {
            Some(return_span) => {
                output.append_right(return_span.start as usize, format!("{}\n    ", text));
                true
            }
            None => false,
        }
    }
}

impl RenderingFormatter for Esm5RenderingFormatter {
    fn add_imports(&self, output: &mut MagicString, imports: &[Import]) {
        self.base.add_imports(output, imports);
    }

    fn add_exports(&self, output: &mut MagicString, exports: &[ExportInfo]) {
        self.base.add_exports(output, exports);
    }

    fn add_constants(&self, output: &mut MagicString, constants: &str) {
        self.base.add_constants(output, constants);
    }

    fn add_definitions(&self, output: &mut MagicString, class: &ClassSymbol, definitions: &str) {
        if !Self::insert_before_return(output, class, definitions) {
            self.base.add_definitions(output, class, definitions);
        }
    }

    fn add_adjacent_statements(
        &self,
        output: &mut MagicString,
        class: &ClassSymbol,
        statements: &str,
    ) {
        if !Self::insert_before_return(output, class, statements) {
            self.base.add_adjacent_statements(output, class, statements);
        }
    }

    fn remove_decorators(
        &self,
        output: &mut MagicString,
        decorators: &DecoratorsArray,
        to_remove: &[String],
    ) {
        self.base.remove_decorators(output, decorators, to_remove);
    }

    fn rewrite_switchable_declarations(
        &self,
        output: &mut MagicString,
        declarations: &[SwitchableDeclaration],
    ) {
        self.base.rewrite_switchable_declarations(output, declarations);
    }

    fn add_module_with_providers_params(
        &self,
        output: &mut MagicString,
        declarations: &[ModuleWithProvidersInfo],
    ) {
        self.base.add_module_with_providers_params(output, declarations);
    }
}
