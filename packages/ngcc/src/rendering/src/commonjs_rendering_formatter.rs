// CommonJS Rendering Formatter
//
// Synchronous-require shape: imports become `var x = require('...')`
// statements after the last leading require call, exports become
// `exports.x = ...` assignments at the end of the file. Class and
// decorator handling matches the transitional ES5 shape and is delegated.

use crate::host::src::api::{
    ClassSymbol, DecoratorsArray, SourceAnalysis, SwitchableDeclaration,
};

use super::esm5_rendering_formatter::Esm5RenderingFormatter;
use super::magic_string::MagicString;
use super::rendering_formatter::{
    ExportInfo, Import, ModuleWithProvidersInfo, RenderingFormatter,
};

pub struct CommonJsRenderingFormatter {
    pub(crate) base: Esm5RenderingFormatter,
}

impl CommonJsRenderingFormatter {
    pub fn new(analysis: SourceAnalysis) -> Self {
        Self {
            base: Esm5RenderingFormatter::new(analysis),
        }
    }

    fn require_insertion_offset(&self) -> usize {
        self.base
            .base
            .analysis
            .last_require_end
            .map(|end| end as usize)
            .unwrap_or(0)
    }
}

impl RenderingFormatter for CommonJsRenderingFormatter {
    fn add_imports(&self, output: &mut MagicString, imports: &[Import]) {
        if imports.is_empty() {
            return;
        }
        let block = imports
            .iter()
            .map(|import| {
                format!(
                    "var {} = require('{}');",
                    import.qualifier, import.specifier
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let offset = self.require_insertion_offset();
        if offset > 0 {
            output.append_right(offset, format!("\n{}", block));
        } else {
            output.append_right(0, format!("{}\n", block));
        }
    }

    fn add_exports(&self, output: &mut MagicString, exports: &[ExportInfo]) {
        if exports.is_empty() {
            return;
        }
        let end = output.original().len();
        for export in exports {
            let accessor = match &export.from {
                Some(from) => format!("{}.{}", from, export.identifier),
                None => export.identifier.clone(),
            };
            output.append_left(
                end,
                format!("\nexports.{} = {};", export.identifier, accessor),
            );
        }
    }

    fn add_constants(&self, output: &mut MagicString, constants: &str) {
        if constants.is_empty() {
            return;
        }
        let offset = self.require_insertion_offset();
        output.append_right(offset, format!("\n{}\n", constants));
    }

    fn add_definitions(&self, output: &mut MagicString, class: &ClassSymbol, definitions: &str) {
        self.base.add_definitions(output, class, definitions);
    }

    fn add_adjacent_statements(
        &self,
        output: &mut MagicString,
        class: &ClassSymbol,
        statements: &str,
    ) {
        self.base.add_adjacent_statements(output, class, statements);
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
