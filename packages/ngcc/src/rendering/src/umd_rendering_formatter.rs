// UMD Rendering Formatter
//
// Universal wrapper shape. One logical dependency list drives four edits:
// an extra `require(...)` argument in the synchronous-require branch, an
// extra entry in the `define` dependencies array, an extra global property
// access in the global-object branch, and an extra trailing parameter on
// the shared factory function. Branches absent from a wrapper are skipped;
// a file with no recognizable wrapper is left untouched entirely.

use crate::host::src::api::{
    ClassSymbol, DecoratorsArray, SourceAnalysis, SwitchableDeclaration, UmdWrapper,
};

use super::commonjs_rendering_formatter::CommonJsRenderingFormatter;
use super::magic_string::MagicString;
use super::rendering_formatter::{
    ExportInfo, Import, ModuleWithProvidersInfo, RenderingFormatter,
};

pub struct UmdRenderingFormatter {
    pub(crate) base: CommonJsRenderingFormatter,
}

impl UmdRenderingFormatter {
    pub fn new(analysis: SourceAnalysis) -> Self {
        Self {
            base: CommonJsRenderingFormatter::new(analysis),
        }
    }

    fn wrapper(&self) -> Option<&UmdWrapper> {
        self.base.base.base.analysis.umd.as_ref()
    }
}

impl RenderingFormatter for UmdRenderingFormatter {
    fn add_imports(&self, output: &mut MagicString, imports: &[Import]) {
        if imports.is_empty() {
            return;
        }
        let Some(wrapper) = self.wrapper() else {
            return;
        };

        if let Some(branch) = &wrapper.commonjs {
            let args = imports
                .iter()
                .map(|import| format!("require('{}')", import.specifier))
                .collect::<Vec<_>>()
                .join(", ");
            let separator = if branch.has_args { ", " } else { "" };
            output.append_right(branch.args_end as usize, format!("{}{}", separator, args));
        }

        if let Some(branch) = &wrapper.amd {
            let entries = imports
                .iter()
                .map(|import| format!("'{}'", import.specifier))
                .collect::<Vec<_>>()
                .join(", ");
            let separator = if branch.has_deps { ", " } else { "" };
            output.append_right(
                branch.deps_array_end as usize,
                format!("{}{}", separator, entries),
            );
        }

        if let Some(branch) = &wrapper.global {
            let args = imports
                .iter()
                .map(|import| format!("global.{}", global_identifier(&import.specifier)))
                .collect::<Vec<_>>()
                .join(", ");
            let separator = if branch.has_args { ", " } else { "" };
            output.append_right(branch.args_end as usize, format!("{}{}", separator, args));
        }

        let params = imports
            .iter()
            .map(|import| import.qualifier.clone())
            .collect::<Vec<_>>()
            .join(", ");
        let separator = if wrapper.factory_has_params { ", " } else { "" };
        output.append_right(
            (wrapper.factory_params_span.end - 1) as usize,
            format!("{}{}", separator, params),
        );
    }

    fn add_exports(&self, output: &mut MagicString, exports: &[ExportInfo]) {
        if exports.is_empty() {
            return;
        }
        let Some(wrapper) = self.wrapper() else {
            return;
        };
        let end = (wrapper.factory_body_span.end - 1) as usize;
        for export in exports {
            let accessor = match &export.from {
                Some(from) => format!("{}.{}", from, export.identifier),
                None => export.identifier.clone(),
            };
            output.append_left(
                end,
                format!("exports.{} = {};\n", export.identifier, accessor),
            );
        }
    }

    fn add_constants(&self, output: &mut MagicString, constants: &str) {
        if constants.is_empty() {
            return;
        }
        let Some(wrapper) = self.wrapper() else {
            return;
        };
        output.append_right(
            (wrapper.factory_body_span.start + 1) as usize,
            format!("\n{}\n", constants),
        );
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

/// The global-object property a specifier is conventionally attached to,
/// e.g. `@angular/core` -> `ng.core`, `my-lib/sub` -> `myLib.sub`.
fn global_identifier(specifier: &str) -> String {
    let name = match specifier.strip_prefix("@angular/") {
        Some(rest) => format!("ng.{}", rest),
        None => specifier.trim_start_matches('@').replace('/', "."),
    };
    name.replace('/', ".")
        .split('.')
        .map(camelize)
        .collect::<Vec<_>>()
        .join(".")
}

fn camelize(segment: &str) -> String {
    let mut out = String::new();
    let mut upper_next = false;
    for c in segment.chars() {
        if c == '-' || c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
