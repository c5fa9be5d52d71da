// ESM Rendering Formatter
//
// Seams of the ECMAScript-module shape: new imports go after the last
// existing import statement, exports and constants at the ends of the file,
// definitions directly after the class they belong to. Decorator removal
// edits the literal `decorators` array, collapsing the whole assignment
// when it empties.

use crate::host::src::api::{
    ClassSymbol, DecoratorsArray, SourceAnalysis, SwitchableDeclaration,
};

use super::magic_string::MagicString;
use super::rendering_formatter::{
    ExportInfo, Import, ModuleWithProvidersInfo, RenderingFormatter,
};

pub struct EsmRenderingFormatter {
    pub(crate) analysis: SourceAnalysis,
}

impl EsmRenderingFormatter {
    pub fn new(analysis: SourceAnalysis) -> Self {
        Self { analysis }
    }

    fn import_insertion_offset(&self) -> usize {
        self.analysis
            .last_import_end
            .map(|end| end as usize)
            .unwrap_or(0)
    }
}

impl RenderingFormatter for EsmRenderingFormatter {
    fn add_imports(&self, output: &mut MagicString, imports: &[Import]) {
        if imports.is_empty() {
            return;
        }
        let block = imports
            .iter()
            .map(|import| {
                format!(
                    "import * as {} from '{}';",
                    import.qualifier, import.specifier
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let offset = self.import_insertion_offset();
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
            let line = match &export.from {
                Some(from) => format!("\nexport {{{}}} from '{}';", export.identifier, from),
                None => format!("\nexport {{{}}};", export.identifier),
            };
            output.append_left(end, line);
        }
    }

    fn add_constants(&self, output: &mut MagicString, constants: &str) {
        if constants.is_empty() {
            return;
        }
        let offset = self.import_insertion_offset();
        output.append_right(offset, format!("\n{}\n", constants));
    }

    fn add_definitions(&self, output: &mut MagicString, class: &ClassSymbol, definitions: &str) {
        output.append_left(class.span.end as usize, format!("\n{}", definitions));
    }

    fn add_adjacent_statements(
        &self,
        output: &mut MagicString,
        class: &ClassSymbol,
        statements: &str,
    ) {
        output.append_left(class.span.end as usize, format!("\n{}", statements));
    }

    fn remove_decorators(
        &self,
        output: &mut MagicString,
        decorators: &DecoratorsArray,
        to_remove: &[String],
    ) {
        let matched: Vec<_> = decorators
            .elements
            .iter()
            .filter(|element| to_remove.contains(&element.name))
            .collect();
        if matched.is_empty() {
            return;
        }
        if matched.len() == decorators.elements.len() {
            // The array would be left empty; drop the whole assignment.
            output.remove(
                decorators.statement_span.start as usize,
                decorators.statement_span.end as usize,
            );
            return;
        }
        for element in matched {
            let (start, end) = span_with_separator(
                output.original(),
                element.span.start as usize,
                element.span.end as usize,
                decorators.array_span.start as usize,
                decorators.array_span.end as usize,
            );
            output.remove(start, end);
        }
    }

    fn rewrite_switchable_declarations(
        &self,
        output: &mut MagicString,
        declarations: &[SwitchableDeclaration],
    ) {
        for declaration in declarations {
            let post = declaration
                .initializer_text
                .replace("__PRE_R3__", "__POST_R3__");
            output.remove(
                declaration.initializer_span.start as usize,
                declaration.initializer_span.end as usize,
            );
            output.append_left(declaration.initializer_span.start as usize, post);
        }
    }

    fn add_module_with_providers_params(
        &self,
        output: &mut MagicString,
        declarations: &[ModuleWithProvidersInfo],
    ) {
        for declaration in declarations {
            output.append_left(
                declaration.insert_offset as usize,
                format!("<typeof {}>", declaration.ng_module),
            );
        }
    }
}

/// Extend an array element's span over its separating comma: the trailing
/// comma when one follows, otherwise the leading one.
pub(crate) fn span_with_separator(
    original: &str,
    start: usize,
    end: usize,
    array_start: usize,
    array_end: usize,
) -> (usize, usize) {
    let bytes = original.as_bytes();

    let mut forward = end;
    while forward < array_end && (bytes[forward] as char).is_whitespace() {
        forward += 1;
    }
    if forward < array_end && bytes[forward] == b',' {
        return (start, forward + 1);
    }

    let mut backward = start;
    while backward > array_start && (bytes[backward - 1] as char).is_whitespace() {
        backward -= 1;
    }
    if backward > array_start && bytes[backward - 1] == b',' {
        return (backward - 1, end);
    }

    (start, end)
}
