// Reflection
//
// Entry point of the host area: parse a bundle once and produce the plain
// span analysis everything downstream consumes. The arena-allocated tree
// never leaves this function.

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

use super::api::SourceAnalysis;
use super::esm_host::analyze_statements;
use super::umd_host::find_umd_wrapper;

/// Analyze the bundle text `contents`.
///
/// For UMD files the module's real statements live inside the factory
/// function, so analysis walks the factory body instead of the top level.
pub fn analyze_source(contents: &str) -> SourceAnalysis {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, contents, SourceType::mjs()).parse();
    let program = &ret.program;

    let mut analysis = SourceAnalysis::default();
    match find_umd_wrapper(program) {
        Some((wrapper, factory_body)) => {
            analysis.umd = Some(wrapper);
            analyze_statements(&factory_body.statements, &mut analysis);
        }
        None => {
            analyze_statements(&program.body, &mut analysis);
        }
    }
    analysis
}
