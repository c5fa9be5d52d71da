// Reflection API
//
// Plain-data results of analyzing one bundle: class symbols, decorator
// arrays, switchable declarations and the shape of a UMD wrapper. Offsets
// are byte spans into the analyzed text.

use oxc_span::Span;

/// One decorator entry (`{ type: Directive, args: [...] }`) inside a
/// `decorators` array.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratorElement {
    /// The decorator identifier, e.g. `Directive`.
    pub name: String,
    /// The span of the whole array element.
    pub span: Span,
}

/// A literal `<Class>.decorators = [...];` static-property assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratorsArray {
    /// The whole assignment statement.
    pub statement_span: Span,
    /// Just the array literal.
    pub array_span: Span,
    pub elements: Vec<DecoratorElement>,
}

/// A class declaration found in the bundle, in either its ES2015 form or
/// its ES5 variable-plus-IIFE form.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSymbol {
    pub name: String,
    /// The declaring statement.
    pub span: Span,
    /// For ES5 classes, the `return X;` statement inside the IIFE; new
    /// definitions must be inserted before it.
    pub iife_return_span: Option<Span>,
    pub decorators: Option<DecoratorsArray>,
}

/// A `var x = factory__PRE_R3__;` declaration whose initializer can be
/// switched to its post-Ivy counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchableDeclaration {
    pub name: String,
    /// The span of the initializer identifier.
    pub initializer_span: Span,
    pub initializer_text: String,
}

/// Insertion point inside a branch's factory call argument list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UmdBranch {
    /// Offset just before the call's closing parenthesis.
    pub args_end: u32,
    pub has_args: bool,
}

/// Insertion point inside the AMD `define` dependencies array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UmdAmdBranch {
    /// Offset just before the array's closing bracket.
    pub deps_array_end: u32,
    pub has_deps: bool,
}

/// The shape of a universal module wrapper: one factory function shared by
/// up to three environment branches. A missing branch means the wrapper
/// does not support that environment and is silently skipped when editing.
#[derive(Debug, Clone, PartialEq)]
pub struct UmdWrapper {
    /// The factory function's parameter list, parentheses included.
    pub factory_params_span: Span,
    pub factory_has_params: bool,
    /// The factory function's body, braces included.
    pub factory_body_span: Span,
    pub commonjs: Option<UmdBranch>,
    pub amd: Option<UmdAmdBranch>,
    pub global: Option<UmdBranch>,
}

/// Everything the rendering formatters need to know about one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceAnalysis {
    pub classes: Vec<ClassSymbol>,
    pub switchable_declarations: Vec<SwitchableDeclaration>,
    /// End offset of the last top-level import statement, if any.
    pub last_import_end: Option<u32>,
    /// End offset of the last leading `require` statement, if any.
    pub last_require_end: Option<u32>,
    pub umd: Option<UmdWrapper>,
}

impl SourceAnalysis {
    pub fn class_named(&self, name: &str) -> Option<&ClassSymbol> {
        self.classes.iter().find(|class| class.name == name)
    }
}
