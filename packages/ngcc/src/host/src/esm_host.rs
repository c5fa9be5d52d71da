// ESM Reflection Host
//
// Statement-level analysis shared by every bundle shape: class symbols in
// ES2015 and ES5 form, literal decorator arrays, switchable declarations
// and import/require high-water marks. Only the given statement list is
// walked; nested scopes (other than class IIFE bodies) are never visited.

use oxc_ast::ast::{
    ArrayExpressionElement, AssignmentTarget, BindingPatternKind, Class, Declaration,
    Expression, FunctionBody, ObjectPropertyKind, PropertyKey, Statement, VariableDeclaration,
};
use oxc_span::{GetSpan, Span};

use super::api::{
    ClassSymbol, DecoratorElement, DecoratorsArray, SourceAnalysis, SwitchableDeclaration,
};
use super::commonjs_host::require_call_specifier;

const SWITCH_MARKER: &str = "__PRE_R3__";

/// Strip any parenthesized-expression wrappers.
pub fn unwrap_parens<'a, 'b>(mut expr: &'b Expression<'a>) -> &'b Expression<'a> {
    while let Expression::ParenthesizedExpression(paren) = expr {
        expr = &paren.expression;
    }
    expr
}

/// Analyze `statements`, accumulating results into `analysis`.
pub fn analyze_statements<'a>(statements: &[Statement<'a>], analysis: &mut SourceAnalysis) {
    for statement in statements {
        match statement {
            Statement::ImportDeclaration(decl) => {
                analysis.last_import_end = Some(decl.span.end);
            }
            Statement::ClassDeclaration(class) => {
                if let Some(symbol) = es2015_class_symbol(class) {
                    analysis.classes.push(symbol);
                }
            }
            Statement::VariableDeclaration(decl) => {
                analyze_variable_declaration(decl, analysis);
            }
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::ClassDeclaration(class)) => {
                    if let Some(symbol) = es2015_class_symbol(class) {
                        analysis.classes.push(symbol);
                    }
                }
                Some(Declaration::VariableDeclaration(decl)) => {
                    analyze_variable_declaration(decl, analysis);
                }
                _ => {}
            },
            Statement::ExpressionStatement(stmt) => {
                if let Some((class_name, array)) =
                    decorators_assignment(stmt.span, &stmt.expression)
                {
                    attach_decorators(analysis, &class_name, array);
                }
            }
            _ => {}
        }
    }
}

fn es2015_class_symbol(class: &Class<'_>) -> Option<ClassSymbol> {
    let name = class.id.as_ref()?.name.to_string();
    Some(ClassSymbol {
        name,
        span: class.span,
        iife_return_span: None,
        decorators: None,
    })
}

fn analyze_variable_declaration<'a>(
    decl: &VariableDeclaration<'a>,
    analysis: &mut SourceAnalysis,
) {
    for declarator in &decl.declarations {
        let name = match &declarator.id.kind {
            BindingPatternKind::BindingIdentifier(ident) => ident.name.to_string(),
            _ => continue,
        };
        let init = match &declarator.init {
            Some(init) => unwrap_parens(init),
            None => continue,
        };

        if let Expression::Identifier(ident) = init {
            if ident.name.ends_with(SWITCH_MARKER) {
                analysis.switchable_declarations.push(SwitchableDeclaration {
                    name,
                    initializer_span: ident.span,
                    initializer_text: ident.name.to_string(),
                });
            }
            continue;
        }

        if require_call_specifier(init).is_some() {
            analysis.last_require_end = Some(decl.span.end);
            continue;
        }

        if let Some((return_span, body)) = class_iife(init) {
            let mut symbol = ClassSymbol {
                name: name.clone(),
                span: decl.span,
                iife_return_span: Some(return_span),
                decorators: None,
            };
            // ES5 output attaches the decorators inside the IIFE.
            for statement in &body.statements {
                if let Statement::ExpressionStatement(stmt) = statement {
                    if let Some((class_name, array)) =
                        decorators_assignment(stmt.span, &stmt.expression)
                    {
                        if class_name == name {
                            symbol.decorators = Some(array);
                        }
                    }
                }
            }
            analysis.classes.push(symbol);
        }
    }
}

/// Recognize `(function() { ... return X; }())` class emissions; returns the
/// span of the `return` statement and the IIFE body.
fn class_iife<'a, 'b>(expr: &'b Expression<'a>) -> Option<(Span, &'b FunctionBody<'a>)> {
    let Expression::CallExpression(call) = unwrap_parens(expr) else {
        return None;
    };
    let Expression::FunctionExpression(function) = unwrap_parens(&call.callee) else {
        return None;
    };
    let body = function.body.as_ref()?;
    let return_span = body.statements.iter().rev().find_map(|statement| {
        let Statement::ReturnStatement(ret) = statement else {
            return None;
        };
        match ret.argument.as_ref().map(unwrap_parens) {
            Some(Expression::Identifier(_)) => Some(ret.span),
            _ => None,
        }
    })?;
    Some((return_span, body))
}

/// Recognize a `<Class>.decorators = [...]` assignment expression.
fn decorators_assignment<'a>(
    statement_span: Span,
    expr: &Expression<'a>,
) -> Option<(String, DecoratorsArray)> {
    let Expression::AssignmentExpression(assign) = unwrap_parens(expr) else {
        return None;
    };
    let AssignmentTarget::StaticMemberExpression(member) = &assign.left else {
        return None;
    };
    let Expression::Identifier(object) = unwrap_parens(&member.object) else {
        return None;
    };
    if member.property.name != "decorators" {
        return None;
    }
    let Expression::ArrayExpression(array) = unwrap_parens(&assign.right) else {
        return None;
    };

    let elements = array
        .elements
        .iter()
        .filter(|element| !matches!(element, ArrayExpressionElement::Elision(_)))
        .map(|element| DecoratorElement {
            name: decorator_element_name(element),
            span: element.span(),
        })
        .collect();

    Some((
        object.name.to_string(),
        DecoratorsArray {
            statement_span,
            array_span: array.span,
            elements,
        },
    ))
}

/// The identifier of a `{ type: Directive, args: [...] }` element.
fn decorator_element_name(element: &ArrayExpressionElement<'_>) -> String {
    let Some(expr) = element.as_expression() else {
        return String::new();
    };
    let Expression::ObjectExpression(object) = unwrap_parens(expr) else {
        return String::new();
    };
    for property in &object.properties {
        let ObjectPropertyKind::ObjectProperty(property) = property else {
            continue;
        };
        let PropertyKey::StaticIdentifier(key) = &property.key else {
            continue;
        };
        if key.name != "type" {
            continue;
        }
        if let Expression::Identifier(value) = unwrap_parens(&property.value) {
            return value.name.to_string();
        }
    }
    String::new()
}

fn attach_decorators(analysis: &mut SourceAnalysis, class_name: &str, array: DecoratorsArray) {
    if let Some(class) = analysis
        .classes
        .iter_mut()
        .find(|class| class.name == class_name)
    {
        class.decorators = Some(array);
    }
}
