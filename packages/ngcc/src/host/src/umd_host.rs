// UMD Reflection Host
//
// Structural detection of the universal module wrapper: an IIFE whose last
// argument is the factory function, and whose body selects an environment
// through a conditional chain probing `exports`/`module`/`define`.

use oxc_ast::ast::{
    BindingPatternKind, CallExpression, Expression, Function, FunctionBody, Program, Statement,
};
use oxc_syntax::operator::UnaryOperator;

use super::api::{UmdAmdBranch, UmdBranch, UmdWrapper};
use super::esm_host::unwrap_parens;

/// Find the UMD wrapper in `program`, returning its shape plus the factory
/// function body (whose statements hold the module's real code).
pub fn find_umd_wrapper<'a, 'b>(
    program: &'b Program<'a>,
) -> Option<(UmdWrapper, &'b FunctionBody<'a>)> {
    for statement in &program.body {
        let Statement::ExpressionStatement(stmt) = statement else {
            continue;
        };
        let Expression::CallExpression(call) = unwrap_parens(&stmt.expression) else {
            continue;
        };
        let Expression::FunctionExpression(wrapper_fn) = unwrap_parens(&call.callee) else {
            continue;
        };
        let Some(factory) = call.arguments.iter().rev().find_map(|argument| {
            match argument.as_expression().map(unwrap_parens) {
                Some(Expression::FunctionExpression(function)) => Some(function),
                _ => None,
            }
        }) else {
            continue;
        };
        let Some(factory_body) = factory.body.as_ref() else {
            continue;
        };
        let Some(wrapper_body) = wrapper_fn.body.as_ref() else {
            continue;
        };

        let factory_name = second_parameter_name(wrapper_fn);
        let mut commonjs = None;
        let mut amd = None;
        let mut global = None;
        for wrapper_statement in &wrapper_body.statements {
            if let Statement::ExpressionStatement(expr_stmt) = wrapper_statement {
                scan_branches(
                    unwrap_parens(&expr_stmt.expression),
                    factory_name.as_deref(),
                    &mut commonjs,
                    &mut amd,
                    &mut global,
                );
            }
        }

        if commonjs.is_none() && amd.is_none() && global.is_none() {
            continue;
        }

        let wrapper = UmdWrapper {
            factory_params_span: factory.params.span,
            factory_has_params: !factory.params.items.is_empty(),
            factory_body_span: factory_body.span,
            commonjs,
            amd,
            global,
        };
        return Some((wrapper, factory_body));
    }
    None
}

fn second_parameter_name(function: &Function<'_>) -> Option<String> {
    let parameter = function.params.items.get(1)?;
    match &parameter.pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.to_string()),
        _ => None,
    }
}

/// Walk a conditional chain, classifying each branch by its environment
/// probe; the final alternate is the global-object fallback.
fn scan_branches<'a>(
    expr: &Expression<'a>,
    factory_name: Option<&str>,
    commonjs: &mut Option<UmdBranch>,
    amd: &mut Option<UmdAmdBranch>,
    global: &mut Option<UmdBranch>,
) {
    match unwrap_parens(expr) {
        Expression::ConditionalExpression(conditional) => {
            let test = unwrap_parens(&conditional.test);
            let consequent = unwrap_parens(&conditional.consequent);
            if has_typeof_probe(test, "exports") || has_typeof_probe(test, "module") {
                if commonjs.is_none() {
                    *commonjs = branch_of_factory_call(consequent, factory_name);
                }
            } else if mentions_identifier(test, "define") {
                if amd.is_none() {
                    *amd = amd_branch(consequent);
                }
            }
            scan_branches(&conditional.alternate, factory_name, commonjs, amd, global);
        }
        other => {
            if global.is_none() {
                *global = branch_of_factory_call(other, factory_name);
            }
        }
    }
}

fn branch_of_factory_call<'a>(
    expr: &Expression<'a>,
    factory_name: Option<&str>,
) -> Option<UmdBranch> {
    let call = find_factory_call(expr, factory_name)?;
    Some(UmdBranch {
        args_end: call.span.end - 1,
        has_args: !call.arguments.is_empty(),
    })
}

fn amd_branch<'a>(expr: &Expression<'a>) -> Option<UmdAmdBranch> {
    let call = find_call_named(expr, "define")?;
    let array = call.arguments.iter().find_map(|argument| {
        match argument.as_expression().map(unwrap_parens) {
            Some(Expression::ArrayExpression(array)) => Some(array),
            _ => None,
        }
    })?;
    Some(UmdAmdBranch {
        deps_array_end: array.span.end - 1,
        has_deps: !array.elements.is_empty(),
    })
}

/// Find a call of the factory (by name when known) anywhere inside `expr`.
fn find_factory_call<'a, 'b>(
    expr: &'b Expression<'a>,
    factory_name: Option<&str>,
) -> Option<&'b CallExpression<'a>> {
    match unwrap_parens(expr) {
        Expression::CallExpression(call) => {
            let name_matches = match unwrap_parens(&call.callee) {
                Expression::Identifier(ident) => {
                    factory_name.is_none() || factory_name == Some(ident.name.as_str())
                }
                _ => false,
            };
            if name_matches {
                Some(call)
            } else {
                call.arguments.iter().find_map(|argument| {
                    argument
                        .as_expression()
                        .and_then(|arg| find_factory_call(arg, factory_name))
                })
            }
        }
        Expression::SequenceExpression(sequence) => sequence
            .expressions
            .iter()
            .find_map(|e| find_factory_call(e, factory_name)),
        Expression::AssignmentExpression(assign) => {
            find_factory_call(&assign.right, factory_name)
        }
        Expression::LogicalExpression(logical) => find_factory_call(&logical.left, factory_name)
            .or_else(|| find_factory_call(&logical.right, factory_name)),
        _ => None,
    }
}

fn find_call_named<'a, 'b>(
    expr: &'b Expression<'a>,
    name: &str,
) -> Option<&'b CallExpression<'a>> {
    match unwrap_parens(expr) {
        Expression::CallExpression(call) => match unwrap_parens(&call.callee) {
            Expression::Identifier(ident) if ident.name == name => Some(call),
            _ => None,
        },
        Expression::SequenceExpression(sequence) => sequence
            .expressions
            .iter()
            .find_map(|e| find_call_named(e, name)),
        Expression::LogicalExpression(logical) => find_call_named(&logical.left, name)
            .or_else(|| find_call_named(&logical.right, name)),
        _ => None,
    }
}

/// Whether `expr` contains a `typeof <probe>` test.
fn has_typeof_probe(expr: &Expression<'_>, probe: &str) -> bool {
    match unwrap_parens(expr) {
        Expression::UnaryExpression(unary) => {
            unary.operator == UnaryOperator::Typeof
                && matches!(
                    unwrap_parens(&unary.argument),
                    Expression::Identifier(ident) if ident.name == probe
                )
        }
        Expression::BinaryExpression(binary) => {
            has_typeof_probe(&binary.left, probe) || has_typeof_probe(&binary.right, probe)
        }
        Expression::LogicalExpression(logical) => {
            has_typeof_probe(&logical.left, probe) || has_typeof_probe(&logical.right, probe)
        }
        _ => false,
    }
}

fn mentions_identifier(expr: &Expression<'_>, name: &str) -> bool {
    match unwrap_parens(expr) {
        Expression::Identifier(ident) => ident.name == name,
        Expression::StaticMemberExpression(member) => mentions_identifier(&member.object, name),
        Expression::UnaryExpression(unary) => mentions_identifier(&unary.argument, name),
        Expression::BinaryExpression(binary) => {
            mentions_identifier(&binary.left, name) || mentions_identifier(&binary.right, name)
        }
        Expression::LogicalExpression(logical) => {
            mentions_identifier(&logical.left, name) || mentions_identifier(&logical.right, name)
        }
        _ => false,
    }
}
