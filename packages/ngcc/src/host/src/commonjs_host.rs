// CommonJS Reflection Host
//
// Recognition of synchronous-require constructs.

use oxc_ast::ast::Expression;

use super::esm_host::unwrap_parens;

/// The specifier of a `require('...')` call, when `expr` is one.
pub fn require_call_specifier(expr: &Expression<'_>) -> Option<String> {
    let Expression::CallExpression(call) = unwrap_parens(expr) else {
        return None;
    };
    let Expression::Identifier(callee) = unwrap_parens(&call.callee) else {
        return None;
    };
    if callee.name != "require" {
        return None;
    }
    let argument = call.arguments.first()?.as_expression()?;
    match unwrap_parens(argument) {
        Expression::StringLiteral(literal) => Some(literal.value.to_string()),
        _ => None,
    }
}
