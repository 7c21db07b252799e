//! Small AST helpers shared by the builders.

use swc_ecma_ast::{CallExpr, Callee, Expr, Str};

/// Looks through any number of enclosing parentheses.
pub fn peel_parens(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}

/// Mutable variant of [`peel_parens`].
pub fn peel_parens_mut(expr: &mut Expr) -> &mut Expr {
    match expr {
        Expr::Paren(paren) => peel_parens_mut(&mut paren.expr),
        _ => expr,
    }
}

/// Returns the value of a string literal, or `None` if it is not valid UTF-8
/// (lone surrogates).
pub fn str_value(s: &Str) -> Option<&str> {
    s.value.as_str()
}

/// Returns the call if `expr` is a call to the builder identifier.
pub fn as_builder_call<'a>(expr: &'a Expr, builder: &str) -> Option<&'a CallExpr> {
    match peel_parens(expr) {
        Expr::Call(call) if is_builder_callee(&call.callee, builder) => Some(call),
        _ => None,
    }
}

/// Returns whether a callee is the bare builder identifier.
pub fn is_builder_callee(callee: &Callee, builder: &str) -> bool {
    match callee {
        Callee::Expr(expr) => {
            matches!(peel_parens(expr), Expr::Ident(ident) if ident.sym.as_str() == builder)
        }
        Callee::Super(_) | Callee::Import(_) => false,
    }
}
