//! Per-module traversal context.

use crate::options::TransformOptions;
use crate::util::{peel_parens, str_value};
use smol_str::SmolStr;
use swc_ecma_ast::{
    CallExpr, Callee, Decl, Expr, ImportDecl, ImportSpecifier, Lit, Module, ModuleDecl, ModuleItem,
    Pat, Stmt, VarDeclarator,
};

/// Immutable state shared by every visit of one module.
///
/// Built fresh for each module and dropped with the traversal, so nothing
/// learned about one file leaks into the next.
#[derive(Debug, Clone)]
pub struct TraversalContext {
    builder: SmolStr,
    class_attribute: SmolStr,
    builder_in_scope: bool,
}

impl TraversalContext {
    /// Creates a context with a known scope flag.
    pub fn new(options: &TransformOptions, builder_in_scope: bool) -> Self {
        Self {
            builder: options.builder.clone(),
            class_attribute: options.class_attribute.clone(),
            builder_in_scope,
        }
    }

    /// Creates the context for `module`, looking for the builder binding.
    pub fn scan(module: &Module, options: &TransformOptions) -> Self {
        let builder_in_scope = module
            .body
            .iter()
            .any(|item| binds_builder(item, options));
        Self::new(options, builder_in_scope)
    }

    /// The builder identifier, e.g. `h`.
    pub fn builder(&self) -> &str {
        &self.builder
    }

    /// The attribute emitted for tag-descriptor classes.
    pub fn class_attribute(&self) -> &str {
        &self.class_attribute
    }

    /// Whether the builder is imported or required from a known source.
    pub fn builder_in_scope(&self) -> bool {
        self.builder_in_scope
    }
}

fn binds_builder(item: &ModuleItem, options: &TransformOptions) -> bool {
    match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
            is_builder_import(import, options)
        }
        ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => var
            .decls
            .iter()
            .any(|decl| is_builder_require(decl, options)),
        _ => false,
    }
}

/// `import h from 'src'`, `import { h } from 'src'` or `import * as h from 'src'`.
pub(crate) fn is_builder_import(import: &ImportDecl, options: &TransformOptions) -> bool {
    if import.type_only || !is_import_source(str_value(&import.src), options) {
        return false;
    }
    import
        .specifiers
        .iter()
        .any(|specifier| specifier_local(specifier) == options.builder.as_str())
}

pub(crate) fn specifier_local(specifier: &ImportSpecifier) -> &str {
    match specifier {
        ImportSpecifier::Default(default) => default.local.sym.as_str(),
        ImportSpecifier::Named(named) => named.local.sym.as_str(),
        ImportSpecifier::Namespace(namespace) => namespace.local.sym.as_str(),
    }
}

/// `const h = require('src')`.
pub(crate) fn is_builder_require(decl: &VarDeclarator, options: &TransformOptions) -> bool {
    let Pat::Ident(binding) = &decl.name else {
        return false;
    };
    if binding.id.sym.as_str() != options.builder.as_str() {
        return false;
    }
    decl.init
        .as_deref()
        .and_then(|init| match peel_parens(init) {
            Expr::Call(call) => require_source(call),
            _ => None,
        })
        .is_some_and(|source| is_import_source(Some(source), options))
}

fn require_source(call: &CallExpr) -> Option<&str> {
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    if !matches!(callee.as_ref(), Expr::Ident(ident) if ident.sym.as_str() == "require") {
        return None;
    }
    match call.args.as_slice() {
        [arg] if arg.spread.is_none() => match arg.expr.as_ref() {
            Expr::Lit(Lit::Str(s)) => str_value(s),
            _ => None,
        },
        _ => None,
    }
}

fn is_import_source(source: Option<&str>, options: &TransformOptions) -> bool {
    source.is_some_and(|source| {
        options
            .import_sources
            .iter()
            .any(|known| known.as_str() == source)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::parse_module;

    fn in_scope(source: &str) -> bool {
        let module = parse_module(source);
        TraversalContext::scan(&module, &TransformOptions::default()).builder_in_scope()
    }

    #[test]
    fn test_import_forms() {
        assert!(in_scope("import h from 'react-hyperscript';"));
        assert!(in_scope("import { h } from 'react-hyperscript';"));
        assert!(in_scope("import { default as h } from 'react-hyperscript';"));
        assert!(in_scope("import * as h from 'react-hyperscript';"));
    }

    #[test]
    fn test_require_form() {
        assert!(in_scope("const h = require('react-hyperscript');"));
        assert!(!in_scope("const h = require('other');"));
        assert!(!in_scope("const h = load('react-hyperscript');"));
    }

    #[test]
    fn test_unrelated_bindings() {
        assert!(!in_scope("import h from 'hyperscript-helpers';"));
        assert!(!in_scope("import m from 'react-hyperscript';"));
        assert!(!in_scope("const h = (tag) => tag;"));
        assert!(!in_scope(""));
    }

    #[test]
    fn test_custom_builder_and_sources() {
        let options = TransformOptions {
            builder: "m".into(),
            import_sources: vec!["mithril".into()],
            ..TransformOptions::default()
        };
        let module = parse_module("import m from 'mithril';");
        let ctx = TraversalContext::scan(&module, &options);
        assert!(ctx.builder_in_scope());
        assert_eq!(ctx.builder(), "m");
    }

    #[test]
    fn test_each_scan_starts_fresh() {
        let options = TransformOptions::default();
        let first = parse_module("import h from 'react-hyperscript';");
        let second = parse_module("h('div');");
        assert!(TraversalContext::scan(&first, &options).builder_in_scope());
        assert!(!TraversalContext::scan(&second, &options).builder_in_scope());
    }
}
