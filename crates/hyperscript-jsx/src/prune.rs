//! Removal of the builder binding once it is unused.

use crate::context::{is_builder_import, is_builder_require, specifier_local};
use crate::options::TransformOptions;
use swc_ecma_ast::{Decl, Ident, ImportDecl, Module, ModuleDecl, ModuleItem, Stmt, VarDeclarator};
use swc_ecma_visit::{Visit, VisitWith};

/// Counts references to the builder outside its own binding.
struct ReferenceCounter<'a> {
    options: &'a TransformOptions,
    count: usize,
}

impl Visit for ReferenceCounter<'_> {
    fn visit_import_decl(&mut self, _: &ImportDecl) {}

    fn visit_var_declarator(&mut self, decl: &VarDeclarator) {
        if !is_builder_require(decl, self.options) {
            decl.visit_children_with(self);
        }
    }

    fn visit_ident(&mut self, ident: &Ident) {
        if ident.sym.as_str() == self.options.builder.as_str() {
            self.count += 1;
        }
    }
}

/// Returns how many times the builder is referenced in `module`.
pub fn count_builder_references(module: &Module, options: &TransformOptions) -> usize {
    let mut counter = ReferenceCounter { options, count: 0 };
    module.visit_with(&mut counter);
    counter.count
}

/// Removes the builder import specifier or `require` declarator when nothing
/// references the builder any more. Declarations left empty are removed whole.
///
/// Returns whether anything was removed.
pub fn prune_builder_binding(module: &mut Module, options: &TransformOptions) -> bool {
    if count_builder_references(module, options) > 0 {
        return false;
    }

    let builder = options.builder.as_str();
    let mut pruned = false;
    module.body.retain_mut(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) if is_builder_import(import, options) => {
            import
                .specifiers
                .retain(|specifier| specifier_local(specifier) != builder);
            pruned = true;
            !import.specifiers.is_empty()
        }
        ModuleItem::Stmt(Stmt::Decl(Decl::Var(var)))
            if var.decls.iter().any(|decl| is_builder_require(decl, options)) =>
        {
            var.decls.retain(|decl| !is_builder_require(decl, options));
            pruned = true;
            !var.decls.is_empty()
        }
        _ => true,
    });
    pruned
}
