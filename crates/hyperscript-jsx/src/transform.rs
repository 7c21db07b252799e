//! The traversal driver.
//!
//! Walks a module once. Each container hook checks whether its slot holds a
//! builder call, lowers it and substitutes the JSX element in place, then
//! keeps walking. Generated markup is only revisited through the expressions
//! it passes through unchanged (attribute values, spreads and placeholders).

use crate::classify::{classify, CallShape, Rejection};
use crate::context::TraversalContext;
use crate::eligibility::Container;
use crate::jsx::to_jsx_expr;
use crate::lower::lower_call;
use crate::options::TransformOptions;
use crate::prune::prune_builder_binding;
use crate::util::{is_builder_callee, peel_parens_mut};
use swc_common::Span;
use swc_ecma_ast::{
    ArrayLit, ArrowExpr, AssignExpr, BinExpr, BinaryOp, BlockStmtOrExpr, CallExpr, CondExpr,
    ExportDefaultExpr, Expr, ExprStmt, JSXExpr, JSXExprContainer, KeyValueProp, Module,
    ReturnStmt, VarDeclarator,
};
use swc_ecma_visit::{VisitMut, VisitMutWith};
use tracing::{debug, trace};

/// Why a builder call was left in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The call shape cannot be rewritten.
    Rejected(Rejection),
    /// The call sits where its result is consumed as data.
    Position,
}

impl SkipReason {
    /// Returns a short machine-readable code.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Rejected(rejection) => rejection.as_str(),
            SkipReason::Position => "position",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Rejected(rejection) => write!(f, "{}", rejection),
            SkipReason::Position => f.write_str("call is not in a position that renders markup"),
        }
    }
}

/// A builder call left as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCall {
    /// The span of the call.
    pub span: Span,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// What a transform did to one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Number of top-level calls replaced by JSX.
    pub transformed: usize,
    /// Builder calls still present, in source order.
    pub skipped: Vec<SkippedCall>,
    /// Whether the builder was imported or required from a known source.
    pub builder_in_scope: bool,
    /// Whether the builder binding was removed.
    pub import_pruned: bool,
}

impl TransformReport {
    /// Returns true if the module was modified.
    pub fn changed(&self) -> bool {
        self.transformed > 0 || self.import_pruned
    }
}

/// Rewrites eligible builder calls in `module` into JSX.
pub fn transform_module(module: &mut Module, options: &TransformOptions) -> TransformReport {
    let ctx = TraversalContext::scan(module, options);
    let mut report = TransformReport {
        builder_in_scope: ctx.builder_in_scope(),
        ..TransformReport::default()
    };

    if options.require_import && !ctx.builder_in_scope() {
        debug!(builder = ctx.builder(), "builder is not imported, module left unchanged");
        return report;
    }

    let mut transformer = Transformer::new(&ctx);
    module.visit_mut_with(&mut transformer);
    report.transformed = transformer.transformed;
    report.skipped = transformer.skipped;

    if options.prune_import && report.transformed > 0 {
        report.import_pruned = prune_builder_binding(module, options);
    }

    debug!(
        transformed = report.transformed,
        skipped = report.skipped.len(),
        pruned = report.import_pruned,
        "module transformed"
    );
    report
}

struct Transformer<'a> {
    ctx: &'a TraversalContext,
    transformed: usize,
    skipped: Vec<SkippedCall>,
}

impl<'a> Transformer<'a> {
    fn new(ctx: &'a TraversalContext) -> Self {
        Self {
            ctx,
            transformed: 0,
            skipped: Vec::new(),
        }
    }

    /// Replaces the builder call in `slot`, if there is one and it lowers.
    fn rewrite(&mut self, slot: &mut Expr, container: Container) {
        let target = peel_parens_mut(slot);
        let Expr::Call(call) = &*target else {
            return;
        };
        if !is_builder_callee(&call.callee, self.ctx.builder()) {
            return;
        }
        if !container.admits_top_level_call() {
            trace!(container = container.as_str(), "builder call not eligible here");
            return;
        }

        match lower_call(call, self.ctx) {
            Ok(element) => {
                debug!(
                    container = container.as_str(),
                    element = %element.name().to_path(),
                    "lowered builder call"
                );
                *target = to_jsx_expr(element);
                self.transformed += 1;
            }
            Err(rejection) => {
                debug!(
                    container = container.as_str(),
                    reason = rejection.as_str(),
                    "builder call left in place"
                );
            }
        }
    }
}

impl VisitMut for Transformer<'_> {
    fn visit_mut_return_stmt(&mut self, stmt: &mut ReturnStmt) {
        if let Some(arg) = &mut stmt.arg {
            self.rewrite(arg, Container::Return);
        }
        stmt.visit_mut_children_with(self);
    }

    fn visit_mut_cond_expr(&mut self, expr: &mut CondExpr) {
        self.rewrite(&mut expr.test, Container::Conditional);
        self.rewrite(&mut expr.cons, Container::Conditional);
        self.rewrite(&mut expr.alt, Container::Conditional);
        expr.visit_mut_children_with(self);
    }

    fn visit_mut_arrow_expr(&mut self, arrow: &mut ArrowExpr) {
        if let BlockStmtOrExpr::Expr(body) = &mut *arrow.body {
            self.rewrite(body, Container::ArrowBody);
        }
        arrow.visit_mut_children_with(self);
    }

    fn visit_mut_bin_expr(&mut self, expr: &mut BinExpr) {
        if matches!(expr.op, BinaryOp::LogicalAnd | BinaryOp::LogicalOr) {
            self.rewrite(&mut expr.left, Container::Logical);
            self.rewrite(&mut expr.right, Container::Logical);
        }
        expr.visit_mut_children_with(self);
    }

    fn visit_mut_key_value_prop(&mut self, prop: &mut KeyValueProp) {
        self.rewrite(&mut prop.value, Container::PropertyValue);
        prop.visit_mut_children_with(self);
    }

    fn visit_mut_var_declarator(&mut self, decl: &mut VarDeclarator) {
        if let Some(init) = &mut decl.init {
            self.rewrite(init, Container::VarInit);
        }
        decl.visit_mut_children_with(self);
    }

    fn visit_mut_expr_stmt(&mut self, stmt: &mut ExprStmt) {
        self.rewrite(&mut stmt.expr, Container::ExprStatement);
        stmt.visit_mut_children_with(self);
    }

    fn visit_mut_jsx_expr_container(&mut self, container: &mut JSXExprContainer) {
        if let JSXExpr::Expr(expr) = &mut container.expr {
            self.rewrite(expr, Container::JsxExprContainer);
        }
        container.visit_mut_children_with(self);
    }

    fn visit_mut_assign_expr(&mut self, expr: &mut AssignExpr) {
        self.rewrite(&mut expr.right, Container::AssignRight);
        expr.visit_mut_children_with(self);
    }

    fn visit_mut_array_lit(&mut self, array: &mut ArrayLit) {
        for elem in array.elems.iter_mut().flatten() {
            if elem.spread.is_none() {
                self.rewrite(&mut elem.expr, Container::ArrayElement);
            }
        }
        array.visit_mut_children_with(self);
    }

    fn visit_mut_export_default_expr(&mut self, export: &mut ExportDefaultExpr) {
        self.rewrite(&mut export.expr, Container::ExportDefault);
        export.visit_mut_children_with(self);
    }

    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        for arg in &mut call.args {
            self.rewrite(&mut arg.expr, Container::CallArgument);
        }

        // Every builder call the walk still reaches stays in the output.
        if is_builder_callee(&call.callee, self.ctx.builder()) {
            let reason = match classify(call, self.ctx.builder()) {
                CallShape::NotTransformable(rejection) => SkipReason::Rejected(rejection),
                _ => SkipReason::Position,
            };
            trace!(reason = reason.as_str(), "builder call skipped");
            self.skipped.push(SkippedCall {
                span: call.span,
                reason,
            });
        }
        call.visit_mut_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::parse_module;
    use pretty_assertions::assert_eq;

    fn transform(source: &str, options: &TransformOptions) -> (Module, TransformReport) {
        let mut module = parse_module(source);
        let report = transform_module(&mut module, options);
        (module, report)
    }

    fn count(source: &str) -> TransformReport {
        transform(source, &TransformOptions::default()).1
    }

    #[test]
    fn test_each_eligible_container() {
        let sources = [
            "function f() { return h('div'); }",
            "c ? h('a') : h('b');",
            "const f = () => h('div');",
            "c && h('div');",
            "const o = { view: h('div') };",
            "const x = h('div');",
            "h('div');",
            "x = h('div');",
            "const xs = [h('div')];",
        ];
        for source in sources {
            let report = count(source);
            assert!(report.transformed >= 1, "{}", source);
            assert!(report.skipped.is_empty(), "{}", source);
        }
    }

    #[test]
    fn test_ineligible_positions_are_skipped() {
        let report = count("render(h('div'));");
        assert_eq!(report.transformed, 0);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::Position);

        let report = count("export default h('div');");
        assert_eq!(report.transformed, 0);
        assert_eq!(report.skipped[0].reason, SkipReason::Position);
    }

    #[test]
    fn test_rejected_calls_are_reported() {
        let report = count("const x = h(obj[computedKey]);");
        assert_eq!(report.transformed, 0);
        assert_eq!(
            report.skipped,
            vec![SkippedCall {
                span: report.skipped[0].span,
                reason: SkipReason::Rejected(Rejection::ComputedMember),
            }]
        );
    }

    #[test]
    fn test_nested_calls_count_once() {
        let report = count("const x = h('ul', [h('li', 'a'), h('li', 'b')]);");
        assert_eq!(report.transformed, 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_passthrough_expressions_are_walked() {
        let report = count("const x = h('div', {}, [cond && h('span'), ...rest]);");
        assert_eq!(report.transformed, 2);

        let report = count("const x = h(Card, { icon: h(Icon) });");
        assert_eq!(report.transformed, 2);
    }

    #[test]
    fn test_refused_nested_call_reported_once() {
        let report = count("const x = h('div', [h(obj[k])]);");
        assert_eq!(report.transformed, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::Rejected(Rejection::ComputedMember)
        );
    }

    #[test]
    fn test_other_callees_untouched() {
        let report = count("const x = m('div'); const y = obj.h('div');");
        assert_eq!(report, TransformReport::default());
    }

    #[test]
    fn test_require_import() {
        let options = TransformOptions {
            require_import: true,
            ..TransformOptions::default()
        };
        let (_, report) = transform("const x = h('div');", &options);
        assert_eq!(report.transformed, 0);
        assert!(!report.builder_in_scope);

        let (_, report) = transform(
            "import h from 'react-hyperscript'; const x = h('div');",
            &options,
        );
        assert_eq!(report.transformed, 1);
        assert!(report.builder_in_scope);
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let options = TransformOptions::default();
        let (mut module, first) = transform("const x = h('p', {}, [h('b', 'x')]);", &options);
        assert!(first.changed());
        let second = transform_module(&mut module, &options);
        assert!(!second.changed());
        assert!(second.skipped.is_empty());
    }

    #[test]
    fn test_prune_only_after_a_change() {
        let options = TransformOptions {
            prune_import: true,
            ..TransformOptions::default()
        };
        let (module, report) = transform(
            "import h from 'react-hyperscript'; const x = h('div');",
            &options,
        );
        assert!(report.import_pruned);
        assert_eq!(module.body.len(), 1);

        let (module, report) = transform("import h from 'react-hyperscript';", &options);
        assert!(!report.import_pruned);
        assert_eq!(module.body.len(), 1);
    }
}
