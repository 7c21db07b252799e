use swc_common::{sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::{EsVersion, Expr, Module};
use swc_ecma_parser::{parse_file_as_expr, parse_file_as_module, EsSyntax, Syntax, TsSyntax};

fn es() -> Syntax {
    Syntax::Es(EsSyntax {
        jsx: true,
        ..Default::default()
    })
}

fn tsx() -> Syntax {
    Syntax::Typescript(TsSyntax {
        tsx: true,
        ..Default::default()
    })
}

fn parse_expr_with(source: &str, syntax: Syntax) -> Box<Expr> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Anon.into(), source.to_string());
    parse_file_as_expr(&fm, syntax, EsVersion::latest(), None, &mut Vec::new())
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {:?}", source, e))
}

pub(crate) fn parse_expr(source: &str) -> Box<Expr> {
    parse_expr_with(source, es())
}

pub(crate) fn parse_tsx_expr(source: &str) -> Box<Expr> {
    parse_expr_with(source, tsx())
}

pub(crate) fn parse_module(source: &str) -> Module {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Anon.into(), source.to_string());
    parse_file_as_module(&fm, es(), EsVersion::latest(), None, &mut Vec::new())
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {:?}", source, e))
}
