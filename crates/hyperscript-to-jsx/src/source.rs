//! Parsing and printing of one source file.

use crate::error::DriverError;
use camino::Utf8Path;
use hyperscript_jsx::{transform_module, TransformOptions, TransformReport};
use serde::Serialize;
use swc_common::{
    comments::{Comments, SingleThreadedComments},
    sync::Lrc,
    FileName, SourceMap, Span, Spanned,
};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter};
use swc_ecma_parser::{parse_file_as_module, EsSyntax, Syntax, TsSyntax};

/// Returns the parser syntax for a file extension.
///
/// * `Some(Syntax::Typescript(..))` for `.ts`, `.mts` and `.cts` (no JSX) and `.tsx`
/// * `Some(Syntax::Es(..))` with JSX for `.js`, `.jsx`, `.mjs` and `.cjs`
/// * `None` for anything else
pub fn syntax_for_extension(extension: Option<&str>) -> Option<Syntax> {
    match extension {
        Some("ts" | "mts" | "cts") => Some(Syntax::Typescript(TsSyntax {
            tsx: false,
            decorators: true,
            ..Default::default()
        })),
        Some("tsx") => Some(Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        })),
        Some("js" | "jsx" | "mjs" | "cjs") => Some(Syntax::Es(EsSyntax {
            jsx: true,
            fn_bind: true,
            decorators: true,
            ..Default::default()
        })),
        _ => None,
    }
}

/// A builder call left in place, located in the original source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLocation {
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub column: usize,
    /// Machine-readable reason.
    pub reason: &'static str,
    /// Human-readable reason.
    pub message: String,
}

/// The result of transforming one file.
#[derive(Debug)]
pub struct TransformedSource {
    /// The printed module.
    pub code: String,
    /// What the transform did.
    pub report: TransformReport,
    /// Where the skipped calls are.
    pub skipped: Vec<SkippedLocation>,
}

/// Parses, transforms and prints one file.
///
/// Files that do not parse cleanly are never partially rewritten. A file
/// whose syntax has no JSX (`.ts`, `.mts`, `.cts`) is refused once it has
/// something to rewrite.
pub fn transform_source(
    path: &Utf8Path,
    source: String,
    options: &TransformOptions,
) -> Result<TransformedSource, DriverError> {
    let syntax = syntax_for_extension(path.extension())
        .ok_or_else(|| DriverError::UnsupportedFile(path.to_owned()))?;

    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        FileName::Real(path.as_std_path().to_path_buf()).into(),
        source,
    );
    let comments = SingleThreadedComments::default();
    let mut recovered = Vec::new();

    let mut module = parse_file_as_module(
        &fm,
        syntax,
        EsVersion::latest(),
        Some(&comments as &dyn Comments),
        &mut recovered,
    )
    .map_err(|e| parse_error(&cm, path, e.span(), e.kind().msg().into_owned()))?;
    if let Some(e) = recovered.first() {
        return Err(parse_error(&cm, path, e.span(), e.kind().msg().into_owned()));
    }

    let report = transform_module(&mut module, options);
    if report.changed() && !syntax.jsx() {
        return Err(DriverError::JsxNotAllowed(path.to_owned()));
    }
    let skipped = report
        .skipped
        .iter()
        .map(|call| {
            let (line, column) = line_col(&cm, call.span);
            SkippedLocation {
                line,
                column,
                reason: call.reason.as_str(),
                message: call.reason.to_string(),
            }
        })
        .collect();

    let code = print_module(&cm, &module, &comments).map_err(|source| DriverError::Emit {
        path: path.to_owned(),
        source,
    })?;

    Ok(TransformedSource {
        code,
        report,
        skipped,
    })
}

fn print_module(
    cm: &Lrc<SourceMap>,
    module: &Module,
    comments: &SingleThreadedComments,
) -> std::io::Result<String> {
    let mut buf = vec![];
    {
        let wr = JsWriter::new(cm.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default().with_target(EsVersion::latest()),
            cm: cm.clone(),
            comments: Some(comments as &dyn Comments),
            wr,
        };
        emitter.emit_module(module)?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Returns the 1-indexed line and column of the start of `span`.
fn line_col(cm: &SourceMap, span: Span) -> (usize, usize) {
    let loc = cm.lookup_char_pos(span.lo);
    (loc.line, loc.col.0 + 1)
}

fn parse_error(cm: &SourceMap, path: &Utf8Path, span: Span, message: String) -> DriverError {
    let (line, column) = line_col(cm, span);
    DriverError::Parse {
        path: path.to_owned(),
        line,
        column,
        message,
    }
}
