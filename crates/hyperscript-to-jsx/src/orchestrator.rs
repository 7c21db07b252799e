//! Main orchestration logic.

use crate::cli::{Args, Mode, OutputFormat};
use crate::config::Config;
use crate::error::DriverError;
use crate::output::{FileReport, Formatter, RunSummary};
use crate::source::transform_source;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use hyperscript_jsx::TransformOptions;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::ffi::OsStr;
use std::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Directories skipped during discovery unless named explicitly.
const DEFAULT_IGNORES: &[&str] = &["**/node_modules/**", "**/dist/**", "**/build/**"];

/// Transforms every file named by `args` and prints the results.
pub fn run(args: Args) -> Result<RunSummary, DriverError> {
    let config = load_config(&args)?.merge_args(&args);
    let ignore_set = build_ignore_set(&config.ignore)?;
    let extensions = config.file_extensions();
    let discovered = discover_files(&args.paths, &extensions, &ignore_set);
    info!(
        files = discovered.files.len(),
        non_utf8 = discovered.non_utf8.len(),
        "discovered source files"
    );

    let mode = args.mode();
    let options = &config.transform;
    let mut reports: Vec<FileReport> = discovered
        .non_utf8
        .into_iter()
        .map(|lossy| {
            let shown_path = Utf8PathBuf::from(lossy.as_str());
            FileReport::failed(shown_path, DriverError::NonUtf8Path(lossy).to_string())
        })
        .collect();
    reports.par_extend(
        discovered
            .files
            .par_iter()
            .map(|path| process_file(path, options, mode)),
    );

    let summary = RunSummary::from_reports(&reports, mode);
    let formatter = Formatter::new(args.output, mode, args.report);

    match args.output {
        OutputFormat::Json => println!("{}", formatter.format(&reports)),
        OutputFormat::Human if mode == Mode::Print => {
            print_code(&reports);
            eprint!("{}", formatter.format(&reports));
            eprintln!("{}", summary.format());
        }
        OutputFormat::Human => {
            print!("{}", formatter.format(&reports));
            println!("{}", summary.format());
        }
    }

    Ok(summary)
}

fn load_config(args: &Args) -> Result<Config, DriverError> {
    if let Some(path) = &args.config {
        return Ok(Config::load(path)?);
    }
    let cwd = std::env::current_dir()
        .ok()
        .and_then(|dir| Utf8PathBuf::try_from(dir).ok())
        .unwrap_or_else(|| Utf8PathBuf::from("."));
    match Config::find(&cwd)? {
        Some((path, config)) => {
            debug!(%path, "loaded config");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, DriverError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns
        .iter()
        .map(String::as_str)
        .chain(DEFAULT_IGNORES.iter().copied())
    {
        let glob = Glob::new(pattern).map_err(|e| DriverError::InvalidGlob(e.to_string()))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| DriverError::InvalidGlob(e.to_string()))
}

/// Files found by [`discover_files`].
#[derive(Debug, Default)]
struct Discovered {
    /// Files to process, in discovery order.
    files: Vec<Utf8PathBuf>,
    /// Source files skipped because their path is not valid UTF-8, lossily
    /// decoded.
    non_utf8: Vec<String>,
}

/// Expands `paths` into the files to process.
///
/// Directories are walked in file-name order, keeping files with a known
/// extension whose path relative to the directory is not ignored. Files
/// named directly are always kept.
fn discover_files(paths: &[Utf8PathBuf], extensions: &[&str], ignore_set: &GlobSet) -> Discovered {
    let mut discovered = Discovered::default();

    for root in paths {
        if !root.is_dir() {
            discovered.files.push(root.clone());
            continue;
        }

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.into_path();
            let known = path
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| extensions.contains(&ext));
            let relative = path.strip_prefix(root).unwrap_or(&path);
            if !known || ignore_set.is_match(relative) {
                continue;
            }
            match Utf8PathBuf::try_from(path) {
                Ok(path) => discovered.files.push(path),
                Err(err) => discovered
                    .non_utf8
                    .push(err.as_path().to_string_lossy().into_owned()),
            }
        }
    }

    let mut seen = FxHashSet::default();
    discovered
        .files
        .retain(|path| seen.insert(display_path(path).to_owned()));
    discovered
}

/// Strips a leading `./` so reported paths read naturally.
fn display_path(path: &Utf8Path) -> &Utf8Path {
    path.strip_prefix(".").unwrap_or(path)
}

fn process_file(path: &Utf8Path, options: &TransformOptions, mode: Mode) -> FileReport {
    let shown_path = display_path(path).to_owned();

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(source) => {
            let err = DriverError::Read {
                path: shown_path.clone(),
                source,
            };
            return FileReport::failed(shown_path, err.to_string());
        }
    };

    let transformed = match transform_source(&shown_path, source.clone(), options) {
        Ok(transformed) => transformed,
        Err(err) => {
            debug!(path = %shown_path, error = %err, "file not transformed");
            return FileReport::failed(shown_path, err.to_string());
        }
    };

    let changed = transformed.report.changed();
    if changed && mode == Mode::Write {
        if let Err(source) = fs::write(path, &transformed.code) {
            let err = DriverError::Write {
                path: shown_path.clone(),
                source,
            };
            return FileReport::failed(shown_path, err.to_string());
        }
    }

    let code = match mode {
        Mode::Print if changed => Some(transformed.code),
        Mode::Print => Some(source),
        Mode::Write | Mode::Check => None,
    };

    FileReport {
        path: shown_path,
        changed,
        transformed: transformed.report.transformed,
        import_pruned: transformed.report.import_pruned,
        skipped: transformed.skipped,
        error: None,
        code,
    }
}

/// Writes transformed code to stdout, with a path header per file when
/// there is more than one.
fn print_code(reports: &[FileReport]) {
    let with_headers = reports.len() > 1;
    for report in reports {
        let Some(code) = &report.code else {
            continue;
        };
        if with_headers {
            println!("// {}", report.path);
        }
        print!("{}", code);
        if !code.ends_with('\n') {
            println!();
        }
    }
}
