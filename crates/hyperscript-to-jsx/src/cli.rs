//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Rewrites hyperscript builder calls into JSX.
#[derive(Debug, Parser)]
#[command(name = "hyperscript-to-jsx")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Files or directories to transform
    #[arg(default_value = ".")]
    pub paths: Vec<Utf8PathBuf>,

    /// Identifier bound to the builder function [default: h]
    #[arg(long)]
    pub builder: Option<String>,

    /// Only transform files that import or require the builder
    #[arg(long = "require-import")]
    pub require_import: bool,

    /// Module that provides the builder (repeatable) [default: react-hyperscript]
    #[arg(long = "import-source")]
    pub import_source: Vec<String>,

    /// Attribute name emitted for tag classes [default: className]
    #[arg(long = "class-attribute")]
    pub class_attribute: Option<String>,

    /// Remove the builder import once it is unused
    #[arg(long = "prune-import")]
    pub prune_import: bool,

    /// Rewrite files in place instead of printing them
    #[arg(long, conflicts_with = "check")]
    pub write: bool,

    /// Exit with an error if any file would change
    #[arg(long)]
    pub check: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Glob patterns to ignore
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Path to a hyperscript-to-jsx.json config file
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// List builder calls that were left in place
    #[arg(long)]
    pub report: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output
    Json,
}

/// What to do with transformed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the transformed code to stdout.
    Print,
    /// Rewrite changed files in place.
    Write,
    /// Only report which files would change.
    Check,
}

impl Args {
    /// Returns the run mode selected by `--write` and `--check`.
    pub fn mode(&self) -> Mode {
        if self.write {
            Mode::Write
        } else if self.check {
            Mode::Check
        } else {
            Mode::Print
        }
    }
}
