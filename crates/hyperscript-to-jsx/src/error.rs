//! Driver errors.

use crate::config::ConfigError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while processing files.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Failed to read a source file.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a transformed file.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The source does not parse.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        /// The file path.
        path: Utf8PathBuf,
        /// 1-indexed line number.
        line: usize,
        /// 1-indexed column number.
        column: usize,
        /// The parser message.
        message: String,
    },

    /// Code generation failed.
    #[error("failed to print {path}: {source}")]
    Emit {
        /// The file path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// No parser syntax is known for the file extension.
    #[error("unsupported file type: {0}")]
    UnsupportedFile(Utf8PathBuf),

    /// The file has builder calls but its syntax does not allow JSX.
    #[error("{0}: JSX is not allowed in this file type; rename it to .tsx to transform it")]
    JsxNotAllowed(Utf8PathBuf),

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
