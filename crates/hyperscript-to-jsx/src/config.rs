//! Configuration loading.

use crate::cli::Args;
use camino::{Utf8Path, Utf8PathBuf};
use hyperscript_jsx::TransformOptions;
use serde::Deserialize;
use std::fs;
use thiserror::Error;

/// The config file looked up in the working directory.
pub const CONFIG_FILE: &str = "hyperscript-to-jsx.json";

/// Extensions processed when the config does not list any.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The config file path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`Config`].
    #[error("invalid config {path}: {source}")]
    Parse {
        /// The config file path.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Project configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Options passed to the transform.
    #[serde(flatten)]
    pub transform: TransformOptions,

    /// File extensions to process, with or without the leading dot.
    pub extensions: Vec<String>,

    /// Glob patterns to ignore.
    pub ignore: Vec<String>,
}

impl Config {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Finds and loads the config file in `dir`, if there is one.
    pub fn find(dir: &Utf8Path) -> Result<Option<(Utf8PathBuf, Self)>, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path).map(|config| Some((path, config)))
        } else {
            Ok(None)
        }
    }

    /// Applies command-line flags on top of the file values.
    pub fn merge_args(mut self, args: &Args) -> Self {
        let transform = &mut self.transform;
        if let Some(builder) = &args.builder {
            transform.builder = builder.as_str().into();
        }
        if args.require_import {
            transform.require_import = true;
        }
        if !args.import_source.is_empty() {
            transform.import_sources = args
                .import_source
                .iter()
                .map(|source| source.as_str().into())
                .collect();
        }
        if let Some(class_attribute) = &args.class_attribute {
            transform.class_attribute = class_attribute.as_str().into();
        }
        if args.prune_import {
            transform.prune_import = true;
        }
        self.ignore.extend(args.ignore.iter().cloned());
        self
    }

    /// Returns the file extensions to process, without leading dots.
    pub fn file_extensions(&self) -> Vec<&str> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.to_vec()
        } else {
            self.extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.'))
                .collect()
        }
    }
}
