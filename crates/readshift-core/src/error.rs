//! Error types for readshift-core.
//!
//! Scoring and augmentation are total and never fail; errors only arise
//! while loading configuration or the on-disk lexical resources.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a pronunciation lexicon or a
/// semantic network from disk.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// Reading a resource file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file being read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line in a resource file could not be parsed.
    #[error("{path}:{line}: {message}")]
    Parse {
        /// The file being parsed.
        path: Utf8PathBuf,
        /// 1-indexed line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A configured resource path does not exist.
    #[error("resource not found: {path}")]
    Missing {
        /// The configured path.
        path: Utf8PathBuf,
    },
}

/// Result type alias using [`LexiconError`].
pub type LexiconResult<T> = Result<T, LexiconError>;
