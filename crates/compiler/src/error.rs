//! Fatal error types.
//!
//! Line-level problems never end up here: the grammar is permissive and
//! dropped lines are reported as [`crate::parser::Diagnostic`]s instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors at the edges of the compiler (files, settings, arguments, output).
#[derive(Error, Debug)]
pub enum GeneError {
    /// Reading or writing a file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A settings file exists but is not valid JSON for `CompilerSettings`.
    #[error("invalid settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding a document failed.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The input contained no statement lines at all.
    #[error("no GENE statements found in input")]
    EmptyInput,

    /// A flag that takes a value was the last argument.
    #[error("missing value for {0}")]
    MissingValue(String),

    /// A flag value could not be interpreted.
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),

    /// No input path was given on the command line.
    #[error("no input file given (use '-' for stdin)")]
    MissingInput,

    #[error("GLB output is binary and needs --out <path>")]
    GlbRequiresOutput,
}

impl GeneError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeneError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for compiler operations.
pub type GeneResult<T> = Result<T, GeneError>;
