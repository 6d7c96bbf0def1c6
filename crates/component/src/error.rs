//! Error types for pipeline components.

use cicd_pipeline::CompileError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for component operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, synthesizing or writing a pipeline.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// One or more workflows failed to compile.
    #[error("{} workflow(s) failed to compile", .errors.len())]
    #[diagnostic(
        code(cicd::component::compile),
        help("No files were written; fix every reported problem and run again")
    )]
    Compile {
        /// Every workflow error, in synthesis order
        #[related]
        errors: Vec<CompileError>,
    },

    /// The pipeline definition could not be parsed.
    #[error("invalid pipeline definition {}: {message}", .path.display())]
    #[diagnostic(code(cicd::component::definition))]
    Definition {
        /// Definition file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// The definition file extension is not a supported format.
    #[error("unsupported pipeline definition format: {}", .path.display())]
    #[diagnostic(
        code(cicd::component::unsupported_format),
        help("Use a .yml, .yaml or .toml file")
    )]
    UnsupportedFormat {
        /// Definition file
        path: PathBuf,
    },

    /// A generated path would escape the output directory.
    #[error("refusing to write outside the output directory: {}", .path.display())]
    #[diagnostic(
        code(cicd::component::unsafe_path),
        help("Generated paths must be relative and must not contain '..'")
    )]
    UnsafePath {
        /// Offending generated path
        path: PathBuf,
    },

    /// Generated files on disk differ from the compiled output.
    #[error("{} generated file(s) are missing or out of date", .paths.len())]
    #[diagnostic(
        code(cicd::component::stale),
        help("Run `cicd compile` and commit the result")
    )]
    Stale {
        /// Files that need regenerating
        paths: Vec<PathBuf>,
    },

    /// IO error during file operations.
    #[error("IO error on {}: {source}", .path.display())]
    #[diagnostic(code(cicd::component::io))]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        Self::Compile { errors: vec![err] }
    }
}
