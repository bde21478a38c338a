//! Error types for the fix pipeline.
//!
//! Resolver errors are fatal for the whole run: a wildcard import is either
//! rewritten together with all of its usages, or not at all.

use crate::buffer::BufferError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while resolving a wildcard import.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The line does not hold a `from <module> import *` statement.
    #[error("line {line} is not a supported wildcard import: {text:?}")]
    MalformedWildcardImport {
        /// 0-based line index.
        line: usize,
        /// Line text without its terminator.
        text: String,
    },

    /// The imported module has no source file.
    #[error("module '{module}' not found at {}", .path.display())]
    ModuleNotFound {
        /// Dotted module path.
        module: String,
        /// File that was looked for.
        path: PathBuf,
    },

    /// The module file exists but could not be read.
    #[error("failed to read module file {}: {source}", .path.display())]
    Io {
        /// Module file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Buffer access failed.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Failure while dispatching diagnostics.
#[derive(Debug, Error)]
pub enum FixError {
    /// Buffer access failed.
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// Wildcard-import resolution failed; nothing was written.
    #[error("cannot fix wildcard import on line {}: {source}", .line + 1)]
    Resolve {
        /// 0-based line index of the diagnostic.
        line: usize,
        /// Resolver error.
        #[source]
        source: ResolveError,
    },
}
