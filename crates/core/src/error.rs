//! Error type returned by every step of a generation run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation run.
///
/// None of these are retried: the orchestrator stops at the first one and
/// hands it back unchanged.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No version directory matched, or the resolved document is missing.
    #[error("{0}")]
    SpecNotFound(String),

    /// The runtime or the generator CLI is unavailable.
    #[error("{0}")]
    PrerequisiteMissing(String),

    /// The generator exited with a non-zero status.
    #[error("Failed to generate PHP client: {output}")]
    GenerationFailed {
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured stdout followed by stderr.
        output: String,
    },

    /// The output and staging directories contain one another, so cleaning
    /// or relocating one would destroy the other.
    #[error(
        "Output directory {} and staging directory {} must not contain each other",
        .output.display(),
        .staging.display()
    )]
    OverlappingPaths {
        /// Final client source directory.
        output: PathBuf,
        /// Generator staging directory.
        staging: PathBuf,
    },

    /// A delete/create/copy/read on the local filesystem failed.
    #[error("Failed to {action} {}: {source}", .path.display())]
    Filesystem {
        /// What was being attempted, e.g. "remove directory".
        action: &'static str,
        /// The path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GenerateError>;
