//! Error types emitted by the knapsack CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use knapsack_core::{ParseAlgorithmError, SolveError};
use thiserror::Error;

use crate::ParseError;

/// Errors emitted by the knapsack CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that also supplies it.
        env: &'static str,
    },
    /// The algorithm option named no known algorithm.
    #[error("{source}; expected auto or one of {expected}")]
    UnknownAlgorithm {
        /// Rejected name.
        #[source]
        source: ParseAlgorithmError,
        /// Accepted names, comma separated.
        expected: String,
    },
    /// The instance path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option name.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// The instance path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option name.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// The instance path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option name.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading the instance file failed.
    #[error("failed to read instance at {path:?}: {source}")]
    ReadInstance {
        /// Instance path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The instance text was malformed or invalid.
    #[error("failed to parse instance at {path:?}: {source}")]
    ParseInstance {
        /// Instance path.
        path: Utf8PathBuf,
        /// Parser failure.
        #[source]
        source: ParseError,
    },
    /// The solver rejected the instance or gave up.
    #[error("solver failed: {source}")]
    Solve {
        /// Solver failure.
        #[source]
        source: SolveError,
    },
    /// Serialising the JSON report failed.
    #[error("failed to serialise solution: {0}")]
    SerialiseSolution(#[source] serde_json::Error),
    /// Writing the output failed.
    #[error("failed to write solve output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
