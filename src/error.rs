use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Root directory problems. Fatal: there is nothing to process.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("Input directory does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to resolve input directory {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure of the external probe for a single file.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe tool '{0}' is not available on this host")]
    Unavailable(String),

    #[error("failed to launch probe tool: {0}")]
    Spawn(#[source] io::Error),

    #[error("probe exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("malformed probe output: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("file is unreadable: {0}")]
    Unreadable(#[source] io::Error),
}

/// A probe result that cannot be turned into a report row.
#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("container duration is missing")]
    MissingDuration,

    #[error("container duration is not a number: {0:?}")]
    InvalidDuration(String),

    #[error("path has no file name: {}", .0.display())]
    MissingFileName(PathBuf),
}

/// Everything that can go wrong for one file inside the worker pool.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("probe failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("normalization failed: {0}")]
    Normalize(#[from] NormalizationError),

    #[error("worker panicked: {0}")]
    Panicked(String),
}

/// Report output failures. Fatal.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create output file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write report row: {0}")]
    Write(#[from] csv::Error),

    #[error("Failed to flush report: {0}")]
    Flush(#[source] io::Error),
}

/// Errors that terminate a run.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
