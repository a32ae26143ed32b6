use std::path::PathBuf;
use thiserror::Error;

/// Failures while acquiring one piece of a snapshot.
///
/// These never escape the reader: the affected device or mount is dropped
/// from the snapshot and the error is logged.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed diskstats line: {0:?}")]
    MalformedLine(String),

    #[error("statvfs({mount}) failed: {source}")]
    Statvfs {
        mount:  String,
        #[source]
        source: nix::errno::Errno,
    },
}

impl CollectError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectError::Read { path: path.into(), source }
    }
}
