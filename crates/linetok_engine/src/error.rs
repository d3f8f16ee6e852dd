use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device inventory failed to initialize: {0}")]
    Init(String),
    #[error("device count query failed: {0}")]
    Query(String),
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("missing required argument: {0}")]
    MissingArgument(String),
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },
    #[error(transparent)]
    DeviceQuery(#[from] DeviceError),
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DriverError {
    /// Classify an io error raised while accessing `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => DriverError::FileNotFound { path },
            io::ErrorKind::PermissionDenied => DriverError::PermissionDenied { path },
            _ => DriverError::Io { path, source },
        }
    }

    /// True for the file-access kinds (`FileNotFound`, `PermissionDenied`).
    pub fn is_file_access(&self) -> bool {
        matches!(
            self,
            DriverError::FileNotFound { .. } | DriverError::PermissionDenied { .. }
        )
    }

    /// Process exit status for this error: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            DriverError::MissingArgument(_) => 2,
            _ => 1,
        }
    }
}
