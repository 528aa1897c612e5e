use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FsError {
    pub fn from_io<P: AsRef<Path>>(err: std::io::Error, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            ErrorKind::NotFound => FsError::NotFound(path),
            ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            ErrorKind::AlreadyExists => FsError::AlreadyExists(path),
            _ => FsError::Io(err),
        }
    }
}

impl From<regex::Error> for FsError {
    fn from(err: regex::Error) -> Self {
        FsError::InvalidDelimiter(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for FsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        FsError::Encoding(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FsError>;
