use crate::core::error::{FsError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    dunce::canonicalize(path.as_ref()).unwrap_or_else(|_| path.as_ref().to_path_buf())
}

// Joins a relative path onto the working directory. Symlinks and `..` are left alone.
pub fn absolute_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(dunce::simplified(&joined).components().collect())
}

pub fn makedir<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    makedir_with(path, true)
}

pub fn makedir_with<P: AsRef<Path>>(path: P, parents: bool) -> Result<PathBuf> {
    let path = path.as_ref();
    let created = if parents {
        fs::create_dir_all(path)
    } else {
        fs::create_dir(path)
    };

    match created {
        Ok(()) => log::debug!("created directory {}", path.display()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => {}
        Err(e) => return Err(classify_mkdir_error(e, path)),
    }

    absolute_path(path)
}

fn classify_mkdir_error(err: std::io::Error, path: &Path) -> FsError {
    let blocker = path
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .find(|p| p.exists() && !p.is_dir());

    match blocker {
        Some(file) => FsError::NotADirectory(file.to_path_buf()),
        None => FsError::from_io(err, path),
    }
}
