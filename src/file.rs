// src/file.rs

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::core::markup::Document;
use crate::error::AlterError;

/// Read a file as UTF-8 text. Invalid sequences are replaced rather than
/// failing the whole document.
pub fn read_text(path: &Path) -> Result<String, AlterError> {
    let bytes = fs::read(path).map_err(|source| AlterError::Read { path: path.to_path_buf(), source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn load_document(path: &Path) -> Result<Document, AlterError> {
    read_text(path).map(|s| Document::parse(&s))
}

/// Serialize `doc` as UTF-8 to `path`, creating parent directories.
pub fn save_document(doc: &Document, path: &Path) -> Result<PathBuf, AlterError> {
    let write_err = |source| AlterError::Write { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent).map_err(write_err)?;
        }
    }
    fs::write(path, doc.html()).map_err(write_err)?;
    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
