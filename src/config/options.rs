// src/config/options.rs
use std::path::{Path, PathBuf};

use log::LevelFilter;

use super::consts::DEFAULT_CONTROL_FILE;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Control file as given (or the default name).
    pub control_file: PathBuf,
    /// Run every step except writing documents back.
    pub dry_run: bool,
    pub log_level: LevelFilter,
    /// Also append log lines to this file.
    pub log_file: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            control_file: PathBuf::from(DEFAULT_CONTROL_FILE),
            dry_run: false,
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl RunOptions {
    /// Find the control file: as given (relative to the working directory),
    /// then next to the running executable for relative paths.
    pub fn resolve_control_file(&self) -> Option<PathBuf> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));
        resolve_in(&self.control_file, exe_dir.as_deref())
    }
}

pub fn resolve_in(path: &Path, install_dir: Option<&Path>) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.is_relative() {
        if let Some(dir) = install_dir {
            let candidate = dir.join(path);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
