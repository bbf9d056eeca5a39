// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of one descriptor (or of the whole run, for the control file).
#[derive(Debug, Error)]
pub enum AlterError {
    #[error("The control file '{}' was not found.", .0.display())]
    ControlFileMissing(PathBuf),

    #[error("Exception reading file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Exception writing html file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("table {index} not found in {} ({found} tables present)", path.display())]
    TableNotFound { path: PathBuf, index: usize, found: usize },

    #[error("{}: {source}", path.display())]
    Transform { path: PathBuf, source: TransformError },

    #[error("{}: {source}", path.display())]
    Augment { path: PathBuf, source: AugmentError },
}

/// Raised by the search/sort/paging injector. Nothing is mutated when these
/// are returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AugmentError {
    #[error("no <link rel=\"stylesheet\"> element to insert the DataTables stylesheet after")]
    NoStylesheetAnchor,

    #[error("element is not a <table>")]
    NotATable,
}

/// Raised by a header/row edit step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("table edit failed: {0}")]
    Failed(String),
}

/// Recoverable control-file problems. The value falls back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error(
        "pageSize attribute of <behavior> element not found or not an integer ({}). Defaults to {fallback} table rows per page.",
        describe(.value)
    )]
    PageSize { value: Option<String>, fallback: i32 },

    #[error("tableIndex of descriptor {entry} not found or not a positive integer ({}). Defaults to table {fallback}.", describe(.value))]
    TableIndex { entry: usize, value: Option<String>, fallback: usize },
}

fn describe(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("got {v:?}"),
        None => s!("missing"),
    }
}
